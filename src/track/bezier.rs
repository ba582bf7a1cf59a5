//! Bézier evaluation primitives.
//!
//! Points are evaluated with De Casteljau's algorithm for any control-point
//! count. Tangents come from either the closed-form cubic derivative or the
//! general Bernstein derivative sum; both agree to floating-point precision.
//!
//! The parameter is never clamped here. Values outside `[0, 1]` extrapolate
//! the polynomial, so callers that need a hard boundary clamp first.

use super::core::{Point3, Tolerance, Vec3};
use super::error::TrackError;

pub trait Curve3 {
    fn point_at(&self, t: f64) -> Point3;

    fn derivative_at(&self, t: f64) -> Vec3;

    #[must_use]
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    /// Unit tangent, or [`TrackError::DegenerateTangent`] when the derivative
    /// vanishes (e.g. coincident control points).
    fn tangent_at(&self, t: f64) -> Result<Vec3, TrackError> {
        normalize_tangent(self.derivative_at(t), t)
    }
}

/// Evaluates the Bézier curve defined by `points` at `t`.
///
/// Returns `None` for an empty slice; a single point is returned as is.
#[must_use]
pub fn de_casteljau(points: &[Point3], t: f64) -> Option<Point3> {
    match points {
        [] => None,
        [only] => Some(*only),
        [p0, p1, p2, p3] => {
            let mut scratch = [*p0, *p1, *p2, *p3];
            Some(reduce_in_place(&mut scratch, t))
        }
        _ => {
            let mut scratch = points.to_vec();
            Some(reduce_in_place(&mut scratch, t))
        }
    }
}

fn reduce_in_place(scratch: &mut [Point3], t: f64) -> Point3 {
    for level in (1..scratch.len()).rev() {
        for i in 0..level {
            scratch[i] = scratch[i].lerp(scratch[i + 1], t);
        }
    }
    scratch[0]
}

/// Closed-form cubic Bernstein polynomial.
#[must_use]
pub fn cubic_point(p0: Point3, p1: Point3, p2: Point3, p3: Point3, t: f64) -> Point3 {
    let u = 1.0 - t;
    let u2 = u * u;
    let t2 = t * t;
    let v = p0.to_vec3().mul_scalar(u2 * u)
        + p1.to_vec3().mul_scalar(3.0 * u2 * t)
        + p2.to_vec3().mul_scalar(3.0 * u * t2)
        + p3.to_vec3().mul_scalar(t2 * t);
    Point3::new(v.x, v.y, v.z)
}

/// Closed-form first derivative of a cubic Bézier (not normalized).
#[must_use]
pub fn cubic_derivative(p0: Point3, p1: Point3, p2: Point3, p3: Point3, t: f64) -> Vec3 {
    let u = 1.0 - t;
    let t2 = t * t;
    p0.to_vec3().mul_scalar(-3.0 * u * u)
        + p1.to_vec3().mul_scalar(3.0 * (3.0 * t2 - 4.0 * t + 1.0))
        + p2.to_vec3().mul_scalar(3.0 * (2.0 * t - 3.0 * t2))
        + p3.to_vec3().mul_scalar(3.0 * t2)
}

/// First derivative of a Bézier of degree `points.len() - 1`:
/// `Σ n · (p[i+1] - p[i]) · C(n-1, i) · (1-t)^(n-1-i) · t^i`.
#[must_use]
pub fn bernstein_derivative(points: &[Point3], t: f64) -> Vec3 {
    if points.len() < 2 {
        return Vec3::ZERO;
    }
    let n = points.len() - 1;
    let u = 1.0 - t;
    let degree = n as f64;

    let mut sum = Vec3::ZERO;
    for (i, pair) in points.windows(2).enumerate() {
        let basis = binomial(n - 1, i) * powi(u, n - 1 - i) * powi(t, i);
        sum = sum + pair[1].sub_point(pair[0]).mul_scalar(degree * basis);
    }
    sum
}

/// Unit tangent of an arbitrary-degree Bézier.
pub fn bezier_tangent(points: &[Point3], t: f64) -> Result<Vec3, TrackError> {
    normalize_tangent(bernstein_derivative(points, t), t)
}

/// Unit tangent of a cubic Bézier via the closed-form derivative.
pub fn cubic_tangent(p0: Point3, p1: Point3, p2: Point3, p3: Point3, t: f64) -> Result<Vec3, TrackError> {
    normalize_tangent(cubic_derivative(p0, p1, p2, p3, t), t)
}

fn normalize_tangent(derivative: Vec3, t: f64) -> Result<Vec3, TrackError> {
    if Tolerance::ZERO_LENGTH.is_zero_vec3(derivative) {
        return Err(TrackError::DegenerateTangent { t });
    }
    derivative
        .normalized()
        .ok_or(TrackError::DegenerateTangent { t })
}

fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

fn powi(base: f64, exp: usize) -> f64 {
    i32::try_from(exp).map_or(0.0, |e| base.powi(e))
}

// ─────────────────────────────────────────────────────────────────────────────
// Curves
// ─────────────────────────────────────────────────────────────────────────────

/// A Bézier curve of arbitrary degree.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve3 {
    control_points: Vec<Point3>,
}

impl BezierCurve3 {
    /// Returns `None` for an empty control-point list.
    #[must_use]
    pub fn new(control_points: Vec<Point3>) -> Option<Self> {
        if control_points.is_empty() {
            None
        } else {
            Some(Self { control_points })
        }
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }
}

impl Curve3 for BezierCurve3 {
    fn point_at(&self, t: f64) -> Point3 {
        de_casteljau(&self.control_points, t).unwrap_or(Point3::ORIGIN)
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        bernstein_derivative(&self.control_points, t)
    }
}

/// One cubic piece `[p0, p1, p2, p3]` of a track spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier3 {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl CubicBezier3 {
    #[must_use]
    pub const fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    #[must_use]
    pub const fn control_points(&self) -> [Point3; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Closed-form Bernstein evaluation; matches [`Curve3::point_at`].
    #[must_use]
    pub fn point_at_bernstein(&self, t: f64) -> Point3 {
        cubic_point(self.p0, self.p1, self.p2, self.p3, t)
    }

    /// Direction the curve leaves a vanishing-derivative parameter along,
    /// taken from the nearest distinct control points of the closer end.
    /// `None` when all four points coincide.
    #[must_use]
    pub fn fallback_tangent(&self, t: f64) -> Option<Vec3> {
        let chords = if t < 0.5 {
            [self.p1 - self.p0, self.p2 - self.p0, self.p3 - self.p0]
        } else {
            [self.p3 - self.p2, self.p3 - self.p1, self.p3 - self.p0]
        };
        chords
            .into_iter()
            .filter(|chord| !Tolerance::ZERO_LENGTH.is_zero_vec3(*chord))
            .find_map(Vec3::normalized)
    }
}

impl Curve3 for CubicBezier3 {
    fn point_at(&self, t: f64) -> Point3 {
        let mut scratch = self.control_points();
        reduce_in_place(&mut scratch, t)
    }

    fn derivative_at(&self, t: f64) -> Vec3 {
        cubic_derivative(self.p0, self.p1, self.p2, self.p3, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_matches_pascal_row() {
        let row: Vec<f64> = (0..=4).map(|k| binomial(4, k)).collect();
        assert_eq!(row, vec![1.0, 4.0, 6.0, 4.0, 1.0]);
        assert_eq!(binomial(2, 3), 0.0);
    }

    #[test]
    fn linear_curve_derivative_is_chord() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        assert_eq!(bernstein_derivative(&points, 0.3), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(bernstein_derivative(&points[..1], 0.3), Vec3::ZERO);
    }
}
