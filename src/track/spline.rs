//! Chaining of an ordered control-point list into cubic segments.
//!
//! Segments share endpoints: segment `i` uses control points
//! `3i, 3i+1, 3i+2, 3i+3`. A list of `n` points therefore holds
//! `(n - 1) / 3` segments; the remainder is excess input and is ignored.

use super::bezier::{Curve3, CubicBezier3};
use super::core::{Point3, Vec3};
use super::error::TrackError;

/// Control points consumed per segment after the first shared point.
pub const SEGMENT_STRIDE: usize = 3;

/// Smallest list that forms one complete segment.
pub const MIN_CONTROL_POINTS: usize = SEGMENT_STRIDE + 1;

const SAMPLE_EPS: f64 = 1e-9;

/// Number of complete cubic segments formed by `len` control points.
#[must_use]
pub const fn segment_count_for(len: usize) -> usize {
    if len < MIN_CONTROL_POINTS {
        0
    } else {
        (len - 1) / SEGMENT_STRIDE
    }
}

/// Local parameters sampled per segment at the given step.
///
/// Always starts at `0` and ends at exactly `1`: when the step does not
/// divide the unit interval, a final partial step is appended.
#[must_use]
pub fn sample_parameters(resolution: f64) -> Vec<f64> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return vec![0.0, 1.0];
    }
    let steps = (1.0 / resolution + SAMPLE_EPS).floor() as usize;
    let mut params: Vec<f64> = (0..=steps)
        .map(|i| (i as f64 * resolution).min(1.0))
        .collect();
    if params.last().is_some_and(|&t| t < 1.0 - SAMPLE_EPS) {
        params.push(1.0);
    }
    params
}

/// Position of a global cursor on the spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineCursor {
    pub segment: usize,
    pub local_t: f64,
    /// The global cursor was outside `[0, segment_count]` and got clamped.
    pub clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spline {
    control_points: Vec<Point3>,
    segment_count: usize,
}

impl Spline {
    #[must_use]
    pub fn new(control_points: Vec<Point3>) -> Self {
        let segment_count = segment_count_for(control_points.len());
        Self {
            control_points,
            segment_count,
        }
    }

    #[must_use]
    pub fn from_slice(control_points: &[Point3]) -> Self {
        Self::new(control_points.to_vec())
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segment_count == 0
    }

    /// All control points as supplied, including any excess tail.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Control points that belong to a complete segment.
    #[must_use]
    pub fn used_control_points(&self) -> &[Point3] {
        if self.segment_count == 0 {
            &[]
        } else {
            &self.control_points[..=self.segment_count * SEGMENT_STRIDE]
        }
    }

    /// Trailing control points that do not complete a segment.
    #[must_use]
    pub fn excess_points(&self) -> usize {
        if self.segment_count == 0 {
            0
        } else {
            self.control_points.len() - self.used_control_points().len()
        }
    }

    /// Input problems in the order they matter to the caller.
    #[must_use]
    pub fn issues(&self) -> Vec<TrackError> {
        let count = self.control_points.len();
        if self.segment_count == 0 {
            return vec![TrackError::EmptyOrInsufficientInput { count }];
        }
        let excess = self.excess_points();
        if excess > 0 {
            vec![TrackError::MalformedControlPointCount { count, excess }]
        } else {
            Vec::new()
        }
    }

    /// Segment `index`, or `None` when the spline has no segments.
    ///
    /// Indices past the end select the last segment, and control-point
    /// indices past the array repeat the last point.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<CubicBezier3> {
        if self.segment_count == 0 {
            return None;
        }
        let index = if index >= self.segment_count {
            log::debug!(
                "{}",
                TrackError::IndexOverrun {
                    requested: index,
                    last: self.segment_count - 1
                }
            );
            self.segment_count - 1
        } else {
            index
        };
        let base = index * SEGMENT_STRIDE;
        Some(CubicBezier3::new(
            self.control_point(base),
            self.control_point(base + 1),
            self.control_point(base + 2),
            self.control_point(base + 3),
        ))
    }

    fn control_point(&self, index: usize) -> Point3 {
        let last = self.control_points.len() - 1;
        if index > last {
            log::debug!("{}", TrackError::IndexOverrun { requested: index, last });
        }
        self.control_points[index.min(last)]
    }

    pub fn segments(&self) -> impl Iterator<Item = CubicBezier3> + '_ {
        (0..self.segment_count).filter_map(|i| self.segment(i))
    }

    /// Splits a global cursor into segment index and local parameter.
    ///
    /// The cursor is clamped into `[0, segment_count]`; `segment_count`
    /// itself maps to the end of the last segment.
    #[must_use]
    pub fn locate(&self, t_global: f64) -> Option<SplineCursor> {
        if self.segment_count == 0 {
            return None;
        }
        let max = self.segment_count as f64;
        let t = if t_global.is_finite() { t_global } else { 0.0 };
        let clamped_t = t.clamp(0.0, max);
        let segment = (clamped_t.floor() as usize).min(self.segment_count - 1);
        Some(SplineCursor {
            segment,
            local_t: clamped_t - segment as f64,
            clamped: clamped_t != t_global,
        })
    }

    #[must_use]
    pub fn point_at(&self, t_global: f64) -> Option<Point3> {
        let cursor = self.locate(t_global)?;
        self.segment(cursor.segment)
            .map(|segment| segment.point_at(cursor.local_t))
    }

    pub fn tangent_at(&self, t_global: f64) -> Result<Vec3, TrackError> {
        let count = self.control_points.len();
        let cursor = self
            .locate(t_global)
            .ok_or(TrackError::EmptyOrInsufficientInput { count })?;
        let segment = self
            .segment(cursor.segment)
            .ok_or(TrackError::EmptyOrInsufficientInput { count })?;
        segment.tangent_at(cursor.local_t)
    }

    /// Sample positions per segment at the mesher's step, for previews.
    #[must_use]
    pub fn sample_points(&self, resolution: f64) -> Vec<Vec<Point3>> {
        let params = sample_parameters(resolution);
        self.segments()
            .map(|segment| params.iter().map(|&t| segment.point_at(t)).collect())
            .collect()
    }

    /// Handle lines `(p0, p1)` and `(p2, p3)` of each segment.
    #[must_use]
    pub fn handle_lines(&self) -> Vec<[(Point3, Point3); 2]> {
        self.segments()
            .map(|s| [(s.p0, s.p1), (s.p2, s.p3)])
            .collect()
    }
}
