//! Cart pose along the spline.
//!
//! The pose is a pure function of the global cursor and the control points;
//! [`CartState`] only owns the cursor and advances it once per tick.

use super::bezier::Curve3;
use super::config::{CartOptions, CursorWrap};
use super::core::{Point3, Quat, Transform, Vec3};
use super::error::TrackError;
use super::spline::Spline;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartPose {
    pub position: Point3,
    pub rotation: Quat,
}

impl CartPose {
    #[must_use]
    pub fn to_transform(self) -> Transform {
        Transform::from_rotation_translation(self.rotation, self.position)
    }

    /// Direction the cart faces, after the rotation offset.
    #[must_use]
    pub fn forward(self) -> Vec3 {
        self.rotation.mul_vec(Vec3::Z)
    }
}

/// Pose of the cart at global parameter `t_global`.
///
/// The integer part of the cursor selects the segment (clamped to the valid
/// range), the fractional part is the local parameter. With
/// `clamp_local_t` unset a cursor outside `[0, segment_count]` extrapolates
/// the first or last segment. Where the derivative vanishes, e.g. on an
/// ease-in handle, the cart faces along the nearest distinct handle instead.
pub fn cart_pose(spline: &Spline, t_global: f64, options: &CartOptions) -> Result<CartPose, TrackError> {
    let count = spline.control_points().len();
    if spline.is_empty() {
        return Err(TrackError::EmptyOrInsufficientInput { count });
    }

    let last = spline.segment_count() - 1;
    let index = if t_global <= 0.0 {
        0
    } else {
        (t_global.floor() as usize).min(last)
    };
    let mut local_t = t_global - index as f64;
    if options.clamp_local_t {
        local_t = local_t.clamp(0.0, 1.0);
    }

    let segment = spline
        .segment(index)
        .ok_or(TrackError::EmptyOrInsufficientInput { count })?;
    let tangent = match segment.tangent_at(local_t) {
        Ok(tangent) => tangent,
        Err(err) => segment.fallback_tangent(local_t).ok_or(err)?,
    };
    let point = segment.point_at(local_t);

    let up = options.up.normalized().unwrap_or(Vec3::Y);
    let facing = Quat::look_rotation(tangent, up).ok_or(TrackError::DegenerateTangent { t: t_global })?;

    Ok(CartPose {
        position: point + options.offset,
        rotation: facing * Quat::from_euler_degrees(options.rotation_offset),
    })
}

/// Persistent cart cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    cursor: f64,
    reported_insufficient: bool,
}

impl CartState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cursor(cursor: f64) -> Self {
        Self {
            cursor,
            reported_insufficient: false,
        }
    }

    #[must_use]
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn reset(&mut self) {
        self.cursor = 0.0;
    }

    /// Advances the cursor by `speed * dt` and evaluates the pose.
    ///
    /// Returns `None` when the tick is skipped: fewer than four control
    /// points (reported once until the input becomes valid again) or a
    /// segment whose control points all coincide.
    pub fn advance(&mut self, spline: &Spline, dt: f64, options: &CartOptions) -> Option<CartPose> {
        if spline.is_empty() {
            if !self.reported_insufficient {
                log::debug!(
                    "cart update skipped: {}",
                    TrackError::EmptyOrInsufficientInput {
                        count: spline.control_points().len()
                    }
                );
                self.reported_insufficient = true;
            }
            return None;
        }
        self.reported_insufficient = false;

        let step = options.speed * dt;
        if step.is_finite() {
            self.cursor += step;
        }

        let segments = spline.segment_count() as f64;
        self.cursor = match options.wrap {
            CursorWrap::Cyclic => self.cursor.rem_euclid(segments),
            CursorWrap::Clamp => self.cursor.clamp(0.0, segments),
        };

        match cart_pose(spline, self.cursor, options) {
            Ok(pose) => Some(pose),
            Err(err) => {
                log::debug!("cart update skipped: {err}");
                None
            }
        }
    }
}
