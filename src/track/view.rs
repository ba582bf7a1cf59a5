//! Editor camera framing of the waypoint cloud.

use super::core::{BBox, Point3, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub position: Point3,
    pub rotation: Quat,
    /// Distance from `position` to the bounds center.
    pub distance: f64,
}

impl CameraFrame {
    #[must_use]
    pub fn forward(self) -> Vec3 {
        self.rotation.mul_vec(Vec3::Z)
    }
}

/// Levels the camera (yaw kept, pitch and roll dropped) and backs it away from
/// the center of the points' bounds far enough to fit them in a vertical
/// field of view of `fov_y_degrees`.
///
/// Returns `None` for no points or a field of view outside `(0, 180)`.
#[must_use]
pub fn frame_points(points: &[Point3], fov_y_degrees: f64, yaw_degrees: f64) -> Option<CameraFrame> {
    if !(fov_y_degrees > 0.0 && fov_y_degrees < 180.0) || !yaw_degrees.is_finite() {
        return None;
    }
    let bounds = BBox::from_points(points)?;
    let center = bounds.center();

    let rotation = Quat::from_euler_degrees(Vec3::new(0.0, yaw_degrees, 0.0));
    let yaw = yaw_degrees.to_radians();
    let forward = Vec3::new(yaw.sin(), 0.0, yaw.cos());

    let distance = bounds.half_extents().length() / (2.0 * (fov_y_degrees.to_radians() * 0.5).tan());

    Some(CameraFrame {
        position: center - forward * distance,
        rotation,
        distance,
    })
}

/// Moves `position` along `forward` by `increment`, unless that would put it
/// closer to the origin than `min` or farther than `max`.
#[must_use]
pub fn clamp_zoom(position: Point3, forward: Vec3, increment: f64, min: f64, max: f64) -> Point3 {
    let Some(direction) = forward.normalized() else {
        return position;
    };
    let candidate = position + direction * increment;
    let distance = candidate.to_vec3().length();
    if distance >= min && distance <= max {
        candidate
    } else {
        position
    }
}
