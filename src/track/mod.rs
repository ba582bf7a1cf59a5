mod bezier;
mod cart;
mod config;
mod core;
mod diagnostics;
mod engine;
mod error;
mod handles;
mod mesh;
mod spline;
mod tube;
mod view;

pub use bezier::{
    BezierCurve3, CubicBezier3, Curve3, bernstein_derivative, bezier_tangent, cubic_derivative,
    cubic_point, cubic_tangent, de_casteljau,
};
pub use cart::{CartPose, CartState, cart_pose};
pub use config::{
    CartOptions, CursorWrap, FALLBACK_RESOLUTION, MAX_RESOLUTION, MeshOptions, NormalMode, TrackConfig,
};
pub use self::core::{BBox, Point3, Quat, Tolerance, Transform, Vec3};
pub use diagnostics::TrackDiagnostics;
pub use engine::TrackEngine;
pub use error::{ConfigError, TrackError};
pub use handles::{mirror_handle, mirror_partner};
pub use mesh::TrackMesh;
pub use spline::{
    MIN_CONTROL_POINTS, SEGMENT_STRIDE, Spline, SplineCursor, sample_parameters, segment_count_for,
};
pub use tube::{build_spline_mesh, build_track_mesh};
pub use view::{CameraFrame, clamp_zoom, frame_points};

/// Rebuild-on-demand entry point: control points in, immutable mesh out.
#[must_use]
pub fn rebuild(control_points: &[Point3], options: &MeshOptions) -> (TrackMesh, TrackDiagnostics) {
    build_track_mesh(control_points, options)
}

#[cfg(test)]
mod tests;
