//! Rebuild-on-demand facade over the spline, mesher and cart.
//!
//! The host pushes control points and configuration whenever it notices a
//! change and calls [`TrackEngine::rebuild`]; the mesh is only regenerated
//! when something it depends on actually changed.

use super::cart::{CartPose, CartState};
use super::config::TrackConfig;
use super::core::Point3;
use super::diagnostics::TrackDiagnostics;
use super::error::ConfigError;
use super::handles::mirror_handle;
use super::mesh::TrackMesh;
use super::spline::Spline;
use super::tube::build_spline_mesh;
use super::view::{CameraFrame, frame_points};

#[derive(Debug, Clone)]
pub struct TrackEngine {
    config: TrackConfig,
    spline: Spline,
    mesh: TrackMesh,
    diagnostics: TrackDiagnostics,
    cart: CartState,
    dirty: bool,
}

impl TrackEngine {
    pub fn new(config: TrackConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            spline: Spline::default(),
            mesh: TrackMesh::empty(),
            diagnostics: TrackDiagnostics::new(),
            cart: CartState::new(),
            dirty: true,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Replaces the configuration. An invalid config is rejected and the
    /// previous one stays in effect.
    pub fn set_config(&mut self, config: TrackConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config != self.config {
            self.config = config;
            self.dirty = true;
        }
        Ok(())
    }

    /// Replaces the control points. The list may change length between
    /// calls.
    pub fn set_control_points(&mut self, points: Vec<Point3>) {
        if points.as_slice() != self.spline.control_points() {
            self.spline = Spline::new(points);
            self.dirty = true;
        }
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        self.spline.control_points()
    }

    #[must_use]
    pub fn spline(&self) -> &Spline {
        &self.spline
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuilds the mesh if the control points or config changed since the
    /// last build.
    pub fn rebuild(&mut self) -> &TrackMesh {
        if self.dirty {
            let (mesh, diagnostics) = build_spline_mesh(&self.spline, &self.config.mesh_options());
            self.mesh = mesh;
            self.diagnostics = diagnostics;
            self.dirty = false;
        }
        &self.mesh
    }

    /// Last built mesh. Stale until the next [`rebuild`](Self::rebuild) when
    /// [`is_dirty`](Self::is_dirty) is set.
    #[must_use]
    pub fn mesh(&self) -> &TrackMesh {
        &self.mesh
    }

    #[must_use]
    pub fn diagnostics(&self) -> &TrackDiagnostics {
        &self.diagnostics
    }

    pub fn tick(&mut self, dt: f64) -> Option<CartPose> {
        self.cart.advance(&self.spline, dt, &self.config.cart_options())
    }

    #[must_use]
    pub fn cursor(&self) -> f64 {
        self.cart.cursor()
    }

    pub fn reset_cursor(&mut self) {
        self.cart.reset();
    }

    /// Mirrors the handle opposite `moved` across its joint; see
    /// [`mirror_handle`].
    pub fn mirror_handle(&mut self, moved: usize) -> Option<usize> {
        let mut points = self.spline.control_points().to_vec();
        let rewritten = mirror_handle(&mut points, moved)?;
        self.set_control_points(points);
        Some(rewritten)
    }

    #[must_use]
    pub fn frame(&self, fov_y_degrees: f64, yaw_degrees: f64) -> Option<CameraFrame> {
        frame_points(self.spline.control_points(), fov_y_degrees, yaw_degrees)
    }

    /// Per-segment sample positions at the configured resolution.
    #[must_use]
    pub fn preview(&self) -> Vec<Vec<Point3>> {
        self.spline.sample_points(self.config.resolution)
    }
}
