//! Host-facing configuration.
//!
//! `TrackConfig` is what the host hands over (a JS object through
//! `serde-wasm-bindgen`, or a literal in Rust). The mesher and the cart
//! updater take the narrower `MeshOptions` / `CartOptions` projections.

use serde::{Deserialize, Serialize};

use super::core::Vec3;
use super::error::ConfigError;

/// Largest accepted sampling step.
pub const MAX_RESOLUTION: f64 = 0.5;
/// Step the mesher falls back to for non-positive or non-finite input.
pub const FALLBACK_RESOLUTION: f64 = 0.005;

/// How vertex normals are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NormalMode {
    /// Each vertex keeps the normal of the last face written through it.
    #[default]
    FlatOverwrite,
    /// Area-weighted average of adjacent face normals.
    Smooth,
}

/// What the cart cursor does when it runs past the end of the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CursorWrap {
    /// Wrap modulo the segment count (closed circuit).
    #[default]
    Cyclic,
    /// Stop at the end of the last segment.
    Clamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackConfig {
    pub resolution: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    pub cart_offset: [f64; 3],
    /// Euler angles in degrees.
    pub cart_rotation_offset: [f64; 3],
    pub reference_axis: [f64; 3],
    pub height_axis: [f64; 3],
    pub normals: NormalMode,
    pub cursor_wrap: CursorWrap,
    pub clamp_local_t: bool,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            resolution: 0.01,
            width: 2.5,
            height: 0.2,
            speed: 0.5,
            cart_offset: [0.0; 3],
            cart_rotation_offset: [0.0; 3],
            reference_axis: Vec3::Y.to_array(),
            height_axis: Vec3::Y.to_array(),
            normals: NormalMode::FlatOverwrite,
            cursor_wrap: CursorWrap::Cyclic,
            clamp_local_t: true,
        }
    }
}

impl TrackConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 || self.resolution > MAX_RESOLUTION {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(ConfigError::InvalidHeight(self.height));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if !Vec3::from(self.cart_offset).is_finite() || !Vec3::from(self.cart_rotation_offset).is_finite() {
            return Err(ConfigError::NonFiniteOffset);
        }
        if Vec3::from(self.reference_axis).normalized().is_none() {
            return Err(ConfigError::DegenerateAxis("referenceAxis"));
        }
        if Vec3::from(self.height_axis).normalized().is_none() {
            return Err(ConfigError::DegenerateAxis("heightAxis"));
        }
        Ok(())
    }

    #[must_use]
    pub fn mesh_options(&self) -> MeshOptions {
        MeshOptions {
            resolution: self.resolution,
            width: self.width,
            height: self.height,
            reference_axis: Vec3::from(self.reference_axis),
            height_axis: Vec3::from(self.height_axis),
            normals: self.normals,
        }
    }

    #[must_use]
    pub fn cart_options(&self) -> CartOptions {
        CartOptions {
            speed: self.speed,
            offset: Vec3::from(self.cart_offset),
            rotation_offset: Vec3::from(self.cart_rotation_offset),
            up: Vec3::from(self.height_axis),
            wrap: self.cursor_wrap,
            clamp_local_t: self.clamp_local_t,
        }
    }
}

/// Options for tube mesh generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    /// Local parameter step per segment.
    pub resolution: f64,
    /// Lateral half-extent.
    pub width: f64,
    /// Half-extent along `height_axis`.
    pub height: f64,
    /// Fixed world axis crossed with the tangent to get the lateral direction.
    pub reference_axis: Vec3,
    pub height_axis: Vec3,
    pub normals: NormalMode,
}

impl Default for MeshOptions {
    fn default() -> Self {
        TrackConfig::default().mesh_options()
    }
}

/// Options for the per-tick cart update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartOptions {
    /// Global parameter advance per unit time.
    pub speed: f64,
    pub offset: Vec3,
    /// Euler angles in degrees, applied after the spline orientation.
    pub rotation_offset: Vec3,
    pub up: Vec3,
    pub wrap: CursorWrap,
    /// Clamp the local parameter to `[0, 1]` before evaluating.
    pub clamp_local_t: bool,
}

impl Default for CartOptions {
    fn default() -> Self {
        TrackConfig::default().cart_options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(TrackConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = TrackConfig { resolution: 0.75, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::InvalidResolution(0.75)));

        let config = TrackConfig { width: 0.0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::InvalidWidth(0.0)));

        let config = TrackConfig { speed: -1.0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeed(-1.0)));

        let config = TrackConfig { reference_axis: [0.0; 3], ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::DegenerateAxis(_))));

        let config = TrackConfig { cart_offset: [f64::NAN, 0.0, 0.0], ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::NonFiniteOffset));
    }

    #[test]
    fn projections_carry_values() {
        let config = TrackConfig {
            width: 1.0,
            height: 0.3,
            speed: 2.0,
            cart_offset: [0.0, 0.5, 0.0],
            normals: NormalMode::Smooth,
            cursor_wrap: CursorWrap::Clamp,
            ..Default::default()
        };

        let mesh = config.mesh_options();
        assert_eq!(mesh.width, 1.0);
        assert_eq!(mesh.height, 0.3);
        assert_eq!(mesh.normals, NormalMode::Smooth);

        let cart = config.cart_options();
        assert_eq!(cart.speed, 2.0);
        assert_eq!(cart.offset, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(cart.wrap, CursorWrap::Clamp);
    }
}
