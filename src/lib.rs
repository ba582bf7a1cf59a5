#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod track;

use std::fmt;

use serde::Serialize;
use track::{CameraFrame, CartPose, Point3, TrackConfig, TrackEngine, TrackMesh};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[derive(Debug, Serialize)]
struct MeshExport<'a> {
    positions: &'a [f64],
    indices: &'a [u32],
    normals: &'a [f64],
}

impl<'a> From<&'a TrackMesh> for MeshExport<'a> {
    fn from(mesh: &'a TrackMesh) -> Self {
        Self {
            positions: mesh.positions_flat(),
            indices: &mesh.indices,
            normals: mesh.normals_flat(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
struct PoseExport {
    position: [f64; 3],
    /// `[x, y, z, w]`
    rotation: [f64; 4],
}

impl From<CartPose> for PoseExport {
    fn from(pose: CartPose) -> Self {
        Self {
            position: pose.position.to_array(),
            rotation: pose.rotation.to_array(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
struct FrameExport {
    position: [f64; 3],
    rotation: [f64; 4],
    distance: f64,
}

impl From<CameraFrame> for FrameExport {
    fn from(frame: CameraFrame) -> Self {
        Self {
            position: frame.position.to_array(),
            rotation: frame.rotation.to_array(),
            distance: frame.distance,
        }
    }
}

/// Public entry point for consumers.
#[wasm_bindgen]
pub struct Engine {
    inner: TrackEngine,
}

#[wasm_bindgen]
impl Engine {
    /// Creates an engine from a config object; `undefined` uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Engine, JsValue> {
        let config = config_from_js(config)?;
        let inner = TrackEngine::new(config).map_err(to_js_error)?;
        Ok(Engine { inner })
    }

    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config = config_from_js(config)?;
        self.inner.set_config(config).map_err(to_js_error)
    }

    /// Replaces the waypoints with flat `[x0, y0, z0, x1, ...]` coordinates.
    /// A trailing incomplete triple is ignored.
    #[wasm_bindgen(js_name = setControlPoints)]
    pub fn set_control_points(&mut self, coords: &[f64]) {
        self.inner.set_control_points(points_from_flat(coords));
    }

    /// Rebuilds the track mesh if needed and returns its flat buffers.
    #[wasm_bindgen]
    pub fn rebuild(&mut self) -> Result<JsValue, JsValue> {
        let mesh = self.inner.rebuild();
        serde_wasm_bindgen::to_value(&MeshExport::from(mesh))
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn diagnostics(&self) -> String {
        self.inner.diagnostics().to_string()
    }

    /// Advances the cart by `dt`; `null` when the tick was skipped.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f64) -> Result<JsValue, JsValue> {
        match self.inner.tick(dt) {
            Some(pose) => serde_wasm_bindgen::to_value(&PoseExport::from(pose))
                .map_err(|err| JsError::new(&err.to_string()).into()),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen]
    pub fn cursor(&self) -> f64 {
        self.inner.cursor()
    }

    #[wasm_bindgen(js_name = resetCursor)]
    pub fn reset_cursor(&mut self) {
        self.inner.reset_cursor();
    }

    /// Mirrors the handle across its joint after an editor drag. Returns the
    /// index of the rewritten point.
    #[wasm_bindgen(js_name = mirrorHandle)]
    pub fn mirror_handle(&mut self, moved: u32) -> Option<u32> {
        let rewritten = self.inner.mirror_handle(moved as usize)?;
        u32::try_from(rewritten).ok()
    }

    /// Camera placement framing all waypoints; `null` without waypoints.
    #[wasm_bindgen]
    pub fn frame(&self, fov_y: f64, yaw: f64) -> Result<JsValue, JsValue> {
        match self.inner.frame(fov_y, yaw) {
            Some(frame) => serde_wasm_bindgen::to_value(&FrameExport::from(frame))
                .map_err(|err| JsError::new(&err.to_string()).into()),
            None => Ok(JsValue::NULL),
        }
    }
}

fn config_from_js(config: JsValue) -> Result<TrackConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(TrackConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(to_js_error)
}

fn points_from_flat(coords: &[f64]) -> Vec<Point3> {
    coords
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect()
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
