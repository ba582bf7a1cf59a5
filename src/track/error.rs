//! Error taxonomy for track evaluation and meshing.
//!
//! None of these are fatal for the host: builders absorb them, record a
//! warning in [`TrackDiagnostics`](super::TrackDiagnostics) and continue with
//! the largest valid input.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackError {
    #[error("{count} control points do not chain into cubic segments; {excess} excess points ignored")]
    MalformedControlPointCount { count: usize, excess: usize },
    #[error("tangent is degenerate at t={t}")]
    DegenerateTangent { t: f64 },
    #[error("track requires at least 4 control points, got {count}")]
    EmptyOrInsufficientInput { count: usize },
    #[error("control point index {requested} clamped to last valid index {last}")]
    IndexOverrun { requested: usize, last: usize },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("resolution must be finite and in (0, 0.5], got {0}")]
    InvalidResolution(f64),
    #[error("width must be finite and > 0, got {0}")]
    InvalidWidth(f64),
    #[error("height must be finite and > 0, got {0}")]
    InvalidHeight(f64),
    #[error("speed must be finite and > 0, got {0}")]
    InvalidSpeed(f64),
    #[error("cart offsets must be finite")]
    NonFiniteOffset,
    #[error("{0} must be a finite, non-zero vector")]
    DegenerateAxis(&'static str),
}
