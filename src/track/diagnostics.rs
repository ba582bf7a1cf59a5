//! Diagnostics collected while building a track mesh.
//!
//! A rebuild never fails; everything that went wrong (excess control points,
//! degenerate tangents, clamped settings) lands here and in the log.
//!
//! ```ignore
//! let (mesh, diagnostics) = build_track_mesh(&points, &MeshOptions::default());
//! if !diagnostics.is_clean() {
//!     for warning in &diagnostics.warnings {
//!         log::warn!("{warning}");
//!     }
//! }
//! ```

use std::fmt;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrackDiagnostics {
    /// Total number of vertices in the final mesh.
    pub vertex_count: usize,

    /// Total number of triangles in the final mesh.
    pub triangle_count: usize,

    /// Number of cross-section rings emitted.
    pub ring_count: usize,

    /// Number of complete cubic segments meshed.
    pub segment_count: usize,

    /// Trailing control points that did not complete a segment.
    pub excess_control_points: usize,

    /// Samples whose tangent vanished and reused the previous one.
    pub degenerate_tangent_count: usize,

    /// Samples whose tangent was parallel to the reference axis.
    ///
    /// The lateral direction falls back to the previous ring's, which is the
    /// visible twist artifact of a fixed reference axis.
    pub degenerate_lateral_count: usize,

    /// Whether the requested resolution was clamped into range.
    pub resolution_clamped: bool,

    /// Edges with only one adjacent triangle. Zero for a closed tube.
    pub open_edge_count: usize,

    /// Edges with more than two adjacent triangles. Zero for a closed tube.
    pub non_manifold_edge_count: usize,

    /// Human-readable warnings, one per distinct issue.
    pub warnings: Vec<String>,
}

impl TrackDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the mesh is watertight (no open edges).
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.open_edge_count == 0
    }

    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.non_manifold_edge_count == 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }

    /// Returns `true` if the input was well formed and nothing needed a
    /// fallback.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.excess_control_points == 0
            && self.degenerate_tangent_count == 0
            && self.degenerate_lateral_count == 0
            && !self.resolution_clamped
            && self.open_edge_count == 0
            && self.non_manifold_edge_count == 0
            && self.warnings.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Returns a short summary string suitable for logging.
    ///
    /// Format: `"V:{vertices} T:{triangles} S:{segments} [issues...]"`
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "V:{} T:{} S:{}",
            self.vertex_count, self.triangle_count, self.segment_count
        )];

        if self.excess_control_points > 0 {
            parts.push(format!("excess:{}", self.excess_control_points));
        }
        if self.degenerate_tangent_count > 0 {
            parts.push(format!("degenerate-tangent:{}", self.degenerate_tangent_count));
        }
        if self.degenerate_lateral_count > 0 {
            parts.push(format!("degenerate-lateral:{}", self.degenerate_lateral_count));
        }
        if self.resolution_clamped {
            parts.push("resolution-clamped".to_string());
        }
        if self.open_edge_count > 0 {
            parts.push(format!("open:{}", self.open_edge_count));
        }
        if self.non_manifold_edge_count > 0 {
            parts.push(format!("non-manifold:{}", self.non_manifold_edge_count));
        }

        parts.join(" ")
    }
}

impl fmt::Display for TrackDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Track Diagnostics:")?;
        writeln!(f, "  Segments: {}", self.segment_count)?;
        writeln!(f, "  Rings: {}", self.ring_count)?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;

        if self.degenerate_tangent_count > 0 || self.degenerate_lateral_count > 0 {
            writeln!(f, "  Fallbacks:")?;
            if self.degenerate_tangent_count > 0 {
                writeln!(f, "    - Degenerate tangents: {}", self.degenerate_tangent_count)?;
            }
            if self.degenerate_lateral_count > 0 {
                writeln!(f, "    - Degenerate laterals: {}", self.degenerate_lateral_count)?;
            }
        }

        if self.open_edge_count > 0 || self.non_manifold_edge_count > 0 {
            writeln!(f, "  Topology issues:")?;
            if self.open_edge_count > 0 {
                writeln!(f, "    - Open edges: {}", self.open_edge_count)?;
            }
            if self.non_manifold_edge_count > 0 {
                writeln!(f, "    - Non-manifold edges: {}", self.non_manifold_edge_count)?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "  Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "    - {warning}")?;
            }
        }

        let status = if self.is_empty() {
            "EMPTY"
        } else if self.is_clean() {
            "CLEAN"
        } else {
            "FALLBACKS USED"
        };
        writeln!(f, "  Status: {status}")?;

        Ok(())
    }
}
