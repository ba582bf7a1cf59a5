//! Quad-tube extrusion of a track spline.
//!
//! Every sample along the spline becomes a ring of four vertices
//! (left-down, right-down, left-up, right-up). Consecutive rings are
//! stitched with eight triangles (bottom, top, right side, left side) and the
//! first and last ring of the whole track are capped, so a well-formed track
//! is a closed, consistently wound surface.
//!
//! The lateral direction is `tangent × reference_axis` with a fixed world
//! reference axis. Where the tangent runs parallel to that axis the lateral
//! direction is undefined and the previous ring's lateral is reused, which
//! shows up as a twist in the tube. This is a known limitation of the fixed
//! axis, not something the mesher tries to hide.

use super::bezier::Curve3;
use super::config::{FALLBACK_RESOLUTION, MAX_RESOLUTION, MeshOptions, NormalMode};
use super::core::{Point3, Vec3};
use super::diagnostics::TrackDiagnostics;
use super::error::TrackError;
use super::mesh::{TrackMesh, compute_smooth_normals, count_edge_topology};
use super::spline::{Spline, sample_parameters};

/// Tangent used when the very first sample of a build is degenerate.
const FALLBACK_TANGENT: Vec3 = Vec3::Z;

const RING_SIZE: usize = 4;
const TRIANGLES_PER_STEP: usize = 8;
const CAP_TRIANGLES: usize = 4;

/// Builds the tube mesh for an ordered control-point list.
///
/// Never fails: insufficient input yields an empty mesh, excess points are
/// ignored, and degenerate samples fall back to the previous frame. All of
/// it is reported in the returned diagnostics.
#[must_use]
pub fn build_track_mesh(control_points: &[Point3], options: &MeshOptions) -> (TrackMesh, TrackDiagnostics) {
    build_spline_mesh(&Spline::from_slice(control_points), options)
}

#[must_use]
pub fn build_spline_mesh(spline: &Spline, options: &MeshOptions) -> (TrackMesh, TrackDiagnostics) {
    let mut diagnostics = TrackDiagnostics::new();

    for issue in spline.issues() {
        match issue {
            TrackError::EmptyOrInsufficientInput { .. } => {
                log::debug!("{issue}; producing an empty mesh");
                diagnostics.add_warning(issue.to_string());
                return (TrackMesh::empty(), diagnostics);
            }
            TrackError::MalformedControlPointCount { excess, .. } => {
                log::warn!("{issue}");
                diagnostics.excess_control_points = excess;
                diagnostics.add_warning(issue.to_string());
            }
            TrackError::DegenerateTangent { .. } | TrackError::IndexOverrun { .. } => {}
        }
    }

    let Some(settings) = TubeSettings::from_options(options, &mut diagnostics) else {
        return (TrackMesh::empty(), diagnostics);
    };

    let params = sample_parameters(settings.resolution);
    let ring_estimate = spline.segment_count() * params.len();
    let mut builder = TubeBuilder::with_capacity(settings, ring_estimate);

    for segment in spline.segments() {
        for &t in &params {
            let point = segment.point_at(t);
            let tangent = segment.tangent_at(t);
            builder.push_sample(point, tangent);
        }
    }

    diagnostics.segment_count = spline.segment_count();
    builder.finish(diagnostics)
}

#[derive(Debug, Clone, Copy)]
struct TubeSettings {
    resolution: f64,
    half_width: f64,
    half_height: f64,
    reference_axis: Vec3,
    height_axis: Vec3,
    normals: NormalMode,
}

impl TubeSettings {
    fn from_options(options: &MeshOptions, diagnostics: &mut TrackDiagnostics) -> Option<Self> {
        if !options.width.is_finite() || !options.height.is_finite() {
            log::warn!("tube extents must be finite; producing an empty mesh");
            diagnostics.add_warning("tube extents must be finite");
            return None;
        }

        let resolution = if options.resolution.is_finite() && options.resolution > 0.0 {
            options.resolution.min(MAX_RESOLUTION)
        } else {
            FALLBACK_RESOLUTION
        };
        if resolution != options.resolution {
            log::warn!(
                "resolution {} clamped to {resolution}",
                options.resolution
            );
            diagnostics.resolution_clamped = true;
            diagnostics.add_warning(format!(
                "resolution {} clamped to {resolution}",
                options.resolution
            ));
        }

        let reference_axis = options.reference_axis.normalized().unwrap_or_else(|| {
            diagnostics.add_warning("reference axis is degenerate; using world up");
            Vec3::Y
        });
        let height_axis = options.height_axis.normalized().unwrap_or_else(|| {
            diagnostics.add_warning("height axis is degenerate; using world up");
            Vec3::Y
        });

        Some(Self {
            resolution,
            half_width: options.width.abs(),
            half_height: options.height.abs(),
            reference_axis,
            height_axis,
            normals: options.normals,
        })
    }
}

/// Vertex indices of one ring.
#[derive(Debug, Clone, Copy)]
struct Ring {
    left_down: u32,
    right_down: u32,
    left_up: u32,
    right_up: u32,
    tangent: Vec3,
}

impl Ring {
    fn corners(self) -> [u32; RING_SIZE] {
        [self.left_down, self.right_down, self.left_up, self.right_up]
    }
}

struct TubeBuilder {
    settings: TubeSettings,
    positions: Vec<[f64; 3]>,
    normals: Vec<[f64; 3]>,
    indices: Vec<u32>,
    first: Option<Ring>,
    previous: Option<Ring>,
    previous_lateral: Option<Vec3>,
    ring_count: usize,
    degenerate_tangents: usize,
    degenerate_laterals: usize,
}

impl TubeBuilder {
    fn with_capacity(settings: TubeSettings, rings: usize) -> Self {
        let steps = rings.saturating_sub(1);
        Self {
            settings,
            positions: Vec::with_capacity(rings * RING_SIZE),
            normals: Vec::with_capacity(rings * RING_SIZE),
            indices: Vec::with_capacity((steps * TRIANGLES_PER_STEP + CAP_TRIANGLES) * 3),
            first: None,
            previous: None,
            previous_lateral: None,
            ring_count: 0,
            degenerate_tangents: 0,
            degenerate_laterals: 0,
        }
    }

    fn push_sample(&mut self, point: Point3, tangent: Result<Vec3, TrackError>) {
        let tangent = match tangent {
            Ok(tangent) => tangent,
            Err(_) => {
                self.degenerate_tangents += 1;
                self.previous.map_or(FALLBACK_TANGENT, |ring| ring.tangent)
            }
        };
        let lateral = self.lateral_for(tangent);

        let offset_w = lateral.mul_scalar(self.settings.half_width);
        let offset_h = self.settings.height_axis.mul_scalar(self.settings.half_height);

        let ring = Ring {
            left_down: self.push_vertex(point + offset_w - offset_h, -lateral),
            right_down: self.push_vertex(point - offset_w - offset_h, -lateral),
            left_up: self.push_vertex(point + offset_w + offset_h, lateral),
            right_up: self.push_vertex(point - offset_w + offset_h, lateral),
            tangent,
        };

        if let Some(previous) = self.previous {
            self.stitch(previous, ring, lateral);
        }

        if self.first.is_none() {
            self.first = Some(ring);
        }
        self.previous = Some(ring);
        self.previous_lateral = Some(lateral);
        self.ring_count += 1;
    }

    fn lateral_for(&mut self, tangent: Vec3) -> Vec3 {
        if let Some(lateral) = tangent.cross(self.settings.reference_axis).normalized() {
            return lateral;
        }
        self.degenerate_laterals += 1;
        self.previous_lateral.unwrap_or_else(|| any_perpendicular(tangent))
    }

    fn push_vertex(&mut self, position: Point3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        index
    }

    fn stitch(&mut self, prev: Ring, cur: Ring, lateral: Vec3) {
        // Bottom
        self.indices.extend_from_slice(&[prev.left_down, cur.right_down, cur.left_down]);
        self.indices.extend_from_slice(&[prev.left_down, prev.right_down, cur.right_down]);

        // Top
        self.indices.extend_from_slice(&[prev.left_up, cur.left_up, cur.right_up]);
        self.indices.extend_from_slice(&[prev.left_up, cur.right_up, prev.right_up]);

        // Sides overwrite the corner normals they touch.
        let side = self
            .settings
            .height_axis
            .cross(cur.tangent)
            .normalized()
            .unwrap_or(-lateral);

        self.indices.extend_from_slice(&[prev.right_down, cur.right_up, cur.right_down]);
        self.indices.extend_from_slice(&[prev.right_down, prev.right_up, cur.right_up]);
        for index in [cur.right_down, cur.right_up, prev.right_down, prev.right_up] {
            self.normals[index as usize] = side.to_array();
        }

        self.indices.extend_from_slice(&[prev.left_down, cur.left_down, cur.left_up]);
        self.indices.extend_from_slice(&[prev.left_down, cur.left_up, prev.left_up]);
        for index in [cur.left_down, cur.left_up, prev.left_down, prev.left_up] {
            self.normals[index as usize] = (-side).to_array();
        }
    }

    fn cap(&mut self, ring: Ring, is_start: bool) {
        let [ld, rd, lu, ru] = ring.corners();
        let outward = if is_start {
            self.indices.extend_from_slice(&[ld, lu, rd]);
            self.indices.extend_from_slice(&[rd, lu, ru]);
            -ring.tangent
        } else {
            self.indices.extend_from_slice(&[ld, rd, lu]);
            self.indices.extend_from_slice(&[lu, rd, ru]);
            ring.tangent
        };
        for index in ring.corners() {
            self.normals[index as usize] = outward.to_array();
        }
    }

    fn finish(mut self, mut diagnostics: TrackDiagnostics) -> (TrackMesh, TrackDiagnostics) {
        if let (Some(first), Some(last)) = (self.first, self.previous) {
            self.cap(first, true);
            self.cap(last, false);
        }

        if self.settings.normals == NormalMode::Smooth {
            self.normals = compute_smooth_normals(&self.positions, &self.indices);
        }

        if self.degenerate_tangents > 0 {
            log::warn!(
                "{} samples had a degenerate tangent; reused the previous tangent",
                self.degenerate_tangents
            );
            diagnostics.add_warning(format!(
                "{} degenerate tangents replaced by the previous sample's",
                self.degenerate_tangents
            ));
        }
        if self.degenerate_laterals > 0 {
            log::warn!(
                "{} samples ran parallel to the reference axis; the tube twists there",
                self.degenerate_laterals
            );
            diagnostics.add_warning(format!(
                "{} samples parallel to the reference axis",
                self.degenerate_laterals
            ));
        }

        let (open_edge_count, non_manifold_edge_count) = count_edge_topology(&self.indices);
        let mesh = TrackMesh::new(self.positions, self.indices, self.normals);

        diagnostics.vertex_count = mesh.vertex_count();
        diagnostics.triangle_count = mesh.triangle_count();
        diagnostics.ring_count = self.ring_count;
        diagnostics.degenerate_tangent_count = self.degenerate_tangents;
        diagnostics.degenerate_lateral_count = self.degenerate_laterals;
        diagnostics.open_edge_count = open_edge_count;
        diagnostics.non_manifold_edge_count = non_manifold_edge_count;

        log::debug!("track mesh built: {}", diagnostics.summary());
        (mesh, diagnostics)
    }
}

fn any_perpendicular(v: Vec3) -> Vec3 {
    let helper = if v.x.abs() < 0.9 { Vec3::X } else { Vec3::Z };
    v.cross(helper).normalized().unwrap_or(Vec3::X)
}
