//! Keeps Bézier handles mirrored across interior joints while editing.
//!
//! Control points `0, 3, 6, ...` are joints; the two points between joints are
//! handles. Mirroring the handle opposite a moved one keeps the track C1
//! continuous through the joint.

use super::core::Point3;
use super::spline::SEGMENT_STRIDE;

/// Joint and opposite handle for a moved handle, if it has one.
#[must_use]
pub fn mirror_partner(len: usize, moved: usize) -> Option<(usize, usize)> {
    if moved == 0 || moved + 2 >= len {
        return None;
    }
    match moved % SEGMENT_STRIDE {
        2 => Some((moved + 1, moved + 2)),
        1 if moved >= SEGMENT_STRIDE + 1 => Some((moved - 1, moved - 2)),
        _ => None,
    }
}

/// Reflects the handle opposite `moved` through their shared joint.
///
/// Returns the index of the rewritten point, or `None` when `moved` is a
/// joint, the first handle, or too close to the end of the list.
pub fn mirror_handle(points: &mut [Point3], moved: usize) -> Option<usize> {
    let (joint, opposite) = mirror_partner(points.len(), moved)?;
    let anchor = points[joint];
    points[opposite] = anchor + (anchor - points[moved]);
    Some(opposite)
}
