//! Fan triangulation of polygonal faces.

use meshbake_core::{MeshError, Result};

/// Splits a polygon into `n - 2` triangles sharing its first corner.
///
/// For a polygon with corners [c0, c1, c2, c3, ...] this yields
/// [c0, c1, c2], [c0, c2, c3], [c0, c3, c4], ...
///
/// Convexity and planarity are assumed, not checked. `face_index` is only used to
/// report faces with fewer than three corners.
pub fn fan_triangulate<T: Copy>(
    face_index: usize,
    face: &[T],
) -> Result<impl Iterator<Item = [T; 3]> + '_> {
    if face.len() < 3 {
        return Err(MeshError::InvalidFace {
            face: face_index,
            corners: face.len(),
        });
    }
    let first = face[0];
    Ok(face.windows(2).skip(1).map(move |w| [first, w[0], w[1]]))
}
