//! Angle-weighted normal synthesis for vertices missing an explicit normal.

use std::time::Instant;

use glam::Vec3;
use meshbake_core::math::{ensure_finite, unit_or_zero};
use meshbake_core::parallel::try_map_chunked;
use meshbake_core::{DenseIndexMap, MeshError, Result};

use crate::canonical::CanonicalMesh;
use crate::geometry::Geometry;
use crate::topology::Topology;

/// Flags every vertex that has at least one corner without a normal reference.
pub fn vertices_missing_normals(mesh: &CanonicalMesh) -> Vec<bool> {
    let mut missing = vec![false; mesh.num_vertices()];
    for corner in mesh.triangles.iter().flatten() {
        missing[corner.position as usize] |= corner.normal.is_none();
    }
    missing
}

/// Angle-weighted vertex normal: the normalized sum of incident face normals, each scaled
/// by the face's corner angle at `vertex`.
pub fn angle_weighted_normal(geometry: &Geometry<'_>, vertex: u32) -> Result<Vec3> {
    let mut sum = Vec3::ZERO;
    for &face in geometry.topology().adjacent_faces(vertex) {
        sum += geometry.corner_angle(face, vertex)? * geometry.face_normal(face);
    }
    ensure_finite(unit_or_zero(sum), || format!("normal of vertex {vertex}"))
}

/// Synthesizes normals for vertices lacking one and redirects the affected corners.
///
/// New normals are appended to `mesh.normals`, one per affected vertex, in ascending vertex
/// order. Only corners whose normal reference is absent are rewritten. Returns the number
/// of synthesized normals.
pub fn synthesize_normals(
    mesh: &mut CanonicalMesh,
    topology: &Topology,
    max_chunks: usize,
) -> Result<usize> {
    let start = Instant::now();
    let missing = DenseIndexMap::from_flags(&vertices_missing_normals(mesh));
    if missing.is_empty() {
        return Ok(0);
    }

    let geometry = Geometry::new(&mesh.positions, topology);
    let normals = try_map_chunked(missing.len(), max_chunks, |i| {
        angle_weighted_normal(&geometry, missing.retained()[i])
    })?;

    let offset = mesh.normals.len();
    u32::try_from(offset + normals.len())
        .map_err(|_| MeshError::CapacityExceeded(offset + normals.len()))?;
    mesh.normals.extend(normals);

    #[allow(clippy::cast_possible_truncation)]
    let offset = offset as u32;
    for corner in mesh.triangles.iter_mut().flatten() {
        if corner.normal.is_none() {
            corner.normal = missing.get(corner.position).map(|dense| offset + dense);
        }
    }

    log::debug!("normal synthesis took {}ms", start.elapsed().as_millis());
    Ok(missing.len())
}
