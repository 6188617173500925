//! Per-vertex curvature finalization.

use std::time::Instant;

use glam::Vec2;
use meshbake_core::math::ensure_not_nan;
use meshbake_core::parallel::try_map_chunked;
use meshbake_core::{MeshError, Result};

use crate::canonical::CanonicalMesh;
use crate::geometry::Geometry;
use crate::topology::Topology;

/// Gaussian and mean curvature of `vertex`, both normalized by its dual area.
///
/// Vertices outside every face have no surface around them and get a zero pair.
pub fn vertex_curvature(geometry: &Geometry<'_>, vertex: u32) -> Result<Vec2> {
    if geometry.topology().adjacent_faces(vertex).is_empty() {
        return Ok(Vec2::ZERO);
    }

    let defect = ensure_not_nan(geometry.angle_defect(vertex)?, || {
        format!("angle defect of vertex {vertex}")
    })?;
    let mean = ensure_not_nan(geometry.scalar_mean_curvature(vertex)?, || {
        format!("mean curvature of vertex {vertex}")
    })?;
    let area = ensure_not_nan(geometry.circumcentric_dual_area(vertex)?, || {
        format!("dual area of vertex {vertex}")
    })?;

    let gaussian = ensure_not_nan(defect / area, || {
        format!("gaussian curvature of vertex {vertex}")
    })?;
    let mean = ensure_not_nan(mean / area, || {
        format!("normalized mean curvature of vertex {vertex}")
    })?;
    Ok(Vec2::new(gaussian, mean))
}

/// Computes a curvature pair for every vertex and points every corner at its vertex's pair.
///
/// Pairs are appended to `mesh.curvatures` after any existing entries; a corner of vertex
/// `v` then references `offset + v`. Curvature is always recomputed, whether or not the
/// record carried hints.
pub fn finalize_curvature(
    mesh: &mut CanonicalMesh,
    topology: &Topology,
    max_chunks: usize,
) -> Result<()> {
    let start = Instant::now();
    let geometry = Geometry::new(&mesh.positions, topology);

    #[allow(clippy::cast_possible_truncation)]
    let pairs = try_map_chunked(mesh.num_vertices(), max_chunks, |v| {
        vertex_curvature(&geometry, v as u32)
    })?;

    let total = mesh.curvatures.len() + pairs.len();
    if u32::try_from(total).is_err() {
        return Err(MeshError::CapacityExceeded(total));
    }
    #[allow(clippy::cast_possible_truncation)]
    let offset = mesh.curvatures.len() as u32;
    mesh.curvatures.extend(pairs);

    for corner in mesh.triangles.iter_mut().flatten() {
        corner.curvature = Some(offset + corner.position);
    }

    log::debug!("curvature took {}ms", start.elapsed().as_millis());
    Ok(())
}
