//! Per-corner vertex record assembly.

use std::time::Instant;

use glam::{Vec2, Vec3};
use meshbake_core::math::{ensure_finite, unit_or_zero};
use meshbake_core::{Corner, MeshError, Result};
use meshbake_geometry::CanonicalMesh;

use crate::buffer::VertexBuffer;
use crate::layout::VertexLayout;

/// Tangent frame shared by the three corners of one triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    pub tangent: Vec3,
    pub bitangent: Vec3,
    /// Unit face normal, used for corners without a normal reference.
    pub normal: Vec3,
}

/// Computes the tangent frame of one triangle.
///
/// With texture coordinates on all three corners the frame follows the UV parameterization
/// and is left unnormalized. Otherwise the tangent is the first edge direction and the
/// bitangent is `tangent x normal`.
pub fn tangent_frame(
    mesh: &CanonicalMesh,
    triangle: usize,
    corners: &[Corner; 3],
) -> Result<TangentFrame> {
    let [p1, p2, p3] = corners.map(|c| mesh.position(c.position));
    let e1 = p2 - p1;
    let e2 = p3 - p1;
    let normal = ensure_finite(unit_or_zero(e1.cross(e2)), || {
        format!("face normal of triangle {triangle}")
    })?;

    let uvs = match corners.map(|c| c.texcoord) {
        [Some(a), Some(b), Some(c)] => Some([a, b, c].map(|t| mesh.texcoords[t as usize])),
        _ => None,
    };

    let Some([uv1, uv2, uv3]) = uvs else {
        let tangent = ensure_finite(unit_or_zero(e1), || {
            format!("tangent of triangle {triangle}")
        })?;
        let bitangent = ensure_finite(tangent.cross(normal), || {
            format!("bitangent of triangle {triangle}")
        })?;
        return Ok(TangentFrame {
            tangent,
            bitangent,
            normal,
        });
    };

    let duv1 = uv2 - uv1;
    let duv2 = uv3 - uv1;
    let f = 1.0 / (duv1.x * duv2.y - duv2.x * duv1.y);
    let tangent = ensure_finite(f * (duv2.y * e1 - duv1.y * e2), || {
        format!("tangent of triangle {triangle}")
    })?;
    let bitangent = ensure_finite(f * (-duv2.x * e1 + duv1.x * e2), || {
        format!("bitangent of triangle {triangle}")
    })?;

    Ok(TangentFrame {
        tangent,
        bitangent,
        normal,
    })
}

/// Emits one vertex record per triangle corner.
///
/// Smoothed normal slots are zero-filled for the blur stage. Index `i` of the index buffer
/// is simply `i`.
pub fn assemble(mesh: &CanonicalMesh, layout: VertexLayout) -> Result<VertexBuffer> {
    let start = Instant::now();
    let corner_count = mesh.num_triangles() * 3;
    if u32::try_from(corner_count).is_err() {
        return Err(MeshError::CapacityExceeded(corner_count));
    }

    let smoothed_floats = 3 * layout.smoothed_normal_levels();
    let mut buffer = VertexBuffer::with_capacity(layout, corner_count);

    for (t, corners) in mesh.triangles.iter().enumerate() {
        let frame = tangent_frame(mesh, t, corners)?;

        for corner in corners {
            let position = mesh.position(corner.position);
            let texcoord = corner
                .texcoord
                .map_or(Vec2::ZERO, |i| mesh.texcoords[i as usize]);
            let normal = corner
                .normal
                .map_or(frame.normal, |i| mesh.normals[i as usize]);
            let curvature = corner
                .curvature
                .map_or(Vec2::ZERO, |i| mesh.curvatures[i as usize]);

            let record = &mut buffer.vertices;
            record.extend_from_slice(&position.to_array());
            record.extend_from_slice(&texcoord.to_array());
            record.extend_from_slice(&frame.tangent.to_array());
            record.extend_from_slice(&frame.bitangent.to_array());
            record.extend_from_slice(&normal.to_array());
            record.extend_from_slice(&curvature.to_array());
            record.resize(record.len() + smoothed_floats, 0.0);
        }

        #[allow(clippy::cast_possible_truncation)]
        let base = (t * 3) as u32;
        buffer.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    log::debug!(
        "assembled {} vertices in {}ms",
        buffer.vertex_count(),
        start.elapsed().as_millis()
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BITANGENT_OFFSET, NORMAL_OFFSET, TANGENT_OFFSET, TEXCOORD_OFFSET};
    use meshbake_core::RawMeshRecord;

    fn uv_triangle() -> RawMeshRecord {
        let mut record = RawMeshRecord::from_polygons(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(0.0, 3.0, 0.0),
            ],
            &[vec![0, 1, 2]],
        );
        record.texcoords = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        for (i, corner) in record.faces[0].iter_mut().enumerate() {
            *corner = corner.with_texcoord(i as u32);
        }
        record
    }

    #[test]
    fn test_uv_frame() {
        let mesh = CanonicalMesh::from_record(&uv_triangle()).unwrap();
        let frame = tangent_frame(&mesh, 0, &mesh.triangles[0]).unwrap();
        // UV scale 1/2 along x and 1/3 along y, so the frame is the edges themselves.
        assert_eq!(frame.tangent, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(frame.bitangent, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(frame.normal, Vec3::Z);
    }

    #[test]
    fn test_fallback_frame() {
        let mut record = uv_triangle();
        record.faces[0][2].texcoord = None;
        let mesh = CanonicalMesh::from_record(&record).unwrap();
        let frame = tangent_frame(&mesh, 0, &mesh.triangles[0]).unwrap();
        assert_eq!(frame.tangent, Vec3::X);
        assert_eq!(frame.bitangent, Vec3::X.cross(Vec3::Z));
    }

    #[test]
    fn test_singular_uv_is_fatal() {
        let mut record = uv_triangle();
        record.texcoords = vec![Vec2::ZERO; 3];
        let mesh = CanonicalMesh::from_record(&record).unwrap();
        assert!(matches!(
            tangent_frame(&mesh, 0, &mesh.triangles[0]),
            Err(MeshError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_nan_position_without_uvs_is_fatal() {
        let mut record = uv_triangle();
        record.positions[1] = Vec3::new(f32::NAN, 0.0, 0.0);
        record.normals = vec![Vec3::Z];
        for corner in &mut record.faces[0] {
            *corner = Corner::new(corner.position).with_normal(0);
        }
        let mesh = CanonicalMesh::from_record(&record).unwrap();
        assert!(matches!(
            tangent_frame(&mesh, 0, &mesh.triangles[0]),
            Err(MeshError::DegenerateGeometry(_))
        ));
        assert!(matches!(
            assemble(&mesh, VertexLayout::new(0).unwrap()),
            Err(MeshError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_records() {
        let mesh = CanonicalMesh::from_record(&uv_triangle()).unwrap();
        let buffer = assemble(&mesh, VertexLayout::new(2).unwrap()).unwrap();
        assert_eq!(buffer.vertex_count(), 3);
        assert_eq!(buffer.vertices.len(), 3 * 22);
        assert_eq!(buffer.indices, vec![0, 1, 2]);

        assert_eq!(buffer.position(2), Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(buffer.read_vec2(1, TEXCOORD_OFFSET), Vec2::X);
        assert_eq!(buffer.read_vec3(0, TANGENT_OFFSET), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(buffer.read_vec3(0, BITANGENT_OFFSET), Vec3::new(0.0, 3.0, 0.0));
        // No normal reference: face normal.
        assert_eq!(buffer.read_vec3(1, NORMAL_OFFSET), Vec3::Z);
        assert!(buffer.vertices[22 + 16..44].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_explicit_normal_wins() {
        let mut record = uv_triangle();
        record.normals = vec![Vec3::Y];
        record.faces[0][1] = record.faces[0][1].with_normal(0);
        let mesh = CanonicalMesh::from_record(&record).unwrap();
        let buffer = assemble(&mesh, VertexLayout::new(0).unwrap()).unwrap();
        assert_eq!(buffer.read_vec3(0, NORMAL_OFFSET), Vec3::Z);
        assert_eq!(buffer.read_vec3(1, NORMAL_OFFSET), Vec3::Y);
    }
}
