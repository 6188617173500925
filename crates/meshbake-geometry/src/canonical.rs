//! Canonical (deduplicated, triangulated) mesh.

use std::collections::HashMap;
use std::time::Instant;

use glam::{Vec2, Vec3};
use meshbake_core::math::lexicographic;
use meshbake_core::{Corner, Material, MaterialRun, MeshError, RawMeshRecord, Result};

use crate::compress::compress;
use crate::triangulate::fan_triangulate;

/// Deduplicated, fully triangulated mesh.
///
/// Positions contain no duplicates. Every triangle corner references a canonical position and
/// keeps the record's texture coordinate, normal and curvature references. Normal synthesis
/// and curvature finalization append to the attribute pools and redirect corner references;
/// positions are never modified after construction.
#[derive(Debug, Clone, Default)]
pub struct CanonicalMesh {
    /// Unique positions.
    pub positions: Vec<Vec3>,
    /// Texture coordinate pool (copied from the record).
    pub texcoords: Vec<Vec2>,
    /// Normal pool (record normals followed by synthesized ones).
    pub normals: Vec<Vec3>,
    /// Curvature pool (record hints followed by computed pairs).
    pub curvatures: Vec<Vec2>,
    /// Triangles in fan-triangulation order.
    pub triangles: Vec<[Corner; 3]>,
    /// Original position index -> canonical position index.
    pub position_remap: Vec<u32>,
    /// Material usage runs, unmodified.
    pub material_runs: Vec<MaterialRun>,
    /// Material table, unmodified.
    pub materials: HashMap<String, Material>,
}

impl CanonicalMesh {
    /// Compresses positions and fan-triangulates every face of `record`.
    ///
    /// Every corner reference is bounds-checked first; an out-of-range reference fails with
    /// [`MeshError::IndexFault`] and a face with fewer than three corners with
    /// [`MeshError::InvalidFace`].
    pub fn from_record(record: &RawMeshRecord) -> Result<Self> {
        let start = Instant::now();
        check_references(record)?;

        let compressed = compress(&record.positions, lexicographic);
        log::info!(
            "reduced positions from {} to {}",
            record.positions.len(),
            compressed.values.len()
        );

        let mut triangles = Vec::with_capacity(record.emitted_corner_count() / 3);
        for (face_index, face) in record.faces.iter().enumerate() {
            for tri in fan_triangulate(face_index, face)? {
                triangles.push(tri.map(|corner| Corner {
                    position: compressed.remap[corner.position as usize],
                    ..corner
                }));
            }
        }
        log::info!(
            "triangulated {} faces into {} triangles",
            record.faces.len(),
            triangles.len()
        );
        log::debug!("canonicalization took {}ms", start.elapsed().as_millis());

        Ok(Self {
            positions: compressed.values,
            texcoords: record.texcoords.clone(),
            normals: record.normals.clone(),
            curvatures: record.curvatures.clone(),
            triangles,
            position_remap: compressed.remap,
            material_runs: record.material_runs.clone(),
            materials: record.materials.clone(),
        })
    }

    /// Number of canonical vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Canonical vertex indices of every triangle, in winding order.
    pub fn triangle_vertices(&self) -> Vec<[u32; 3]> {
        self.triangles
            .iter()
            .map(|tri| tri.map(|corner| corner.position))
            .collect()
    }

    /// Position of a canonical vertex.
    #[inline]
    pub fn position(&self, vertex: u32) -> Vec3 {
        self.positions[vertex as usize]
    }
}

fn check_references(record: &RawMeshRecord) -> Result<()> {
    let check = |attribute: &'static str, face: usize, index: Option<u32>, len: usize| {
        match index {
            Some(index) if index as usize >= len => Err(MeshError::IndexFault {
                attribute,
                face,
                index,
                len,
            }),
            _ => Ok(()),
        }
    };

    for (face, corners) in record.faces.iter().enumerate() {
        if corners.len() < 3 {
            return Err(MeshError::InvalidFace {
                face,
                corners: corners.len(),
            });
        }
        for corner in corners {
            check("position", face, Some(corner.position), record.positions.len())?;
            check("texcoord", face, corner.texcoord, record.texcoords.len())?;
            check("normal", face, corner.normal, record.normals.len())?;
            check("curvature", face, corner.curvature, record.curvatures.len())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_with_duplicate() -> RawMeshRecord {
        RawMeshRecord::from_polygons(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            ],
            &[vec![0, 4, 2, 3]],
        )
    }

    #[test]
    fn test_compress_and_triangulate() {
        let mesh = CanonicalMesh::from_record(&quad_with_duplicate()).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.position_remap, vec![0, 1, 2, 3, 1]);
        assert_eq!(mesh.triangle_vertices(), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_attribute_references_kept() {
        let mut record = quad_with_duplicate();
        record.texcoords = vec![Vec2::ZERO, Vec2::X];
        record.faces[0][1] = Corner::new(4).with_texcoord(1);
        let mesh = CanonicalMesh::from_record(&record).unwrap();
        assert_eq!(mesh.triangles[0][1], Corner::new(1).with_texcoord(1));
        assert_eq!(mesh.texcoords.len(), 2);
    }

    #[test]
    fn test_index_fault() {
        let mut record = quad_with_duplicate();
        record.faces[0][2] = Corner::new(2).with_normal(0);
        let err = CanonicalMesh::from_record(&record).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexFault {
                attribute: "normal",
                face: 0,
                index: 0,
                len: 0
            }
        ));

        let mut record = quad_with_duplicate();
        record.faces[0][0] = Corner::new(5);
        assert!(matches!(
            CanonicalMesh::from_record(&record),
            Err(MeshError::IndexFault { attribute: "position", .. })
        ));
    }

    #[test]
    fn test_invalid_face() {
        let record = RawMeshRecord::from_polygons(vec![Vec3::ZERO, Vec3::X], &[vec![0, 1]]);
        assert!(matches!(
            CanonicalMesh::from_record(&record),
            Err(MeshError::InvalidFace { face: 0, corners: 2 })
        ));
    }

    #[test]
    fn test_empty_record() {
        let mesh = CanonicalMesh::from_record(&RawMeshRecord::default()).unwrap();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_triangles(), 0);
    }
}
