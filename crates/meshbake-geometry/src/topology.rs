//! Vertex-to-face adjacency over a validated triangle mesh.
//!
//! Incident faces are stored in compressed rows: `offsets[v]..offsets[v + 1]` indexes the
//! faces around vertex `v` inside one flat array, in ascending face order.

use meshbake_core::{MeshError, Result};

use crate::canonical::CanonicalMesh;

/// Read-only adjacency built once after the surface check has passed.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    triangles: Vec<[u32; 3]>,
    offsets: Vec<usize>,
    incident: Vec<u32>,
}

impl Topology {
    /// Builds adjacency for `num_vertices` vertices from triangle vertex triples.
    ///
    /// # Panics
    /// Panics if a triangle references a vertex `>= num_vertices`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(num_vertices: usize, triangles: Vec<[u32; 3]>) -> Self {
        let mut offsets = vec![0usize; num_vertices + 1];
        for tri in &triangles {
            for &v in tri {
                offsets[v as usize + 1] += 1;
            }
        }
        for v in 0..num_vertices {
            offsets[v + 1] += offsets[v];
        }

        let mut cursor = offsets.clone();
        let mut incident = vec![0u32; triangles.len() * 3];
        for (face, tri) in triangles.iter().enumerate() {
            for &v in tri {
                incident[cursor[v as usize]] = face as u32;
                cursor[v as usize] += 1;
            }
        }

        Self {
            triangles,
            offsets,
            incident,
        }
    }

    /// Builds adjacency for a canonical mesh.
    pub fn from_mesh(mesh: &CanonicalMesh) -> Self {
        Self::new(mesh.num_vertices(), mesh.triangle_vertices())
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.triangles.len()
    }

    /// Faces incident to `vertex`, in insertion order.
    #[inline]
    pub fn adjacent_faces(&self, vertex: u32) -> &[u32] {
        let v = vertex as usize;
        &self.incident[self.offsets[v]..self.offsets[v + 1]]
    }

    /// Vertex triple of `face` in winding order.
    #[inline]
    pub fn face(&self, face: u32) -> [u32; 3] {
        self.triangles[face as usize]
    }

    /// Vertex triple of `face` rotated so that `pivot` comes first.
    ///
    /// The rotation keeps the winding, so angles and areas computed from the
    /// (pivot, next, previous) triple have a consistent sign.
    pub fn rotated(&self, face: u32, pivot: u32) -> Result<[u32; 3]> {
        let [a, b, c] = self.face(face);
        if a == pivot {
            Ok([a, b, c])
        } else if b == pivot {
            Ok([b, c, a])
        } else if c == pivot {
            Ok([c, a, b])
        } else {
            Err(MeshError::VertexNotInFace {
                vertex: pivot,
                face: face as usize,
            })
        }
    }

    /// The two non-pivot vertices of `face`, in winding order after `pivot`.
    pub fn adjacent_vertices(&self, face: u32, pivot: u32) -> Result<(u32, u32)> {
        let [_, next, prev] = self.rotated(face, pivot)?;
        Ok((next, prev))
    }
}
