//! Half-edge check for closed, consistently wound triangle meshes.
//!
//! Every triangle contributes three directed half-edges. The mesh is a connected surface
//! only if no half-edge occurs twice and every half-edge has its reversed twin.

use std::collections::HashMap;
use std::fmt;

/// Reason a triangle set is not a closed, consistently oriented 2-manifold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceDefect {
    /// The same directed edge appears in two faces (non-manifold or flipped winding).
    DuplicateHalfEdge { from: u32, to: u32, face: usize },
    /// A directed edge has no reversed twin (open boundary).
    MissingTwin { from: u32, to: u32, face: usize },
}

impl fmt::Display for SurfaceDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateHalfEdge { from, to, face } => {
                write!(f, "face {face} repeats half-edge ({from}, {to})")
            }
            Self::MissingTwin { from, to, face } => {
                write!(f, "half-edge ({from}, {to}) of face {face} has no twin")
            }
        }
    }
}

/// The three directed half-edges of a triangle, in winding order.
#[inline]
pub fn half_edges(tri: [u32; 3]) -> [(u32, u32); 3] {
    [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])]
}

/// Checks that `triangles` form a closed surface with consistent winding.
///
/// Runs in O(F). The first defect found is returned.
pub fn check_surface(triangles: &[[u32; 3]]) -> Result<(), SurfaceDefect> {
    let mut owners: HashMap<(u32, u32), usize> = HashMap::with_capacity(triangles.len() * 3);

    for (face, &tri) in triangles.iter().enumerate() {
        for (from, to) in half_edges(tri) {
            if owners.insert((from, to), face).is_some() {
                return Err(SurfaceDefect::DuplicateHalfEdge { from, to, face });
            }
        }
    }

    for (face, &tri) in triangles.iter().enumerate() {
        for (from, to) in half_edges(tri) {
            if !owners.contains_key(&(to, from)) {
                return Err(SurfaceDefect::MissingTwin { from, to, face });
            }
        }
    }

    Ok(())
}
