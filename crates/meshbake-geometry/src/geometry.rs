//! Discrete differential geometry on a validated triangle mesh.
//!
//! All quantities are pure functions of vertex positions and [`Topology`]:
//! - face normals and corner angles
//! - angle defect (discrete Gaussian curvature numerator)
//! - circumcentric dual area
//! - signed dihedral angles and scalar mean curvature
//!
//! The dual area uses the cotangent formula for every triangle, including obtuse ones,
//! so curvature next to obtuse triangles is less accurate than a mixed-area scheme.

use std::f32::consts::TAU;

use glam::Vec3;
use meshbake_core::math::unit_or_zero;
use meshbake_core::{MeshError, Result};

use crate::topology::Topology;

/// Geometry queries over positions and their adjacency.
#[derive(Debug, Clone, Copy)]
pub struct Geometry<'a> {
    positions: &'a [Vec3],
    topology: &'a Topology,
}

impl<'a> Geometry<'a> {
    /// Creates a view over `positions` indexed by `topology`.
    pub fn new(positions: &'a [Vec3], topology: &'a Topology) -> Self {
        Self {
            positions,
            topology,
        }
    }

    /// The underlying topology.
    pub fn topology(&self) -> &'a Topology {
        self.topology
    }

    #[inline]
    fn position(&self, vertex: u32) -> Vec3 {
        self.positions[vertex as usize]
    }

    /// Unit normal of `face` from its winding order.
    pub fn face_normal(&self, face: u32) -> Vec3 {
        let [a, b, c] = self.topology.face(face);
        let (v1, v2, v3) = (self.position(a), self.position(b), self.position(c));
        unit_or_zero((v2 - v1).cross(v3 - v1))
    }

    /// Interior angle of `face` at `vertex`.
    pub fn corner_angle(&self, face: u32, vertex: u32) -> Result<f32> {
        let [a, b, c] = self.topology.rotated(face, vertex)?;
        Ok(angle(self.position(a), self.position(b), self.position(c)))
    }

    /// 2π minus the sum of corner angles around `vertex`.
    pub fn angle_defect(&self, vertex: u32) -> Result<f32> {
        let mut total = 0.0;
        for &face in self.topology.adjacent_faces(vertex) {
            total += self.corner_angle(face, vertex)?;
        }
        Ok(TAU - total)
    }

    /// Sum of angle defects over every vertex that belongs to at least one face.
    ///
    /// Equals 4π for a closed genus-0 surface.
    #[allow(clippy::cast_possible_truncation)]
    pub fn total_angle_defect(&self) -> Result<f32> {
        let mut total = 0.0;
        for vertex in 0..self.topology.num_vertices() as u32 {
            if !self.topology.adjacent_faces(vertex).is_empty() {
                total += self.angle_defect(vertex)?;
            }
        }
        Ok(total)
    }

    /// Circumcentric dual area of `vertex` via the cotangent formula.
    pub fn circumcentric_dual_area(&self, vertex: u32) -> Result<f32> {
        let v1 = self.position(vertex);
        let mut total = 0.0;
        for &face in self.topology.adjacent_faces(vertex) {
            let (b, c) = self.topology.adjacent_vertices(face, vertex)?;
            let (v2, v3) = (self.position(b), self.position(c));

            // |v1 v3|^2 weighted by the angle at v2, |v1 v2|^2 by the angle at v3.
            total += (v3 - v1).length_squared() * cotan(v1 - v2, v3 - v2)
                + (v2 - v1).length_squared() * cotan(v1 - v3, v2 - v3);
        }
        Ok(total / 8.0)
    }

    /// Signed angle between the normals of the two faces sharing edge (`from`, `to`).
    ///
    /// The sign is positive when the surface bends away from the normals (convex) along
    /// the edge direction. Fails with [`MeshError::NonManifoldEdge`] unless exactly one face
    /// contains the half-edge `from -> to` and one contains `to -> from`.
    pub fn dihedral_angle(&self, from: u32, to: u32) -> Result<f32> {
        let mut forward = None;
        let mut backward = None;
        for &face in self.topology.adjacent_faces(from) {
            let (next, prev) = self.topology.adjacent_vertices(face, from)?;
            if next == to {
                forward = Some(face);
            }
            if prev == to {
                backward = Some(face);
            }
        }

        let (Some(f1), Some(f2)) = (forward, backward) else {
            return Err(MeshError::NonManifoldEdge { from, to });
        };

        let n1 = self.face_normal(f1);
        let n2 = self.face_normal(f2);
        let edge = unit_or_zero(self.position(to) - self.position(from));

        Ok(edge.dot(unit_or_zero(n1.cross(n2))) * n1.dot(n2).min(1.0).acos())
    }

    /// Half the sum of edge-length-weighted dihedral angles around `vertex`.
    pub fn scalar_mean_curvature(&self, vertex: u32) -> Result<f32> {
        let v1 = self.position(vertex);
        let mut total = 0.0;
        for &face in self.topology.adjacent_faces(vertex) {
            let (next, _) = self.topology.adjacent_vertices(face, vertex)?;
            total += self.dihedral_angle(vertex, next)? * (self.position(next) - v1).length();
        }
        Ok(0.5 * total)
    }
}

/// Angle at `v1` between edges to `v2` and `v3`.
///
/// Only the upper end of the arccos argument is clamped; an argument below -1 is left to
/// produce NaN.
fn angle(v1: Vec3, v2: Vec3, v3: Vec3) -> f32 {
    let e1 = unit_or_zero(v2 - v1);
    let e2 = unit_or_zero(v3 - v1);
    e1.dot(e2).min(1.0).acos()
}

fn cotan(e1: Vec3, e2: Vec3) -> f32 {
    e1.dot(e2) / e1.cross(e2).length()
}
