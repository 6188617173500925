//! Raw mesh record as produced by an external parser.
//!
//! The record is a flat, index-based description of a polygon mesh: attribute pools
//! (positions, texture coordinates, normals, curvature pairs) and faces whose corners
//! reference entries of those pools. It is never mutated by the pipeline.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// One corner of a polygonal face.
///
/// `None` means the attribute is absent for this corner, which is distinct from index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Corner {
    /// Index into the position pool.
    pub position: u32,
    /// Index into the texture coordinate pool.
    pub texcoord: Option<u32>,
    /// Index into the normal pool.
    pub normal: Option<u32>,
    /// Index into the curvature pool.
    pub curvature: Option<u32>,
}

impl Corner {
    /// A corner that only references a position.
    pub fn new(position: u32) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Sets the texture coordinate reference.
    pub fn with_texcoord(mut self, texcoord: u32) -> Self {
        self.texcoord = Some(texcoord);
        self
    }

    /// Sets the normal reference.
    pub fn with_normal(mut self, normal: u32) -> Self {
        self.normal = Some(normal);
        self
    }

    /// Sets the curvature reference.
    pub fn with_curvature(mut self, curvature: u32) -> Self {
        self.curvature = Some(curvature);
        self
    }
}

/// A contiguous run of emitted triangle corners drawn with one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRun {
    /// Material name, or `None` for the default material.
    pub material: Option<String>,
    /// Number of emitted corners (3 per triangle) covered by this run.
    pub corner_count: usize,
}

impl MaterialRun {
    /// Creates a run.
    pub fn new(material: Option<String>, corner_count: usize) -> Self {
        Self {
            material,
            corner_count,
        }
    }
}

/// Material description carried through the pipeline untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    /// Ambient colour.
    pub ambient: Vec3,
    /// Diffuse colour.
    pub diffuse: Vec3,
    /// Specular colour.
    pub specular: Vec3,
    /// Emissive colour.
    pub emissive: Vec3,
    /// Specular exponent.
    pub shininess: f32,
    /// Index of refraction.
    pub optical_density: f32,
    /// Opacity (1 = opaque).
    pub dissolve: f32,
    /// Illumination model number.
    pub illumination: i32,
    /// Directory texture names are relative to.
    pub texture_dir: String,
    /// Ambient colour texture.
    pub ambient_texture: Option<String>,
    /// Diffuse colour texture.
    pub diffuse_texture: Option<String>,
    /// Specular colour texture.
    pub specular_texture: Option<String>,
    /// Tangent-space normal map.
    pub normal_texture: Option<String>,
}

/// Raw polygon mesh as handed over by the parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMeshRecord {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Texture coordinates.
    pub texcoords: Vec<Vec2>,
    /// Explicit normals.
    pub normals: Vec<Vec3>,
    /// Curvature hints (Gaussian, mean).
    pub curvatures: Vec<Vec2>,
    /// Polygonal faces, each with at least three corners.
    pub faces: Vec<Vec<Corner>>,
    /// Material usage runs over the emitted corners.
    pub material_runs: Vec<MaterialRun>,
    /// Material table keyed by name.
    pub materials: HashMap<String, Material>,
}

impl RawMeshRecord {
    /// Creates a record from positions and position-only polygon faces.
    pub fn from_polygons(positions: Vec<Vec3>, faces: &[Vec<u32>]) -> Self {
        Self {
            positions,
            faces: faces
                .iter()
                .map(|face| face.iter().copied().map(Corner::new).collect())
                .collect(),
            ..Self::default()
        }
    }

    /// Returns true if the record has neither positions nor faces.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.faces.is_empty()
    }

    /// Number of triangle corners a fan triangulation of all faces emits.
    pub fn emitted_corner_count(&self) -> usize {
        self.faces
            .iter()
            .map(|face| 3 * face.len().saturating_sub(2))
            .sum()
    }
}
