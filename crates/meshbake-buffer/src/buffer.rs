//! Interleaved vertex buffer and the final GPU-ready output.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use meshbake_core::{Material, MaterialRun};

use crate::layout::{VertexLayout, POSITION_OFFSET};

/// One vertex record per emitted triangle corner, plus a trivial index buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBuffer {
    layout: VertexLayout,
    /// Interleaved records, `layout.stride()` floats each.
    pub vertices: Vec<f32>,
    /// Three indices per triangle.
    pub indices: Vec<u32>,
}

impl VertexBuffer {
    /// Creates an empty buffer with room for `corners` records.
    pub fn with_capacity(layout: VertexLayout, corners: usize) -> Self {
        let stride = layout.stride();
        Self {
            layout,
            vertices: Vec::with_capacity(corners * stride),
            indices: Vec::with_capacity(corners),
        }
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Number of vertex records.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.stride()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Reads a 2-float attribute of record `vertex` at float offset `offset`.
    pub fn read_vec2(&self, vertex: usize, offset: usize) -> Vec2 {
        let at = vertex * self.layout.stride() + offset;
        Vec2::from_slice(&self.vertices[at..at + 2])
    }

    /// Reads a 3-float attribute of record `vertex` at float offset `offset`.
    pub fn read_vec3(&self, vertex: usize, offset: usize) -> Vec3 {
        let at = vertex * self.layout.stride() + offset;
        Vec3::from_slice(&self.vertices[at..at + 3])
    }

    /// Overwrites a 3-float attribute of record `vertex` at float offset `offset`.
    pub fn write_vec3(&mut self, vertex: usize, offset: usize, value: Vec3) {
        let at = vertex * self.layout.stride() + offset;
        value.write_to_slice(&mut self.vertices[at..at + 3]);
    }

    /// Position of record `vertex`.
    pub fn position(&self, vertex: usize) -> Vec3 {
        self.read_vec3(vertex, POSITION_OFFSET)
    }
}

/// Final output: interleaved vertices, indices and the material pass-through.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalMeshBuffer {
    pub layout: VertexLayout,
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub material_runs: Vec<MaterialRun>,
    pub materials: HashMap<String, Material>,
}

impl CanonicalMeshBuffer {
    /// Wraps a finished vertex buffer together with the material data.
    pub fn new(
        buffer: VertexBuffer,
        material_runs: Vec<MaterialRun>,
        materials: HashMap<String, Material>,
    ) -> Self {
        let covered: usize = material_runs.iter().map(|run| run.corner_count).sum();
        if !material_runs.is_empty() && covered != buffer.indices.len() {
            log::debug!(
                "material runs cover {} indices, buffer has {}",
                covered,
                buffer.indices.len()
            );
        }

        Self {
            layout: buffer.layout,
            vertices: buffer.vertices,
            indices: buffer.indices,
            material_runs,
            materials,
        }
    }

    /// Number of vertex records.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.stride()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex data as raw bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Record size in bytes.
    pub fn stride_bytes(&self) -> usize {
        self.layout.stride() * std::mem::size_of::<f32>()
    }

    /// Values of attribute `name` for record `vertex`, if the layout has it.
    pub fn attribute(&self, vertex: usize, name: &str) -> Option<&[f32]> {
        let attribute = self.layout.attribute(name)?;
        let at = vertex * self.layout.stride() + attribute.offset;
        self.vertices.get(at..at + attribute.components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_buffer() -> VertexBuffer {
        let layout = VertexLayout::new(1).unwrap();
        let stride = layout.stride();
        let mut buffer = VertexBuffer::with_capacity(layout, 3);
        for i in 0..3 {
            buffer.vertices.extend((0..stride).map(|k| (i * 100 + k) as f32));
            buffer.indices.push(i as u32);
        }
        buffer
    }

    #[test]
    fn test_read_write() {
        let mut buffer = sample_buffer();
        assert_eq!(buffer.vertex_count(), 3);
        assert_eq!(buffer.triangle_count(), 1);
        assert_eq!(buffer.position(1), Vec3::new(100.0, 101.0, 102.0));
        assert_eq!(buffer.read_vec2(2, 3), Vec2::new(203.0, 204.0));

        buffer.write_vec3(0, 16, Vec3::ONE);
        assert_eq!(buffer.read_vec3(0, 16), Vec3::ONE);
        assert_eq!(buffer.read_vec3(1, 16), Vec3::new(116.0, 117.0, 118.0));
    }

    #[test]
    fn test_byte_views() {
        let out = CanonicalMeshBuffer::new(sample_buffer(), Vec::new(), HashMap::new());
        assert_eq!(out.stride_bytes(), 76);
        assert_eq!(out.vertex_bytes().len(), 3 * 76);
        assert_eq!(out.index_bytes().len(), 12);
        assert_eq!(&out.index_bytes()[4..8], &1u32.to_ne_bytes());
    }

    #[test]
    fn test_named_attribute() {
        let out = CanonicalMeshBuffer::new(sample_buffer(), Vec::new(), HashMap::new());
        assert_eq!(out.attribute(1, "VertexTexCoords"), Some(&[103.0, 104.0][..]));
        assert_eq!(out.attribute(0, "NormalS1"), Some(&[16.0, 17.0, 18.0][..]));
        assert_eq!(out.attribute(0, "NormalS2"), None);
        assert_eq!(out.attribute(3, "VertexPosition"), None);
    }
}
