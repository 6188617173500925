//! Interleaved vertex record layout.
//!
//! Every record starts with the fixed attributes
//! position(3) texcoord(2) tangent(3) bitangent(3) normal(3) curvature(2)
//! followed by one 3-float slot per smoothed normal level.

use meshbake_core::{MeshError, Result, MAX_SMOOTHED_NORMAL_LEVELS};

pub const POSITION_OFFSET: usize = 0;
pub const TEXCOORD_OFFSET: usize = 3;
pub const TANGENT_OFFSET: usize = 5;
pub const BITANGENT_OFFSET: usize = 8;
pub const NORMAL_OFFSET: usize = 11;
pub const CURVATURE_OFFSET: usize = 14;
/// Offset of the first smoothed normal level.
pub const SMOOTHED_NORMAL_OFFSET: usize = 16;

const SMOOTHED_NORMAL_NAMES: [&str; MAX_SMOOTHED_NORMAL_LEVELS] =
    ["NormalS1", "NormalS2", "NormalS3", "NormalS4", "NormalS5"];

/// One named attribute inside a vertex record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute name as bound by shaders.
    pub name: &'static str,
    /// Number of `f32` components.
    pub components: usize,
    /// Offset in floats from the start of the record.
    pub offset: usize,
}

/// Layout of one interleaved vertex record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    smoothed_normal_levels: usize,
}

impl VertexLayout {
    /// Creates a layout with `smoothed_normal_levels` smoothed normal slots.
    pub fn new(smoothed_normal_levels: usize) -> Result<Self> {
        if smoothed_normal_levels > MAX_SMOOTHED_NORMAL_LEVELS {
            return Err(MeshError::InvalidOptions(format!(
                "at most {MAX_SMOOTHED_NORMAL_LEVELS} smoothed normal levels are supported, got {smoothed_normal_levels}"
            )));
        }

        let attribute = |name, components, offset| VertexAttribute {
            name,
            components,
            offset,
        };
        let mut attributes = vec![
            attribute("VertexPosition", 3, POSITION_OFFSET),
            attribute("VertexTexCoords", 2, TEXCOORD_OFFSET),
            attribute("VertexTangent", 3, TANGENT_OFFSET),
            attribute("VertexBitangent", 3, BITANGENT_OFFSET),
            attribute("VertexNormal", 3, NORMAL_OFFSET),
            attribute("VertexCurvature", 2, CURVATURE_OFFSET),
        ];
        for (level, &name) in SMOOTHED_NORMAL_NAMES
            .iter()
            .take(smoothed_normal_levels)
            .enumerate()
        {
            attributes.push(attribute(name, 3, SMOOTHED_NORMAL_OFFSET + 3 * level));
        }

        Ok(Self {
            attributes,
            smoothed_normal_levels,
        })
    }

    /// Attributes in record order.
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Number of smoothed normal levels in each record.
    pub fn smoothed_normal_levels(&self) -> usize {
        self.smoothed_normal_levels
    }

    /// Record size in floats.
    pub fn stride(&self) -> usize {
        SMOOTHED_NORMAL_OFFSET + 3 * self.smoothed_normal_levels
    }

    /// Float offset of normal level `level`; level 0 is the vertex normal itself.
    pub fn normal_level_offset(&self, level: usize) -> Option<usize> {
        match level {
            0 => Some(NORMAL_OFFSET),
            l if l <= self.smoothed_normal_levels => Some(SMOOTHED_NORMAL_OFFSET + 3 * (l - 1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_layout() {
        let layout = VertexLayout::new(5).unwrap();
        assert_eq!(layout.stride(), 31);
        assert_eq!(layout.attributes().len(), 11);
        let total: usize = layout.attributes().iter().map(|a| a.components).sum();
        assert_eq!(total, layout.stride());
        assert_eq!(layout.attribute("NormalS5").unwrap().offset, 28);
        assert_eq!(layout.attribute("VertexCurvature").unwrap().offset, 14);
    }

    #[test]
    fn test_offsets_are_contiguous() {
        let layout = VertexLayout::new(3).unwrap();
        let mut next = 0;
        for attribute in layout.attributes() {
            assert_eq!(attribute.offset, next);
            next += attribute.components;
        }
        assert_eq!(next, layout.stride());
    }

    #[test]
    fn test_normal_levels() {
        let layout = VertexLayout::new(2).unwrap();
        assert_eq!(layout.normal_level_offset(0), Some(NORMAL_OFFSET));
        assert_eq!(layout.normal_level_offset(1), Some(16));
        assert_eq!(layout.normal_level_offset(2), Some(19));
        assert_eq!(layout.normal_level_offset(3), None);
    }

    #[test]
    fn test_base_layout_and_limits() {
        let layout = VertexLayout::new(0).unwrap();
        assert_eq!(layout.stride(), 16);
        assert!(layout.attribute("NormalS1").is_none());
        assert!(VertexLayout::new(6).is_err());
    }
}
