//! Iterative smoothing of per-corner normals into the smoothed normal slots.
//!
//! Corners at the same position form one group; the lowest corner of the group is its
//! representative. Each level replaces a group's normal by the normalized sum of its own
//! previous-level normal and the previous-level normals of every corner that shares a
//! triangle with any member of the group. Level 0 is the vertex normal slot.

use std::time::Instant;

use meshbake_core::math::{ensure_finite, lexicographic, unit_or_zero};
use meshbake_core::parallel::try_map_chunked;
use meshbake_core::{DenseIndexMap, Result};
use meshbake_geometry::map_duplicates;

use crate::buffer::VertexBuffer;

/// Corner groups and their triangle neighbours.
#[derive(Debug, Clone)]
pub struct CornerGroups {
    /// Corner -> representative corner.
    matching: Vec<u32>,
    /// Representatives in ascending corner order.
    groups: DenseIndexMap,
    /// Per group, representative corners of its triangle neighbours. One entry per
    /// occurrence, so a shared neighbour is counted once per shared triangle.
    neighbours: Vec<Vec<u32>>,
}

impl CornerGroups {
    /// Groups the corners of `buffer` by exact position.
    pub fn new(buffer: &VertexBuffer) -> Self {
        let positions: Vec<_> = (0..buffer.vertex_count())
            .map(|c| buffer.position(c))
            .collect();
        let matching = map_duplicates(&positions, lexicographic);
        let flags: Vec<bool> = matching
            .iter()
            .enumerate()
            .map(|(c, &rep)| rep as usize == c)
            .collect();
        let groups = DenseIndexMap::from_flags(&flags);

        let mut neighbours = vec![Vec::new(); groups.len()];
        for tri in buffer.indices.chunks_exact(3) {
            let reps = [tri[0], tri[1], tri[2]].map(|c| matching[c as usize]);
            for k in 0..3 {
                if let Some(group) = groups.get(reps[k]) {
                    let list = &mut neighbours[group as usize];
                    list.push(reps[(k + 1) % 3]);
                    list.push(reps[(k + 2) % 3]);
                }
            }
        }

        Self {
            matching,
            groups,
            neighbours,
        }
    }

    /// Number of distinct positions.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Representative corner of `corner`.
    pub fn representative(&self, corner: usize) -> u32 {
        self.matching[corner]
    }

    /// Neighbour representatives of the group containing `corner`.
    pub fn neighbours(&self, corner: usize) -> &[u32] {
        self.groups
            .get(self.matching[corner])
            .map_or(&[][..], |group| self.neighbours[group as usize].as_slice())
    }
}

/// Fills every smoothed normal level of `buffer`, one level after another.
///
/// A non-finite smoothed normal is fatal.
pub fn blur_normals(buffer: &mut VertexBuffer, max_chunks: usize) -> Result<()> {
    let levels = buffer.layout().smoothed_normal_levels();
    if levels == 0 || buffer.vertex_count() == 0 {
        return Ok(());
    }

    let start = Instant::now();
    let groups = CornerGroups::new(buffer);
    log::debug!(
        "blurring {} corners in {} position groups",
        buffer.vertex_count(),
        groups.len()
    );

    for level in 1..=levels {
        let (Some(src), Some(dst)) = (
            buffer.layout().normal_level_offset(level - 1),
            buffer.layout().normal_level_offset(level),
        ) else {
            break;
        };

        let smoothed = {
            let buffer = &*buffer;
            try_map_chunked(groups.len(), max_chunks, |group| {
                let rep = groups.groups.retained()[group] as usize;
                let mut sum = buffer.read_vec3(rep, src);
                for &n in &groups.neighbours[group] {
                    sum += buffer.read_vec3(n as usize, src);
                }
                ensure_finite(unit_or_zero(sum), || {
                    format!("level {level} normal of corner {rep}")
                })
            })?
        };

        for corner in 0..buffer.vertex_count() {
            if let Some(group) = groups.groups.get(groups.matching[corner]) {
                buffer.write_vec3(corner, dst, smoothed[group as usize]);
            }
        }
    }

    log::debug!("normal blur took {}ms", start.elapsed().as_millis());
    Ok(())
}
