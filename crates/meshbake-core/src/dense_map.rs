//! Dense index maps between a full index space and a compacted subset of it.

/// Forward lookup from a full index space into a dense subset.
///
/// Built from the ordered list of retained indices (the inverse map). Indices that were
/// not retained map to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DenseIndexMap {
    forward: Vec<Option<u32>>,
    inverse: Vec<u32>,
}

impl DenseIndexMap {
    /// Builds the map for a full space of `size` indices from the retained `inverse` list.
    ///
    /// # Panics
    /// Panics if an entry of `inverse` is not below `size`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_inverse(size: usize, inverse: Vec<u32>) -> Self {
        let mut forward = vec![None; size];
        for (dense, &full) in inverse.iter().enumerate() {
            forward[full as usize] = Some(dense as u32);
        }
        Self { forward, inverse }
    }

    /// Builds the map retaining every index whose flag is set, in ascending order.
    pub fn from_flags(flags: &[bool]) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let inverse = flags
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i as u32))
            .collect();
        Self::from_inverse(flags.len(), inverse)
    }

    /// Dense index of `full`, if it was retained.
    #[inline]
    pub fn get(&self, full: u32) -> Option<u32> {
        self.forward.get(full as usize).copied().flatten()
    }

    /// Retained full indices in dense order.
    pub fn retained(&self) -> &[u32] {
        &self.inverse
    }

    /// Number of retained indices.
    pub fn len(&self) -> usize {
        self.inverse.len()
    }

    /// Returns true if nothing was retained.
    pub fn is_empty(&self) -> bool {
        self.inverse.is_empty()
    }

    /// Size of the full index space.
    pub fn full_len(&self) -> usize {
        self.forward.len()
    }
}
