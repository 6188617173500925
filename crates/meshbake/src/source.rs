//! Parser boundary.

use std::path::Path;

use meshbake_core::{RawMeshRecord, Result};

/// Something that can turn a mesh file into a [`RawMeshRecord`].
///
/// Implementations report unreadable or malformed input as
/// [`MeshError::Parse`](meshbake_core::MeshError::Parse). Closures with the matching
/// signature implement this trait.
pub trait MeshSource {
    /// Parses `filename` located in `directory`.
    fn parse(&self, directory: &Path, filename: &str) -> Result<RawMeshRecord>;
}

impl<F> MeshSource for F
where
    F: Fn(&Path, &str) -> Result<RawMeshRecord>,
{
    fn parse(&self, directory: &Path, filename: &str) -> Result<RawMeshRecord> {
        self(directory, filename)
    }
}
