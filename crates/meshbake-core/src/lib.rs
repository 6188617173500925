//! Core types for meshbake.
//!
//! This crate provides the pieces shared by every pipeline stage:
//! - [`RawMeshRecord`], the parser-produced polygon mesh and its [`Corner`] references
//! - [`MeshError`] and the crate-wide [`Result`] alias
//! - [`PipelineOptions`] configuration
//! - [`DenseIndexMap`] for compacted index subsets
//! - Chunked parallel loops in [`parallel`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod dense_map;
pub mod error;
pub mod math;
pub mod options;
pub mod parallel;
pub mod record;

pub use dense_map::DenseIndexMap;
pub use error::{MeshError, Result};
pub use options::{PipelineOptions, MAX_SMOOTHED_NORMAL_LEVELS};
pub use record::{Corner, Material, MaterialRun, RawMeshRecord};

// Re-export glam types for convenience
pub use glam::{Vec2, Vec3};
