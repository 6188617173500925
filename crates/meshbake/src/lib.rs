//! meshbake: turns raw polygon mesh records into render-ready vertex and index buffers.
//!
//! # Quick Start
//!
//! ```no_run
//! use meshbake::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let record = RawMeshRecord::from_polygons(
//!         vec![Vec3::ZERO, Vec3::X, Vec3::Y],
//!         &[vec![0, 1, 2]],
//!     );
//!     let baked = Pipeline::new(PipelineOptions::default())?.process(&record)?;
//!     println!("{}", baked.report);
//!     let _bytes = baked.buffer.vertex_bytes();
//!     Ok(())
//! }
//! ```
//!
//! # Stages
//!
//! 1. Duplicate positions are merged and polygons fan-triangulated ([`CanonicalMesh`]).
//! 2. The triangles are checked for a closed, consistently wound surface. Meshes that fail
//!    continue in a degraded mode with face normals only.
//! 3. On closed surfaces, missing normals are synthesized and per-vertex Gaussian and mean
//!    curvature computed.
//! 4. One interleaved vertex record is emitted per triangle corner, with a tangent frame.
//! 5. Normals are smoothed over up to five levels into extra record slots.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod init;
mod pipeline;
mod report;
mod source;

pub use init::init_logging;
pub use pipeline::{BakedMesh, Pipeline};
pub use report::PipelineReport;
pub use source::MeshSource;

pub use meshbake_buffer::{CanonicalMeshBuffer, VertexAttribute, VertexLayout};
pub use meshbake_core::{
    Corner, Material, MaterialRun, MeshError, PipelineOptions, RawMeshRecord, Result, Vec2,
    Vec3, MAX_SMOOTHED_NORMAL_LEVELS,
};
pub use meshbake_geometry::{CanonicalMesh, SurfaceDefect};
