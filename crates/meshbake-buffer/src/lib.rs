//! Render-ready buffer assembly for meshbake.
//!
//! A [`CanonicalMesh`](meshbake_geometry::CanonicalMesh) is expanded into one interleaved
//! vertex record per triangle corner ([`assemble`]), then the smoothed normal slots of
//! those records are filled level by level ([`blur_normals`]).

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod assemble;
pub mod blur;
pub mod buffer;
pub mod layout;

pub use assemble::{assemble, tangent_frame, TangentFrame};
pub use blur::{blur_normals, CornerGroups};
pub use buffer::{CanonicalMeshBuffer, VertexBuffer};
pub use layout::{VertexAttribute, VertexLayout};
