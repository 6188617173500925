//! Error types for meshbake.

use thiserror::Error;

/// The main error type for meshbake operations.
///
/// Every variant is fatal for the mesh being processed. Surface defects found by the
/// manifold validator are not errors; they downgrade the pipeline instead.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A face corner references an attribute entry that does not exist.
    #[error("face {face} references {attribute} index {index}, but only {len} exist")]
    IndexFault {
        attribute: &'static str,
        face: usize,
        index: u32,
        len: usize,
    },

    /// A face has fewer than three corners.
    #[error("face {face} has {corners} corners, at least 3 are required")]
    InvalidFace { face: usize, corners: usize },

    /// A computation produced NaN (or a non-finite value where one is not allowed).
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// An edge is not shared by exactly two consistently wound faces.
    #[error("edge ({from}, {to}) is not shared by exactly two faces")]
    NonManifoldEdge { from: u32, to: u32 },

    /// A pivot vertex was requested on a face that does not contain it.
    #[error("vertex {vertex} is not a corner of face {face}")]
    VertexNotInFace { vertex: u32, face: usize },

    /// More corners than a 32-bit index buffer can address.
    #[error("{0} corners exceed the 32-bit index range")]
    CapacityExceeded(usize),

    /// Pipeline options are out of range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The external parser could not produce a raw mesh record.
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The bounded worker pool could not be created.
    #[error("worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// A specialized Result type for meshbake operations.
pub type Result<T> = std::result::Result<T, MeshError>;
