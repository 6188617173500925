//! Mesh canonicalization and discrete differential geometry for meshbake.
//!
//! Stages, in pipeline order:
//! - [`compress`]: exact duplicate removal over flat arrays
//! - [`triangulate`]: fan triangulation of polygons
//! - [`CanonicalMesh`]: deduplicated, triangulated mesh built from a raw record
//! - [`validate`]: half-edge check for closed, consistently wound surfaces
//! - [`Topology`]: vertex-to-face adjacency
//! - [`Geometry`]: face normals, corner angles, angle defect, dual area, dihedral angles,
//!   mean curvature
//! - [`synthesis`] and [`curvature`]: per-vertex normals and curvature pairs

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod canonical;
pub mod compress;
pub mod curvature;
pub mod geometry;
pub mod synthesis;
pub mod topology;
pub mod triangulate;
pub mod validate;

pub use canonical::CanonicalMesh;
pub use compress::{compress, map_duplicates, Compressed};
pub use curvature::finalize_curvature;
pub use geometry::Geometry;
pub use synthesis::synthesize_normals;
pub use topology::Topology;
pub use triangulate::fan_triangulate;
pub use validate::{check_surface, SurfaceDefect};
