//! Per-run summary of what the pipeline did.

use std::fmt;

use meshbake_geometry::SurfaceDefect;

/// Counts and outcomes collected while processing one mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    /// Positions in the raw record.
    pub input_positions: usize,
    /// Positions left after duplicate removal.
    pub canonical_positions: usize,
    /// Polygons in the raw record.
    pub polygons: usize,
    /// Triangles after fan triangulation.
    pub triangles: usize,
    /// Why the mesh is not a closed surface, if it is not.
    pub surface_defect: Option<SurfaceDefect>,
    /// Sum of all vertex angle defects; only computed for closed surfaces.
    pub total_angle_defect: Option<f32>,
    /// Normals synthesized for vertices lacking one.
    pub synthesized_normals: usize,
    /// Whether curvature pairs were computed.
    pub curvature_computed: bool,
}

impl PipelineReport {
    /// Returns true if the mesh passed surface validation.
    pub fn is_connected_surface(&self) -> bool {
        self.surface_defect.is_none()
    }

    /// Euler characteristic implied by Gauss-Bonnet, `total_angle_defect / 2π`.
    pub fn euler_characteristic(&self) -> Option<f32> {
        self.total_angle_defect.map(|d| d / std::f32::consts::TAU)
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} positions, {} polygons -> {} triangles",
            self.input_positions, self.canonical_positions, self.polygons, self.triangles
        )?;
        match self.surface_defect {
            Some(defect) => write!(f, ", degraded ({defect})"),
            None => write!(
                f,
                ", {} normals synthesized, curvature {}",
                self.synthesized_normals,
                if self.curvature_computed { "computed" } else { "skipped" }
            ),
        }
    }
}
