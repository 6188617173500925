//! End-to-end mesh processing.

use std::path::Path;
use std::time::Instant;

use meshbake_buffer::{assemble, blur_normals, CanonicalMeshBuffer, VertexLayout};
use meshbake_core::{PipelineOptions, RawMeshRecord, Result};
use meshbake_geometry::{
    check_surface, finalize_curvature, synthesize_normals, CanonicalMesh, Geometry, Topology,
};

use crate::report::PipelineReport;
use crate::source::MeshSource;

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct BakedMesh {
    pub buffer: CanonicalMeshBuffer,
    pub report: PipelineReport,
}

/// Runs raw mesh records through canonicalization, validation, normal and curvature
/// derivation, buffer assembly and normal smoothing.
///
/// Stages run strictly in order; each parallel stage finishes before the next begins.
pub struct Pipeline {
    options: PipelineOptions,
    pool: Option<rayon::ThreadPool>,
}

impl Pipeline {
    /// Creates a pipeline, validating `options`.
    ///
    /// With `worker_threads > 0` a dedicated worker pool of that size is built and every
    /// parallel stage runs on it; otherwise the global rayon pool is used.
    pub fn new(options: PipelineOptions) -> Result<Self> {
        options.validate()?;
        let pool = if options.worker_threads > 0 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(options.worker_threads)
                    .thread_name(|i| format!("meshbake-worker-{i}"))
                    .build()?,
            )
        } else {
            None
        };
        Ok(Self { options, pool })
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Processes one raw mesh record.
    pub fn process(&self, record: &RawMeshRecord) -> Result<BakedMesh> {
        match &self.pool {
            Some(pool) => pool.install(|| self.run(record)),
            None => self.run(record),
        }
    }

    /// Parses `filename` in `directory` with `source` and processes the result.
    pub fn load<S>(&self, source: &S, directory: &Path, filename: &str) -> Result<BakedMesh>
    where
        S: MeshSource + ?Sized,
    {
        let record = source.parse(directory, filename)?;
        log::info!(
            "loaded {} with {} positions and {} faces",
            directory.join(filename).display(),
            record.positions.len(),
            record.faces.len()
        );
        self.process(&record)
    }

    fn run(&self, record: &RawMeshRecord) -> Result<BakedMesh> {
        let start = Instant::now();
        let chunks = self.options.worker_chunks;

        let mut mesh = CanonicalMesh::from_record(record)?;
        let mut report = PipelineReport {
            input_positions: record.positions.len(),
            canonical_positions: mesh.num_vertices(),
            polygons: record.faces.len(),
            triangles: mesh.num_triangles(),
            ..Default::default()
        };

        match check_surface(&mesh.triangle_vertices()) {
            Ok(()) => {
                log::info!("mesh is a connected surface");
                let topology = Topology::from_mesh(&mesh);

                let total = Geometry::new(&mesh.positions, &topology).total_angle_defect()?;
                log::info!(
                    "total angle defect is {:.4}π",
                    total / std::f32::consts::PI
                );
                report.total_angle_defect = Some(total);

                report.synthesized_normals = synthesize_normals(&mut mesh, &topology, chunks)?;
                log::info!("synthesized {} normals", report.synthesized_normals);

                finalize_curvature(&mut mesh, &topology, chunks)?;
                report.curvature_computed = true;
                log::info!("computed curvature for {} vertices", mesh.num_vertices());
            }
            Err(defect) => {
                log::warn!("mesh is not a connected surface: {defect}");
                log::warn!("skipping normal synthesis and curvature, shading with face normals");
                report.surface_defect = Some(defect);
            }
        }

        let layout = VertexLayout::new(self.options.smoothed_normal_levels)?;
        let mut vertices = assemble(&mesh, layout)?;
        blur_normals(&mut vertices, chunks)?;

        let buffer = CanonicalMeshBuffer::new(vertices, mesh.material_runs, mesh.materials);
        log::debug!("pipeline took {}ms: {report}", start.elapsed().as_millis());
        Ok(BakedMesh { buffer, report })
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}
