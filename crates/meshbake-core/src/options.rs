//! Configuration options for the mesh pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// Highest number of smoothed normal levels a vertex record can carry.
pub const MAX_SMOOTHED_NORMAL_LEVELS: usize = 5;

/// Default number of contiguous chunks a parallel stage is split into.
pub const DEFAULT_WORKER_CHUNKS: usize = 16;

/// Options controlling the canonicalization and buffer pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Number of progressively smoothed normal levels appended to each vertex record.
    pub smoothed_normal_levels: usize,

    /// Upper bound on the number of index-range chunks per parallel stage.
    pub worker_chunks: usize,

    /// Size of a dedicated worker pool (0 = shared global pool).
    pub worker_threads: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            smoothed_normal_levels: MAX_SMOOTHED_NORMAL_LEVELS,
            worker_chunks: DEFAULT_WORKER_CHUNKS,
            worker_threads: 0,
        }
    }
}

impl PipelineOptions {
    /// Parses options from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every option is within its supported range.
    pub fn validate(&self) -> Result<()> {
        if self.smoothed_normal_levels > MAX_SMOOTHED_NORMAL_LEVELS {
            return Err(MeshError::InvalidOptions(format!(
                "smoothed_normal_levels must be at most {MAX_SMOOTHED_NORMAL_LEVELS}, got {}",
                self.smoothed_normal_levels
            )));
        }
        if self.worker_chunks == 0 {
            return Err(MeshError::InvalidOptions(
                "worker_chunks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style setter for the number of smoothed normal levels.
    pub fn with_smoothed_normal_levels(mut self, levels: usize) -> Self {
        self.smoothed_normal_levels = levels;
        self
    }

    /// Builder-style setter for the chunk bound.
    pub fn with_worker_chunks(mut self, chunks: usize) -> Self {
        self.worker_chunks = chunks;
        self
    }

    /// Builder-style setter for the dedicated pool size.
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }
}
