use std::path::PathBuf;

use crate::shared::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_DOCUMENT_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_REFERENCE_POINTS,
    DEFAULT_THRESHOLD, MAX_AUTO_WORKERS, SAMPLE_SEED,
};
use crate::shared::error::ExtractError;

/// Immutable configuration for one extraction run.
///
/// Validated up front: a bad value here is a caller mistake, not a runtime
/// condition the pipeline should degrade around.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Minimum dissimilarity score for a slide change. Empirical; the score
    /// is not a probability.
    pub threshold: f64,
    pub reference_points: usize,
    pub batch_size: usize,
    pub worker_count: usize,
    pub output_dir: PathBuf,
    /// File name of the combined document, written to the working
    /// directory (outside `output_dir`, so cleanup cannot remove it).
    pub document_name: String,
    /// Delete individual screenshots after the document is assembled.
    pub cleanup: bool,
    /// Seed of the sample-point stream. Fixed by default so runs are
    /// reproducible.
    pub seed: u64,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.threshold <= 0.0 {
            return Err(ExtractError::InvalidConfig(format!(
                "threshold must be > 0, got {}",
                self.threshold
            )));
        }
        if self.reference_points == 0 {
            return Err(ExtractError::InvalidConfig(
                "reference_points must be > 0".into(),
            ));
        }
        if self.batch_size < 2 {
            return Err(ExtractError::InvalidConfig(format!(
                "batch_size must be at least 2 (a batch of {} has no frame pairs)",
                self.batch_size
            )));
        }
        if self.worker_count == 0 {
            return Err(ExtractError::InvalidConfig("workers must be > 0".into()));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            reference_points: DEFAULT_REFERENCE_POINTS,
            batch_size: DEFAULT_BATCH_SIZE,
            worker_count: default_worker_count(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            cleanup: false,
            seed: SAMPLE_SEED,
        }
    }
}

/// Auto-detected worker pool size: available cores, capped.
pub fn default_worker_count() -> usize {
    num_cpus::get().min(MAX_AUTO_WORKERS)
}
