use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors of the extraction pipeline.
///
/// Everything here aborts the run. Recoverable conditions never reach this
/// type: a zero-area sample patch degrades to zero features, and a
/// feature-vector length mismatch becomes a sentinel score (see
/// `FrameDifferencer`).
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to open video source {path}: {reason}")]
    SourceOpen { path: PathBuf, reason: String },

    #[error("video source contains no frames")]
    EmptySource,

    #[error("frame decode failed: {0}")]
    Decode(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no screenshots to assemble into a document")]
    AssemblyEmpty,

    #[error("document assembly failed: {0}")]
    Assembly(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
