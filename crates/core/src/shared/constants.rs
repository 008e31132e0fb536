/// Minimum dissimilarity score for recording a slide change. Empirically
/// tuned; the score is not a normalized probability and has no upper bound.
pub const DEFAULT_THRESHOLD: f64 = 0.02;

/// Number of sample points placed across each frame.
pub const DEFAULT_REFERENCE_POINTS: usize = 100;

/// Frames per batch of differencing work.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Fixed seed so sample-point placement is identical across runs.
pub const SAMPLE_SEED: u64 = 42;

/// Fraction of each dimension excluded at every edge, keeping sample points
/// away from recording chrome and slide borders.
pub const EDGE_MARGIN_RATIO: f64 = 0.08;

/// Side length of the square patch sampled around each point.
pub const PATCH_SIZE: usize = 8;

/// Weights of the combined dissimilarity metric.
pub const MAD_WEIGHT: f64 = 0.6;
pub const EUCLIDEAN_WEIGHT: f64 = 0.4;

/// Score reported when two feature vectors disagree in length. Dominates
/// any realistic same-length score, so the pair always registers as a change.
pub const LENGTH_MISMATCH_SCORE: f64 = 1.0;

/// Per-point features: mean, std-dev, horizontal and vertical gradient.
pub const FEATURES_PER_POINT: usize = 4;

/// Upper bound on auto-detected worker threads.
pub const MAX_AUTO_WORKERS: usize = 16;

/// Extensions considered when auto-discovering a video in the working
/// directory.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "avi", "webm"];

pub const DEFAULT_OUTPUT_DIR: &str = "./screenshots";
pub const DEFAULT_DOCUMENT_NAME: &str = "slides.pdf";

/// Raster resolution used when placing screenshots onto PDF pages.
pub const DOCUMENT_DPI: f64 = 100.0;
