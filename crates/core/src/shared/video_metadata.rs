use std::path::PathBuf;

/// Properties of an opened video source.
///
/// `total_frames` comes from container metadata and may be 0 when the
/// container does not record it; the actual count is whatever the decode
/// iterator yields.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub source_path: Option<PathBuf>,
}
