use std::path::Path;

use crate::shared::error::ExtractError;
use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Sequential frame supply from a video source.
///
/// Implementations own the codec details; the pipeline only sees `Frame`
/// and `VideoMetadata`. Decoding is inherently ordered, so frames are
/// yielded strictly in decode order with sequential indices.
pub trait VideoReader: Send {
    /// Opens the source and returns its metadata. Failure here is fatal to
    /// the run.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, ExtractError>;

    /// Iterator over frames in decode order. Must be called after a
    /// successful `open`.
    fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, ExtractError>> + '_>;

    /// Releases any resources held by the reader.
    fn close(&mut self);
}
