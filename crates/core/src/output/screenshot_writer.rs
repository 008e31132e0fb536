use std::path::{Path, PathBuf};

use crate::shared::error::ExtractError;
use crate::shared::frame::Frame;

/// Persists selected frames as PNG files in the configured output directory.
///
/// File names are deterministic: the zero-padded sequence index plus the
/// original frame index, e.g. `slide_0003_frame_412.png`. Written paths are
/// recorded in order; that list is the sole input to document assembly and
/// to the optional cleanup pass.
pub struct ScreenshotWriter {
    output_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl ScreenshotWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            written: Vec::new(),
        }
    }

    /// Writes one frame, creating the output directory if absent, and
    /// returns the file path.
    pub fn write(&mut self, sequence_index: usize, frame: &Frame) -> Result<PathBuf, ExtractError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let filename = format!("slide_{:04}_frame_{}.png", sequence_index, frame.index());
        let path = self.output_dir.join(filename);

        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or_else(|| {
                ExtractError::Assembly("frame buffer does not match its dimensions".into())
            })?;
        img.save(&path)?;

        log::debug!("saved screenshot {}", path.display());
        self.written.push(path.clone());
        Ok(path)
    }

    /// Paths written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Removes every written screenshot. Used after the combined document
    /// has been assembled; the document itself lives outside `output_dir`
    /// and is unaffected.
    pub fn cleanup(&mut self) -> Result<(), ExtractError> {
        for path in self.written.drain(..) {
            std::fs::remove_file(&path)?;
        }
        log::info!("screenshot files deleted");
        Ok(())
    }
}
