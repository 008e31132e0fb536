use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::detection::batch_scheduler::BatchScheduler;
use crate::detection::detection_merger::{DetectionMerger, SlideSequence};
use crate::output::document_assembler::DocumentAssembler;
use crate::output::screenshot_writer::ScreenshotWriter;
use crate::pipeline::run_config::RunConfig;
use crate::sampling::sample_points::SamplePointGenerator;
use crate::shared::error::ExtractError;
use crate::shared::frame::Frame;
use crate::video::domain::video_reader::VideoReader;

/// Decode progress callback: (frames decoded so far, container frame hint).
pub type ProgressFn = Box<dyn Fn(usize, usize) + Send>;

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub total_frames: usize,
    pub slides: SlideSequence,
    /// Screenshot paths in slide order. Already deleted from disk when the
    /// run was configured with cleanup.
    pub screenshots: Vec<PathBuf>,
    pub document_path: PathBuf,
    pub decode_secs: f64,
    pub detect_secs: f64,
    pub total_secs: f64,
}

/// Orchestrates the full extraction: sequential decode, one-time sample
/// point generation from the first frame, batched parallel differencing,
/// merge, screenshot emission, document assembly, optional cleanup.
///
/// The whole decoded frame sequence is held in memory for the duration of
/// the run — an explicit trade of peak memory for a simple, correct
/// pipeline in which batches index freely into the sequence.
pub struct ExtractSlidesUseCase {
    reader: Box<dyn VideoReader>,
    config: RunConfig,
    on_progress: Option<ProgressFn>,
}

impl ExtractSlidesUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        config: RunConfig,
        on_progress: Option<ProgressFn>,
    ) -> Self {
        Self {
            reader,
            config,
            on_progress,
        }
    }

    pub fn execute(&mut self, input: &Path) -> Result<RunReport, ExtractError> {
        self.config.validate()?;
        let run_start = Instant::now();

        let metadata = self.reader.open(input)?;
        log::info!(
            "video properties: {} frames, {:.2} fps, {}x{}",
            metadata.total_frames,
            metadata.fps,
            metadata.width,
            metadata.height
        );
        log::info!(
            "settings: threshold={}, reference_points={}, batch_size={}, workers={}",
            self.config.threshold,
            self.config.reference_points,
            self.config.batch_size,
            self.config.worker_count
        );

        let decode_start = Instant::now();
        let frames = {
            let mut frames: Vec<Frame> = Vec::new();
            for result in self.reader.frames() {
                frames.push(result?);
                if let Some(callback) = &self.on_progress {
                    callback(frames.len(), metadata.total_frames);
                }
            }
            frames
        };
        self.reader.close();

        if frames.is_empty() {
            return Err(ExtractError::EmptySource);
        }
        let decode_secs = decode_start.elapsed().as_secs_f64();
        log::info!("loaded {} frames in {:.2}s", frames.len(), decode_secs);

        let detect_start = Instant::now();
        let points = SamplePointGenerator::new(self.config.reference_points, self.config.seed)
            .generate(frames[0].height(), frames[0].width());
        log::info!("generated {} sample points", points.len());

        let scheduler = BatchScheduler::new(
            self.config.batch_size,
            self.config.worker_count,
            self.config.threshold,
        );
        let detections = scheduler.run(&frames, &points);
        let slides = DetectionMerger::new().merge(detections);
        let detect_secs = detect_start.elapsed().as_secs_f64();
        log::info!(
            "detected {} slides in {:.2}s",
            slides.len(),
            detect_secs
        );

        let mut writer = ScreenshotWriter::new(&self.config.output_dir);
        for entry in slides.entries() {
            writer.write(entry.sequence_index, &frames[entry.frame_index])?;
            if entry.sequence_index > 0 {
                log::info!(
                    "slide change at frame {} (difference: {:.4})",
                    entry.frame_index,
                    entry.score
                );
            }
        }
        let screenshots = writer.written().to_vec();

        // The document lives outside output_dir so cleanup cannot touch it.
        let document_path = std::env::current_dir()?.join(&self.config.document_name);
        DocumentAssembler::new().assemble(writer.written(), &document_path)?;

        if self.config.cleanup {
            writer.cleanup()?;
        }

        let total_secs = run_start.elapsed().as_secs_f64();
        Ok(RunReport {
            total_frames: frames.len(),
            slides,
            screenshots,
            document_path,
            decode_secs,
            detect_secs,
            total_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::video_metadata::VideoMetadata;

    const W: u32 = 64;
    const H: u32 = 64;

    struct StubReader {
        frames: Vec<Frame>,
    }

    impl StubReader {
        fn new(frames: Vec<Frame>) -> Self {
            Self { frames }
        }
    }

    impl VideoReader for StubReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, ExtractError> {
            Ok(VideoMetadata {
                width: W,
                height: H,
                fps: 30.0,
                total_frames: self.frames.len(),
                source_path: None,
            })
        }

        fn frames(&mut self) -> Box<dyn Iterator<Item = Result<Frame, ExtractError>> + '_> {
            Box::new(self.frames.drain(..).map(Ok))
        }

        fn close(&mut self) {}
    }

    fn solid_frame(value: u8, index: usize) -> Frame {
        Frame::new(vec![value; (W * H * 3) as usize], W, H, 3, index)
    }

    fn identical_frames(count: usize) -> Vec<Frame> {
        (0..count).map(|i| solid_frame(128, i)).collect()
    }

    fn frames_changing_at(count: usize, change: usize) -> Vec<Frame> {
        (0..count)
            .map(|i| solid_frame(if i < change { 30 } else { 220 }, i))
            .collect()
    }

    fn config_in(dir: &Path, batch_size: usize) -> RunConfig {
        RunConfig {
            reference_points: 20,
            batch_size,
            worker_count: 4,
            output_dir: dir.join("screenshots"),
            document_name: dir.join("slides.pdf").to_string_lossy().into_owned(),
            ..Default::default()
        }
    }

    fn run(frames: Vec<Frame>, config: RunConfig) -> Result<RunReport, ExtractError> {
        let mut use_case =
            ExtractSlidesUseCase::new(Box::new(StubReader::new(frames)), config, None);
        use_case.execute(Path::new("stub.mp4"))
    }

    #[test]
    fn test_identical_frames_yield_single_slide() {
        let dir = tempfile::tempdir().unwrap();
        let report = run(identical_frames(100), config_in(dir.path(), 50)).unwrap();

        assert_eq!(report.total_frames, 100);
        assert_eq!(report.slides.len(), 1);
        assert_eq!(report.slides.entries()[0].frame_index, 0);
        assert_eq!(report.screenshots.len(), 1);
        assert!(report.document_path.exists());
    }

    #[test]
    fn test_mid_run_change_yields_two_slides() {
        let dir = tempfile::tempdir().unwrap();
        // Single batch spans the change, so the seam is compared.
        let report = run(frames_changing_at(100, 50), config_in(dir.path(), 100)).unwrap();

        let frames: Vec<_> = report
            .slides
            .entries()
            .iter()
            .map(|e| e.frame_index)
            .collect();
        assert_eq!(frames, vec![0, 50]);
    }

    #[test]
    fn test_change_on_batch_boundary_is_missed() {
        let dir = tempfile::tempdir().unwrap();
        // batch_size 50 puts the 49->50 seam between batches; the change
        // goes undetected by design.
        let report = run(frames_changing_at(100, 50), config_in(dir.path(), 50)).unwrap();
        assert_eq!(report.slides.len(), 1);
    }

    #[test]
    fn test_screenshots_written_in_sequence_order() {
        let dir = tempfile::tempdir().unwrap();
        let report = run(frames_changing_at(100, 30), config_in(dir.path(), 100)).unwrap();

        let names: Vec<_> = report
            .screenshots
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["slide_0000_frame_0.png", "slide_0001_frame_30.png"]
        );
        for path in &report.screenshots {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_cleanup_removes_screenshots_but_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            cleanup: true,
            ..config_in(dir.path(), 100)
        };
        let report = run(identical_frames(10), config).unwrap();

        for path in &report.screenshots {
            assert!(!path.exists());
        }
        assert!(report.document_path.exists());
    }

    #[test]
    fn test_empty_source_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(Vec::new(), config_in(dir.path(), 50));
        assert!(matches!(result, Err(ExtractError::EmptySource)));
    }

    #[test]
    fn test_invalid_config_rejected_before_decode() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            threshold: -1.0,
            ..config_in(dir.path(), 50)
        };
        let result = run(identical_frames(10), config);
        assert!(matches!(result, Err(ExtractError::InvalidConfig(_))));
    }

    #[test]
    fn test_progress_callback_sees_every_frame() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_in_callback = seen.clone();
        let on_progress: ProgressFn = Box::new(move |current, _total| {
            seen_in_callback.store(current, Ordering::SeqCst);
        });

        let mut use_case = ExtractSlidesUseCase::new(
            Box::new(StubReader::new(identical_frames(25))),
            config_in(dir.path(), 50),
            Some(on_progress),
        );
        use_case.execute(Path::new("stub.mp4")).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 25);
    }
}
