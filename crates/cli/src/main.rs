use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use slidesnap_core::pipeline::extract_slides_use_case::{
    ExtractSlidesUseCase, ProgressFn, RunReport,
};
use slidesnap_core::pipeline::run_config::{default_worker_count, RunConfig};
use slidesnap_core::shared::constants::VIDEO_EXTENSIONS;
use slidesnap_core::shared::error::ExtractError;
use slidesnap_core::video::domain::video_reader::VideoReader;
use slidesnap_core::video::infrastructure::ffmpeg_reader::FfmpegReader;

/// Extract the distinct slides from a screen-recording video as ordered PNG
/// screenshots plus one combined PDF.
#[derive(Parser)]
#[command(name = "slidesnap")]
struct Cli {
    /// Input video file. When omitted, a video in the working directory is
    /// auto-discovered.
    video_path: Option<PathBuf>,

    /// Directory for the individual slide screenshots.
    #[arg(long, default_value = "./screenshots")]
    output_dir: PathBuf,

    /// Dissimilarity threshold for detecting slide changes (empirical, not
    /// a probability).
    #[arg(long, default_value = "0.02")]
    threshold: f64,

    /// Number of reference points sampled across each frame.
    #[arg(long, default_value = "100")]
    reference_points: usize,

    /// Frames per batch of differencing work.
    #[arg(long, default_value = "50")]
    batch_size: usize,

    /// Name of the combined PDF, written to the working directory.
    #[arg(long, default_value = "slides.pdf")]
    document_name: String,

    /// Delete the individual screenshots after the PDF is created.
    #[arg(long)]
    cleanup: bool,

    /// Number of worker threads (default: auto-detect).
    #[arg(long)]
    workers: Option<usize>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        log::debug!("fatal: {e:?}");
        process::exit(exit_code(&e));
    }
}

/// 0 success, 2 source/configuration, 3 nothing to assemble, 4 output I/O.
fn exit_code(err: &ExtractError) -> i32 {
    match err {
        ExtractError::SourceOpen { .. }
        | ExtractError::EmptySource
        | ExtractError::Decode(_)
        | ExtractError::InvalidConfig(_) => 2,
        ExtractError::AssemblyEmpty => 3,
        ExtractError::Io(_) | ExtractError::Image(_) | ExtractError::Assembly(_) => 4,
    }
}

fn run() -> Result<(), ExtractError> {
    let cli = Cli::parse();

    let video_path = resolve_video_path(cli.video_path)?;
    log::info!("processing video: {}", video_path.display());

    let config = RunConfig {
        threshold: cli.threshold,
        reference_points: cli.reference_points,
        batch_size: cli.batch_size,
        worker_count: cli.workers.unwrap_or_else(default_worker_count),
        output_dir: cli.output_dir,
        document_name: cli.document_name,
        cleanup: cli.cleanup,
        ..Default::default()
    };

    let reader: Box<dyn VideoReader> = Box::new(FfmpegReader::new());
    let progress: ProgressFn = Box::new(|current, total| {
        if total > 0 {
            eprint!("\rLoading frame {current}/{total}");
        } else {
            eprint!("\rLoading frame {current}");
        }
    });

    let mut use_case = ExtractSlidesUseCase::new(reader, config, Some(progress));
    let report = use_case.execute(&video_path)?;
    eprintln!();

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &RunReport) {
    println!("Processing complete!");
    println!("Total slides detected: {}", report.slides.len());
    println!(
        "Timings: decode {:.2}s, detection {:.2}s, total {:.2}s ({:.1} frames/s)",
        report.decode_secs,
        report.detect_secs,
        report.total_secs,
        report.total_frames as f64 / report.total_secs.max(1e-9)
    );
    println!("Document created: {}", report.document_path.display());

    if report.slides.len() < 20 {
        println!("Consider lowering the threshold for more detections");
    }
}

/// Uses the given path, or discovers a video in the working directory.
fn resolve_video_path(explicit: Option<PathBuf>) -> Result<PathBuf, ExtractError> {
    match explicit {
        Some(path) => {
            if path.exists() {
                Ok(path)
            } else {
                Err(ExtractError::SourceOpen {
                    path,
                    reason: "file not found".into(),
                })
            }
        }
        None => {
            let cwd = std::env::current_dir()?;
            let found = find_video_in_dir(&cwd)?.ok_or_else(|| ExtractError::SourceOpen {
                path: cwd,
                reason: "no video file found in working directory; pass one explicitly".into(),
            })?;
            log::info!("auto-detected video file: {}", found.display());
            Ok(found)
        }
    }
}

/// Lexicographically first file with a known video extension, so discovery
/// is reproducible when several candidates exist.
fn find_video_in_dir(dir: &Path) -> Result<Option<PathBuf>, ExtractError> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_video_extension(path))
        .collect();
    candidates.sort();
    Ok(candidates.into_iter().next())
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_video_extension() {
        assert!(has_video_extension(Path::new("talk.mp4")));
        assert!(has_video_extension(Path::new("TALK.MOV")));
        assert!(!has_video_extension(Path::new("notes.txt")));
        assert!(!has_video_extension(Path::new("no_extension")));
    }

    #[test]
    fn test_find_video_picks_lexicographically_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.mp4"), b"x").unwrap();
        std::fs::write(dir.path().join("a.mkv"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let found = find_video_in_dir(dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), "a.mkv");
    }

    #[test]
    fn test_find_video_in_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_video_in_dir(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_explicit_missing_path_is_source_error() {
        let result = resolve_video_path(Some(PathBuf::from("/nonexistent/talk.mp4")));
        assert!(matches!(result, Err(ExtractError::SourceOpen { .. })));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&ExtractError::EmptySource), 2);
        assert_eq!(exit_code(&ExtractError::AssemblyEmpty), 3);
        assert_eq!(
            exit_code(&ExtractError::Assembly("broken".into())),
            4
        );
    }
}
