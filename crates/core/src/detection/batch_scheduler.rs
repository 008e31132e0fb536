use crate::sampling::feature_extractor::FeatureExtractor;
use crate::sampling::frame_differencer::FrameDifferencer;
use crate::sampling::sample_points::SamplePoint;
use crate::shared::frame::Frame;

/// A slide-change event: the global index of the frame where the change is
/// observed, and the dissimilarity score that crossed the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub frame_index: usize,
    pub score: f64,
}

/// Partitions the frame sequence into fixed-size batches and runs the
/// differencing for each batch on a fixed pool of worker threads.
///
/// Batches are contiguous, non-overlapping and order-preserving; within a
/// batch only consecutive frames are compared. Workers share nothing mutable:
/// jobs carry read-only frame slices and the read-only sample-point set, so
/// no locking is needed and batch completion order is irrelevant (the merge
/// step re-sorts by frame index).
///
/// Known limitation, kept on purpose: the first frame of a batch is never
/// compared against the last frame of the previous batch, so a slide change
/// landing exactly on a batch boundary goes undetected. See the
/// `boundary` tests pinning this behavior.
pub struct BatchScheduler {
    batch_size: usize,
    worker_count: usize,
    threshold: f64,
}

impl BatchScheduler {
    pub fn new(batch_size: usize, worker_count: usize, threshold: f64) -> Self {
        Self {
            batch_size,
            worker_count: worker_count.max(1),
            threshold,
        }
    }

    /// Runs differencing over all batches and returns the detections in
    /// unspecified order.
    pub fn run(&self, frames: &[Frame], points: &[SamplePoint]) -> Vec<Detection> {
        if frames.len() < 2 {
            return Vec::new();
        }

        let extractor = FeatureExtractor::new();
        let differencer = FrameDifferencer::new();
        let threshold = self.threshold;

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<(usize, &[Frame])>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<Vec<Detection>>();

        let batch_count = frames.chunks(self.batch_size).count();
        for (batch_index, chunk) in frames.chunks(self.batch_size).enumerate() {
            job_tx
                .send((batch_index * self.batch_size, chunk))
                .expect("job channel open while scheduling");
        }
        drop(job_tx);

        let mut detections = Vec::new();
        std::thread::scope(|scope| {
            for _ in 0..self.worker_count {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let extractor = &extractor;
                let differencer = &differencer;
                scope.spawn(move || {
                    for (start, batch) in job_rx.iter() {
                        let found =
                            process_batch(start, batch, points, extractor, differencer, threshold);
                        if result_tx.send(found).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(result_tx);

            let mut completed = 0usize;
            for found in result_rx.iter() {
                completed += 1;
                log::debug!("batch {completed}/{batch_count} done ({} detections)", found.len());
                detections.extend(found);
            }
        });

        detections
    }
}

/// Differences every consecutive frame pair within one batch.
fn process_batch(
    start: usize,
    batch: &[Frame],
    points: &[SamplePoint],
    extractor: &FeatureExtractor,
    differencer: &FrameDifferencer,
    threshold: f64,
) -> Vec<Detection> {
    if batch.len() < 2 {
        return Vec::new();
    }

    let features: Vec<_> = batch
        .iter()
        .map(|frame| extractor.extract(frame, points))
        .collect();

    let mut detections = Vec::new();
    for i in 1..features.len() {
        let score = differencer.difference(&features[i - 1], &features[i]);
        if score > threshold {
            detections.push(Detection {
                frame_index: start + i,
                score,
            });
        }
    }
    detections
}
