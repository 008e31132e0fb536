use crate::detection::batch_scheduler::Detection;

/// One slide of the final ordered result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideEntry {
    pub sequence_index: usize,
    pub frame_index: usize,
    /// Dissimilarity score that triggered the detection; 0 for the
    /// unconditional first slide.
    pub score: f64,
}

/// Ordered slide sequence, strictly increasing in both sequence and frame
/// index, always starting at frame 0.
#[derive(Clone, Debug, Default)]
pub struct SlideSequence {
    entries: Vec<SlideEntry>,
}

impl SlideSequence {
    pub fn entries(&self) -> &[SlideEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Combines per-batch detections into the final slide sequence.
///
/// Batches complete in arbitrary order, so the merger sorts by frame index
/// before assigning sequence indices. Frame 0 is always slide 0: the first
/// frame of the recording is a slide by definition, there is nothing earlier
/// to difference it against. Frame indices are already unique (one detection
/// per adjacent pair, batches do not overlap), so no dedup pass is needed.
pub struct DetectionMerger;

impl DetectionMerger {
    pub fn new() -> Self {
        Self
    }

    pub fn merge(&self, mut detections: Vec<Detection>) -> SlideSequence {
        detections.sort_by_key(|d| d.frame_index);

        let mut entries = Vec::with_capacity(detections.len() + 1);
        entries.push(SlideEntry {
            sequence_index: 0,
            frame_index: 0,
            score: 0.0,
        });
        for detection in detections {
            entries.push(SlideEntry {
                sequence_index: entries.len(),
                frame_index: detection.frame_index,
                score: detection.score,
            });
        }

        SlideSequence { entries }
    }
}

impl Default for DetectionMerger {
    fn default() -> Self {
        Self::new()
    }
}
