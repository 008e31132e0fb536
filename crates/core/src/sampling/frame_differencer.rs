use crate::shared::constants::{EUCLIDEAN_WEIGHT, LENGTH_MISMATCH_SCORE, MAD_WEIGHT};

/// Scalar dissimilarity between two feature vectors.
///
/// Both vectors are normalized by 255 (raw intensity/gradient units into
/// roughly [0, 1]), then combined as `0.6 * MAD + 0.4 * euclidean / sqrt(len)`.
/// The euclidean term is divided by the square root of the length so the
/// score does not grow with the point count. There is no enforced upper
/// bound; thresholds against this score are empirical tuning values.
pub struct FrameDifferencer;

impl FrameDifferencer {
    pub fn new() -> Self {
        Self
    }

    /// Returns a score >= 0; 0 for identical vectors, symmetric in its
    /// arguments.
    ///
    /// A length mismatch can only come from a configuration bug, so it is
    /// reported as the sentinel maximal score rather than crashing a batch
    /// mid-run. It is logged loudly.
    pub fn difference(&self, a: &[f64], b: &[f64]) -> f64 {
        if a.len() != b.len() {
            log::error!(
                "feature vector length mismatch: {} vs {} (sentinel score {})",
                a.len(),
                b.len(),
                LENGTH_MISMATCH_SCORE
            );
            return LENGTH_MISMATCH_SCORE;
        }
        if a.is_empty() {
            return 0.0;
        }

        let len = a.len() as f64;
        let mut abs_sum = 0.0;
        let mut sq_sum = 0.0;
        for (&va, &vb) in a.iter().zip(b) {
            let diff = (va - vb) / 255.0;
            abs_sum += diff.abs();
            sq_sum += diff * diff;
        }

        let mad = abs_sum / len;
        let euclidean = sq_sum.sqrt() / len.sqrt();
        MAD_WEIGHT * mad + EUCLIDEAN_WEIGHT * euclidean
    }
}

impl Default for FrameDifferencer {
    fn default() -> Self {
        Self::new()
    }
}
