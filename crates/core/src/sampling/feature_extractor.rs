use ndarray::{Array2, ArrayView3};

use crate::sampling::sample_points::SamplePoint;
use crate::shared::constants::{FEATURES_PER_POINT, PATCH_SIZE};
use crate::shared::frame::Frame;

/// Numeric summary of one frame: four statistics per sample point, in point
/// order. Length is `4 * points.len()` and constant for the whole run.
pub type FeatureVector = Vec<f64>;

/// Converts a frame into a feature vector by sampling small luma patches.
///
/// Each point contributes (mean, std-dev, horizontal gradient, vertical
/// gradient) of the 8x8 patch centered on it, clipped at frame edges. A
/// degenerate clip (zero-area patch) contributes four zeros instead of
/// failing; patches thinner than 2 px along an axis have zero gradients.
pub struct FeatureExtractor {
    patch_size: usize,
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self {
            patch_size: PATCH_SIZE,
        }
    }

    pub fn extract(&self, frame: &Frame, points: &[SamplePoint]) -> FeatureVector {
        let pixels = frame.as_ndarray();
        let height = frame.height() as usize;
        let width = frame.width() as usize;
        let half = self.patch_size / 2;

        let mut features = Vec::with_capacity(points.len() * FEATURES_PER_POINT);
        for point in points {
            let y = point.y as usize;
            let x = point.x as usize;
            let y1 = y.saturating_sub(half);
            let y2 = (y + half).min(height);
            let x1 = x.saturating_sub(half);
            let x2 = (x + half).min(width);

            if y2 <= y1 || x2 <= x1 {
                features.extend_from_slice(&[0.0; FEATURES_PER_POINT]);
                continue;
            }

            let patch = luma_patch(&pixels, y1, y2, x1, x2);
            let mean = patch.mean().unwrap_or(0.0);
            let std = patch.std(0.0);
            let (grad_x, grad_y) = gradients(&patch);
            features.extend_from_slice(&[mean, std, grad_x, grad_y]);
        }
        features
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Rec.601 luma of the patch spanning rows `y1..y2` and columns `x1..x2`.
fn luma_patch(pixels: &ArrayView3<'_, u8>, y1: usize, y2: usize, x1: usize, x2: usize) -> Array2<f64> {
    Array2::from_shape_fn((y2 - y1, x2 - x1), |(r, c)| {
        let red = pixels[[y1 + r, x1 + c, 0]] as f64;
        let green = pixels[[y1 + r, x1 + c, 1]] as f64;
        let blue = pixels[[y1 + r, x1 + c, 2]] as f64;
        0.299 * red + 0.587 * green + 0.114 * blue
    })
}

/// Mean absolute difference between horizontally and vertically adjacent
/// pixels. Zero along any axis shorter than 2 px.
fn gradients(patch: &Array2<f64>) -> (f64, f64) {
    let (rows, cols) = patch.dim();
    if rows < 2 || cols < 2 {
        return (0.0, 0.0);
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for r in 0..rows {
        for c in 0..cols - 1 {
            sum_x += (patch[[r, c + 1]] - patch[[r, c]]).abs();
        }
    }
    for r in 0..rows - 1 {
        for c in 0..cols {
            sum_y += (patch[[r + 1, c]] - patch[[r, c]]).abs();
        }
    }

    let grad_x = sum_x / (rows * (cols - 1)) as f64;
    let grad_y = sum_y / ((rows - 1) * cols) as f64;
    (grad_x, grad_y)
}
