use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::shared::constants::EDGE_MARGIN_RATIO;

/// One fixed (y, x) pixel coordinate at which per-frame features are
/// sampled. The full set is generated once per run and shared read-only by
/// every worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SamplePoint {
    pub y: u32,
    pub x: u32,
}

/// Places sample points across a frame, avoiding alignment with slide
/// structure.
///
/// Half the points are uniform within the margin-bounded interior; the rest
/// sweep the interior diagonal with a bounded perpendicular jitter, so the
/// set never lines up with a regular slide grid. Placement is driven by a
/// ChaCha8 stream seeded with a fixed constant, which makes the output a
/// pure function of (height, width, count, seed).
pub struct SamplePointGenerator {
    count: usize,
    seed: u64,
}

impl SamplePointGenerator {
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed }
    }

    /// Generates exactly `count` unique points inside the usable interior.
    ///
    /// The only exception is an interior with fewer than `count` cells, in
    /// which case every interior cell is returned.
    pub fn generate(&self, height: u32, width: u32) -> Vec<SamplePoint> {
        let margin_y = (height as f64 * EDGE_MARGIN_RATIO) as u32;
        let margin_x = (width as f64 * EDGE_MARGIN_RATIO) as u32;
        let usable_h = (height - 2 * margin_y).max(1);
        let usable_w = (width - 2 * margin_x).max(1);

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let half = self.count / 2;

        let mut points: Vec<SamplePoint> = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let point = if i < half || half == 0 {
                uniform_point(&mut rng, margin_y, margin_x, usable_h, usable_w)
            } else {
                diagonal_point(
                    &mut rng,
                    (i - half) as f64 / half as f64,
                    height,
                    width,
                    margin_y,
                    margin_x,
                    usable_h,
                    usable_w,
                )
            };
            points.push(point);
        }

        // Order-preserving dedup, then top up with uniform draws until the
        // target count is reached again.
        let mut seen: HashSet<SamplePoint> = HashSet::with_capacity(self.count);
        let mut unique: Vec<SamplePoint> = Vec::with_capacity(self.count);
        for point in points {
            if seen.insert(point) {
                unique.push(point);
            }
        }

        let interior_cells = usable_h as u64 * usable_w as u64;
        let mut attempts: u64 = 0;
        let max_attempts = 10_000 + 100 * self.count as u64;
        while unique.len() < self.count && attempts < max_attempts {
            let point = uniform_point(&mut rng, margin_y, margin_x, usable_h, usable_w);
            if seen.insert(point) {
                unique.push(point);
            }
            attempts += 1;
        }

        // Tiny interiors can starve the random top-up; finish with a
        // deterministic scan of the remaining cells.
        if unique.len() < self.count {
            'scan: for y in margin_y..margin_y + usable_h {
                for x in margin_x..margin_x + usable_w {
                    let point = SamplePoint { y, x };
                    if seen.insert(point) {
                        unique.push(point);
                        if unique.len() == self.count {
                            break 'scan;
                        }
                    }
                }
            }
        }

        if unique.len() < self.count {
            log::warn!(
                "usable interior has only {} cells; returning {} of {} requested points",
                interior_cells,
                unique.len(),
                self.count
            );
        }

        unique.truncate(self.count);
        unique
    }
}

fn uniform_point(
    rng: &mut ChaCha8Rng,
    margin_y: u32,
    margin_x: u32,
    usable_h: u32,
    usable_w: u32,
) -> SamplePoint {
    let y = margin_y + rng.gen_range(0..usable_h);
    let x = margin_x + rng.gen_range(0..usable_w);
    SamplePoint { y, x }
}

#[allow(clippy::too_many_arguments)]
fn diagonal_point(
    rng: &mut ChaCha8Rng,
    progress: f64,
    height: u32,
    width: u32,
    margin_y: u32,
    margin_x: u32,
    usable_h: u32,
    usable_w: u32,
) -> SamplePoint {
    let base_y = margin_y as i64 + (progress * usable_h as f64) as i64;
    let base_x = margin_x as i64 + (progress * usable_w as f64) as i64;

    // Jitter perpendicular to the sweep, bounded by 1/8 of the smaller
    // usable dimension.
    let offset_range = (usable_h.min(usable_w) / 8) as i64;
    let (y_offset, x_offset) = if offset_range > 0 {
        (
            rng.gen_range(-offset_range..offset_range),
            rng.gen_range(-offset_range..offset_range),
        )
    } else {
        (0, 0)
    };

    let y = (base_y + y_offset).clamp(margin_y as i64, (height - margin_y) as i64);
    let x = (base_x + x_offset).clamp(margin_x as i64, (width - margin_x) as i64);
    SamplePoint {
        y: y as u32,
        x: x as u32,
    }
}
