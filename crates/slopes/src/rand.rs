//! Seeded random point clouds for tests, benches, and the CLI.
//!
//! Determinism: the same `(cfg, seed)` always yields the same points.
//! `integer_grid` snaps coordinates to integers so slope arithmetic in
//! comparisons against brute force stays exact.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::points::{Point, PointSet};

/// Uniform cloud in the square `[-half_extent, half_extent]²`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointCloudCfg {
    pub n: usize,
    pub half_extent: f64,
    pub integer_grid: bool,
}

impl Default for PointCloudCfg {
    fn default() -> Self {
        Self {
            n: 1000,
            half_extent: 100.0,
            integer_grid: false,
        }
    }
}

pub fn draw_points(cfg: PointCloudCfg, seed: u64) -> PointSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let h = if cfg.half_extent.is_finite() && cfg.half_extent > 0.0 {
        cfg.half_extent
    } else {
        1.0
    };
    let coord = |rng: &mut StdRng| {
        let v = rng.gen_range(-h..=h);
        if cfg.integer_grid {
            v.round()
        } else {
            v
        }
    };
    let pts: Vec<Point> = (0..cfg.n)
        .map(|_| {
            let x = coord(&mut rng);
            let y = coord(&mut rng);
            Point::new(x, y)
        })
        .collect();
    // finite by construction
    PointSet::new(pts).unwrap_or_default()
}
