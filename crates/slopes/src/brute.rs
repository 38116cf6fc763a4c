//! O(n²) reference implementations.
//!
//! Used by tests, benches, and the CLI `check` command to cross-validate the
//! fast routines. Each pair is visited once (`i < j`).

use crate::points::Point;
use crate::slope::{compute_slope, Slope};

pub fn min_slope_naive(points: &[Point]) -> Slope {
    let mut best = Slope::Infinite;
    for (i, p) in points.iter().enumerate() {
        for q in &points[i + 1..] {
            best = best.min(compute_slope(p, q));
        }
    }
    best
}

pub fn count_slopes_naive(points: &[Point], alpha: f64, beta: f64) -> u64 {
    let mut count = 0u64;
    for (i, p) in points.iter().enumerate() {
        for q in &points[i + 1..] {
            if compute_slope(p, q).in_range(alpha, beta) {
                count += 1;
            }
        }
    }
    count
}

pub fn count_inversions_naive<T: Ord>(seq: &[T]) -> u64 {
    let mut count = 0u64;
    for (i, a) in seq.iter().enumerate() {
        count += seq[i + 1..].iter().filter(|b| a > *b).count() as u64;
    }
    count
}

/// All finite pairwise slopes, ascending.
pub fn sorted_slopes_naive(points: &[Point]) -> Vec<f64> {
    let mut out = Vec::with_capacity(points.len() * points.len().saturating_sub(1) / 2);
    for (i, p) in points.iter().enumerate() {
        for q in &points[i + 1..] {
            if let Some(s) = compute_slope(p, q).finite() {
                out.push(s);
            }
        }
    }
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    out
}

/// The `rank`-th smallest finite slope (1-based).
pub fn kth_slope_naive(points: &[Point], rank: u64) -> Option<f64> {
    let idx = usize::try_from(rank.checked_sub(1)?).ok()?;
    sorted_slopes_naive(points).get(idx).copied()
}
