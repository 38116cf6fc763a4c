//! Minimum pairwise slope in O(n log n).
//!
//! After sorting by x (y breaking ties), the minimum over all pairs is attained
//! by an x-adjacent pair: for a < b < c in x order, slope(a, c) is a weighted
//! mean of slope(a, b) and slope(b, c), so it can never be strictly smaller
//! than both. One sort plus an n−1 scan replaces the O(n²) comparison.

use crate::cfg::SlopeCfg;
use crate::points::PointSet;
use crate::slope::{compare_points_x_eps, compute_slope, Slope, SlopePair};

/// Minimum slope over all unordered pairs. Reorders `points` by x.
///
/// Returns `Slope::Infinite` for fewer than two points, or when every pair is
/// vertical.
pub fn min_slope(points: &mut PointSet) -> Slope {
    min_slope_with(points, SlopeCfg::default())
}

/// `min_slope` with an explicit x-tie tolerance.
pub fn min_slope_with(points: &mut PointSet, cfg: SlopeCfg) -> Slope {
    if points.len() < 2 {
        return Slope::Infinite;
    }
    sort_by_x(points, cfg);
    points
        .points()
        .windows(2)
        .map(|w| compute_slope(&w[0], &w[1]))
        .fold(Slope::Infinite, Slope::min)
}

/// An x-adjacent pair attaining the minimum finite slope.
pub fn min_slope_pair(points: &mut PointSet) -> Option<SlopePair> {
    if points.len() < 2 {
        return None;
    }
    sort_by_x(points, SlopeCfg::default());
    points
        .points()
        .windows(2)
        .filter_map(|w| SlopePair::new(&w[0], &w[1]))
        .fold(None, |best: Option<SlopePair>, pair| match best {
            Some(b) if b.slope <= pair.slope => Some(b),
            _ => Some(pair),
        })
}

fn sort_by_x(points: &mut PointSet, cfg: SlopeCfg) {
    let pts = points.as_mut_slice();
    pts.sort_by(|a, b| compare_points_x_eps(a, b, cfg.x_tie_eps));
    tracing::trace!(
        n = pts.len(),
        first = ?pts.first().map(|p| (p.x, p.y)),
        last = ?pts.last().map(|p| (p.x, p.y)),
        "min_slope: sorted by x"
    );
}

/// Maximum finite pairwise slope, or `None` if there is none.
///
/// Mirrors the set (y → −y), takes the minimum, and mirrors back; coordinates
/// are restored, order is not.
pub fn max_finite_slope(points: &mut PointSet) -> Option<f64> {
    reflect_y(points);
    let lowest = min_slope(points);
    reflect_y(points);
    lowest.finite().map(|s| -s)
}

fn reflect_y(points: &mut PointSet) {
    for p in points.as_mut_slice() {
        p.y = -p.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::SlopeCfg;

    fn set(coords: &[(f64, f64)]) -> PointSet {
        PointSet::from_xy(coords).unwrap()
    }

    #[test]
    fn regular_case() {
        let mut p = set(&[(1.0, 1.0), (3.0, 3.0), (2.0, 2.0)]);
        assert_eq!(min_slope(&mut p), Slope::Finite(1.0));
    }

    #[test]
    fn zero_slope() {
        let mut p = set(&[(1.0, 1.0), (2.0, 1.0), (3.0, 3.0)]);
        assert_eq!(min_slope(&mut p), Slope::Finite(0.0));
    }

    #[test]
    fn negative_slope() {
        let mut p = set(&[(1.0, 1.0), (2.0, 0.0), (3.0, 3.0)]);
        assert_eq!(min_slope(&mut p), Slope::Finite(-1.0));
    }

    #[test]
    fn single_point_is_infinite() {
        let mut p = set(&[(1.0, 1.0)]);
        assert_eq!(min_slope(&mut p), Slope::Infinite);
        assert_eq!(min_slope(&mut PointSet::default()), Slope::Infinite);
    }

    #[test]
    fn min_pair_realizes_min_slope() {
        let mut p = set(&[(0.0, 0.0), (1.0, 3.0), (2.0, 1.0), (2.0, 9.0)]);
        let pair = min_slope_pair(&mut p).unwrap();
        assert_eq!(pair.slope, -2.0);
        assert_eq!((pair.left.x, pair.left.y), (1.0, 3.0));
        assert_eq!((pair.right.x, pair.right.y), (2.0, 1.0));
        assert!(min_slope_pair(&mut set(&[(1.0, 0.0), (1.0, 1.0)])).is_none());
    }

    #[test]
    fn vertical_only_is_infinite() {
        let mut p = set(&[(2.0, 0.0), (2.0, 4.0), (2.0, -1.0)]);
        assert_eq!(min_slope(&mut p), Slope::Infinite);
        assert_eq!(max_finite_slope(&mut p), None);
    }

    #[test]
    fn shared_x_groups_meet_at_extremes() {
        // Left column top meets right column bottom.
        let mut p = set(&[(0.0, -5.0), (0.0, 5.0), (1.0, 0.0), (1.0, -4.0)]);
        assert_eq!(min_slope(&mut p), Slope::Finite(-9.0));
        assert_eq!(max_finite_slope(&mut p), Some(5.0));
    }

    #[test]
    fn max_restores_coordinates() {
        let mut p = set(&[(0.0, 0.0), (1.0, 3.0), (2.0, 1.0)]);
        let before = {
            let mut v: Vec<(f64, f64)> = p.iter().map(|q| (q.x, q.y)).collect();
            v.sort_by(|a, b| a.partial_cmp(b).unwrap());
            v
        };
        assert_eq!(max_finite_slope(&mut p), Some(3.0));
        let mut after: Vec<(f64, f64)> = p.iter().map(|q| (q.x, q.y)).collect();
        after.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(before, after);
    }

    #[test]
    fn wide_tolerance_changes_adjacency() {
        // With a wide tie band the two left points order by y, which still
        // yields a valid adjacent pair.
        let mut p = set(&[(0.0, 0.0), (0.5, -1.0), (3.0, 0.0)]);
        assert_eq!(min_slope(&mut p), Slope::Finite(-2.0));
        let wide = SlopeCfg { x_tie_eps: 1.0 };
        let mut q = set(&[(0.0, 0.0), (0.5, -1.0), (3.0, 0.0)]);
        assert_eq!(min_slope_with(&mut q, wide), Slope::Finite(-2.0));
    }
}
