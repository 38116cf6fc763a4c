//! Counting pairwise slopes inside `[alpha, beta]` via one inversion count.
//!
//! Sort by `f_alpha`, tag each point with its rank, re-sort the tagged points
//! by `f_beta`, and read the ranks back: a pair swaps places between the two
//! orders exactly when its slope lies in `[alpha, beta]`. The tie-breaks in
//! `compare_points_alpha`/`compare_points_beta` make both ends inclusive, and
//! the stable second sort keeps duplicates from ever swapping. Vertical pairs
//! keep the same order under every `θ`, so they are never counted.
//!
//! Interval ends
//! - The sweep keys `x·θ − y` are rounded, so a pair whose slope sits on (or
//!   within a few ulps of) `alpha` or `beta` can land on the wrong side when
//!   coordinates are not small integers. The sweep therefore runs on the
//!   interval widened by `BOUNDARY_BAND` at each end, and every pair inside
//!   the bands is re-judged with `compute_slope`. Counts then agree with
//!   `compute_slope` membership, `alpha == beta` included, unless a pair's Δx
//!   is tiny next to its coordinates (see `cfg`).
//! - Cost: O(n log n + B), B the number of pairs inside the two bands.

use std::ops::ControlFlow;

use crate::cfg::BOUNDARY_BAND;
use crate::error::SlopeError;
use crate::inversions::{count_inversions, try_for_each_inversion};
use crate::points::{Point, PointSet};
use crate::slope::{compare_points_alpha, compare_points_beta, compute_slope, SlopePair};

/// A point carrying its rank (1-based) under the alpha order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointOrder {
    pub point: Point,
    pub rank: usize,
}

/// Number of unordered pairs with slope in the closed interval `[alpha, beta]`.
///
/// Membership is decided as `compute_slope(p, q).in_range(alpha, beta)` would
/// decide it. Reorders `points`. Fails when `alpha > beta` or either bound is
/// not finite.
pub fn count_slopes(points: &mut PointSet, alpha: f64, beta: f64) -> Result<u64, SlopeError> {
    SlopeError::check_interval(alpha, beta)?;
    let (outer_lo, outer_hi) = widened(alpha, beta);
    let widened_count = count_inversions(&inverted_order(points, outer_lo, outer_hi)?);

    let mut outside = 0u64;
    let mut judge = |a: &Point, b: &Point| {
        if !compute_slope(a, b).in_range(alpha, beta) {
            outside += 1;
        }
        ControlFlow::Continue(())
    };
    let (inner_lo, inner_hi) = (alpha + band(alpha), beta - band(beta));
    if inner_lo < inner_hi {
        visit_inverted(points, outer_lo, inner_lo, &mut judge)?;
        visit_inverted(points, inner_hi, outer_hi, &mut judge)?;
    } else {
        // bands overlap: judge everything the widened sweep saw
        visit_inverted(points, outer_lo, outer_hi, &mut judge)?;
    }
    if outside > 0 {
        tracing::trace!(alpha, beta, widened_count, outside, "count_slopes: band pairs dropped");
    }
    Ok(widened_count.saturating_sub(outside))
}

/// Every pair with slope in `[alpha, beta]`, in unspecified order.
///
/// Same membership rule as `count_slopes`. O(n log n + K) for K reported pairs.
pub fn pairs_in_range(
    points: &mut PointSet,
    alpha: f64,
    beta: f64,
) -> Result<Vec<SlopePair>, SlopeError> {
    let mut pairs = Vec::new();
    for_each_pair_in_range(points, alpha, beta, |pair| {
        pairs.push(pair);
        ControlFlow::Continue(())
    })?;
    Ok(pairs)
}

/// Some pair with slope in `[alpha, beta]`, found without listing the rest.
pub(crate) fn first_pair_in_range(
    points: &mut PointSet,
    alpha: f64,
    beta: f64,
) -> Result<Option<SlopePair>, SlopeError> {
    let mut first = None;
    for_each_pair_in_range(points, alpha, beta, |pair| {
        first = Some(pair);
        ControlFlow::Break(())
    })?;
    Ok(first)
}

fn for_each_pair_in_range<F>(
    points: &mut PointSet,
    alpha: f64,
    beta: f64,
    mut visit: F,
) -> Result<(), SlopeError>
where
    F: FnMut(SlopePair) -> ControlFlow<()>,
{
    SlopeError::check_interval(alpha, beta)?;
    let (outer_lo, outer_hi) = widened(alpha, beta);
    visit_inverted(points, outer_lo, outer_hi, |a, b| match SlopePair::new(a, b) {
        Some(pair) if alpha <= pair.slope && pair.slope <= beta => visit(pair),
        _ => ControlFlow::Continue(()),
    })
}

fn band(theta: f64) -> f64 {
    BOUNDARY_BAND * theta.abs().max(1.0)
}

fn widened(alpha: f64, beta: f64) -> (f64, f64) {
    (
        (alpha - band(alpha)).max(f64::MIN),
        (beta + band(beta)).min(f64::MAX),
    )
}

/// Hand every pair swapped between the `alpha` and `beta` orders to `visit`.
fn visit_inverted<F>(
    points: &mut PointSet,
    alpha: f64,
    beta: f64,
    mut visit: F,
) -> Result<(), SlopeError>
where
    F: FnMut(&Point, &Point) -> ControlFlow<()>,
{
    let inverted = inverted_order(points, alpha, beta)?;
    let by_rank = points.points();
    let _ = try_for_each_inversion(&inverted, |&hi_rank, &lo_rank| {
        visit(&by_rank[hi_rank - 1], &by_rank[lo_rank - 1])
    });
    Ok(())
}

/// Alpha ranks listed in beta order. `points` is left in alpha order, so rank
/// `r` names `points[r - 1]`.
fn inverted_order(points: &mut PointSet, alpha: f64, beta: f64) -> Result<Vec<usize>, SlopeError> {
    SlopeError::check_interval(alpha, beta)?;
    let pts = points.as_mut_slice();
    pts.sort_by(|a, b| compare_points_alpha(a, b, alpha));

    let mut order: Vec<PointOrder> = pts
        .iter()
        .enumerate()
        .map(|(i, p)| PointOrder {
            point: *p,
            rank: i + 1,
        })
        .collect();
    // stable: duplicates keep their alpha order
    order.sort_by(|a, b| compare_points_beta(&a.point, &b.point, beta));

    Ok(order.iter().map(|o| o.rank).collect())
}
