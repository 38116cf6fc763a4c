//! Rank selection among pairwise slopes by oracle-driven bisection.
//!
//! Target: the `rank`-th smallest finite pairwise slope (1-based). The bracket
//! `[lo, hi]` always contains it and starts just outside `[min slope, max
//! slope]`, so the extreme pairs sit strictly inside every oracle query that
//! starts at `lo`. Each round splits at the
//! midpoint and asks `count_slopes(floor, split)` how many slopes lie at or
//! below the split, keeping the half that holds the target.
//! Refinement stops after `max_rounds`, when the bracket collapses, or when it
//! holds few enough slopes to enumerate; enumeration then pins down the exact
//! slope and a pair realizing it. A collapsed bracket that still holds many
//! slopes is a run of (near-)equal values: candidates drawn from it are
//! checked with `count_slopes(s, s)` until one covers the target rank.
//!
//! Every oracle call has `alpha <= beta`, and brackets never grow. No
//! randomness is involved, so results are reproducible.

use crate::cfg::SelectCfg;
use crate::error::SlopeError;
use crate::min_slope::{max_finite_slope, min_slope, min_slope_pair};
use crate::points::{Point, PointSet};
use crate::range::{count_slopes, first_pair_in_range, pairs_in_range};
use crate::slope::SlopePair;

/// Relative margin by which the starting bracket clears the extreme slopes.
const SPAN_PAD: f64 = 1e-9;

/// Candidate values tried inside a collapsed bracket before giving up.
const COLLAPSED_CANDIDATES: usize = 32;

/// Closed interval known to contain the target slope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bracket {
    pub lo: f64,
    pub hi: f64,
}

impl Bracket {
    #[inline]
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    #[inline]
    pub fn contains(&self, s: f64) -> bool {
        self.lo <= s && s <= self.hi
    }

    #[inline]
    pub fn is_collapsed(&self, eps: f64) -> bool {
        self.width() <= eps * self.lo.abs().max(self.hi.abs()).max(1.0)
    }

    fn midpoint(&self) -> f64 {
        (0.5 * self.lo + 0.5 * self.hi).clamp(self.lo, self.hi)
    }
}

/// Outcome of one bisection step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Round {
    /// Coordinate the bracket was split at; it became `lo` or `hi`.
    pub split: f64,
    /// Finite slopes `<= split`, as reported by the oracle.
    pub at_or_below: u64,
    pub bracket: Bracket,
}

/// Result of a full selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    pub rank: u64,
    pub bracket: Bracket,
    pub rounds: usize,
    /// Exact target slope when `pair` is set or the bracket is a single value;
    /// otherwise the bracket midpoint.
    pub slope: f64,
    pub exact: bool,
    /// A pair realizing the target slope, once the bracket was enumerated or
    /// a tied run inside a collapsed bracket was resolved.
    pub pair: Option<SlopePair>,
}

/// `Selection` seen from a representative point `u`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint {
    pub selection: Selection,
    /// Endpoint of the realizing pair picked relative to `u`: the partner of
    /// `u` when `u` is an endpoint, else the endpoint nearer to `u`.
    pub point: Option<Point>,
}

/// One bisection step on `[alpha, beta]` for the `rank`-th smallest slope.
///
/// The caller keeps `[alpha, beta]` bracketing the target; the returned
/// bracket then does too. Reorders `points`.
pub fn breakpoint_one_round(
    points: &mut PointSet,
    rank: u64,
    alpha: f64,
    beta: f64,
) -> Result<Round, SlopeError> {
    SlopeError::check_interval(alpha, beta)?;
    let span = finite_span(points)?;
    span.check_rank(rank)?;
    split_round(points, rank, span.lo, Bracket { lo: alpha, hi: beta })
}

/// Locate the `rank`-th smallest slope with at most `max_rounds` bisections and
/// return the point that realizes it, chosen relative to `u`.
pub fn breakpoint(
    points: &mut PointSet,
    u: &Point,
    rank: u64,
    max_rounds: usize,
) -> Result<Breakpoint, SlopeError> {
    breakpoint_with(points, u, rank, SelectCfg::with_max_rounds(max_rounds))
}

pub fn breakpoint_with(
    points: &mut PointSet,
    u: &Point,
    rank: u64,
    cfg: SelectCfg,
) -> Result<Breakpoint, SlopeError> {
    SlopeError::check_finite("u.x", u.x)?;
    SlopeError::check_finite("u.y", u.y)?;
    let selection = select_rank(points, rank, cfg)?;
    let point = selection.pair.map(|pair| endpoint_for(&pair, u));
    Ok(Breakpoint { selection, point })
}

/// The `rank`-th smallest finite slope (1-based).
pub fn kth_slope(points: &mut PointSet, rank: u64, cfg: SelectCfg) -> Result<f64, SlopeError> {
    Ok(select_rank(points, rank, cfg)?.slope)
}

pub fn select_rank(
    points: &mut PointSet,
    rank: u64,
    cfg: SelectCfg,
) -> Result<Selection, SlopeError> {
    let span = finite_span(points)?;
    span.check_rank(rank)?;

    if span.floor == span.ceil {
        tracing::debug!(slope = span.floor, "select: all finite slopes equal");
        return Ok(Selection {
            rank,
            bracket: Bracket {
                lo: span.floor,
                hi: span.ceil,
            },
            rounds: 0,
            slope: span.floor,
            exact: true,
            pair: min_slope_pair(points),
        });
    }

    let limit = cfg.enumerate_limit_for(points.len());
    let mut bracket = Bracket {
        lo: span.lo,
        hi: span.hi,
    };
    let mut inside = span.total;
    let mut rounds = 0usize;
    while rounds < cfg.max_rounds && inside > limit && !bracket.is_collapsed(cfg.collapse_eps) {
        let round = split_round(points, rank, span.lo, bracket)?;
        debug_assert!(round.bracket.width() <= bracket.width());
        bracket = round.bracket;
        inside = count_slopes(points, bracket.lo, bracket.hi)?;
        rounds += 1;
        tracing::debug!(
            round = rounds,
            split = round.split,
            at_or_below = round.at_or_below,
            lo = bracket.lo,
            hi = bracket.hi,
            inside,
            "select: bisected"
        );
    }

    if inside <= limit {
        // Slopes strictly below `lo` do not compete for the target rank.
        let below = count_slopes(points, span.lo, bracket.lo)?
            .saturating_sub(count_slopes(points, bracket.lo, bracket.lo)?);
        let mut pairs = pairs_in_range(points, bracket.lo, bracket.hi)?;
        pairs.sort_by(|a, b| {
            a.slope
                .partial_cmp(&b.slope)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let local = rank.checked_sub(below).and_then(|r| r.checked_sub(1));
        if let Some(pair) = local
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| pairs.get(i))
        {
            tracing::debug!(rounds, slope = pair.slope, "select: resolved by enumeration");
            return Ok(Selection {
                rank,
                bracket,
                rounds,
                slope: pair.slope,
                exact: true,
                pair: Some(*pair),
            });
        }
        tracing::debug!(rounds, below, pairs = pairs.len(), "select: enumeration missed rank");
    } else if bracket.is_collapsed(cfg.collapse_eps) {
        if let Some(pair) = resolve_collapsed(points, rank, span.lo, bracket)? {
            tracing::debug!(rounds, slope = pair.slope, inside, "select: resolved tied run");
            return Ok(Selection {
                rank,
                bracket,
                rounds,
                slope: pair.slope,
                exact: true,
                pair: Some(pair),
            });
        }
    }

    let exact = bracket.lo == bracket.hi;
    tracing::debug!(rounds, lo = bracket.lo, hi = bracket.hi, inside, "select: stopped");
    Ok(Selection {
        rank,
        bracket,
        rounds,
        slope: bracket.midpoint(),
        exact,
        pair: None,
    })
}

/// Extremes and count of the finite pairwise slopes. `lo`/`hi` are the
/// extremes pushed outward by `SPAN_PAD`.
struct FiniteSpan {
    floor: f64,
    ceil: f64,
    lo: f64,
    hi: f64,
    total: u64,
}

impl FiniteSpan {
    fn check_rank(&self, rank: u64) -> Result<(), SlopeError> {
        if rank == 0 || rank > self.total {
            return Err(SlopeError::RankOutOfRange {
                rank,
                total: self.total,
            });
        }
        Ok(())
    }
}

fn finite_span(points: &mut PointSet) -> Result<FiniteSpan, SlopeError> {
    if points.len() < 2 {
        return Err(SlopeError::NotEnoughPoints {
            needed: 2,
            got: points.len(),
        });
    }
    let floor = min_slope(points).finite().ok_or(SlopeError::NoFiniteSlope)?;
    let ceil = max_finite_slope(points).ok_or(SlopeError::NoFiniteSlope)?;
    let lo = floor - SPAN_PAD * floor.abs().max(1.0);
    let hi = ceil + SPAN_PAD * ceil.abs().max(1.0);
    let total = count_slopes(points, lo, hi)?;
    Ok(FiniteSpan {
        floor,
        ceil,
        lo,
        hi,
        total,
    })
}

/// `floor` lies below every finite slope.
fn split_round(
    points: &mut PointSet,
    rank: u64,
    floor: f64,
    bracket: Bracket,
) -> Result<Round, SlopeError> {
    let split = bracket.midpoint();
    let at_or_below = if split < floor {
        0
    } else {
        count_slopes(points, floor, split)?
    };
    let bracket = if at_or_below >= rank {
        Bracket {
            lo: bracket.lo,
            hi: split,
        }
    } else {
        Bracket {
            lo: split,
            hi: bracket.hi,
        }
    };
    Ok(Round {
        split,
        at_or_below,
        bracket,
    })
}

/// Find a pair realizing the `rank`-th slope inside a collapsed `bracket`.
///
/// Each candidate `s` is located exactly: `count_slopes(s, s)` slopes equal it
/// and the rest of `[floor, s]` lies below it. A miss shrinks the bracket past
/// `s`, so every candidate is a new value.
fn resolve_collapsed(
    points: &mut PointSet,
    rank: u64,
    floor: f64,
    mut bracket: Bracket,
) -> Result<Option<SlopePair>, SlopeError> {
    for _ in 0..COLLAPSED_CANDIDATES {
        if bracket.lo > bracket.hi {
            break;
        }
        let Some(pair) = first_pair_in_range(points, bracket.lo, bracket.hi)? else {
            break;
        };
        let s = pair.slope;
        let equal = count_slopes(points, s, s)?;
        let below = count_slopes(points, floor, s)?.saturating_sub(equal);
        if rank <= below {
            bracket.hi = next_below(s);
        } else if rank > below + equal {
            bracket.lo = next_above(s);
        } else {
            return Ok(Some(pair));
        }
    }
    tracing::debug!(lo = bracket.lo, hi = bracket.hi, "select: tied run left unresolved");
    Ok(None)
}

/// Smallest `f64` above a finite `x`.
fn next_above(x: f64) -> f64 {
    if x == 0.0 {
        f64::from_bits(1)
    } else if x > 0.0 {
        f64::from_bits(x.to_bits() + 1)
    } else {
        f64::from_bits(x.to_bits() - 1)
    }
}

fn next_below(x: f64) -> f64 {
    -next_above(-x)
}

fn endpoint_for(pair: &SlopePair, u: &Point) -> Point {
    if pair.left == *u {
        pair.right
    } else if pair.right == *u {
        pair.left
    } else if (pair.right - u).norm() < (pair.left - u).norm() {
        pair.right
    } else {
        pair.left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute::{kth_slope_naive, sorted_slopes_naive};
    use crate::rand::{draw_points, PointCloudCfg};
    use crate::slope::{compute_slope, Slope};

    fn set(coords: &[(f64, f64)]) -> PointSet {
        PointSet::from_xy(coords).unwrap()
    }

    #[test]
    fn every_rank_matches_naive_on_small_grid() {
        let cfg = PointCloudCfg {
            n: 25,
            half_extent: 6.0,
            integer_grid: true,
        };
        let mut p = draw_points(cfg, 5);
        let slopes = sorted_slopes_naive(p.points());
        let select = SelectCfg {
            enumerate_limit: 80,
            ..SelectCfg::default()
        };
        for (i, expected) in slopes.iter().enumerate() {
            let sel = select_rank(&mut p, i as u64 + 1, select).unwrap();
            assert!(sel.exact, "rank {}", i + 1);
            assert_eq!(sel.slope, *expected, "rank {}", i + 1);
            assert!(sel.bracket.contains(*expected));
        }
    }

    #[test]
    fn realizing_pair_has_target_slope() {
        let mut p = draw_points(
            PointCloudCfg {
                n: 60,
                half_extent: 30.0,
                integer_grid: true,
            },
            9,
        );
        let rank = 700;
        let expected = kth_slope_naive(p.points(), rank).unwrap();
        let u = p.points()[0];
        let bp = breakpoint(&mut p, &u, rank, 64).unwrap();
        let pair = bp.selection.pair.unwrap();
        assert_eq!(pair.slope, expected);
        assert_eq!(compute_slope(&pair.left, &pair.right).finite(), Some(expected));
        let point = bp.point.unwrap();
        assert!(point == pair.left || point == pair.right);
        assert!(p.contains(&point));
    }

    #[test]
    fn zero_rounds_still_resolves_small_sets() {
        let mut p = set(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let u = Point::new(1.0, 1.0);
        let bp = breakpoint(&mut p, &u, 2, 0).unwrap();
        assert_eq!(bp.selection.rounds, 0);
        assert_eq!(bp.selection.slope, 1.0);
        let pair = bp.selection.pair.unwrap();
        let point = bp.point.unwrap();
        if pair.left == u || pair.right == u {
            assert_ne!(point, u);
        }
    }

    #[test]
    fn zero_rounds_on_crowded_set_keeps_full_bracket() {
        let mut p = draw_points(
            PointCloudCfg {
                n: 40,
                half_extent: 10.0,
                integer_grid: true,
            },
            2,
        );
        let slopes = sorted_slopes_naive(p.points());
        let sel = select_rank(&mut p, 100, SelectCfg::with_max_rounds(0)).unwrap();
        assert_eq!(sel.rounds, 0);
        assert!(sel.pair.is_none());
        assert!(!sel.exact);
        assert!(sel.bracket.lo < slopes[0]);
        assert!(sel.bracket.hi > *slopes.last().unwrap());
        assert!(sel.bracket.contains(slopes[99]));
    }

    #[test]
    fn rounds_are_bounded_and_brackets_shrink() {
        let mut p = draw_points(
            PointCloudCfg {
                n: 80,
                half_extent: 50.0,
                integer_grid: false,
            },
            13,
        );
        let target = kth_slope_naive(p.points(), 1234).unwrap();
        let mut lo = min_slope(&mut p).finite().unwrap();
        let mut hi = max_finite_slope(&mut p).unwrap();
        for _ in 0..5 {
            let round = breakpoint_one_round(&mut p, 1234, lo, hi).unwrap();
            assert!(round.bracket.lo >= lo && round.bracket.hi <= hi);
            assert!(round.bracket.lo == round.split || round.bracket.hi == round.split);
            assert!(round.bracket.contains(target));
            lo = round.bracket.lo;
            hi = round.bracket.hi;
        }
        let sel = select_rank(&mut p, 1234, SelectCfg::with_max_rounds(3)).unwrap();
        assert!(sel.rounds <= 3);
    }

    #[test]
    fn deterministic_for_fixed_input() {
        let cfg = PointCloudCfg {
            n: 50,
            half_extent: 10.0,
            integer_grid: false,
        };
        let mut a = draw_points(cfg, 21);
        let mut b = draw_points(cfg, 21);
        let sa = select_rank(&mut a, 300, SelectCfg::with_max_rounds(7)).unwrap();
        let sb = select_rank(&mut b, 300, SelectCfg::with_max_rounds(7)).unwrap();
        assert_eq!(sa, sb);
    }

    #[test]
    fn collinear_set_collapses_immediately() {
        let coords: Vec<(f64, f64)> = (0..20).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
        let mut p = set(&coords);
        let sel = select_rank(&mut p, 150, SelectCfg::default()).unwrap();
        assert_eq!(sel.rounds, 0);
        assert!(sel.exact);
        assert_eq!(sel.slope, 2.0);
        assert_eq!(sel.pair.map(|pair| pair.slope), Some(2.0));
    }

    #[test]
    fn validation_failures() {
        let mut one = set(&[(1.0, 1.0)]);
        assert_eq!(
            select_rank(&mut one, 1, SelectCfg::default()),
            Err(SlopeError::NotEnoughPoints { needed: 2, got: 1 })
        );
        let mut vertical = set(&[(1.0, 1.0), (1.0, 2.0)]);
        assert_eq!(
            kth_slope(&mut vertical, 1, SelectCfg::default()),
            Err(SlopeError::NoFiniteSlope)
        );
        let mut p = set(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert_eq!(
            kth_slope(&mut p, 0, SelectCfg::default()),
            Err(SlopeError::RankOutOfRange { rank: 0, total: 3 })
        );
        assert_eq!(
            kth_slope(&mut p, 4, SelectCfg::default()),
            Err(SlopeError::RankOutOfRange { rank: 4, total: 3 })
        );
        assert!(matches!(
            breakpoint_one_round(&mut p, 1, 1.0, -1.0),
            Err(SlopeError::InvalidInterval { .. })
        ));
        let nan_u = Point::new(f64::NAN, 0.0);
        assert!(matches!(
            breakpoint(&mut p, &nan_u, 1, 4),
            Err(SlopeError::NonFiniteParameter { name: "u.x", .. })
        ));
    }

    #[test]
    fn long_tied_run_still_yields_a_pair() {
        // 435 slopes equal to 2, far more than the default enumerate limit
        let mut coords: Vec<(f64, f64)> = (0..30).map(|i| (i as f64, 2.0 * i as f64)).collect();
        coords.push((0.5, 100.0));
        let mut p = set(&coords);
        let slopes = sorted_slopes_naive(p.points());
        let origin = Point::new(0.0, 0.0);
        for rank in [30u64, 200, 464] {
            assert_eq!(slopes[rank as usize - 1], 2.0);
            let bp = breakpoint(&mut p, &origin, rank, 64).unwrap();
            assert!(bp.selection.exact, "rank {rank}");
            assert_eq!(bp.selection.slope, 2.0);
            assert!(bp.selection.bracket.contains(2.0));
            let pair = bp.selection.pair.unwrap();
            assert_eq!(compute_slope(&pair.left, &pair.right), Slope::Finite(2.0));
            let point = bp.point.unwrap();
            assert!(point == pair.left || point == pair.right);
            assert!(p.contains(&point));
        }
        // neighbours of the run are still found by enumeration
        let first = select_rank(&mut p, 29, SelectCfg::default()).unwrap();
        assert_eq!(first.slope, slopes[28]);
        let last = select_rank(&mut p, 465, SelectCfg::default()).unwrap();
        assert_eq!(last.slope, 200.0);
    }

    #[test]
    fn float_steps_cross_zero() {
        assert_eq!(next_above(0.0), f64::from_bits(1));
        assert_eq!(next_below(0.0), -f64::from_bits(1));
        assert!(next_above(2.0) > 2.0 && next_above(2.0) - 2.0 < 1e-15);
        assert!(next_below(-2.0) < -2.0);
        assert_eq!(next_below(next_above(-3.5)), -3.5);
    }
}
