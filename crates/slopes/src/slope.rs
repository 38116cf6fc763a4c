//! Slope metric and the point orderings built on it.
//!
//! - `compute_slope`: Δy/Δx, or `Slope::Infinite` for vertical pairs.
//! - `compare_points_x`: x ascending, y breaks near-ties (`X_TIE_EPS`).
//! - `compare_points_alpha` / `compare_points_beta`: ascending sweep functional
//!   `f_θ(p) = x·θ − y`.
//!
//! For `x(p) < x(q)` with slope `s`, `f_θ(q) − f_θ(p) = Δx·(θ − s)`, so the
//! relative order of `p` and `q` under `f_θ` tells on which side of `θ` their
//! slope lies. Range counting is built on exactly this sign flip.

use std::cmp::Ordering;
use std::fmt;

use crate::cfg::X_TIE_EPS;
use crate::points::Point;

/// Slope of a point pair. Vertical pairs have no finite slope.
///
/// Ordering: every `Finite` value is less than `Infinite`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum Slope {
    Finite(f64),
    Infinite,
}

impl Slope {
    /// True for every non-vertical pair, including overflowed quotients.
    #[inline]
    pub fn is_finite(self) -> bool {
        matches!(self, Slope::Finite(_))
    }

    #[inline]
    pub fn finite(self) -> Option<f64> {
        match self {
            Slope::Finite(s) => Some(s),
            Slope::Infinite => None,
        }
    }

    /// Closed-interval membership. `Infinite` is never inside.
    #[inline]
    pub fn in_range(self, alpha: f64, beta: f64) -> bool {
        match self {
            Slope::Finite(s) => alpha <= s && s <= beta,
            Slope::Infinite => false,
        }
    }

    #[inline]
    pub fn min(self, other: Slope) -> Slope {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for Slope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slope::Finite(s) => write!(f, "{s}"),
            Slope::Infinite => write!(f, "inf"),
        }
    }
}

/// A point pair with its finite slope; `left.x < right.x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlopePair {
    pub left: Point,
    pub right: Point,
    pub slope: f64,
}

impl SlopePair {
    /// `None` for vertical pairs.
    pub fn new(a: &Point, b: &Point) -> Option<Self> {
        let slope = compute_slope(a, b).finite()?;
        let (left, right) = if a.x < b.x { (*a, *b) } else { (*b, *a) };
        Some(Self { left, right, slope })
    }
}

/// Slope of the line through `p1` and `p2`.
///
/// Symmetric: swapping the arguments negates numerator and denominator, which
/// is exact in IEEE arithmetic.
///
/// `Infinite` means "vertical" and nothing else. A non-vertical pair always
/// yields `Finite`, even when the quotient overflows: a tiny Δx gives
/// `Finite(±inf)`, and once |Δx| and |Δy| both overflow (coordinates of
/// opposite sign near `f64::MAX`) the result is `Finite(NaN)`. Coordinates
/// within `f64::MAX / 2` of zero keep both differences finite, so NaN cannot
/// occur there.
#[inline]
pub fn compute_slope(p1: &Point, p2: &Point) -> Slope {
    if p1.x == p2.x {
        return Slope::Infinite;
    }
    Slope::Finite((p2.y - p1.y) / (p2.x - p1.x))
}

/// Order by x ascending; when `|x1 - x2| < X_TIE_EPS`, by y ascending.
#[inline]
pub fn compare_points_x(p1: &Point, p2: &Point) -> Ordering {
    compare_points_x_eps(p1, p2, X_TIE_EPS)
}

/// `compare_points_x` with an explicit tie tolerance.
///
/// The tolerance makes this relation non-transitive for chains of points
/// spaced just under `eps` apart; it is a heuristic, not an equality test.
#[inline]
pub fn compare_points_x_eps(p1: &Point, p2: &Point, eps: f64) -> Ordering {
    if (p1.x - p2.x).abs() < eps {
        p1.y.partial_cmp(&p2.y).unwrap_or(Ordering::Equal)
    } else {
        p1.x.partial_cmp(&p2.x).unwrap_or(Ordering::Equal)
    }
}

/// Sweep functional `f_θ(p) = x(p)·θ − y(p)`.
#[inline]
pub fn sweep_key(p: &Point, theta: f64) -> f64 {
    p.x * theta - p.y
}

/// Ascending `f_alpha`; equal keys fall back to x descending.
///
/// Equal keys at `alpha` mean the pair's slope is exactly `alpha`. Putting the
/// right point first matches how pairs with slope above `alpha` are ordered,
/// so the pair still reads as flipped against the beta order.
#[inline]
pub fn compare_points_alpha(p1: &Point, p2: &Point, alpha: f64) -> Ordering {
    sweep_key(p1, alpha)
        .partial_cmp(&sweep_key(p2, alpha))
        .unwrap_or(Ordering::Equal)
        .then_with(|| p2.x.partial_cmp(&p1.x).unwrap_or(Ordering::Equal))
}

/// Ascending `f_beta`; equal keys fall back to x ascending.
///
/// Mirror of `compare_points_alpha`: a pair with slope exactly `beta` keeps the
/// left point first, as pairs with slope below `beta` do. Points equal on both
/// keys are duplicates and must be sorted stably.
#[inline]
pub fn compare_points_beta(p1: &Point, p2: &Point, beta: f64) -> Ordering {
    sweep_key(p1, beta)
        .partial_cmp(&sweep_key(p2, beta))
        .unwrap_or(Ordering::Equal)
        .then_with(|| p1.x.partial_cmp(&p2.x).unwrap_or(Ordering::Equal))
}
