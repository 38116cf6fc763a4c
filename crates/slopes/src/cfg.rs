//! Tolerance defaults and tunables.
//!
//! Policy
//! - `X_TIE_EPS` is a fixed heuristic: points closer than this in x are ordered
//!   by y when sorting for the minimum slope. It absorbs floating-point noise
//!   and can misorder genuine near-vertical pairs in pathological inputs.
//! - `BOUNDARY_BAND` is the second fixed heuristic: range counting re-judges
//!   pairs whose slope lies this close (relative) to an interval end with
//!   `compute_slope`. Agreement with `compute_slope` then holds whenever the
//!   rounding error of the sweep keys `x·θ − y` stays below `BOUNDARY_BAND`
//!   times the pair's Δx. Pairs whose Δx is tiny next to their coordinates
//!   (roughly below 1e-6 of them) can still be misjudged.
//! - Everything else lives in small `Copy` configs with `Default` impls.

/// x-tolerance used by `compare_points_x`.
pub const X_TIE_EPS: f64 = 1e-4;

/// Relative half-width of the band around each end of a counting interval.
pub const BOUNDARY_BAND: f64 = 1e-9;

/// Default bound on selector refinement rounds.
pub const DEFAULT_MAX_ROUNDS: usize = 64;

/// Default width below which a selector bracket counts as collapsed.
pub const DEFAULT_COLLAPSE_EPS: f64 = 1e-12;

/// Tolerances for the slope metric.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlopeCfg {
    pub x_tie_eps: f64,
}

impl Default for SlopeCfg {
    fn default() -> Self {
        Self {
            x_tie_eps: X_TIE_EPS,
        }
    }
}

/// Selector configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectCfg {
    /// Upper bound on bisection rounds. Zero skips refinement entirely.
    pub max_rounds: usize,
    /// Relative bracket width (scaled by `max(1, |hi|)`) that stops refinement.
    pub collapse_eps: f64,
    /// Enumerate the bracket exactly once it holds at most this many slopes.
    /// Zero means "the number of points".
    pub enumerate_limit: u64,
}

impl Default for SelectCfg {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            collapse_eps: DEFAULT_COLLAPSE_EPS,
            enumerate_limit: 0,
        }
    }
}

impl SelectCfg {
    pub fn with_max_rounds(max_rounds: usize) -> Self {
        Self {
            max_rounds,
            ..Self::default()
        }
    }

    pub(crate) fn enumerate_limit_for(&self, n: usize) -> u64 {
        if self.enumerate_limit == 0 {
            (n as u64).max(1)
        } else {
            self.enumerate_limit
        }
    }
}
