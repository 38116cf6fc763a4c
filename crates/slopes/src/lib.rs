//! Statistics over the pairwise slopes of a planar point set.
//!
//! The n(n−1)/2 slopes are never enumerated. Instead:
//! - `min_slope`: one sort by x; the minimum is attained by x-adjacent points.
//! - `count_slopes`: the number of slopes in `[alpha, beta]` equals the number
//!   of inversions between the point orders under the sweep functionals
//!   `f_alpha` and `f_beta` (`f_θ(p) = x·θ − y`).
//! - `select`: bisection on a slope bracket with `count_slopes` as the counting
//!   oracle, for the k-th smallest slope.
//!
//! Mutation contract
//! - Every statistic takes `&mut PointSet` and may reorder it. Clone first if
//!   order matters. Calls on one set are not meant to overlap across threads.
//!
//! Cross-refs: `brute` holds the O(n²) oracles the fast paths are tested against.

pub mod brute;
pub mod cfg;
pub mod error;
pub mod inversions;
pub mod min_slope;
pub mod points;
pub mod rand;
pub mod range;
pub mod select;
pub mod slope;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{SelectCfg, SlopeCfg, X_TIE_EPS};
pub use error::SlopeError;
pub use inversions::{count_inversions, inversion_pairs};
pub use min_slope::{max_finite_slope, min_slope, min_slope_pair, min_slope_with};
pub use points::{Point, PointSet};
pub use range::{count_slopes, pairs_in_range, PointOrder};
pub use select::{
    breakpoint, breakpoint_one_round, breakpoint_with, kth_slope, select_rank, Bracket,
    Breakpoint, Round, Selection,
};
pub use slope::{
    compare_points_alpha, compare_points_beta, compare_points_x, compare_points_x_eps,
    compute_slope, sweep_key, Slope, SlopePair,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::rand::{draw_points, PointCloudCfg};
    pub use crate::{
        breakpoint, count_inversions, count_slopes, kth_slope, min_slope, Point, PointSet,
        SelectCfg, Slope, SlopeError,
    };
}
