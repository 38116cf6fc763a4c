//! Error type shared by the slope statistics.

use std::fmt;

/// Validation failures on malformed parameters.
///
/// Degenerate inputs (fewer than two points, vertical pairs) are not errors:
/// they yield `Slope::Infinite` or a zero count.
#[derive(Clone, Debug, PartialEq)]
pub enum SlopeError {
    /// `alpha > beta` passed to a range query.
    InvalidInterval { alpha: f64, beta: f64 },
    /// A numeric parameter was NaN or infinite.
    NonFiniteParameter { name: &'static str, value: f64 },
    /// Point `index` has a NaN or infinite coordinate.
    NonFiniteCoordinate { index: usize },
    /// The operation structurally needs more points.
    NotEnoughPoints { needed: usize, got: usize },
    /// Rank outside `1..=total` finite slopes.
    RankOutOfRange { rank: u64, total: u64 },
    /// Every pair is vertical or duplicated.
    NoFiniteSlope,
}

impl SlopeError {
    pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), SlopeError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFiniteParameter { name, value })
        }
    }

    pub(crate) fn check_interval(alpha: f64, beta: f64) -> Result<(), SlopeError> {
        Self::check_finite("alpha", alpha)?;
        Self::check_finite("beta", beta)?;
        if alpha > beta {
            return Err(Self::InvalidInterval { alpha, beta });
        }
        Ok(())
    }
}

impl fmt::Display for SlopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInterval { alpha, beta } => {
                write!(f, "range order violated: alpha {alpha} > beta {beta}")
            }
            Self::NonFiniteParameter { name, value } => {
                write!(f, "parameter {name} must be finite (got {value})")
            }
            Self::NonFiniteCoordinate { index } => {
                write!(f, "point {index} has a non-finite coordinate")
            }
            Self::NotEnoughPoints { needed, got } => {
                write!(f, "need at least {needed} points, got {got}")
            }
            Self::RankOutOfRange { rank, total } => {
                write!(f, "rank {rank} outside 1..={total} finite slopes")
            }
            Self::NoFiniteSlope => write!(f, "point set has no finite pairwise slope"),
        }
    }
}

impl std::error::Error for SlopeError {}
