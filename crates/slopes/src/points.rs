//! Owned, reorderable 2D point container.
//!
//! Every statistic in this crate takes `&mut PointSet` and is free to reorder
//! it (sorting by x, by a sweep functional, ...). Order carries no meaning
//! across calls; clone first if you need it preserved.

use nalgebra::Vector2;

use crate::error::SlopeError;

/// A point in the plane (`x = p.x`, `y = p.y`).
pub type Point = Vector2<f64>;

/// Ordered, mutable sequence of points with finite coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Take ownership of `points`, rejecting NaN/inf coordinates.
    pub fn new(points: Vec<Point>) -> Result<Self, SlopeError> {
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(SlopeError::NonFiniteCoordinate { index });
        }
        Ok(Self { points })
    }

    pub fn from_xy(coords: &[(f64, f64)]) -> Result<Self, SlopeError> {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    pub fn push(&mut self, p: Point) -> Result<(), SlopeError> {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(SlopeError::NonFiniteCoordinate {
                index: self.points.len(),
            });
        }
        self.points.push(p);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Exact membership test.
    pub fn contains(&self, p: &Point) -> bool {
        self.points.iter().any(|q| q == p)
    }

    /// Number of unordered pairs, `n(n-1)/2`.
    #[inline]
    pub fn pair_count(&self) -> u64 {
        let n = self.points.len() as u64;
        n * n.saturating_sub(1) / 2
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Point] {
        &mut self.points
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite_coordinates() {
        let err = PointSet::from_xy(&[(0.0, 0.0), (1.0, f64::NAN)]).unwrap_err();
        assert_eq!(err, SlopeError::NonFiniteCoordinate { index: 1 });

        let mut p = PointSet::from_xy(&[(0.0, 0.0)]).unwrap();
        assert!(p.push(Point::new(f64::INFINITY, 0.0)).is_err());
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn pair_count_small_sets() {
        assert_eq!(PointSet::default().pair_count(), 0);
        assert_eq!(PointSet::from_xy(&[(1.0, 1.0)]).unwrap().pair_count(), 0);
        let p = PointSet::from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 5.0), (3.0, 1.0)]).unwrap();
        assert_eq!(p.pair_count(), 6);
        assert!(p.contains(&Point::new(2.0, 5.0)));
        assert!(!p.contains(&Point::new(2.0, 5.5)));
    }
}
