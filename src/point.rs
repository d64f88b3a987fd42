//! Multi-dimensional coordinates.

use std::fmt;

/// Coordinates addressing one element of an array.
///
/// A point carries no bounds of its own: it is validated against a
/// [`Shape`](crate::Shape) only when it is used for `at`/`set`. Coordinates are
/// signed so that negative input reaches validation instead of wrapping.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Point {
    coords: Vec<isize>,
}

impl Point {
    pub fn new(coords: Vec<isize>) -> Self {
        Self { coords }
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.coords.len()
    }

    /// Coordinate along `axis`.
    ///
    /// # Panics
    /// Panics if `axis >= self.ndim()`.
    #[inline]
    pub fn dim(&self, axis: usize) -> isize {
        assert!(
            axis < self.coords.len(),
            "axis {} out of range for point of rank {}",
            axis,
            self.coords.len()
        );
        self.coords[axis]
    }

    #[inline]
    pub fn coords(&self) -> &[isize] {
        &self.coords
    }

    /// A new point with `coord` appended as the trailing coordinate.
    pub fn extended(&self, coord: isize) -> Point {
        let mut coords = Vec::with_capacity(self.coords.len() + 1);
        coords.extend_from_slice(&self.coords);
        coords.push(coord);
        Point { coords }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({:?})", self.coords)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.coords)
    }
}

impl From<Vec<isize>> for Point {
    fn from(coords: Vec<isize>) -> Self {
        Point::new(coords)
    }
}

impl From<&[isize]> for Point {
    fn from(coords: &[isize]) -> Self {
        Point::new(coords.to_vec())
    }
}

impl<const N: usize> From<[isize; N]> for Point {
    fn from(coords: [isize; N]) -> Self {
        Point::new(coords.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_basics() {
        let p = Point::from([12, 3, 12, 4, 56]);
        assert_eq!(p.ndim(), 5);
        assert_eq!(p.dim(0), 12);
        assert_eq!(p.dim(4), 56);
        assert_eq!(p.coords(), &[12, 3, 12, 4, 56]);
    }

    #[test]
    fn test_point_accepts_negative() {
        let p = Point::from([-1, 2]);
        assert_eq!(p.dim(0), -1);
    }

    #[test]
    fn test_point_conversions_agree() {
        let a = Point::from([3, 4]);
        let b = Point::from(vec![3, 4]);
        let c = Point::from(&[3isize, 4][..]);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_extended() {
        let p = Point::from([1, 2]);
        let q = p.extended(7);
        assert_eq!(q.coords(), &[1, 2, 7]);
        assert_eq!(p.ndim(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::from([3, 4]).to_string(), "[3, 4]");
        assert_eq!(format!("{:?}", Point::from([0])), "Point([0])");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_dim_out_of_range_panics() {
        Point::from([1]).dim(1);
    }
}
