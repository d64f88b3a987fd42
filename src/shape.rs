//! Shapes, strides and coordinate enumeration.

use std::fmt;
use std::rc::Rc;

use crate::point::Point;
use crate::{NdError, Result};

/// Compute column-major strides (first index varies fastest).
pub fn col_major_strides(dims: &[usize]) -> Vec<usize> {
    let rank = dims.len();
    if rank == 0 {
        return vec![];
    }
    let mut strides = vec![1usize; rank];
    for i in 1..rank {
        strides[i] = strides[i - 1] * dims[i - 1];
    }
    strides
}

/// Validated array shape.
///
/// A shape has at least one axis and every extent is positive. The element
/// count is computed once at construction. Extents are reference-counted so
/// that arrays and their views share a single allocation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Rc<[usize]>,
    size: usize,
}

impl Shape {
    /// Create a shape from signed extents.
    ///
    /// Fails with [`NdError::EmptyShape`] when `dims` is empty and with
    /// [`NdError::NonPositiveDimension`] for the lowest axis whose extent is
    /// zero or negative.
    pub fn new(dims: &[isize]) -> Result<Self> {
        if dims.is_empty() {
            return Err(NdError::EmptyShape);
        }
        if let Some((axis, &value)) = dims.iter().enumerate().find(|&(_, &d)| d <= 0) {
            return Err(NdError::NonPositiveDimension { axis, value });
        }
        let extents: Vec<usize> = dims.iter().map(|&d| d as usize).collect();
        Self::from_valid(extents)
    }

    /// Create a shape from unsigned extents.
    ///
    /// Same validation as [`Shape::new`]; a zero extent is reported as
    /// [`NdError::NonPositiveDimension`] and an extent above `isize::MAX`
    /// as [`NdError::DimensionTooLarge`].
    pub fn from_dims(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() {
            return Err(NdError::EmptyShape);
        }
        for (axis, &d) in dims.iter().enumerate() {
            if d == 0 {
                return Err(NdError::NonPositiveDimension { axis, value: 0 });
            }
            if d > isize::MAX as usize {
                return Err(NdError::DimensionTooLarge { axis, value: d });
            }
        }
        Self::from_valid(dims.to_vec())
    }

    fn from_valid(dims: Vec<usize>) -> Result<Self> {
        let size = dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or(NdError::SizeOverflow)?;
        Ok(Self {
            dims: Rc::from(dims),
            size,
        })
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Extent along `axis`.
    ///
    /// # Panics
    /// Panics if `axis >= self.ndim()`.
    #[inline]
    pub fn dim(&self, axis: usize) -> usize {
        assert!(
            axis < self.dims.len(),
            "axis {} out of range for rank {}",
            axis,
            self.dims.len()
        );
        self.dims[axis]
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Column-major strides for this shape.
    pub fn strides(&self) -> Vec<usize> {
        col_major_strides(&self.dims)
    }

    /// Iterate over every valid point in storage order (axis 0 fastest).
    pub fn points(&self) -> Points {
        Points {
            dims: self.dims.clone(),
            idx: vec![0; self.dims.len()],
            remaining: self.size,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({:?})", &self.dims[..])
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        if self.dims.len() == 1 {
            write!(f, ",")?;
        }
        write!(f, ")")
    }
}

impl TryFrom<&[isize]> for Shape {
    type Error = NdError;

    fn try_from(dims: &[isize]) -> Result<Self> {
        Shape::new(dims)
    }
}

impl TryFrom<Vec<isize>> for Shape {
    type Error = NdError;

    fn try_from(dims: Vec<isize>) -> Result<Self> {
        Shape::new(&dims)
    }
}

impl<const N: usize> TryFrom<[isize; N]> for Shape {
    type Error = NdError;

    fn try_from(dims: [isize; N]) -> Result<Self> {
        Shape::new(&dims)
    }
}

/// Iterator over all points of a [`Shape`], first axis varying fastest.
#[derive(Debug, Clone)]
pub struct Points {
    dims: Rc<[usize]>,
    idx: Vec<usize>,
    remaining: usize,
}

impl Iterator for Points {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        let point = Point::new(self.idx.iter().map(|&i| i as isize).collect());
        self.remaining -= 1;
        for d in 0..self.idx.len() {
            self.idx[d] += 1;
            if self.idx[d] < self.dims[d] {
                break;
            }
            self.idx[d] = 0;
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Points {}
