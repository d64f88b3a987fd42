//! Shared column-major buffer and point-to-offset mapping.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::point::Point;
use crate::shape::Shape;
use crate::{Elem, NdError, Result};

/// Buffer handle shared by an array and all of its views.
///
/// Cloning a `Storage` aliases the buffer; [`Storage::deep_copy`] allocates a
/// new one. Borrows of the buffer never outlive a single access, so any number
/// of aliases can read and write in any interleaving.
#[derive(Clone)]
pub struct Storage {
    data: Rc<RefCell<Vec<Elem>>>,
    shape: Shape,
    strides: Rc<[usize]>,
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("dims", &self.shape.dims())
            .field("strides", &self.strides)
            .finish()
    }
}

impl Storage {
    /// Allocate `shape.size()` elements set to `value`.
    pub(crate) fn filled(shape: &Shape, value: Elem) -> Self {
        Self::from_parts(vec![value; shape.size()], shape)
    }

    /// Wrap a column-major buffer.
    pub(crate) fn from_vec(shape: &Shape, data: Vec<Elem>) -> Result<Self> {
        if data.len() != shape.size() {
            return Err(NdError::BufferLengthMismatch {
                expected: shape.size(),
                found: data.len(),
            });
        }
        Ok(Self::from_parts(data, shape))
    }

    /// Wrap a buffer already known to hold `shape.size()` elements.
    pub(crate) fn from_parts(data: Vec<Elem>, shape: &Shape) -> Self {
        debug_assert_eq!(data.len(), shape.size());
        Self {
            data: Rc::new(RefCell::new(data)),
            shape: shape.clone(),
            strides: Rc::from(shape.strides()),
        }
    }

    /// New handle over an independent copy of the buffer.
    pub(crate) fn deep_copy(&self) -> Self {
        log::trace!("copy: dims={:?}", self.shape.dims());
        let data = self.data.borrow().clone();
        Self {
            data: Rc::new(RefCell::new(data)),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }

    #[inline]
    pub(crate) fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub(crate) fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Whether both handles alias the same buffer.
    #[inline]
    pub(crate) fn same_buffer(&self, other: &Storage) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Validate `point` against the shape and compute its linear offset.
    pub(crate) fn offset_of(&self, point: &Point) -> Result<usize> {
        let dims = self.shape.dims();
        if point.ndim() != dims.len() {
            return Err(NdError::IllegalPointDimension {
                found: point.ndim(),
                expected: dims.len(),
            });
        }
        let mut idx = 0usize;
        for (axis, (&coord, (&dim, &stride))) in point
            .coords()
            .iter()
            .zip(dims.iter().zip(self.strides.iter()))
            .enumerate()
        {
            if coord < 0 || coord as usize >= dim {
                return Err(NdError::IllegalPointCoordinate { axis, value: coord });
            }
            idx += coord as usize * stride;
        }
        Ok(idx)
    }

    pub(crate) fn get(&self, point: &Point) -> Result<Elem> {
        let idx = self.offset_of(point)?;
        Ok(self.data.borrow()[idx])
    }

    pub(crate) fn set(&self, point: &Point, value: Elem) -> Result<()> {
        let idx = self.offset_of(point)?;
        self.data.borrow_mut()[idx] = value;
        Ok(())
    }

    /// Snapshot of the buffer in storage order.
    pub(crate) fn to_vec(&self) -> Vec<Elem> {
        self.data.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(dims: &[isize]) -> Shape {
        Shape::new(dims).unwrap()
    }

    #[test]
    fn test_offset_col_major() {
        let s = Storage::filled(&shape(&[2, 3, 4]), 0);
        assert_eq!(s.strides(), &[1, 2, 6]);
        assert_eq!(s.offset_of(&Point::from([0, 0, 0])).unwrap(), 0);
        assert_eq!(s.offset_of(&Point::from([1, 0, 0])).unwrap(), 1);
        assert_eq!(s.offset_of(&Point::from([0, 1, 0])).unwrap(), 2);
        assert_eq!(s.offset_of(&Point::from([0, 0, 1])).unwrap(), 6);
        assert_eq!(s.offset_of(&Point::from([1, 2, 3])).unwrap(), 1 + 4 + 18);
    }

    #[test]
    fn test_offset_rank_mismatch() {
        let s = Storage::filled(&shape(&[2, 3]), 0);
        assert_eq!(
            s.offset_of(&Point::from([1])),
            Err(NdError::IllegalPointDimension {
                found: 1,
                expected: 2
            })
        );
        assert_eq!(
            s.offset_of(&Point::from([1, 1, 1])),
            Err(NdError::IllegalPointDimension {
                found: 3,
                expected: 2
            })
        );
    }

    #[test]
    fn test_offset_reports_first_bad_axis() {
        let s = Storage::filled(&shape(&[2, 3, 4]), 0);
        assert_eq!(
            s.offset_of(&Point::from([0, 3, -1])),
            Err(NdError::IllegalPointCoordinate { axis: 1, value: 3 })
        );
        assert_eq!(
            s.offset_of(&Point::from([-1, 3, 4])),
            Err(NdError::IllegalPointCoordinate {
                axis: 0,
                value: -1
            })
        );
        assert_eq!(
            s.offset_of(&Point::from([1, 2, 4])),
            Err(NdError::IllegalPointCoordinate { axis: 2, value: 4 })
        );
    }

    #[test]
    fn test_from_vec_length_checked() {
        let err = Storage::from_vec(&shape(&[2, 2]), vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            NdError::BufferLengthMismatch {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_clone_aliases_deep_copy_does_not() {
        let a = Storage::filled(&shape(&[3]), 1);
        let alias = a.clone();
        let copy = a.deep_copy();
        assert!(a.same_buffer(&alias));
        assert!(!a.same_buffer(&copy));

        alias.set(&Point::from([2]), 9).unwrap();
        assert_eq!(a.to_vec(), vec![1, 1, 9]);
        assert_eq!(copy.to_vec(), vec![1, 1, 1]);
    }

    #[test]
    fn test_failed_set_writes_nothing() {
        let s = Storage::filled(&shape(&[2, 2]), 5);
        assert!(s.set(&Point::from([2, 0]), 0).is_err());
        assert_eq!(s.to_vec(), vec![5; 4]);
    }
}
