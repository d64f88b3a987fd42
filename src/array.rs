//! Array capability interface and its owning/aliasing variants.
//!
//! - [`DenseArray`]: Owning array allocated by a factory or by `copy`
//! - [`ArrayView`]: Non-owning alias over the buffer of an array or view
//!
//! Both variants resolve points through the same shared storage handle, so
//! they behave identically under the [`NdArray`] contract.

use std::fmt;

use crate::ops;
use crate::point::Point;
use crate::shape::Shape;
use crate::storage::Storage;
use crate::{Elem, Result};

use self::sealed::Sealed;

mod sealed {
    pub trait Sealed {
        fn storage(&self) -> &crate::storage::Storage;
    }
}

/// Operations shared by owning arrays and views.
///
/// Mutation goes through `&self`: an array and any number of views may be
/// live at once, and a write through one is visible through all of them.
pub trait NdArray: Sealed + fmt::Debug {
    #[inline]
    fn shape(&self) -> &Shape {
        self.storage().shape()
    }

    #[inline]
    fn ndim(&self) -> usize {
        self.shape().ndim()
    }

    /// Extent along `axis`.
    ///
    /// # Panics
    /// Panics if `axis >= self.ndim()`.
    #[inline]
    fn dim(&self, axis: usize) -> usize {
        self.shape().dim(axis)
    }

    #[inline]
    fn size(&self) -> usize {
        self.shape().size()
    }

    /// Read the element at `point`.
    ///
    /// Fails with [`NdError::IllegalPointDimension`](crate::NdError::IllegalPointDimension)
    /// when the ranks differ and with
    /// [`NdError::IllegalPointCoordinate`](crate::NdError::IllegalPointCoordinate)
    /// for the first out-of-range axis.
    fn at(&self, point: &Point) -> Result<Elem> {
        self.storage().get(point)
    }

    /// Write the element at `point`. Validation happens before the write.
    fn set(&self, point: &Point, value: Elem) -> Result<()> {
        self.storage().set(point, value)
    }

    /// Deep copy into a new, independently owned array.
    fn copy(&self) -> DenseArray {
        DenseArray {
            storage: self.storage().deep_copy(),
        }
    }

    /// Alias sharing this handle's buffer and shape.
    fn view(&self) -> ArrayView {
        ArrayView {
            storage: self.storage().clone(),
        }
    }

    /// In-place `self += other`, elementwise or broadcast over the last axis.
    ///
    /// See [`ops::add_assign`].
    fn add(&self, other: &dyn NdArray) -> Result<()> {
        ops::add_assign(self, other)
    }

    /// Matrix-matrix or matrix-vector product.
    ///
    /// See [`ops::dot`].
    fn dot(&self, other: &dyn NdArray) -> Result<DenseArray> {
        ops::dot(self, other)
    }

    /// Whether `self` and `other` alias the same buffer.
    fn shares_buffer(&self, other: &dyn NdArray) -> bool {
        self.storage().same_buffer(other.storage())
    }

    /// Contents in storage order (first axis varies fastest).
    fn to_vec(&self) -> Vec<Elem> {
        self.storage().to_vec()
    }
}

// ============================================================================
// DenseArray
// ============================================================================

/// Owning dense array.
///
/// Created by the factories below or by [`NdArray::copy`]. `Clone` is a deep
/// copy; use [`NdArray::view`] for an alias.
pub struct DenseArray {
    storage: Storage,
}

impl DenseArray {
    /// Array of `shape.size()` zeros.
    pub fn zeros(shape: &Shape) -> Self {
        Self::full(shape, 0)
    }

    /// Array of `shape.size()` ones.
    pub fn ones(shape: &Shape) -> Self {
        Self::full(shape, 1)
    }

    /// Array with every element set to `value`.
    pub fn full(shape: &Shape, value: Elem) -> Self {
        Self {
            storage: Storage::filled(shape, value),
        }
    }

    /// Array with values produced by a function.
    ///
    /// The function is called once per point in storage order.
    pub fn from_fn(shape: &Shape, mut f: impl FnMut(&Point) -> Elem) -> Self {
        let data: Vec<Elem> = shape.points().map(|p| f(&p)).collect();
        Self {
            storage: Storage::from_parts(data, shape),
        }
    }

    /// Array over a column-major buffer of exactly `shape.size()` elements.
    pub fn from_vec(shape: &Shape, data: Vec<Elem>) -> Result<Self> {
        Ok(Self {
            storage: Storage::from_vec(shape, data)?,
        })
    }
}

impl Sealed for DenseArray {
    fn storage(&self) -> &Storage {
        &self.storage
    }
}

impl NdArray for DenseArray {}

impl Clone for DenseArray {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Debug for DenseArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseArray")
            .field("dims", &self.storage.shape().dims())
            .field("strides", &self.storage.strides())
            .finish()
    }
}

// ============================================================================
// ArrayView
// ============================================================================

/// Non-owning alias over another array's buffer.
///
/// Keeps the buffer alive for as long as it is reachable, even after the
/// array it was taken from is dropped. `Clone` yields another alias.
#[derive(Clone)]
pub struct ArrayView {
    storage: Storage,
}

impl Sealed for ArrayView {
    fn storage(&self) -> &Storage {
        &self.storage
    }
}

impl NdArray for ArrayView {}

impl fmt::Debug for ArrayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayView")
            .field("dims", &self.storage.shape().dims())
            .field("strides", &self.storage.strides())
            .finish()
    }
}
