//! Dense N-dimensional integer arrays.
//!
//! This crate provides fixed-shape integer arrays stored in a flat,
//! column-major buffer (the first index varies fastest), addressed by
//! multi-dimensional [`Point`]s, with cheap aliasing views.
//!
//! # Core Types
//!
//! - [`Shape`]: Validated list of positive extents with cached element count
//! - [`Point`]: Arbitrary-arity coordinate list addressing one element
//! - [`NdArray`]: The array capability interface (`at`, `set`, `copy`, `view`, `add`, `dot`)
//! - [`DenseArray`]: Owning array built by the factories (`zeros`, `ones`, `full`, `from_fn`, `from_vec`)
//! - [`ArrayView`]: Non-owning alias sharing the buffer of the array it was taken from
//!
//! # Operations
//!
//! - [`NdArray::add`] / [`ops::add_assign`]: In-place elementwise addition, or
//!   broadcast of a rank `n - 1` operand over the trailing axis
//! - [`NdArray::dot`] / [`ops::dot`]: Matrix-matrix and matrix-vector products
//!
//! # Example
//!
//! ```rust
//! use ndint::{DenseArray, NdArray, Point, Shape};
//!
//! let shape = Shape::new(&[4, 5]).unwrap();
//! let a = DenseArray::from_fn(&shape, |p| (p.dim(0) * 10 + p.dim(1)) as i64);
//! let v = DenseArray::from_fn(&Shape::new(&[5]).unwrap(), |p| p.dim(0) as i64 + 1);
//!
//! let r = a.dot(&v).unwrap();
//! assert_eq!(r.to_vec(), vec![40, 190, 340, 490]);
//!
//! // Writes through a view are visible through the original.
//! let alias = a.view();
//! alias.set(&Point::from([0, 0]), 7).unwrap();
//! assert_eq!(a.at(&Point::from([0, 0])).unwrap(), 7);
//! ```
//!
//! # Threading
//!
//! Handles share their buffer through `Rc`, so they are neither `Send` nor
//! `Sync`. Concurrent access is not supported.

mod array;
pub mod ops;
mod point;
mod shape;
mod storage;

// ============================================================================
// Array types
// ============================================================================
pub use array::{ArrayView, DenseArray, NdArray};

// ============================================================================
// Coordinate model
// ============================================================================
pub use point::Point;
pub use shape::{col_major_strides, Points, Shape};

/// Element type stored by every array.
///
/// `add` and `dot` wrap on overflow (two's complement) in every build profile.
pub type Elem = i64;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur while building or addressing arrays.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NdError {
    /// A shape was built from an empty dimension list.
    #[error("shape must have at least one dimension")]
    EmptyShape,

    /// A shape dimension is zero or negative (first offending axis).
    #[error("non-positive dimension {value} at axis {axis}")]
    NonPositiveDimension { axis: usize, value: isize },

    /// An unsigned extent exceeds `isize::MAX` (first offending axis).
    #[error("dimension {value} at axis {axis} exceeds isize::MAX")]
    DimensionTooLarge { axis: usize, value: usize },

    /// The total element count does not fit in `usize`.
    #[error("element count overflows usize")]
    SizeOverflow,

    /// A point's rank does not match the array rank.
    #[error("point has {found} dimensions, array has {expected}")]
    IllegalPointDimension { found: usize, expected: usize },

    /// A point coordinate is negative or past the extent (first offending axis).
    #[error("coordinate {value} out of bounds at axis {axis}")]
    IllegalPointCoordinate { axis: usize, value: isize },

    /// Operand shapes are incompatible for the operation.
    #[error("incompatible shapes for {op}: {left:?} vs {right:?}")]
    ShapeIncompatibility {
        op: &'static str,
        left: Vec<usize>,
        right: Vec<usize>,
    },

    /// A buffer handed to a factory does not hold `shape.size()` elements.
    #[error("buffer length mismatch: expected {expected}, found {found}")]
    BufferLengthMismatch { expected: usize, found: usize },
}

/// Result type for array operations.
pub type Result<T> = std::result::Result<T, NdError>;
