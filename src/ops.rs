//! Arithmetic on arrays, built only on the `at`/`set` contract.
//!
//! - [`add_assign`]: `dest += src`, elementwise or broadcast over the trailing axis
//! - [`dot`]: Matrix-matrix and matrix-vector products
//!
//! Shape compatibility is checked before any element is touched, so a failed
//! call leaves every operand unchanged. Element arithmetic wraps on overflow
//! in every build profile.

use num_traits::Zero;

use crate::array::{DenseArray, NdArray};
use crate::point::Point;
use crate::shape::Shape;
use crate::{Elem, NdError, Result};

fn incompatible(op: &'static str, a: &Shape, b: &Shape) -> NdError {
    log::debug!("{op}: incompatible shapes {a} vs {b}");
    NdError::ShapeIncompatibility {
        op,
        left: a.dims().to_vec(),
        right: b.dims().to_vec(),
    }
}

/// How `src` lines up against `dest` in [`add_assign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddMode {
    /// Same rank, same extents.
    Elementwise,
    /// `src` has one axis fewer; it is repeated along `dest`'s last axis.
    Broadcast,
}

fn add_mode(dest: &Shape, src: &Shape) -> Result<AddMode> {
    let mode = if src.ndim() == dest.ndim() {
        AddMode::Elementwise
    } else if src.ndim() + 1 == dest.ndim() {
        AddMode::Broadcast
    } else {
        return Err(incompatible("add", dest, src));
    };
    let shared = dest.ndim().min(src.ndim());
    if dest.dims()[..shared] != src.dims()[..shared] {
        return Err(incompatible("add", dest, src));
    }
    Ok(mode)
}

/// In-place addition: `dest += src`.
///
/// - Equal ranks: `dest[c] += src[c]` for every point `c`; extents must match.
/// - `src` one rank lower: `src` must match every axis of `dest` but the last,
///   and `dest[c ++ k] += src[c]` for every `c` of `src` and every `k` along
///   `dest`'s last axis.
///
/// Any other combination fails with [`NdError::ShapeIncompatibility`] before
/// `dest` is modified. `src` may alias `dest`.
///
/// # Example
///
/// ```rust
/// use ndint::{ops, DenseArray, NdArray, Shape};
///
/// let a = DenseArray::zeros(&Shape::new(&[2, 3]).unwrap());
/// let row = DenseArray::from_vec(&Shape::new(&[2]).unwrap(), vec![1, 2]).unwrap();
/// ops::add_assign(&a, &row).unwrap();
/// assert_eq!(a.to_vec(), vec![1, 2, 1, 2, 1, 2]);
/// ```
pub fn add_assign<D, S>(dest: &D, src: &S) -> Result<()>
where
    D: NdArray + ?Sized,
    S: NdArray + ?Sized,
{
    let mode = add_mode(dest.shape(), src.shape())?;
    log::debug!(
        "add: {:?} dest={} src={}",
        mode,
        dest.shape(),
        src.shape()
    );

    match mode {
        AddMode::Elementwise => {
            for point in dest.shape().points() {
                let sum = dest.at(&point)?.wrapping_add(src.at(&point)?);
                dest.set(&point, sum)?;
            }
        }
        AddMode::Broadcast => {
            let last = dest.dim(dest.ndim() - 1);
            for point in src.shape().points() {
                let value = src.at(&point)?;
                for k in 0..last {
                    let target = point.extended(k as isize);
                    let sum = dest.at(&target)?.wrapping_add(value);
                    dest.set(&target, sum)?;
                }
            }
        }
    }
    Ok(())
}

/// Matrix product `lhs · rhs` into a newly allocated array.
///
/// `lhs` must be 2-D with shape `(m, k)`. `rhs` is either 2-D `(k, n)`,
/// giving an `(m, n)` result, or a 1-D vector of length `k`, giving an `(m)`
/// result. Neither operand is modified.
pub fn dot<L, R>(lhs: &L, rhs: &R) -> Result<DenseArray>
where
    L: NdArray + ?Sized,
    R: NdArray + ?Sized,
{
    if lhs.ndim() != 2 || !(rhs.ndim() == 1 || rhs.ndim() == 2) {
        return Err(incompatible("dot", lhs.shape(), rhs.shape()));
    }
    let m = lhs.dim(0);
    let k = lhs.dim(1);
    if rhs.dim(0) != k {
        return Err(incompatible("dot", lhs.shape(), rhs.shape()));
    }

    if rhs.ndim() == 2 {
        let n = rhs.dim(1);
        let out = DenseArray::zeros(&Shape::from_dims(&[m, n])?);
        log::debug!("dot: {} x {} -> {}", lhs.shape(), rhs.shape(), out.shape());
        for i in 0..m as isize {
            for j in 0..n as isize {
                let mut sum = Elem::zero();
                for l in 0..k as isize {
                    let a = lhs.at(&Point::from([i, l]))?;
                    let b = rhs.at(&Point::from([l, j]))?;
                    sum = sum.wrapping_add(a.wrapping_mul(b));
                }
                out.set(&Point::from([i, j]), sum)?;
            }
        }
        Ok(out)
    } else {
        let out = DenseArray::zeros(&Shape::from_dims(&[m])?);
        log::debug!("dot: {} x {} -> {}", lhs.shape(), rhs.shape(), out.shape());
        for i in 0..m as isize {
            let mut sum = Elem::zero();
            for l in 0..k as isize {
                let a = lhs.at(&Point::from([i, l]))?;
                let b = rhs.at(&Point::from([l]))?;
                sum = sum.wrapping_add(a.wrapping_mul(b));
            }
            out.set(&Point::from([i]), sum)?;
        }
        Ok(out)
    }
}
