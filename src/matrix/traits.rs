#![allow(non_snake_case)]

use super::{MatrixState, SparseMatrixCore, StorageFormat};
use crate::algebra::{vecmath::try_alloc, FloatT, MatrixError, SparseFormatError};
use enum_dispatch::*;
use std::collections::BTreeMap;

/// Operations shared by every sparse matrix storage format.
///
/// Coefficients are added with [`set_coefficient`](SparseMatrixOps::set_coefficient)
/// and packed into the format's compact layout with
/// [`assemble_storage`](SparseMatrixOps::assemble_storage).  Products and
/// coefficient lookups then operate on the packed layout.
/// [`disassemble_storage`](SparseMatrixOps::disassemble_storage) returns the
/// coefficients to the coefficient store so that the matrix can be modified
/// again.
///
/// ```
/// use spmv::matrix::*;
///
/// let mut A = CsrMatrix::<f64>::new(2, 2).unwrap();
/// A.set_coefficient(0, 0, 2.0).unwrap();
/// A.set_coefficient(1, 0, 1.0).unwrap();
/// A.assemble_storage().unwrap();
///
/// let b = A.matvec(&[1.0, 3.0]).unwrap();
/// assert_eq!(b, vec![2.0, 1.0]);
/// ```
#[enum_dispatch]
pub trait SparseMatrixOps<T>
where
    T: FloatT,
{
    /// shared dimension / state / coefficient store
    fn core(&self) -> &SparseMatrixCore<T>;
    fn core_mut(&mut self) -> &mut SparseMatrixCore<T>;

    /// storage format of the packed layout
    fn format(&self) -> StorageFormat;

    /// Pack the coefficient store into the format's layout.
    ///
    /// Permitted in the Initialized and Building states.  On success the
    /// coefficient store is emptied and the matrix is Assembled.  On
    /// failure the matrix is unchanged.
    fn assemble_storage(&mut self) -> Result<(), MatrixError>;

    /// Unpack the packed layout back into the coefficient store.
    ///
    /// Permitted only in the Assembled state.  On success the packed
    /// layout is released and the matrix is in the Building state.
    fn disassemble_storage(&mut self) -> Result<(), MatrixError>;

    /// Computes `b = A*x`, overwriting `b`.
    ///
    /// Requires the Assembled state, `x.len() == ncols` and `b.len() == nrows`.
    fn matvec_into(&self, b: &mut [T], x: &[T]) -> Result<(), MatrixError>;

    /// Returns the coefficient at `(row, col)`, or zero if no
    /// coefficient is stored there.
    fn get_coefficient(&self, row: usize, col: usize) -> Result<T, MatrixError>;

    /// Computes and returns `A*x`.
    ///
    /// Fails with [`MatrixError::AllocationFailure`] if the output
    /// vector cannot be allocated.
    fn matvec(&self, x: &[T]) -> Result<Vec<T>, MatrixError> {
        let mut b = try_alloc(self.nrows(), T::zero(), usize::MAX)?;
        self.matvec_into(&mut b, x)?;
        Ok(b)
    }

    /// Insert or overwrite the coefficient at `(row, col)`.
    fn set_coefficient(&mut self, row: usize, col: usize, value: T) -> Result<(), MatrixError> {
        self.core_mut().set_coefficient(row, col, value)
    }

    fn nrows(&self) -> usize {
        self.core().nrows()
    }

    fn ncols(&self) -> usize {
        self.core().ncols()
    }

    fn nnz(&self) -> usize {
        self.core().nnz()
    }

    fn state(&self) -> MatrixState {
        self.core().state()
    }
}

/// A packed (assembled) sparse storage layout.
///
/// Implementors convert the contents of a coefficient store into their
/// layout and back, and provide lookups and products on the packed data.
pub trait PackedStorage<T>: Sized
where
    T: FloatT,
{
    const FORMAT: StorageFormat;

    /// If true, coefficient lookups are also answered from the
    /// coefficient store before assembly.
    const LOOKUP_WHILE_BUILDING: bool = false;

    /// Build the packed layout from the coefficient store of `core`.
    /// Must not modify anything if it fails.
    fn pack(core: &SparseMatrixCore<T>) -> Result<Self, MatrixError>;

    /// Collect every stored entry back into a coefficient map.
    fn unpack(&self) -> BTreeMap<(usize, usize), T>;

    /// Check that the packed data is correctly formatted.
    fn check_format(&self) -> Result<(), SparseFormatError>;

    /// matrix dimensions `(nrows, ncols)`
    fn size(&self) -> (usize, usize);

    /// number of stored (non-padding) entries
    fn nnz(&self) -> usize;

    /// Look up an in-range position.  `Ok(None)` means no entry is stored.
    fn entry(&self, row: usize, col: usize) -> Result<Option<T>, MatrixError>;

    /// Computes `b = A*x`.  Dimensions have already been checked.
    fn gemv(&self, b: &mut [T], x: &[T]);
}
