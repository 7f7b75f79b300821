#![allow(non_snake_case)]

use crate::algebra::{
    vecmath::{cumsum, try_alloc},
    FloatT, MatrixError, SparseFormatError,
};
use crate::matrix::{PackedMatrix, PackedStorage, SparseMatrixCore, StorageFormat};
use std::collections::{BTreeMap, HashSet};
use std::iter::zip;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sparse matrix assembling to [`CsrStorage`]
pub type CsrMatrix<T = f64> = PackedMatrix<CsrStorage<T>, T>;

/// Packed Compressed Sparse Row (CSR) layout
///
/// The entries of row `r` occupy `rowptr[r]..rowptr[r+1]` of the `colval`
/// and `nzval` fields.  Entries within a row appear in the order they were
/// drained from the coefficient store.  No separate column sort is
/// applied, so consumers must not rely on sorted columns for data that
/// did not come from an assembly.
///
/// __Example usage__ : the 3 x 4 matrix
/// ```text
/// A = [1.  ⋅   2.  ⋅ ]
///     [⋅   ⋅   ⋅   ⋅ ]
///     [⋅   3.  ⋅   4.]
/// ```
/// is stored as
/// ```text
/// rowptr = [0, 2, 2, 4]
/// colval = [0, 2, 1, 3]
/// nzval  = [1., 2., 3., 4.]
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CsrStorage<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSR format row pointer.
    ///
    /// This field has length `m+1`.  The last entry is the number
    /// of stored entries and agrees with the lengths
    /// of the `colval` and `nzval` fields.
    pub rowptr: Vec<usize>,
    /// vector of column indices
    pub colval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CsrStorage<T> {
    /// index range in `colval`/`nzval` of the entries of `row`
    pub fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        self.rowptr[row]..self.rowptr[row + 1]
    }
}

impl<T> PackedStorage<T> for CsrStorage<T>
where
    T: FloatT,
{
    const FORMAT: StorageFormat = StorageFormat::Csr;

    fn pack(core: &SparseMatrixCore<T>) -> Result<Self, MatrixError> {
        let (m, n, nnz) = (core.nrows(), core.ncols(), core.nnz());
        let limit = core.settings().max_storage_entries;

        // count the entries in each row, shifted by one so
        // that rowptr keeps a 0 in the first position
        let len = m.checked_add(1).ok_or(MatrixError::AllocationFailure {
            requested: usize::MAX,
        })?;
        let mut rowptr = try_alloc(len, 0, limit)?;
        for &(row, _) in core.coefficients().keys() {
            rowptr[row + 1] += 1;
        }
        cumsum(&mut rowptr);
        debug_assert_eq!(rowptr[m], nnz);

        let mut colval = try_alloc(nnz, 0, limit)?;
        let mut nzval = try_alloc(nnz, T::zero(), limit)?;

        // place each entry at the next free position of its row
        let mut next = try_alloc(m, 0, limit)?;
        next.copy_from_slice(&rowptr[..m]);
        for (&(row, col), &v) in core.coefficients() {
            let dest = next[row];
            colval[dest] = col;
            nzval[dest] = v;
            next[row] += 1;
        }

        Ok(CsrStorage {
            m,
            n,
            rowptr,
            colval,
            nzval,
        })
    }

    fn unpack(&self) -> BTreeMap<(usize, usize), T> {
        let mut coeffs = BTreeMap::new();
        for row in 0..self.m {
            let rng = self.row_range(row);
            for (&col, &v) in zip(&self.colval[rng.clone()], &self.nzval[rng]) {
                coeffs.insert((row, col), v);
            }
        }
        coeffs
    }

    fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.colval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.rowptr.is_empty()
            || (self.rowptr.len() - 1) != self.m
            || self.rowptr[self.m] != self.colval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for rowptr monotonicity
        if self.rowptr[0] != 0 || self.rowptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadRowptr);
        }

        //check for column values out of bounds
        if !self.colval.iter().all(|c| c < &self.n) {
            return Err(SparseFormatError::BadColval);
        }

        //check for repeated columns within each row
        let mut seen = HashSet::new();
        for row in 0..self.m {
            seen.clear();
            for &col in &self.colval[self.row_range(row)] {
                if !seen.insert(col) {
                    return Err(SparseFormatError::DuplicateEntry);
                }
            }
        }

        Ok(())
    }

    fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    fn nnz(&self) -> usize {
        self.rowptr[self.m]
    }

    fn entry(&self, row: usize, col: usize) -> Result<Option<T>, MatrixError> {
        let rng = self.row_range(row);
        let found = zip(&self.colval[rng.clone()], &self.nzval[rng])
            .find(|&(&c, _)| c == col)
            .map(|(_, &v)| v);
        Ok(found)
    }

    fn gemv(&self, b: &mut [T], x: &[T]) {
        for (row, bi) in b.iter_mut().enumerate() {
            let rng = self.row_range(row);
            *bi = zip(&self.colval[rng.clone()], &self.nzval[rng])
                .fold(T::zero(), |acc, (&c, &v)| acc + v * x[c]);
        }
    }
}
