#![allow(non_snake_case)]

use crate::algebra::{vecmath::try_alloc, FloatT, MatrixError, SparseFormatError};
use crate::matrix::{PackedMatrix, PackedStorage, SparseMatrixCore, StorageFormat};
use std::collections::{BTreeMap, HashSet};
use std::iter::zip;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sparse matrix assembling to [`EllStorage`]
pub type EllMatrix<T = f64> = PackedMatrix<EllStorage<T>, T>;

/// Packed ELLPACK (ELL) layout
///
/// Every row is given `lmax` slots, where `lmax` is the largest number of
/// entries in any row.  Slots are stored row-major, so row `r` occupies
/// `r*lmax..(r+1)*lmax` of `colval` and `nzval`.  Real entries fill the
/// front of each row block in coefficient store order.  Unused slots are
/// padding: their column is the sentinel value `n` (one past the last
/// column) and their value is exactly zero.
///
/// __Example usage__ : the 3 x 3 matrix
/// ```text
/// A = [1.  ⋅   2.]
///     [⋅   ⋅   ⋅ ]
///     [⋅   3.  ⋅ ]
/// ```
/// is stored with `lmax = 2` as
/// ```text
/// colval = [0, 2, 3, 3, 1, 3]
/// nzval  = [1., 2., 0., 0., 3., 0.]
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EllStorage<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// slots per row
    pub lmax: usize,
    /// column index of each slot, or `n` for padding
    pub colval: Vec<usize>,
    /// value of each slot, zero for padding
    pub nzval: Vec<T>,
}

impl<T> EllStorage<T> {
    /// column index marking a padding slot
    pub fn padding_col(&self) -> usize {
        self.n
    }

    /// index range in `colval`/`nzval` of the slots of `row`
    pub fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        (row * self.lmax)..((row + 1) * self.lmax)
    }

    fn is_padding(&self, col: usize) -> bool {
        col >= self.n
    }
}

impl<T> PackedStorage<T> for EllStorage<T>
where
    T: FloatT,
{
    const FORMAT: StorageFormat = StorageFormat::Ell;

    fn pack(core: &SparseMatrixCore<T>) -> Result<Self, MatrixError> {
        let (m, n) = (core.nrows(), core.ncols());
        let limit = core.settings().max_storage_entries;

        let counts = core.row_counts()?;
        let lmax = counts.iter().copied().max().unwrap_or(0);
        let len = m
            .checked_mul(lmax)
            .ok_or(MatrixError::AllocationFailure {
                requested: usize::MAX,
            })?;

        // every slot starts out as padding
        let mut colval = try_alloc(len, n, limit)?;
        let mut nzval = try_alloc(len, T::zero(), limit)?;

        // fill the front of each row block
        let mut next = try_alloc(m, 0, limit)?;
        for (&(row, col), &v) in core.coefficients() {
            let dest = row * lmax + next[row];
            colval[dest] = col;
            nzval[dest] = v;
            next[row] += 1;
        }

        Ok(EllStorage {
            m,
            n,
            lmax,
            colval,
            nzval,
        })
    }

    fn unpack(&self) -> BTreeMap<(usize, usize), T> {
        let mut coeffs = BTreeMap::new();
        for row in 0..self.m {
            let rng = self.row_range(row);
            for (&col, &v) in zip(&self.colval[rng.clone()], &self.nzval[rng]) {
                if !self.is_padding(col) {
                    coeffs.insert((row, col), v);
                }
            }
        }
        coeffs
    }

    fn check_format(&self) -> Result<(), SparseFormatError> {
        let len = self
            .m
            .checked_mul(self.lmax)
            .ok_or(SparseFormatError::IncompatibleDimension)?;
        if self.colval.len() != len || self.nzval.len() != len {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //padding slots must hold the sentinel column and a zero
        for (&col, &v) in zip(&self.colval, &self.nzval) {
            if col > self.n || (col == self.n && v != T::zero()) {
                return Err(SparseFormatError::BadPadding);
            }
        }

        //lmax must be attained by some row, and no row may
        //repeat a column
        let mut seen = HashSet::new();
        let mut widest = 0;
        for slots in self.colval.chunks(self.lmax.max(1)) {
            seen.clear();
            for &col in slots.iter().filter(|&&c| !self.is_padding(c)) {
                if !seen.insert(col) {
                    return Err(SparseFormatError::DuplicateEntry);
                }
            }
            widest = widest.max(seen.len());
        }
        if widest != self.lmax {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        Ok(())
    }

    fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    fn nnz(&self) -> usize {
        self.colval.iter().filter(|&&c| !self.is_padding(c)).count()
    }

    fn entry(&self, row: usize, col: usize) -> Result<Option<T>, MatrixError> {
        let rng = self.row_range(row);
        let found = zip(&self.colval[rng.clone()], &self.nzval[rng])
            .find(|&(&c, _)| c == col)
            .map(|(_, &v)| v);
        Ok(found)
    }

    fn gemv(&self, b: &mut [T], x: &[T]) {
        b.fill(T::zero());
        if self.lmax == 0 {
            return;
        }
        let rows = zip(
            self.colval.chunks_exact(self.lmax),
            self.nzval.chunks_exact(self.lmax),
        );
        for (bi, (cols, vals)) in zip(b.iter_mut(), rows) {
            for (&c, &v) in zip(cols, vals) {
                // padding slots hold a zero and contribute nothing
                if !self.is_padding(c) {
                    *bi += v * x[c];
                }
            }
        }
    }
}
