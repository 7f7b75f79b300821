#![allow(non_snake_case)]

use crate::algebra::{vecmath::try_alloc, FloatT, MatrixError, SparseFormatError};
use crate::matrix::{PackedMatrix, PackedStorage, SparseMatrixCore, StorageFormat};
use itertools::izip;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sparse matrix assembling to [`DenseStorage`]
pub type DenseMatrix<T = f64> = PackedMatrix<DenseStorage<T>, T>;

/// Dense column-major layout
///
/// Every position of the matrix has a slot, with `(row, col)` held at
/// `data[row + m*col]`.  `filled` marks the slots holding a stored
/// coefficient, so that explicitly stored zeros survive a disassembly.
/// Unfilled slots hold zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DenseStorage<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// matrix values, column-major
    pub data: Vec<T>,
    /// true where a coefficient is stored
    pub filled: Vec<bool>,
}

impl<T> DenseStorage<T> {
    /// index into `data`/`filled` of position `(row, col)`
    pub fn index_linear(&self, row: usize, col: usize) -> usize {
        row + self.m * col
    }
}

impl<T> PackedStorage<T> for DenseStorage<T>
where
    T: FloatT,
{
    const FORMAT: StorageFormat = StorageFormat::Dense;

    fn pack(core: &SparseMatrixCore<T>) -> Result<Self, MatrixError> {
        let (m, n) = (core.nrows(), core.ncols());
        let limit = core.settings().max_storage_entries;

        let len = m.checked_mul(n).ok_or(MatrixError::AllocationFailure {
            requested: usize::MAX,
        })?;
        let mut data = try_alloc(len, T::zero(), limit)?;
        let mut filled = try_alloc(len, false, limit)?;

        for (&(row, col), &v) in core.coefficients() {
            let idx = row + m * col;
            data[idx] = v;
            filled[idx] = true;
        }

        Ok(DenseStorage { m, n, data, filled })
    }

    fn unpack(&self) -> BTreeMap<(usize, usize), T> {
        let mut coeffs = BTreeMap::new();
        for col in 0..self.n {
            for row in 0..self.m {
                let idx = self.index_linear(row, col);
                if self.filled[idx] {
                    coeffs.insert((row, col), self.data[idx]);
                }
            }
        }
        coeffs
    }

    fn check_format(&self) -> Result<(), SparseFormatError> {
        let len = self
            .m
            .checked_mul(self.n)
            .ok_or(SparseFormatError::IncompatibleDimension)?;
        if self.data.len() != len || self.filled.len() != len {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //unfilled slots must hold zero
        if izip!(&self.data, &self.filled).any(|(&v, &f)| !f && v != T::zero()) {
            return Err(SparseFormatError::BadPadding);
        }
        Ok(())
    }

    fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    fn nnz(&self) -> usize {
        self.filled.iter().filter(|&&f| f).count()
    }

    fn entry(&self, row: usize, col: usize) -> Result<Option<T>, MatrixError> {
        let idx = self.index_linear(row, col);
        Ok(self.filled[idx].then(|| self.data[idx]))
    }

    fn gemv(&self, b: &mut [T], x: &[T]) {
        b.fill(T::zero());
        let columns = izip!(self.data.chunks_exact(self.m), self.filled.chunks_exact(self.m));
        for ((vals, filled), &xj) in columns.zip(x) {
            for (bi, &v, &f) in izip!(b.iter_mut(), vals, filled) {
                if f {
                    *bi += v * xj;
                }
            }
        }
    }
}
