#![allow(non_snake_case)]

use crate::algebra::{vecmath::try_alloc, FloatT, MatrixError, SparseFormatError};
use crate::matrix::{PackedMatrix, PackedStorage, SparseMatrixCore, StorageFormat};
use itertools::izip;
use std::collections::{BTreeMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sparse matrix assembling to [`CooStorage`]
pub type CooMatrix<T = f64> = PackedMatrix<CooStorage<T>, T>;

/// Packed Coordinate (COO) layout
///
/// Three parallel vectors holding the row index, column index and value
/// of every stored entry.  Entries appear in the iteration order of the
/// coefficient store, i.e. sorted by row and then by column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CooStorage<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// row index of each entry
    pub rowval: Vec<usize>,
    /// column index of each entry
    pub colval: Vec<usize>,
    /// value of each entry
    pub nzval: Vec<T>,
}

impl<T> PackedStorage<T> for CooStorage<T>
where
    T: FloatT,
{
    const FORMAT: StorageFormat = StorageFormat::Coo;
    const LOOKUP_WHILE_BUILDING: bool = true;

    fn pack(core: &SparseMatrixCore<T>) -> Result<Self, MatrixError> {
        let nnz = core.nnz();
        let limit = core.settings().max_storage_entries;

        let mut rowval = try_alloc(nnz, 0, limit)?;
        let mut colval = try_alloc(nnz, 0, limit)?;
        let mut nzval = try_alloc(nnz, T::zero(), limit)?;

        for ((&(r, c), &v), row, col, val) in
            izip!(core.coefficients(), &mut rowval, &mut colval, &mut nzval)
        {
            *row = r;
            *col = c;
            *val = v;
        }

        Ok(CooStorage {
            m: core.nrows(),
            n: core.ncols(),
            rowval,
            colval,
            nzval,
        })
    }

    fn unpack(&self) -> BTreeMap<(usize, usize), T> {
        izip!(&self.rowval, &self.colval, &self.nzval)
            .map(|(&r, &c, &v)| ((r, c), v))
            .collect()
    }

    fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() || self.colval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }
        if !self.colval.iter().all(|c| c < &self.n) {
            return Err(SparseFormatError::BadColval);
        }

        let mut seen = HashSet::with_capacity(self.nnz());
        for (&r, &c) in self.rowval.iter().zip(&self.colval) {
            if !seen.insert((r, c)) {
                return Err(SparseFormatError::DuplicateEntry);
            }
        }
        Ok(())
    }

    fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    fn nnz(&self) -> usize {
        self.nzval.len()
    }

    fn entry(&self, row: usize, col: usize) -> Result<Option<T>, MatrixError> {
        let mut found = None;
        for (&r, &c, &v) in izip!(&self.rowval, &self.colval, &self.nzval) {
            if r == row && c == col {
                if found.is_some() {
                    return Err(MatrixError::DuplicateEntry { row, col });
                }
                found = Some(v);
            }
        }
        Ok(found)
    }

    fn gemv(&self, b: &mut [T], x: &[T]) {
        b.fill(T::zero());
        for (&r, &c, &v) in izip!(&self.rowval, &self.colval, &self.nzval) {
            b[r] += v * x[c];
        }
    }
}
