#![allow(non_snake_case)]

use crate::algebra::{
    vecmath::{cumsum, try_alloc},
    FloatT, MatrixError, SparseFormatError,
};
use crate::matrix::{PackedMatrix, PackedStorage, SparseMatrixCore, StorageFormat};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};
use std::iter::zip;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sparse matrix assembling to [`JdsStorage`]
pub type JdsMatrix<T = f64> = PackedMatrix<JdsStorage<T>, T>;

/// Packed Jagged Diagonal Storage (JDS) layout
///
/// Rows are permuted into order of decreasing entry count, with ties kept
/// in original row order.  The `k`-th jagged diagonal holds the `k`-th
/// entry of every row having more than `k` entries, listed in permuted row
/// order, and occupies `jdptr[k]..jdptr[k+1]` of `colval` and `nzval`.
/// The entry at position `p` within a diagonal belongs to row `perm[p]`.
///
/// __Example usage__ : the 3 x 3 matrix
/// ```text
/// A = [1.  ⋅   ⋅ ]
///     [⋅   ⋅   ⋅ ]
///     [2.  3.  4.]
/// ```
/// is stored as
/// ```text
/// perm   = [2, 0, 1]
/// jdptr  = [0, 2, 3, 4]
/// colval = [0, 0, 1, 2]
/// nzval  = [2., 1., 3., 4.]
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JdsStorage<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// original row index at each permuted position
    pub perm: Vec<usize>,
    /// start of each jagged diagonal, with length `ndiags + 1`
    pub jdptr: Vec<usize>,
    /// column index of each entry, diagonal-major
    pub colval: Vec<usize>,
    /// value of each entry, diagonal-major
    pub nzval: Vec<T>,
}

impl<T> JdsStorage<T> {
    /// number of jagged diagonals, i.e. the longest row length
    pub fn ndiags(&self) -> usize {
        self.jdptr.len().saturating_sub(1)
    }

    /// index range in `colval`/`nzval` of the `k`-th jagged diagonal
    pub fn diag_range(&self, k: usize) -> std::ops::Range<usize> {
        self.jdptr[k]..self.jdptr[k + 1]
    }

    // (original row, column, value) triples, diagonal by diagonal
    fn triplets(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        (0..self.ndiags()).flat_map(move |k| {
            let rng = self.diag_range(k);
            zip(&self.colval[rng.clone()], &self.nzval[rng])
                .enumerate()
                .map(move |(p, (&col, v))| (self.perm[p], col, v))
        })
    }
}

impl<T> PackedStorage<T> for JdsStorage<T>
where
    T: FloatT,
{
    const FORMAT: StorageFormat = StorageFormat::Jds;

    fn pack(core: &SparseMatrixCore<T>) -> Result<Self, MatrixError> {
        let (m, n, nnz) = (core.nrows(), core.ncols(), core.nnz());
        let limit = core.settings().max_storage_entries;

        // rows by decreasing length.  sort_by_key is stable,
        // so equal length rows keep their original order
        let counts = core.row_counts()?;
        let mut perm = try_alloc(m, 0, limit)?;
        for (i, p) in perm.iter_mut().enumerate() {
            *p = i;
        }
        perm.sort_by_key(|&row| Reverse(counts[row]));
        let ndiags = counts[perm[0]];

        // diagonal k holds one entry for each row longer than k
        let mut jdptr = try_alloc(ndiags + 1, 0, limit)?;
        for &count in &counts {
            for len in &mut jdptr[1..=count] {
                *len += 1;
            }
        }
        cumsum(&mut jdptr);
        debug_assert_eq!(jdptr[ndiags], nnz);

        // position of each row within perm
        let mut position = try_alloc(m, 0, limit)?;
        for (p, &row) in perm.iter().enumerate() {
            position[row] = p;
        }

        let mut colval = try_alloc(nnz, 0, limit)?;
        let mut nzval = try_alloc(nnz, T::zero(), limit)?;

        // the k-th entry of a row goes to diagonal k
        let mut next = try_alloc(m, 0, limit)?;
        for (&(row, col), &v) in core.coefficients() {
            let dest = jdptr[next[row]] + position[row];
            colval[dest] = col;
            nzval[dest] = v;
            next[row] += 1;
        }

        Ok(JdsStorage {
            m,
            n,
            perm,
            jdptr,
            colval,
            nzval,
        })
    }

    fn unpack(&self) -> BTreeMap<(usize, usize), T> {
        self.triplets()
            .map(|(row, col, &v)| ((row, col), v))
            .collect()
    }

    fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.colval.len() != self.nzval.len() || self.perm.len() != self.m {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //perm must be a bijection on 0..m
        let mut seen = vec![false; self.m];
        for &row in &self.perm {
            if row >= self.m || seen[row] {
                return Err(SparseFormatError::BadPermutation);
            }
            seen[row] = true;
        }

        if self.jdptr.last() != Some(&self.colval.len()) {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //diagonals must start at 0 and never lengthen.  A longer
        //diagonal would need a row missing an earlier entry, and
        //rows would no longer be ordered by decreasing length
        if self.jdptr[0] != 0 || self.jdptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadDiagonalPtr);
        }
        let lens: Vec<usize> = self.jdptr.windows(2).map(|c| c[1] - c[0]).collect();
        if lens.iter().any(|&len| len > self.m) || lens.windows(2).any(|c| c[0] < c[1]) {
            return Err(SparseFormatError::BadDiagonalPtr);
        }

        if !self.colval.iter().all(|c| c < &self.n) {
            return Err(SparseFormatError::BadColval);
        }

        let mut entries = HashSet::with_capacity(self.colval.len());
        for (row, col, _) in self.triplets() {
            if !entries.insert((row, col)) {
                return Err(SparseFormatError::DuplicateEntry);
            }
        }

        Ok(())
    }

    fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    fn nnz(&self) -> usize {
        self.colval.len()
    }

    fn entry(&self, row: usize, col: usize) -> Result<Option<T>, MatrixError> {
        let p = self
            .perm
            .iter()
            .position(|&r| r == row)
            .ok_or(MatrixError::IndexOutOfRange {
                row,
                col,
                nrows: self.m,
                ncols: self.n,
            })?;

        // the row has an entry in diagonal k while p is inside it
        let mut found = None;
        for k in 0..self.ndiags() {
            let idx = self.jdptr[k] + p;
            if idx >= self.jdptr[k + 1] {
                break;
            }
            if self.colval[idx] == col {
                if found.is_some() {
                    return Err(MatrixError::DuplicateEntry { row, col });
                }
                found = Some(self.nzval[idx]);
            }
        }
        Ok(found)
    }

    fn gemv(&self, b: &mut [T], x: &[T]) {
        b.fill(T::zero());
        for k in 0..self.ndiags() {
            let rng = self.diag_range(k);
            let diag = zip(&self.colval[rng.clone()], &self.nzval[rng]);
            for (&row, (&c, &v)) in zip(&self.perm, diag) {
                b[row] += v * x[c];
            }
        }
    }
}
