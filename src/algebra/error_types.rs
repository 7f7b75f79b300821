use crate::matrix::MatrixState;
use thiserror::Error;

/// Error type returned by matrix construction, assembly and product operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Matrix constructed with a zero row or column dimension
    #[error("Matrix dimensions must be nonzero, got ({nrows},{ncols})")]
    EmptyDimension { nrows: usize, ncols: usize },
    /// Row or column index outside the matrix dimensions
    #[error("Index ({row},{col}) is out of range for a {nrows} x {ncols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },
    /// Operation not permitted in the current matrix state
    #[error("Operation `{op}` is not permitted in state {state}")]
    InvalidState {
        op: &'static str,
        state: MatrixState,
    },
    /// Vector length incompatible with the matrix dimensions
    #[error("Vector length mismatch: expected {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },
    /// Packed storage could not be allocated
    #[error("Unable to allocate packed storage of {requested} entries")]
    AllocationFailure { requested: usize },
    /// The same (row,col) position appears twice in packed storage
    #[error("Duplicate entry at ({row},{col}) in packed storage")]
    DuplicateEntry { row: usize, col: usize },
    /// Packed storage failed a format check
    #[error("Packed storage is malformed: {0}")]
    Format(#[from] SparseFormatError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Error type returned by packed storage format checks.
pub enum SparseFormatError {
    /// Array lengths are incompatible with each other or the matrix dimensions
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Row pointer values are defective
    #[error("Bad row pointer values")]
    BadRowptr,
    /// Column value exceeds the matrix column dimension
    #[error("Column value exceeds the matrix column dimension")]
    BadColval,
    /// Row value exceeds the matrix row dimension
    #[error("Row value exceeds the matrix row dimension")]
    BadRowval,
    /// Padding slot with a nonzero value or a bad sentinel column
    #[error("Bad padding slot")]
    BadPadding,
    /// Row permutation is not a bijection or is not ordered by row length
    #[error("Bad row permutation")]
    BadPermutation,
    /// Jagged diagonal pointer values are defective
    #[error("Bad jagged diagonal pointer values")]
    BadDiagonalPtr,
    /// The same (row,col) position appears more than once
    #[error("Duplicate (row,col) entry")]
    DuplicateEntry,
}
