#![allow(non_snake_case)]

// names appearing in SparseMatrixOps signatures must be in
// scope here for the enum_dispatch generated impl
use super::{
    CooMatrix, CsrMatrix, DenseMatrix, EllMatrix, JdsMatrix, MatrixSettings, MatrixState,
    SparseMatrixCore, SparseMatrixOps, StorageFormat,
};
use crate::algebra::{FloatT, MatrixError};
use enum_dispatch::*;

/// A sparse matrix in any of the supported storage formats.
///
/// All [`SparseMatrixOps`] calls are forwarded to the wrapped format.
///
/// ```
/// use spmv::matrix::*;
///
/// let mut A = SparseMatrix::<f64>::new(StorageFormat::Jds, 2, 3).unwrap();
/// A.set_coefficient(0, 2, 1.5).unwrap();
/// A.assemble_storage().unwrap();
///
/// // move the coefficients into a CSR matrix instead
/// let mut B = A.into_format(StorageFormat::Csr).unwrap();
/// B.assemble_storage().unwrap();
/// assert_eq!(B.matvec(&[0., 0., 2.]).unwrap(), vec![3., 0.]);
/// ```
#[enum_dispatch(SparseMatrixOps<T>)]
#[derive(Debug, Clone)]
pub enum SparseMatrix<T>
where
    T: FloatT,
{
    Coo(CooMatrix<T>),
    Csr(CsrMatrix<T>),
    Ell(EllMatrix<T>),
    Jds(JdsMatrix<T>),
    Dense(DenseMatrix<T>),
}

impl<T> SparseMatrix<T>
where
    T: FloatT,
{
    /// `nrows x ncols` matrix in the given format, with default settings
    pub fn new(format: StorageFormat, nrows: usize, ncols: usize) -> Result<Self, MatrixError> {
        Self::with_settings(format, nrows, ncols, MatrixSettings::default())
    }

    pub fn with_settings(
        format: StorageFormat,
        nrows: usize,
        ncols: usize,
        settings: MatrixSettings,
    ) -> Result<Self, MatrixError> {
        let A: Self = match format {
            StorageFormat::Coo => CooMatrix::<T>::with_settings(nrows, ncols, settings)?.into(),
            StorageFormat::Csr => CsrMatrix::<T>::with_settings(nrows, ncols, settings)?.into(),
            StorageFormat::Ell => EllMatrix::<T>::with_settings(nrows, ncols, settings)?.into(),
            StorageFormat::Jds => JdsMatrix::<T>::with_settings(nrows, ncols, settings)?.into(),
            StorageFormat::Dense => DenseMatrix::<T>::with_settings(nrows, ncols, settings)?.into(),
        };
        Ok(A)
    }

    /// Move all coefficients into a new matrix of the given format.
    ///
    /// The source is disassembled first if necessary.  The new matrix
    /// keeps the source's settings and is returned unassembled, in the
    /// Building state, or Initialized if there are no coefficients.
    pub fn into_format(mut self, format: StorageFormat) -> Result<Self, MatrixError> {
        if self.state().is_assembled() {
            self.disassemble_storage()?;
        }

        let core = self.core();
        let mut B = Self::with_settings(format, core.nrows(), core.ncols(), core.settings().clone())?;
        for (row, col, v) in core.triplets() {
            B.set_coefficient(row, col, v)?;
        }
        Ok(B)
    }
}
