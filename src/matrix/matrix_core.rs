#![allow(non_snake_case)]

use super::{MatrixSettings, MatrixState};
use crate::algebra::{vecmath::try_alloc, FloatT, MatrixError};
use std::collections::BTreeMap;

/// Dimension and state bookkeeping plus the coefficient store shared by
/// every storage format.
///
/// While a matrix is being built its coefficients live in an ordered map
/// keyed by `(row, col)`.  Setting the same position twice overwrites the
/// earlier value.  All format engines hold one of these and drain it into
/// their packed arrays on assembly.
#[derive(Debug, Clone)]
pub struct SparseMatrixCore<T = f64> {
    nrows: usize,
    ncols: usize,
    nnz: usize,
    state: MatrixState,
    coeffs: BTreeMap<(usize, usize), T>,
    settings: MatrixSettings,
}

impl<T> SparseMatrixCore<T>
where
    T: FloatT,
{
    /// Create an `nrows x ncols` matrix with no coefficients.
    ///
    /// Fails with [`MatrixError::EmptyDimension`] if either dimension is zero.
    pub fn new(nrows: usize, ncols: usize, settings: MatrixSettings) -> Result<Self, MatrixError> {
        if nrows == 0 || ncols == 0 {
            return Err(MatrixError::EmptyDimension { nrows, ncols });
        }
        Ok(Self::init(nrows, ncols, settings))
    }

    // construction without the dimension check.  Callers
    // must guarantee nonzero dimensions.
    pub(crate) fn init(nrows: usize, ncols: usize, settings: MatrixSettings) -> Self {
        debug_assert!(nrows > 0 && ncols > 0);
        let mut core = SparseMatrixCore {
            nrows,
            ncols,
            nnz: 0,
            state: MatrixState::Undefined,
            coeffs: BTreeMap::new(),
            settings,
        };
        log::trace!("new {} x {} sparse matrix", nrows, ncols);
        core.state = MatrixState::Initialized;
        core
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// number of explicitly stored coefficients
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    pub fn state(&self) -> MatrixState {
        self.state
    }

    pub fn settings(&self) -> &MatrixSettings {
        &self.settings
    }

    /// Insert or overwrite the coefficient at `(row, col)`.
    ///
    /// Only permitted while the matrix is Initialized or Building.  On
    /// success the matrix is in the Building state.
    pub fn set_coefficient(&mut self, row: usize, col: usize, value: T) -> Result<(), MatrixError> {
        self.check_state("set_coefficient", MatrixState::is_modifiable)?;
        self.check_index(row, col)?;

        self.coeffs.insert((row, col), value);
        self.nnz = self.coeffs.len();
        self.state = MatrixState::Building;
        Ok(())
    }

    /// Iterate over the `(row, col, value)` triples in the coefficient
    /// store, in row-major order.  Empty while the matrix is assembled.
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.coeffs.iter().map(|(&(r, c), &v)| (r, c, v))
    }

    pub(crate) fn check_index(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row >= self.nrows || col >= self.ncols {
            return Err(MatrixError::IndexOutOfRange {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        Ok(())
    }

    pub(crate) fn check_state(
        &self,
        op: &'static str,
        allowed: impl Fn(&MatrixState) -> bool,
    ) -> Result<(), MatrixError> {
        if !allowed(&self.state) {
            return Err(MatrixError::InvalidState {
                op,
                state: self.state,
            });
        }
        Ok(())
    }

    // value in the coefficient store, if any
    pub(crate) fn lookup(&self, row: usize, col: usize) -> Option<T> {
        self.coeffs.get(&(row, col)).copied()
    }

    // resolve a lookup result to the sparse default of zero
    pub(crate) fn or_sparse_default(&self, found: Option<T>, row: usize, col: usize) -> T {
        match found {
            Some(v) => v,
            None => {
                if self.settings.log_missing_entries {
                    log::debug!("no value assigned at ({},{}), returning 0", row, col);
                }
                T::zero()
            }
        }
    }

    pub(crate) fn coefficients(&self) -> &BTreeMap<(usize, usize), T> {
        &self.coeffs
    }

    // number of stored coefficients in each row
    pub(crate) fn row_counts(&self) -> Result<Vec<usize>, MatrixError> {
        let mut counts = try_alloc(self.nrows, 0, self.settings.max_storage_entries)?;
        for &(row, _) in self.coeffs.keys() {
            counts[row] += 1;
        }
        Ok(counts)
    }

    // Facade for packed storage supplied directly by the caller,
    // already checked and holding `nnz` entries
    pub(crate) fn assembled_from(
        nrows: usize,
        ncols: usize,
        nnz: usize,
        settings: MatrixSettings,
    ) -> Result<Self, MatrixError> {
        let mut core = Self::new(nrows, ncols, settings)?;
        core.nnz = nnz;
        core.state = MatrixState::Assembled;
        log::debug!("adopted packed storage with {} nonzeros", nnz);
        Ok(core)
    }

    pub(crate) fn check_assemble(&self) -> Result<(), MatrixError> {
        self.check_state("assemble_storage", MatrixState::is_modifiable)
    }

    pub(crate) fn check_assembled(&self, op: &'static str) -> Result<(), MatrixError> {
        self.check_state(op, MatrixState::is_assembled)
    }

    // Packed storage has been built from the coefficient store.  The
    // store is released and the nonzero count is retained.
    pub(crate) fn commit_assembly(&mut self, format: &str) {
        debug_assert_eq!(self.nnz, self.coeffs.len());
        self.coeffs.clear();
        self.state = MatrixState::Assembled;
        log::debug!("assembled {} storage with {} nonzeros", format, self.nnz);
    }

    // Packed storage has been unpacked into `coeffs`, which replaces
    // the (empty) coefficient store wholesale.
    pub(crate) fn commit_disassembly(&mut self, coeffs: BTreeMap<(usize, usize), T>, format: &str) {
        debug_assert!(self.coeffs.is_empty());
        debug_assert_eq!(self.nnz, coeffs.len());
        self.coeffs = coeffs;
        self.nnz = self.coeffs.len();
        self.state = MatrixState::Building;
        log::debug!("disassembled {} storage with {} nonzeros", format, self.nnz);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixSettingsBuilder;

    fn core_3x4() -> SparseMatrixCore<f64> {
        SparseMatrixCore::new(3, 4, MatrixSettings::default()).unwrap()
    }

    #[test]
    fn test_new() {
        let A = core_3x4();
        assert_eq!(A.nrows(), 3);
        assert_eq!(A.ncols(), 4);
        assert_eq!(A.nnz(), 0);
        assert_eq!(A.state(), MatrixState::Initialized);

        let err = SparseMatrixCore::<f64>::new(0, 4, MatrixSettings::default()).unwrap_err();
        assert_eq!(err, MatrixError::EmptyDimension { nrows: 0, ncols: 4 });
    }

    #[test]
    fn test_set_coefficient_overwrites() {
        let mut A = core_3x4();
        A.set_coefficient(1, 2, 3.0).unwrap();
        A.set_coefficient(0, 0, 1.0).unwrap();
        A.set_coefficient(1, 2, 5.0).unwrap();
        assert_eq!(A.nnz(), 2);
        assert_eq!(A.state(), MatrixState::Building);
        assert_eq!(A.lookup(1, 2), Some(5.0));
        assert_eq!(A.lookup(2, 2), None);

        let triplets: Vec<_> = A.triplets().collect();
        assert_eq!(triplets, vec![(0, 0, 1.0), (1, 2, 5.0)]);
    }

    #[test]
    fn test_set_coefficient_out_of_range() {
        let mut A = core_3x4();
        assert!(matches!(
            A.set_coefficient(3, 0, 1.0),
            Err(MatrixError::IndexOutOfRange { row: 3, col: 0, .. })
        ));
        assert!(matches!(
            A.set_coefficient(0, 4, 1.0),
            Err(MatrixError::IndexOutOfRange { row: 0, col: 4, .. })
        ));
        // failed inserts leave the state untouched
        assert_eq!(A.state(), MatrixState::Initialized);
        assert_eq!(A.nnz(), 0);
    }

    #[test]
    fn test_row_counts() {
        let mut A = core_3x4();
        A.set_coefficient(0, 1, 1.0).unwrap();
        A.set_coefficient(2, 1, 1.0).unwrap();
        A.set_coefficient(2, 3, 1.0).unwrap();
        assert_eq!(A.row_counts().unwrap(), vec![1, 0, 2]);
    }

    #[test]
    fn test_row_counts_limit() {
        let settings = MatrixSettingsBuilder::default()
            .max_storage_entries(2)
            .build()
            .unwrap();
        let A = SparseMatrixCore::<f64>::new(3, 1, settings).unwrap();
        assert_eq!(
            A.row_counts(),
            Err(MatrixError::AllocationFailure { requested: 3 })
        );
    }

    #[test]
    fn test_assembled_from() {
        let A = SparseMatrixCore::<f64>::assembled_from(2, 3, 4, MatrixSettings::default()).unwrap();
        assert_eq!(A.state(), MatrixState::Assembled);
        assert_eq!(A.nnz(), 4);
        assert!(A.triplets().next().is_none());

        assert!(matches!(
            SparseMatrixCore::<f64>::assembled_from(0, 3, 0, MatrixSettings::default()),
            Err(MatrixError::EmptyDimension { .. })
        ));
    }

    #[test]
    fn test_commit_cycle() {
        let mut A = core_3x4();
        A.set_coefficient(0, 1, 2.0).unwrap();
        let saved = A.coefficients().clone();
        A.commit_assembly("test");
        assert_eq!(A.state(), MatrixState::Assembled);
        assert_eq!(A.nnz(), 1);
        assert!(A.triplets().next().is_none());
        assert!(A.set_coefficient(0, 0, 1.0).is_err());

        A.commit_disassembly(saved, "test");
        assert_eq!(A.state(), MatrixState::Building);
        assert_eq!(A.lookup(0, 1), Some(2.0));
    }
}
