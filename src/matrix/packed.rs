use super::{MatrixSettings, PackedStorage, SparseMatrixCore, SparseMatrixOps, StorageFormat};
use crate::algebra::{vecmath::check_matvec_dims, FloatT, MatrixError};

/// A sparse matrix whose assembled form is the packed layout `S`.
///
/// The matrix holds a [`SparseMatrixCore`] for coefficient intake and,
/// while Assembled, exactly one packed layout.  The layout is replaced
/// wholesale on assembly and dropped wholesale on disassembly, and is
/// never partially updated.  Use the format aliases
/// [`CooMatrix`](super::CooMatrix), [`CsrMatrix`](super::CsrMatrix),
/// [`EllMatrix`](super::EllMatrix) and [`JdsMatrix`](super::JdsMatrix)
/// rather than naming this type directly.
#[derive(Debug, Clone)]
pub struct PackedMatrix<S, T = f64> {
    core: SparseMatrixCore<T>,
    storage: Option<S>,
}

impl<S, T> PackedMatrix<S, T>
where
    T: FloatT,
    S: PackedStorage<T>,
{
    /// `nrows x ncols` matrix with default settings
    pub fn new(nrows: usize, ncols: usize) -> Result<Self, MatrixError> {
        Self::with_settings(nrows, ncols, MatrixSettings::default())
    }

    pub fn with_settings(
        nrows: usize,
        ncols: usize,
        settings: MatrixSettings,
    ) -> Result<Self, MatrixError> {
        let core = SparseMatrixCore::new(nrows, ncols, settings)?;
        Ok(Self::from_core(core))
    }

    /// Wrap an existing packed layout, e.g. one that was deserialized
    /// or built by hand.
    ///
    /// The layout is always checked with
    /// [`check_format`](PackedStorage::check_format) first.  On success
    /// the matrix is Assembled with an empty coefficient store.
    pub fn from_storage(storage: S, settings: MatrixSettings) -> Result<Self, MatrixError> {
        storage.check_format()?;
        let (nrows, ncols) = storage.size();
        let core = SparseMatrixCore::assembled_from(nrows, ncols, storage.nnz(), settings)?;
        Ok(PackedMatrix {
            core,
            storage: Some(storage),
        })
    }

    fn from_core(core: SparseMatrixCore<T>) -> Self {
        PackedMatrix {
            core,
            storage: None,
        }
    }

    /// The packed layout, available only while the matrix is Assembled.
    pub fn storage(&self) -> Option<&S> {
        self.storage.as_ref()
    }

    // packed layout for an operation requiring the Assembled state
    fn assembled(&self, op: &'static str) -> Result<&S, MatrixError> {
        self.core.check_assembled(op)?;
        self.storage.as_ref().ok_or(MatrixError::InvalidState {
            op,
            state: self.core.state(),
        })
    }
}

impl<S, T> Default for PackedMatrix<S, T>
where
    T: FloatT,
    S: PackedStorage<T>,
{
    /// A 1 x 1 matrix with no coefficients
    fn default() -> Self {
        Self::from_core(SparseMatrixCore::init(1, 1, MatrixSettings::default()))
    }
}

impl<S, T> SparseMatrixOps<T> for PackedMatrix<S, T>
where
    T: FloatT,
    S: PackedStorage<T>,
{
    fn core(&self) -> &SparseMatrixCore<T> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SparseMatrixCore<T> {
        &mut self.core
    }

    fn format(&self) -> StorageFormat {
        S::FORMAT
    }

    fn assemble_storage(&mut self) -> Result<(), MatrixError> {
        self.core.check_assemble()?;

        let packed = S::pack(&self.core)?;
        if self.core.settings().validate_on_assemble {
            packed.check_format()?;
        }
        debug_assert_eq!(packed.nnz(), self.core.nnz());

        // nothing has been modified up to here
        self.storage = Some(packed);
        self.core.commit_assembly(S::FORMAT.name());
        Ok(())
    }

    fn disassemble_storage(&mut self) -> Result<(), MatrixError> {
        let coeffs = self.assembled("disassemble_storage")?.unpack();
        self.storage = None;
        self.core.commit_disassembly(coeffs, S::FORMAT.name());
        Ok(())
    }

    fn matvec_into(&self, b: &mut [T], x: &[T]) -> Result<(), MatrixError> {
        let packed = self.assembled("matvec")?;
        check_matvec_dims(b, x, self.core.nrows(), self.core.ncols())?;
        packed.gemv(b, x);
        Ok(())
    }

    fn get_coefficient(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        let found = if S::LOOKUP_WHILE_BUILDING && self.core.state().is_modifiable() {
            self.core.check_index(row, col)?;
            self.core.lookup(row, col)
        } else {
            let packed = self.assembled("get_coefficient")?;
            self.core.check_index(row, col)?;
            packed.entry(row, col)?
        };
        Ok(self.core.or_sparse_default(found, row, col))
    }
}
