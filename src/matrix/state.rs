#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Lifecycle state of a sparse matrix.
///
/// A matrix moves `Undefined -> Initialized` exactly once during
/// construction.  The first coefficient moves it to `Building`, and
/// thereafter it alternates between `Building` and `Assembled` through
/// [`assemble_storage`](crate::matrix::SparseMatrixOps::assemble_storage)
/// and [`disassemble_storage`](crate::matrix::SparseMatrixOps::disassemble_storage).
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MatrixState {
    /// Not yet constructed
    #[default]
    Undefined,
    /// Dimensions fixed, no coefficients set
    Initialized,
    /// Accepting coefficients into the coefficient store
    Building,
    /// Coefficients packed into a storage format
    Assembled,
}

impl MatrixState {
    /// True if coefficients may be added in this state
    pub fn is_modifiable(&self) -> bool {
        matches!(self, MatrixState::Initialized | MatrixState::Building)
    }

    /// True if packed storage is available in this state
    pub fn is_assembled(&self) -> bool {
        *self == MatrixState::Assembled
    }
}

impl Display for MatrixState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatrixState::Undefined => "Undefined",
            MatrixState::Initialized => "Initialized",
            MatrixState::Building => "Building",
            MatrixState::Assembled => "Assembled",
        };
        write!(f, "{}", s)
    }
}

#[test]
fn test_state_predicates() {
    assert!(MatrixState::Initialized.is_modifiable());
    assert!(MatrixState::Building.is_modifiable());
    assert!(!MatrixState::Assembled.is_modifiable());
    assert!(!MatrixState::Undefined.is_modifiable());
    assert!(MatrixState::Assembled.is_assembled());
    assert_eq!(MatrixState::Building.to_string(), "Building");
}
