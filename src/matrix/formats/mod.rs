#![allow(non_snake_case)]

// Packed storage layouts.  Each layout implements `PackedStorage`
// and is paired with the shared coefficient store through the
// `PackedMatrix` aliases declared alongside it.

mod coo;
mod csr;
mod dense;
mod ell;
mod jds;

pub use coo::*;
pub use csr::*;
pub use dense::*;
pub use ell::*;
pub use jds::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Selector for the supported packed storage layouts
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StorageFormat {
    /// Coordinate format
    Coo,
    /// Compressed sparse row format
    Csr,
    /// ELLPACK format
    Ell,
    /// Jagged diagonal storage format
    Jds,
    /// Dense column-major format
    Dense,
}

impl StorageFormat {
    /// every supported format
    pub const ALL: [StorageFormat; 5] = [
        StorageFormat::Coo,
        StorageFormat::Csr,
        StorageFormat::Ell,
        StorageFormat::Jds,
        StorageFormat::Dense,
    ];

    /// the formats that store only the set coefficients
    pub const SPARSE: [StorageFormat; 4] = [
        StorageFormat::Coo,
        StorageFormat::Csr,
        StorageFormat::Ell,
        StorageFormat::Jds,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StorageFormat::Coo => "COO",
            StorageFormat::Csr => "CSR",
            StorageFormat::Ell => "ELL",
            StorageFormat::Jds => "JDS",
            StorageFormat::Dense => "DEN",
        }
    }
}

impl Display for StorageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
