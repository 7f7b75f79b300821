//! Sparse matrix construction, assembly and products.
//!
//! A matrix is built one coefficient at a time, then packed into one of
//! the supported [storage formats](StorageFormat) for fast products.

// the shared traits must be declared ahead of
// the enum_dispatch'd SparseMatrix type
mod traits;
pub use traits::*;

mod matrix_core;
mod packed;
mod settings;
mod sparse;
mod state;

pub mod formats;

pub use matrix_core::*;
pub use formats::*;
pub use packed::*;
pub use settings::*;
pub use sparse::*;
pub use state::*;
