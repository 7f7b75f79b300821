//! Numeric primitives shared by all storage formats: the coefficient
//! float trait, error types and low level vector helpers.

mod error_types;
mod floats;
pub(crate) mod vecmath;

pub use error_types::*;
pub use floats::*;
