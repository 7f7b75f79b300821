//! __spmv__ is a Rust library of sparse matrix storage formats with
//! incremental construction and sparse matrix-vector products.
//!
//! A matrix is built one coefficient at a time.  Once all coefficients are
//! set it is _assembled_ into one of the following packed layouts:
//!
//! * __COO__ : coordinate format, parallel row / column / value vectors.
//! * __CSR__ : compressed sparse row format, a row pointer plus column / value vectors.
//! * __ELL__ : ELLPACK format, fixed width rows padded to the longest row.
//! * __JDS__ : jagged diagonal storage, rows sorted by length and stored diagonal-major.
//! * __DEN__ : dense column-major storage of every position.
//!
//! Assembled matrices support products $b = Ax$ and coefficient lookups.
//! An assembled matrix can be _disassembled_ back to its coefficients for
//! further modification.  A packed layout built elsewhere (for example a
//! deserialized one) is turned into an assembled matrix with
//! `PackedMatrix::from_storage`, which checks it first.
//!
//! ```
//! use spmv::matrix::*;
//!
//! // A = [1.  7.]
//! //     [⋅   3.]
//! let mut A = EllMatrix::<f64>::new(2, 2).unwrap();
//! A.set_coefficient(0, 0, 1.0).unwrap();
//! A.set_coefficient(0, 1, 7.0).unwrap();
//! A.set_coefficient(1, 1, 3.0).unwrap();
//! A.assemble_storage().unwrap();
//!
//! assert_eq!(A.state(), MatrixState::Assembled);
//! assert_eq!(A.matvec(&[1.0, 2.0]).unwrap(), vec![15.0, 6.0]);
//! assert_eq!(A.get_coefficient(1, 0).unwrap(), 0.0);
//! ```
//!
//! Diagnostics are emitted through the [`log`](https://docs.rs/log) facade.
//! No logger is installed by the library.
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

pub mod algebra;
pub mod matrix;
