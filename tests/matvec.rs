#![allow(non_snake_case)]

use itertools::iproduct;
use spmv::{algebra::*, matrix::*};

fn test_matrix_4x4(format: StorageFormat) -> SparseMatrix<f64> {
    // A =
    //[1.0  7.0   ⋅    ⋅ ]
    //[5.0   ⋅   3.0  9.0]
    //[ ⋅   2.0  8.0   ⋅ ]
    //[ ⋅    ⋅    ⋅   6.0]
    let mut A = SparseMatrix::new(format, 4, 4).unwrap();
    let entries = [
        (0, 0, 1.0),
        (0, 1, 7.0),
        (1, 0, 5.0),
        (1, 2, 3.0),
        (1, 3, 9.0),
        (2, 1, 2.0),
        (2, 2, 8.0),
        (3, 3, 6.0),
    ];
    for (row, col, v) in entries {
        A.set_coefficient(row, col, v).unwrap();
    }
    A
}

// a deterministic sparsity pattern with rows of varying length
fn pattern_triplets(m: usize, n: usize) -> Vec<(usize, usize, f64)> {
    iproduct!(0..m, 0..n)
        .filter(|&(i, j)| (3 * i + 7 * j) % 5 == 0 || i == j)
        .map(|(i, j)| (i, j, 1.0 + (i * n + j) as f64 / 8.0))
        .collect()
}

fn dense_matvec(m: usize, triplets: &[(usize, usize, f64)], x: &[f64]) -> Vec<f64> {
    let mut b = vec![0.0; m];
    for &(i, j, v) in triplets {
        b[i] += v * x[j];
    }
    b
}

fn assert_close(a: &[f64], b: &[f64]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        assert!((x - y).abs() <= 1e-12 * (1.0 + y.abs()), "{} != {}", x, y);
    }
}

#[test]
fn test_matvec_4x4_all_formats() {
    for format in StorageFormat::ALL {
        let mut A = test_matrix_4x4(format);
        A.assemble_storage().unwrap();
        let b = A.matvec(&[1., 2., 3., 4.]).unwrap();
        assert_eq!(b, vec![15., 50., 28., 24.], "format {}", format);
    }
}

#[test]
fn test_matvec_empty_1x1() {
    for format in StorageFormat::ALL {
        let mut A = SparseMatrix::<f64>::new(format, 1, 1).unwrap();
        A.assemble_storage().unwrap();
        assert_eq!(A.nnz(), 0);
        assert_eq!(A.matvec(&[0.0]).unwrap(), vec![0.0], "format {}", format);
    }
}

#[test]
fn test_matvec_identity() {
    for format in StorageFormat::ALL {
        let mut A = SparseMatrix::<f64>::new(format, 3, 3).unwrap();
        for i in 0..3 {
            A.set_coefficient(i, i, 1.0).unwrap();
        }
        A.assemble_storage().unwrap();
        assert_eq!(A.matvec(&[1., 2., 3.]).unwrap(), vec![1., 2., 3.]);
    }
}

#[test]
fn test_matvec_explicit_zero() {
    for format in StorageFormat::ALL {
        let mut A = SparseMatrix::<f64>::new(format, 3, 3).unwrap();
        A.set_coefficient(0, 0, 2.0).unwrap();
        A.set_coefficient(1, 1, 0.0).unwrap();
        A.set_coefficient(2, 2, 3.0).unwrap();
        A.assemble_storage().unwrap();
        assert_eq!(A.nnz(), 3);
        assert_eq!(A.matvec(&[0., 2., 1.]).unwrap(), vec![0., 0., 3.]);
    }
}

#[test]
fn test_matvec_matches_dense() {
    let sizes = [(1, 1), (1, 7), (7, 1), (5, 5), (13, 8), (8, 13), (30, 30)];

    for ((m, n), format) in iproduct!(sizes, StorageFormat::ALL) {
        let triplets = pattern_triplets(m, n);
        let x: Vec<f64> = (0..n).map(|j| 1.0 - (j as f64) / 3.0).collect();

        let mut A = SparseMatrix::<f64>::new(format, m, n).unwrap();
        // insertion order should not matter
        for &(i, j, v) in triplets.iter().rev() {
            A.set_coefficient(i, j, v).unwrap();
        }
        assert_eq!(A.nnz(), triplets.len());
        A.assemble_storage().unwrap();

        let b = A.matvec(&x).unwrap();
        assert_close(&b, &dense_matvec(m, &triplets, &x));
    }
}

#[test]
fn test_matvec_into_overwrites() {
    for format in StorageFormat::ALL {
        let mut A = test_matrix_4x4(format);
        A.assemble_storage().unwrap();

        let mut b = vec![-1.0; 4];
        A.matvec_into(&mut b, &[0., 0., 0., 1.]).unwrap();
        assert_eq!(b, vec![0., 9., 0., 6.]);
    }
}

#[test]
fn test_matvec_size_mismatch() {
    for format in StorageFormat::ALL {
        let mut A = test_matrix_4x4(format);
        A.assemble_storage().unwrap();

        assert_eq!(
            A.matvec(&[1., 2., 3.]),
            Err(MatrixError::SizeMismatch {
                expected: 4,
                found: 3
            })
        );

        let mut b = vec![0.0; 5];
        assert_eq!(
            A.matvec_into(&mut b, &[1., 2., 3., 4.]),
            Err(MatrixError::SizeMismatch {
                expected: 4,
                found: 5
            })
        );
    }
}

fn generic_matvec<T: FloatT>(format: StorageFormat) -> Vec<T> {
    let mut A = SparseMatrix::<T>::new(format, 2, 3).unwrap();
    A.set_coefficient(0, 2, (0.5).as_T()).unwrap();
    A.set_coefficient(1, 0, (2.0).as_T()).unwrap();
    A.assemble_storage().unwrap();
    let x: Vec<T> = [4.0, 0.0, 2.0].iter().map(|v| v.as_T()).collect();
    A.matvec(&x).unwrap()
}

#[test]
fn test_matvec_f32_and_f64() {
    for format in StorageFormat::ALL {
        assert_eq!(generic_matvec::<f32>(format), vec![1.0f32, 8.0]);
        assert_eq!(generic_matvec::<f64>(format), vec![1.0f64, 8.0]);
    }
}

#[test]
fn test_matvec_large_diagonal() {
    let size = 10_000;
    for format in StorageFormat::SPARSE {
        let mut A = SparseMatrix::<f64>::new(format, size, size).unwrap();
        for i in 0..size {
            A.set_coefficient(i, i, 1.0).unwrap();
        }
        A.assemble_storage().unwrap();
        let b = A.matvec(&vec![2.0; size]).unwrap();
        assert!(b.iter().all(|&v| v == 2.0));
    }
}
