#![allow(non_snake_case)]

use itertools::iproduct;
use spmv::{algebra::*, matrix::*};

fn pattern_triplets(m: usize, n: usize) -> Vec<(usize, usize, f64)> {
    iproduct!(0..m, 0..n)
        .filter(|&(i, j)| (2 * i + 5 * j) % 7 < 2)
        .map(|(i, j)| (i, j, (i as f64) - 0.25 * (j as f64)))
        .collect()
}

fn build(format: StorageFormat, m: usize, n: usize) -> SparseMatrix<f64> {
    let mut A = SparseMatrix::new(format, m, n).unwrap();
    for (i, j, v) in pattern_triplets(m, n) {
        A.set_coefficient(i, j, v).unwrap();
    }
    A
}

#[test]
fn test_assemble_disassemble_roundtrip() {
    let sizes = [(1, 1), (4, 9), (9, 4), (12, 12)];

    for ((m, n), format) in iproduct!(sizes, StorageFormat::ALL) {
        let mut A = build(format, m, n);
        let before: Vec<_> = A.core().triplets().collect();
        let nnz = A.nnz();

        A.assemble_storage().unwrap();
        assert_eq!(A.nnz(), nnz);
        assert_eq!(A.core().triplets().count(), 0);

        A.disassemble_storage().unwrap();
        let after: Vec<_> = A.core().triplets().collect();
        assert_eq!(before, after, "format {} size {:?}", format, (m, n));
        assert_eq!(A.nnz(), nnz);
    }
}

#[test]
fn test_repeated_cycles() {
    for format in StorageFormat::ALL {
        let mut A = build(format, 6, 6);
        let before: Vec<_> = A.core().triplets().collect();
        let x = vec![1.0; 6];

        A.assemble_storage().unwrap();
        let b0 = A.matvec(&x).unwrap();

        for _ in 0..3 {
            A.disassemble_storage().unwrap();
            A.assemble_storage().unwrap();
            assert_eq!(A.matvec(&x).unwrap(), b0);
        }

        A.disassemble_storage().unwrap();
        let after: Vec<_> = A.core().triplets().collect();
        assert_eq!(before, after);
    }
}

#[test]
fn test_overwrite_after_disassembly() {
    for format in StorageFormat::ALL {
        let mut A = SparseMatrix::<f64>::new(format, 2, 2).unwrap();
        A.set_coefficient(0, 0, 1.0).unwrap();
        A.set_coefficient(1, 1, 1.0).unwrap();
        A.assemble_storage().unwrap();
        A.disassemble_storage().unwrap();

        // last write wins
        A.set_coefficient(1, 1, 4.0).unwrap();
        assert_eq!(A.nnz(), 2);
        A.assemble_storage().unwrap();
        assert_eq!(A.get_coefficient(1, 1).unwrap(), 4.0);
        assert_eq!(A.matvec(&[1., 1.]).unwrap(), vec![1., 4.]);
    }
}

#[test]
fn test_format_conversion_preserves_coefficients() {
    let mut A = build(StorageFormat::Jds, 7, 5);
    let before: Vec<_> = A.core().triplets().collect();
    let x: Vec<f64> = (0..5).map(|j| j as f64).collect();
    A.assemble_storage().unwrap();
    let b = A.matvec(&x).unwrap();

    for format in StorageFormat::ALL {
        let mut B = A.clone().into_format(format).unwrap();
        let triplets: Vec<_> = B.core().triplets().collect();
        assert_eq!(triplets, before);

        B.assemble_storage().unwrap();
        let bB = B.matvec(&x).unwrap();
        for (u, v) in b.iter().zip(&bB) {
            assert!((u - v).abs() < 1e-12);
        }
    }
}

fn adopt<S>(A: &PackedMatrix<S, f64>) -> PackedMatrix<S, f64>
where
    S: PackedStorage<f64> + Clone,
{
    let storage = A.storage().unwrap().clone();
    PackedMatrix::from_storage(storage, MatrixSettings::default()).unwrap()
}

fn assemble_pattern<S>(m: usize, n: usize) -> PackedMatrix<S, f64>
where
    S: PackedStorage<f64>,
{
    let mut A = PackedMatrix::<S, f64>::new(m, n).unwrap();
    for (i, j, v) in pattern_triplets(m, n) {
        A.set_coefficient(i, j, v).unwrap();
    }
    A.assemble_storage().unwrap();
    A
}

fn check_adopted<S>(m: usize, n: usize)
where
    S: PackedStorage<f64> + Clone,
{
    let mut A = assemble_pattern::<S>(m, n);
    let mut B = adopt(&A);
    assert_eq!(B.state(), MatrixState::Assembled);
    assert_eq!((B.nrows(), B.ncols(), B.nnz()), (m, n, A.nnz()));

    let x: Vec<f64> = (0..n).map(|j| 0.5 * j as f64).collect();
    assert_eq!(A.matvec(&x).unwrap(), B.matvec(&x).unwrap());

    A.disassemble_storage().unwrap();
    B.disassemble_storage().unwrap();
    let a: Vec<_> = A.core().triplets().collect();
    let b: Vec<_> = B.core().triplets().collect();
    assert_eq!(a, b);
}

#[test]
fn test_from_storage() {
    check_adopted::<CooStorage<f64>>(6, 5);
    check_adopted::<CsrStorage<f64>>(6, 5);
    check_adopted::<EllStorage<f64>>(6, 5);
    check_adopted::<JdsStorage<f64>>(6, 5);
    check_adopted::<DenseStorage<f64>>(6, 5);
}

#[test]
fn test_from_storage_rejects_bad_layout() {
    // row 1 appears twice in the permutation
    let S = JdsStorage {
        m: 3,
        n: 3,
        perm: vec![1, 1, 0],
        jdptr: vec![0, 1],
        colval: vec![2],
        nzval: vec![1.0],
    };
    assert_eq!(
        JdsMatrix::from_storage(S, MatrixSettings::default()).unwrap_err(),
        MatrixError::Format(SparseFormatError::BadPermutation)
    );

    let S = CsrStorage {
        m: 0,
        n: 2,
        rowptr: vec![0],
        colval: vec![],
        nzval: vec![],
    };
    assert!(matches!(
        CsrMatrix::<f64>::from_storage(S, MatrixSettings::default()),
        Err(MatrixError::EmptyDimension { .. })
    ));
}
