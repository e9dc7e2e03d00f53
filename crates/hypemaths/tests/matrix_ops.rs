//! Integration tests for Matrix arithmetic, transpose and queries.

use hypemaths::{LinalgError, Matrix, Operation};

fn m(rows: Vec<Vec<f64>>) -> Matrix {
    Matrix::from_rows(rows).unwrap()
}

// ---------------------------------------------------------------------------
// Multiplication
// ---------------------------------------------------------------------------

#[test]
fn multiplication_examples() {
    let cases = vec![
        (Matrix::from_scalar(1.0), Matrix::from_scalar(2.0), Matrix::from_scalar(2.0)),
        (
            Matrix::from_flat(vec![1.0, 2.0]).unwrap(),
            m(vec![vec![3.0], vec![4.0]]),
            Matrix::from_scalar(11.0),
        ),
        (
            m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]),
            m(vec![vec![5.0, 6.0, 7.0], vec![8.0, 9.0, 10.0]]),
            m(vec![vec![21.0, 24.0, 27.0], vec![47.0, 54.0, 61.0]]),
        ),
    ];

    for (a, b, expected) in cases {
        assert_eq!((&a * &b).unwrap(), expected);
    }
}

#[test]
fn multiplication_dimension_mismatch() {
    let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    let b = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let err = (&a * &b).unwrap_err();
    assert_eq!(
        err,
        LinalgError::MatrixDimensionMismatch {
            operation: Operation::Mul,
            left: (2, 3),
            right: (2, 2),
        }
    );
    assert!(err.to_string().contains("2x3"));
}

#[test]
fn multiplication_by_identity_is_noop() {
    let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    let id = Matrix::identity(3).unwrap();
    assert_eq!(a.matmul(&id).unwrap(), a);
}

#[test]
fn multiplication_does_not_mutate_operands() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = a.clone();
    let _ = (&a * &b).unwrap();
    assert_eq!(a, b);
    assert_eq!(a[(1, 1)], 4.0);
}

// ---------------------------------------------------------------------------
// Elementwise add / sub
// ---------------------------------------------------------------------------

#[test]
fn add_and_sub_are_elementwise() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = m(vec![vec![10.0, 20.0], vec![30.0, 40.0]]);
    assert_eq!(
        (&a + &b).unwrap(),
        m(vec![vec![11.0, 22.0], vec![33.0, 44.0]])
    );
    assert_eq!(
        (&b - &a).unwrap(),
        m(vec![vec![9.0, 18.0], vec![27.0, 36.0]])
    );
}

#[test]
fn add_requires_identical_dims() {
    let a = m(vec![vec![1.0, 2.0]]);
    let b = m(vec![vec![1.0], vec![2.0]]);
    let err = a.checked_add(&b).unwrap_err();
    assert!(matches!(
        err,
        LinalgError::MatrixDimensionMismatch {
            operation: Operation::Add,
            ..
        }
    ));
    assert!(a.checked_sub(&b).is_err());
}

// ---------------------------------------------------------------------------
// Transpose
// ---------------------------------------------------------------------------

#[test]
fn transpose_examples() {
    let cases = vec![
        (Matrix::from_scalar(1.0), Matrix::from_scalar(1.0)),
        (
            Matrix::from_flat(vec![1.0, 2.0, 3.0, 4.0]).unwrap(),
            m(vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]]),
        ),
        (
            m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]),
            m(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]),
        ),
    ];
    for (matrix, expected) in cases {
        assert_eq!(matrix.transpose(), expected);
        assert_eq!(expected.transpose(), matrix);
    }
}

#[test]
fn transpose_round_trip() {
    let a = m(vec![vec![1.0, -2.0], vec![3.5, 4.0], vec![0.0, 9.0]]);
    assert_eq!(a.transpose().transpose(), a);
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn get_is_bounds_checked() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_eq!(a.get(1, 0), Some(3.0));
    assert_eq!(a.get(2, 0), None);
    assert_eq!(a.get(0, 2), None);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn index_past_last_column_panics() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let _value: f64 = a[(0, 2)];
}

#[test]
fn column_and_mapv() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
    assert_eq!(a.column(1).to_vec(), vec![2.0, 4.0, 6.0]);
    let neg = a.mapv(|x| -x);
    assert_eq!(neg[(2, 1)], -6.0);
    assert_eq!(a.iter_rows().count(), 3);
}

#[test]
fn display_uses_nested_brackets() {
    let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_eq!(format!("{}", a), "Matrix([[1, 2], [3, 4]])");
}
