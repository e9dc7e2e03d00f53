use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{LinalgError, Operation, Position, Result, Shape};
use crate::math::vector::Vector;
use crate::value::Value;

/// Dense row-major matrix of `f64` with at least one row and one column.
///
/// The shape is fixed at construction. Cells may be written in place through
/// `IndexMut`, but every arithmetic operation returns a new matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Number of cells in `shape`; both dimensions must be positive and their
/// product must fit in `usize`.
fn check_shape(shape: Shape) -> Result<usize> {
    let (rows, cols) = shape;
    if rows == 0 || cols == 0 {
        return Err(LinalgError::InvalidShape(format!(
            "({}, {}) has a zero dimension; rows and columns must be positive",
            rows, cols
        )));
    }
    rows.checked_mul(cols).ok_or_else(|| {
        LinalgError::InvalidShape(format!(
            "({}, {}) has more cells than can be addressed",
            rows, cols
        ))
    })
}

fn number_at(value: &Value, position: Position) -> Result<f64> {
    value.as_number().ok_or(LinalgError::InvalidElementType {
        position,
        found: value.type_name(),
    })
}

impl Matrix {
    pub fn from_shape_vec(shape: Shape, data: Vec<f64>) -> Result<Self> {
        let len = check_shape(shape)?;
        let (rows, cols) = shape;
        if data.len() != len {
            return Err(LinalgError::InvalidShape(format!(
                "({}, {}) does not fit a buffer of length {}",
                rows,
                cols,
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// A 1x1 matrix holding `value`.
    pub fn from_scalar(value: f64) -> Self {
        Self {
            data: vec![value],
            rows: 1,
            cols: 1,
        }
    }

    /// A single-row matrix, 1xN for `N = values.len()`.
    pub fn from_flat(values: Vec<f64>) -> Result<Self> {
        let cols = values.len();
        Self::from_shape_vec((1, cols), values)
    }

    /// Build from nested rows; every row must be as long as the first.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let len = check_shape((rows.len(), cols))?;

        let n_rows = rows.len();
        let mut data = Vec::with_capacity(len);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(LinalgError::RaggedMatrix {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            data.extend(values);
        }
        log::trace!("Built {}x{} matrix from nested rows", n_rows, cols);
        Ok(Self {
            data,
            rows: n_rows,
            cols,
        })
    }

    /// A `shape` matrix with `fill` written into every cell.
    pub fn filled(shape: Shape, fill: f64) -> Result<Self> {
        let len = check_shape(shape)?;
        let (rows, cols) = shape;
        Ok(Self {
            data: vec![fill; len],
            rows,
            cols,
        })
    }

    pub fn zeros(shape: Shape) -> Result<Self> {
        Self::filled(shape, 0.0)
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::zeros((n, n))?;
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        Ok(m)
    }

    /// Validate loosely typed input and pick the shape from its nesting.
    ///
    /// A number becomes 1x1, a flat list 1xN, and a list of lists one row per
    /// inner list. Anything that is not an integer or a float is rejected with
    /// its position, including booleans and lists nested deeper than two levels.
    pub fn from_value(value: Value) -> Result<Self> {
        let items = match value {
            Value::List(items) => items,
            scalar => return Ok(Self::from_scalar(number_at(&scalar, Position::Cell(0, 0))?)),
        };

        if !items.first().map_or(false, Value::is_list) {
            let data = items
                .iter()
                .enumerate()
                .map(|(i, v)| number_at(v, Position::Flat(i)))
                .collect::<Result<Vec<f64>>>()?;
            log::trace!("Promoting flat sequence of {} values to a row matrix", data.len());
            return Self::from_flat(data);
        }

        let cols = items[0].as_list().map_or(0, <[Value]>::len);
        let len = check_shape((items.len(), cols))?;
        let mut data = Vec::with_capacity(len);
        for (row, item) in items.iter().enumerate() {
            // A scalar in place of a row is a row of the wrong shape.
            let values = item.as_list().ok_or(LinalgError::RaggedMatrix {
                row,
                expected: cols,
                found: 0,
            })?;
            if values.len() != cols {
                return Err(LinalgError::RaggedMatrix {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            for (col, v) in values.iter().enumerate() {
                data.push(number_at(v, Position::Cell(row, col))?);
            }
        }
        Self::from_shape_vec((items.len(), cols), data)
    }

    /// Validate a loosely typed `(rows, columns)` pair and fill value.
    pub fn from_shape_value(shape: &Value, fill: &Value) -> Result<Self> {
        let positive = |v: &i64| usize::try_from(*v).ok().filter(|&n| n > 0);
        let dims = match shape.as_list() {
            Some([Value::Int(rows), Value::Int(cols)]) => positive(rows).zip(positive(cols)),
            _ => None,
        };
        let dims = match dims {
            Some(dims) => dims,
            None => {
                return Err(LinalgError::InvalidShape(format!(
                    "expected exactly two positive integers, got {:?}",
                    shape
                )))
            }
        };
        let fill = fill.as_number().ok_or(LinalgError::InvalidFillValue {
            found: fill.type_name(),
        })?;
        Self::filled(dims, fill)
    }

    pub fn builder() -> MatrixBuilder {
        MatrixBuilder::default()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.cols
    }

    pub fn dims(&self) -> Shape {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[self.offset(row, col)])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn column(&self, col: usize) -> Vector {
        assert!(col < self.cols, "column index out of bounds");
        let values = (0..self.rows).map(|row| self[(row, col)]).collect();
        Vector::from_vec_unchecked(values)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.cols)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// `columns x rows` matrix with cell (i, j) taken from (j, i).
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self[(row, col)]);
            }
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Matrix product; requires `self.columns() == other.rows()`.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(LinalgError::MatrixDimensionMismatch {
                operation: Operation::Mul,
                left: self.dims(),
                right: other.dims(),
            });
        }
        log::debug!(
            "Multiplying {}x{} by {}x{} ({} multiply-adds)",
            self.rows,
            self.cols,
            other.rows,
            other.cols,
            self.rows * self.cols * other.cols
        );

        let mut data = vec![0.0; self.rows * other.cols];

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            data.par_chunks_mut(other.cols)
                .enumerate()
                .for_each(|(i, out)| multiply_row(self.row(i), other, out));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for (i, out) in data.chunks_mut(other.cols).enumerate() {
                multiply_row(self.row(i), other, out);
            }
        }

        Ok(Matrix {
            data,
            rows: self.rows,
            cols: other.cols,
        })
    }

    pub fn checked_add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, Operation::Add, |a, b| a + b)
    }

    pub fn checked_sub(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, Operation::Sub, |a, b| a - b)
    }

    fn zip_with<F>(&self, other: &Matrix, operation: Operation, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.dims() != other.dims() {
            return Err(LinalgError::MatrixDimensionMismatch {
                operation,
                left: self.dims(),
                right: other.dims(),
            });
        }
        Ok(Matrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            rows: self.rows,
            cols: self.cols,
        })
    }
}

/// Accumulate one output row: out[j] = sum_k lhs_row[k] * rhs[k][j].
fn multiply_row(lhs_row: &[f64], rhs: &Matrix, out: &mut [f64]) {
    for (k, &a) in lhs_row.iter().enumerate() {
        for (acc, &b) in out.iter_mut().zip(rhs.row(k)) {
            *acc += a * b;
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "matrix index out of bounds"
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl<'a, 'b> Add<&'b Matrix> for &'a Matrix {
    type Output = Result<Matrix>;

    fn add(self, rhs: &'b Matrix) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl<'a, 'b> Sub<&'b Matrix> for &'a Matrix {
    type Output = Result<Matrix>;

    fn sub(self, rhs: &'b Matrix) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl<'a, 'b> Mul<&'b Matrix> for &'a Matrix {
    type Output = Result<Matrix>;

    fn mul(self, rhs: &'b Matrix) -> Self::Output {
        self.matmul(rhs)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = LinalgError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Matrix::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(value: Matrix) -> Self {
        value.to_rows()
    }
}

#[cfg(feature = "ndarray")]
impl From<&Matrix> for ndarray::Array2<f64> {
    fn from(value: &Matrix) -> Self {
        ndarray::Array2::from_shape_fn(value.dims(), |(row, col)| value[(row, col)])
    }
}

#[cfg(feature = "ndarray")]
impl TryFrom<&ndarray::Array2<f64>> for Matrix {
    type Error = LinalgError;

    fn try_from(value: &ndarray::Array2<f64>) -> Result<Self> {
        Matrix::from_shape_vec(value.dim(), value.iter().copied().collect())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix([")?;
        for (row, values) in self.iter_rows().enumerate() {
            write!(f, "[")?;
            for (col, value) in values.iter().enumerate() {
                write!(f, "{}", value)?;
                if col + 1 != self.cols {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
            if row + 1 != self.rows {
                write!(f, ", ")?;
            }
        }
        write!(f, "])")
    }
}

/// Loosely typed matrix construction: either `data`, or `shape` with `fill`.
#[derive(Debug, Clone, Default)]
pub struct MatrixBuilder {
    data: Option<Value>,
    shape: Option<Value>,
    fill: Option<Value>,
}

impl MatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn shape(mut self, shape: impl Into<Value>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    pub fn fill(mut self, fill: impl Into<Value>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn build(self) -> Result<Matrix> {
        match (self.data, self.shape, self.fill) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                Err(LinalgError::ConflictingConstructionArguments)
            }
            (Some(data), None, None) => Matrix::from_value(data),
            (None, Some(shape), Some(fill)) => Matrix::from_shape_value(&shape, &fill),
            _ => Err(LinalgError::MissingConstructionArgument),
        }
    }
}
