use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};
use std::slice::Iter;

use serde::{Deserialize, Serialize};

use crate::config::{MathConfig, RoundingMode, Tolerance};
use crate::error::{LinalgError, Operation, Position, Result};
use crate::math::matrix::Matrix;
use crate::point::Point;
use crate::utils::{is_close, round_to};
use crate::value::Value;

/// Named axes for vectors of up to four dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
    W,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
            Axis::W => 3,
        }
    }
}

/// Ordered, non-empty sequence of `f64` points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Vector {
    points: Vec<f64>,
}

impl Vector {
    /// Wrap `points`; an empty vector is rejected.
    pub fn new(points: Vec<f64>) -> Result<Self> {
        if points.is_empty() {
            return Err(LinalgError::EmptyVector);
        }
        Ok(Self { points })
    }

    pub fn from_slice(points: &[f64]) -> Result<Self> {
        Self::new(points.to_vec())
    }

    /// Caller guarantees `points` is non-empty.
    pub(crate) fn from_vec_unchecked(points: Vec<f64>) -> Self {
        debug_assert!(!points.is_empty());
        Self { points }
    }

    /// Build from loosely typed arguments.
    ///
    /// A single list argument is unpacked and its items become the points;
    /// otherwise every argument is a point. Each point must be an integer or a
    /// float.
    pub fn from_values(values: Vec<Value>) -> Result<Self> {
        let values = match <[Value; 1]>::try_from(values) {
            Ok([Value::List(items)]) => items,
            Ok([single]) => vec![single],
            Err(values) => values,
        };
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_number().ok_or(LinalgError::InvalidElementType {
                    position: Position::Flat(i),
                    found: v.type_name(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        log::trace!("Built vector of dimension {}", points.len());
        Self::new(points)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Self::from_values(vec![value])
    }

    /// Flatten a single-column matrix into a vector of its rows.
    pub fn from_matrix(matrix: &Matrix) -> Result<Self> {
        if matrix.columns() != 1 {
            return Err(LinalgError::MatrixDimensionMismatch {
                operation: Operation::ToVector,
                left: matrix.dims(),
                right: (matrix.rows(), 1),
            });
        }
        Ok(matrix.column(0))
    }

    pub fn from_point(point: &Point) -> Self {
        Self::from_vec_unchecked(vec![point.x, point.y])
    }

    pub fn dimensions(&self) -> usize {
        self.points.len()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.points
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.points.clone()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.points.get(index).copied()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.points.len() {
            return Err(LinalgError::IndexOutOfBounds {
                index,
                len: self.points.len(),
            });
        }
        Ok(())
    }

    /// Overwrite one point, rejecting anything that is not a number.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        self.check_index(index)?;
        let value = value.into();
        self.points[index] = value.as_number().ok_or(LinalgError::InvalidElementType {
            position: Position::Flat(index),
            found: value.type_name(),
        })?;
        Ok(())
    }

    /// Delete one point and return it. The last point cannot be removed.
    pub fn remove(&mut self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        if self.points.len() == 1 {
            return Err(LinalgError::EmptyVector);
        }
        Ok(self.points.remove(index))
    }

    fn axis_index(&self, axis: Axis) -> Option<usize> {
        let index = axis.index();
        (self.points.len() <= 4 && index < self.points.len()).then_some(index)
    }

    /// Value on `axis`, or `None` when the vector has more than four
    /// dimensions or too few to reach that axis.
    pub fn axis(&self, axis: Axis) -> Option<f64> {
        self.axis_index(axis).map(|i| self.points[i])
    }

    pub fn axis_mut(&mut self, axis: Axis) -> Option<&mut f64> {
        let index = self.axis_index(axis)?;
        Some(&mut self.points[index])
    }

    pub fn set_axis(&mut self, axis: Axis, value: f64) -> Result<()> {
        let dims = self.points.len();
        let slot = self.axis_mut(axis).ok_or_else(|| {
            LinalgError::InvalidArgument(format!(
                "axis {:?} is not addressable on a vector of dimension {}",
                axis, dims
            ))
        })?;
        *slot = value;
        Ok(())
    }

    pub fn x(&self) -> Option<f64> {
        self.axis(Axis::X)
    }

    pub fn y(&self) -> Option<f64> {
        self.axis(Axis::Y)
    }

    pub fn z(&self) -> Option<f64> {
        self.axis(Axis::Z)
    }

    pub fn w(&self) -> Option<f64> {
        self.axis(Axis::W)
    }

    fn check_dimensions(&self, other: &Vector, operation: Operation) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(LinalgError::VectorDimensionMismatch {
                operation,
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        Ok(())
    }

    fn zip_with<F>(&self, other: &Vector, operation: Operation, f: F) -> Result<Vector>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_dimensions(other, operation)?;
        Ok(Vector::from_vec_unchecked(
            self.iter().zip(other.iter()).map(|(&a, &b)| f(a, b)).collect(),
        ))
    }

    fn check_divisor(&self, other: &Vector, operation: Operation) -> Result<()> {
        self.check_dimensions(other, operation)?;
        match other.iter().position(|&v| v == 0.0) {
            Some(index) => Err(LinalgError::DivisionByZero { index }),
            None => Ok(()),
        }
    }

    pub fn checked_add(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, Operation::Add, |a, b| a + b)
    }

    pub fn checked_sub(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, Operation::Sub, |a, b| a - b)
    }

    /// Elementwise (Hadamard) product. See [`Vector::dot`] for the scalar product.
    pub fn checked_mul(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, Operation::Mul, |a, b| a * b)
    }

    pub fn checked_div(&self, other: &Vector) -> Result<Vector> {
        self.check_divisor(other, Operation::Div)?;
        self.zip_with(other, Operation::Div, |a, b| a / b)
    }

    /// Elementwise quotient rounded towards negative infinity.
    pub fn floor_div(&self, other: &Vector) -> Result<Vector> {
        self.check_divisor(other, Operation::FloorDiv)?;
        self.zip_with(other, Operation::FloorDiv, |a, b| (a / b).floor())
    }

    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_dimensions(other, Operation::Dot)?;
        Ok(dot_scalar_f64(self.as_slice(), other.as_slice()))
    }

    /// Elementwise absolute value.
    pub fn abs(&self) -> Vector {
        Vector::from_vec_unchecked(self.iter().map(|v| v.abs()).collect())
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        dot_scalar_f64(self.as_slice(), self.as_slice()).sqrt()
    }

    pub fn parallel_to(&self, other: &Vector) -> Result<bool> {
        self.parallel_to_with(other, &Tolerance::default())
    }

    /// `|a . b|` equals `|a| * |b|` within `tol`.
    pub fn parallel_to_with(&self, other: &Vector, tol: &Tolerance) -> Result<bool> {
        let dot = self.dot(other)?;
        Ok(is_close(dot.abs(), self.magnitude() * other.magnitude(), tol))
    }

    pub fn orthogonal_to(&self, other: &Vector) -> Result<bool> {
        self.orthogonal_to_with(other, &Tolerance::default())
    }

    pub fn orthogonal_to_with(&self, other: &Vector, tol: &Tolerance) -> Result<bool> {
        let dot = self.dot(other)?;
        Ok(is_close(dot, 0.0, tol))
    }

    fn raw_mean(&self) -> f64 {
        self.iter().sum::<f64>() / self.points.len() as f64
    }

    /// Arithmetic mean rounded to two decimals, ties away from zero.
    pub fn mean(&self) -> f64 {
        let config = MathConfig::default();
        let raw = self.raw_mean();
        round_to(raw, config.mean_decimals, config.rounding).unwrap_or(raw)
    }

    /// Arithmetic mean rounded to `decimals`; negative `decimals` is an error.
    pub fn mean_with(&self, decimals: i32, rounding: RoundingMode) -> Result<f64> {
        round_to(self.raw_mean(), decimals, rounding)
    }

    pub fn mean_with_config(&self, config: &MathConfig) -> Result<f64> {
        self.mean_with(config.mean_decimals, config.rounding)
    }

    /// Compare against loosely typed input. Only a list can equal a vector;
    /// any other kind of value is not comparable.
    pub fn equals_value(&self, value: &Value) -> Result<bool> {
        if !value.is_list() {
            return Err(LinalgError::IncomparableType {
                found: value.type_name(),
            });
        }
        let other = Vector::from_value(value.clone())?;
        Ok(*self == other)
    }
}

fn dot_scalar_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.points[index]
    }
}

impl<'a, 'b> Add<&'b Vector> for &'a Vector {
    type Output = Result<Vector>;

    fn add(self, rhs: &'b Vector) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl<'a, 'b> Sub<&'b Vector> for &'a Vector {
    type Output = Result<Vector>;

    fn sub(self, rhs: &'b Vector) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl<'a, 'b> Mul<&'b Vector> for &'a Vector {
    type Output = Result<Vector>;

    fn mul(self, rhs: &'b Vector) -> Self::Output {
        self.checked_mul(rhs)
    }
}

impl<'a, 'b> Div<&'b Vector> for &'a Vector {
    type Output = Result<Vector>;

    fn div(self, rhs: &'b Vector) -> Self::Output {
        self.checked_div(rhs)
    }
}

impl TryFrom<Vec<f64>> for Vector {
    type Error = LinalgError;

    fn try_from(value: Vec<f64>) -> Result<Self> {
        Vector::new(value)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.points
    }
}

impl From<Point> for Vector {
    fn from(value: Point) -> Self {
        Vector::from_point(&value)
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector([")?;
        for (idx, value) in self.points.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.points.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "])")
    }
}
