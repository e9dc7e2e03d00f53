use std::error::Error;
use std::fmt;

/// `(rows, columns)` of a matrix.
pub type Shape = (usize, usize);

pub type Result<T> = std::result::Result<T, LinalgError>;

/// Operation that rejected its operands, reported in dimension errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Dot,
    Compare,
    ToVector,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Operation::Add => "addition",
            Operation::Sub => "subtraction",
            Operation::Mul => "multiplication",
            Operation::Div => "division",
            Operation::FloorDiv => "floor division",
            Operation::Dot => "dot product",
            Operation::Compare => "comparison",
            Operation::ToVector => "conversion to vector",
        };
        f.write_str(name)
    }
}

/// Position of an offending element in the caller's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Flat(usize),
    Cell(usize, usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Position::Flat(index) => write!(f, "[{}]", index),
            Position::Cell(row, col) => write!(f, "[{}][{}]", row, col),
        }
    }
}

/// Every failure raised by matrix and vector construction or arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    InvalidElementType {
        position: Position,
        found: &'static str,
    },
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    InvalidShape(String),
    InvalidFillValue {
        found: &'static str,
    },
    MissingConstructionArgument,
    ConflictingConstructionArguments,
    MatrixDimensionMismatch {
        operation: Operation,
        left: Shape,
        right: Shape,
    },
    VectorDimensionMismatch {
        operation: Operation,
        left: usize,
        right: usize,
    },
    DivisionByZero {
        index: usize,
    },
    IncomparableType {
        found: &'static str,
    },
    InvalidArgument(String),
    EmptyVector,
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinalgError::InvalidElementType { position, found } => write!(
                f,
                "All values must be integers or floats, but value{} is {}",
                position, found
            ),
            LinalgError::RaggedMatrix { row, expected, found } => write!(
                f,
                "Matrix sizes are invalid: row {} has {} elements, expected {}",
                row, found, expected
            ),
            LinalgError::InvalidShape(msg) => write!(f, "Invalid matrix shape: {}", msg),
            LinalgError::InvalidFillValue { found } => write!(
                f,
                "The fill value must be an integer or float, but the given fill value is {}",
                found
            ),
            LinalgError::MissingConstructionArgument => {
                write!(f, "A matrix needs either data or both a shape and a fill value")
            }
            LinalgError::ConflictingConstructionArguments => {
                write!(f, "A matrix takes either data or a shape and fill value, not both")
            }
            LinalgError::MatrixDimensionMismatch { operation, left, right } => write!(
                f,
                "Matrices of shape {}x{} and {}x{} are incompatible for {}",
                left.0, left.1, right.0, right.1, operation
            ),
            LinalgError::VectorDimensionMismatch { operation, left, right } => write!(
                f,
                "Vectors of dimension {} and {} are incompatible for {}",
                left, right, operation
            ),
            LinalgError::DivisionByZero { index } => {
                write!(f, "Division by zero at index {}", index)
            }
            LinalgError::IncomparableType { found } => write!(
                f,
                "A vector can only be compared for equality with another vector, got {}",
                found
            ),
            LinalgError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            LinalgError::EmptyVector => write!(f, "A vector needs at least one point"),
            LinalgError::IndexOutOfBounds { index, len } => write!(
                f,
                "Index {} is out of bounds for a vector of dimension {}",
                index, len
            ),
        }
    }
}

impl Error for LinalgError {}
