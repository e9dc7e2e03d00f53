//! Matrix and vector value types.
//!
//! `Matrix` (2D, row-major) and `Vector` (1D) both validate their input on
//! construction and keep it in `f64` storage. Integers are converted at the
//! boundary, so integer values above 2^53 lose exactness. Arithmetic checks
//! only that the operands' shapes are compatible and returns a new value.
pub mod matrix;
pub mod vector;

pub use matrix::{Matrix, MatrixBuilder};
pub use vector::{Axis, Vector};
