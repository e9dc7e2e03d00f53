//! hypemaths: validated matrix and vector value types.
//!
//! The crate provides a dense `Matrix` and a `Vector` with dimension-checked
//! arithmetic (elementwise add/sub, matrix product, transpose, dot product,
//! norm, parallel/orthogonal predicates), a loosely typed `Value` input for
//! callers whose data is not statically typed (parsed JSON, mixed literals),
//! and a small `MathConfig` for the tolerance and rounding knobs.
//!
//! Every fallible operation returns [`error::Result`]. Only out-of-range
//! positional access (`Index`, `Matrix::row`, `Matrix::column`) panics, the
//! same way slice indexing does; `get` is the non-panicking form.
pub mod config;
pub mod error;
pub mod math;
pub mod point;
pub mod utils;
pub mod value;

pub use config::{MathConfig, RoundingMode, Tolerance};
pub use error::{LinalgError, Operation, Position, Result, Shape};
pub use math::{Axis, Matrix, MatrixBuilder, Vector};
pub use point::Point;
pub use value::Value;
