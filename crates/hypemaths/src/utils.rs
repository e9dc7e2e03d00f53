//! Scalar helpers shared by the matrix and vector types.

use crate::config::{RoundingMode, Tolerance};
use crate::error::{LinalgError, Result};

/// Largest number of decimals that still changes an `f64` when rounding.
const MAX_DECIMALS: i32 = 15;

/// 2^52: every `f64` at or above this magnitude is an integer.
const F64_INTEGRAL_BOUND: f64 = 4_503_599_627_370_496.0;

/// Whether `a` and `b` are equal up to `tol`.
///
/// The relative part scales with the larger magnitude of the two operands, the
/// absolute part is the floor used when both are near zero.
pub fn is_close(a: f64, b: f64, tol: &Tolerance) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let diff = (a - b).abs();
    diff <= (tol.relative * a.abs().max(b.abs())).max(tol.absolute)
}

/// Round `value` to `decimals` places using `mode` to break ties.
pub fn round_to(value: f64, decimals: i32, mode: RoundingMode) -> Result<f64> {
    if decimals < 0 {
        return Err(LinalgError::InvalidArgument(format!(
            "decimals must be a non-negative integer, got {}",
            decimals
        )));
    }
    if decimals > MAX_DECIMALS {
        log::warn!(
            "Rounding to {} decimals exceeds f64 precision; returning the value unrounded",
            decimals
        );
        return Ok(value);
    }

    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    // Above 2^52 an f64 has no fractional part left to round.
    if !scaled.is_finite() || scaled.abs() >= F64_INTEGRAL_BOUND {
        return Ok(value);
    }
    let rounded = match mode {
        RoundingMode::HalfAwayFromZero => scaled.round(),
        RoundingMode::HalfEven => {
            if (scaled - scaled.trunc()).abs() == 0.5 {
                2.0 * (scaled / 2.0).round()
            } else {
                scaled.round()
            }
        }
    };
    Ok(rounded / factor)
}

/// `count` evenly spaced values from `start` to `end`, both ends included.
pub fn linspace(start: f64, end: f64, count: usize) -> Result<Vec<f64>> {
    if count < 2 {
        return Err(LinalgError::InvalidArgument(format!(
            "linspace needs at least 2 points, got {}",
            count
        )));
    }
    let step = (end - start) / (count - 1) as f64;
    Ok((0..count).map(|i| start + step * i as f64).collect())
}
