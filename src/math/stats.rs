//! Sampling-distribution helpers for regression inference.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::AppError;

/// Two-sided p-value of a t statistic with `df` degrees of freedom.
///
/// An infinite statistic (exact fit with a non-zero coefficient) maps to `0.0`;
/// `NaN` (exact fit with a zero coefficient) is passed through.
pub fn two_sided_t_p_value(t: f64, df: f64) -> Result<f64, AppError> {
    if t.is_nan() {
        return Ok(f64::NAN);
    }
    if t.is_infinite() {
        return Ok(0.0);
    }
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| AppError::numeric(format!("Student-t distribution error (df={df}): {e}")))?;
    Ok((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}
