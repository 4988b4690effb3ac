//! Ordinary least squares with classical inference.
//!
//! We solve
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! and report, for every column of the design matrix, the standard error, the
//! t statistic and a two-sided p-value from the Student-t distribution with
//! `n - k` degrees of freedom.
//!
//! Implementation choices:
//! - β comes from an SVD solve (robust for tall design matrices).
//! - A rank check on the same SVD rejects singular designs up front; those must
//!   surface as errors rather than as a silently regularized fit.
//! - The covariance is `σ² (XᵀX)⁻¹`, which is what standard OLS packages report.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::math::stats::two_sided_t_p_value;

/// Relative singular-value tolerance for the rank check.
const RANK_TOL: f64 = 1e-10;

/// Result of an OLS fit (one entry per design column).
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub beta: Vec<f64>,
    pub std_errors: Vec<f64>,
    pub t_stats: Vec<f64>,
    pub p_values: Vec<f64>,
    pub fitted: Vec<f64>,
    pub residuals: Vec<f64>,
    pub sse: f64,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub df_resid: usize,
}

impl OlsFit {
    /// Residual standard error `sqrt(SSE / (n - k))`.
    pub fn residual_se(&self) -> f64 {
        (self.sse / self.df_resid as f64).sqrt()
    }
}

/// Fit `y ~ X` by OLS. `x` must already contain an intercept column if one is wanted.
///
/// `R²` is computed against the mean of `y`, so it lies in `[0, 1]` whenever the
/// design contains an intercept.
pub fn fit_ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<OlsFit, AppError> {
    let (n, k) = x.shape();
    if n != y.len() {
        return Err(AppError::data(format!(
            "Design has {n} rows but response has {} values.",
            y.len()
        )));
    }
    if n <= k {
        return Err(AppError::data(format!(
            "Need more observations than parameters (n={n}, k={k})."
        )));
    }

    let svd = x.clone().svd(true, true);
    let max_sv = svd.singular_values.max();
    let rank = svd.rank(RANK_TOL * max_sv.max(f64::MIN_POSITIVE));
    if rank < k {
        return Err(AppError::numeric(format!(
            "Singular design matrix (rank {rank} < {k} columns); cannot fit OLS."
        )));
    }

    let beta = svd
        .solve(y, RANK_TOL)
        .map_err(|e| AppError::numeric(format!("OLS solve failed: {e}")))?;
    if !beta.iter().all(|v| v.is_finite()) {
        return Err(AppError::numeric("OLS produced non-finite coefficients."));
    }

    let fitted = x * &beta;
    let residuals = y - &fitted;
    let sse = residuals.norm_squared();
    let y_mean = y.mean();
    let sst: f64 = y.iter().map(|v| (v - y_mean).powi(2)).sum();

    let df_resid = n - k;
    let r_squared = if sst > 0.0 { (1.0 - sse / sst).clamp(0.0, 1.0) } else { 1.0 };
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (n as f64 - 1.0) / df_resid as f64;

    let xtx_inv = (x.transpose() * x)
        .try_inverse()
        .ok_or_else(|| AppError::numeric("XᵀX is not invertible; cannot compute standard errors."))?;
    let sigma2 = sse / df_resid as f64;

    let mut std_errors = Vec::with_capacity(k);
    let mut t_stats = Vec::with_capacity(k);
    let mut p_values = Vec::with_capacity(k);
    for j in 0..k {
        let se = (sigma2 * xtx_inv[(j, j)]).max(0.0).sqrt();
        let t = beta[j] / se;
        std_errors.push(se);
        t_stats.push(t);
        p_values.push(two_sided_t_p_value(t, df_resid as f64)?);
    }

    Ok(OlsFit {
        beta: beta.iter().copied().collect(),
        std_errors,
        t_stats,
        p_values,
        fitted: fitted.iter().copied().collect(),
        residuals: residuals.iter().copied().collect(),
        sse,
        r_squared,
        adj_r_squared,
        df_resid,
    })
}
