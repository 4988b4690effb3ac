//! Regression fitting for the synthetic NPL panel.
//!
//! Responsibilities:
//!
//! - build the design matrix (intercept, Islamic-bank indicator, inflation)
//! - apply the percent -> fraction response rescaling and undo it in the report
//! - package OLS output as a `RegressionResult`

pub mod regression;

pub use regression::*;
