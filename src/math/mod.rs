//! Mathematical utilities: least squares and sampling distributions.

pub mod ols;
pub mod stats;

pub use ols::*;
pub use stats::*;
