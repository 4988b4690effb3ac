//! Domain types used throughout the pipelines.
//!
//! This module defines:
//!
//! - published NPL rows and their summary (`NplRecord`, `NplSummary`)
//! - the synthetic panel and its generating constants (`SyntheticPanel`, `GenerationConfig`)
//! - regression outputs (`RegressionResult`, `Coefficient`)
//! - run-level settings (`RunConfig`, `Pipelines`)

pub mod types;

pub use types::*;
