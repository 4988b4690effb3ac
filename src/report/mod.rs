//! Reporting: paper-ready text tables for both pipelines.

pub mod format;

pub use format::*;
