//! `npl-analysis` library crate.
//!
//! The binary (`npl`) is a thin wrapper around this library so that:
//!
//! - both pipelines are testable without spawning processes
//! - the statistics stay separate from printing and figure rendering
//! - the seeded generator is passed explicitly rather than held globally

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
