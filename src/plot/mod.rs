//! Chart rendering for the paper figures and the terminal.
//!
//! - PNG figures via Plotters (`figures`)
//! - fixed-grid ASCII plot of the synthetic panel (`ascii`)

pub mod ascii;
pub mod figures;

pub use ascii::*;
pub use figures::*;
