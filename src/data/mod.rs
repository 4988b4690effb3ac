//! Input data for both pipelines.
//!
//! - the published RBI NPL rows (`fixed`)
//! - the seeded synthetic quarterly panel (`synthetic`)

pub mod fixed;
pub mod synthetic;

pub use fixed::*;
pub use synthetic::*;
