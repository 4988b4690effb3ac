//! Output helpers.
//!
//! - synthetic panel export with fitted values (CSV) (`export`)
//! - regression result read/write (JSON) (`result_json`)

pub mod export;
pub mod result_json;

pub use export::*;
pub use result_json::*;
