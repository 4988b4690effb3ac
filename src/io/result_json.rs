//! Write regression result JSON files.
//!
//! The JSON is the "portable" representation of a regression run:
//! - the generating constants (seed, effects, noise)
//! - every coefficient with standard error, t statistic and p-value
//! - fit diagnostics plus per-quarter fitted values and residuals
//!
//! The schema is defined by `ResultFile`.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{GenerationConfig, RegressionResult};
use crate::error::AppError;

/// On-disk regression result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFile {
    pub tool: String,
    pub generation: GenerationConfig,
    pub result: RegressionResult,
}

/// Write a regression result JSON file.
pub fn write_result_json(
    path: &Path,
    generation: &GenerationConfig,
    result: &RegressionResult,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create result JSON '{}': {e}", path.display())))?;

    let doc = ResultFile {
        tool: "npl".to_string(),
        generation: generation.clone(),
        result: result.clone(),
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::output(format!("Failed to write result JSON: {e}")))?;

    Ok(())
}
