//! Export the synthetic panel with fitted values and residuals to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{RegressionResult, SyntheticPanel};
use crate::error::AppError;

const HEADER: &str = "quarter,islamic_bank,inflation_qoq,npl_ratio,fitted,residual";

/// Write the panel to a CSV file.
pub fn write_panel_csv(
    path: &Path,
    panel: &SyntheticPanel,
    result: &RegressionResult,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    write_panel_rows(&mut out, panel, result)?;
    out.flush()
        .map_err(|e| AppError::output(format!("Failed to flush export CSV: {e}")))
}

fn write_panel_rows<W: Write>(
    out: &mut W,
    panel: &SyntheticPanel,
    result: &RegressionResult,
) -> Result<(), AppError> {
    if result.fitted.len() != panel.len() || result.residuals.len() != panel.len() {
        return Err(AppError::data("Regression output does not match the panel."));
    }

    writeln!(out, "{HEADER}")
        .map_err(|e| AppError::output(format!("Failed to write export CSV header: {e}")))?;

    for (o, (fit, resid)) in panel
        .observations
        .iter()
        .zip(result.fitted.iter().zip(&result.residuals))
    {
        writeln!(
            out,
            "{},{},{:.10},{:.10},{:.10},{:.10}",
            o.quarter, o.islamic_bank, o.inflation_qoq, o.npl_ratio, fit, resid,
        )
        .map_err(|e| AppError::output(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
