//! Shared pipeline logic used by the CLI front-end (and tests).
//!
//! Keeping this in one place separates the computations from presentation:
//! - table: literal records -> advantage column -> summary means
//! - regression: seeded panel -> rescaled OLS fit -> percentage-point report
//!
//! The app layer can then focus on printing, figures and exports.

use crate::data::{generate_panel, rbi_fsr_2025, summarize};
use crate::domain::{GenerationConfig, NplRecord, NplSummary, RegressionResult, SyntheticPanel};
use crate::error::AppError;
use crate::fit::fit_npl_regression;

/// All computed outputs of the fixed-table pipeline.
#[derive(Debug, Clone)]
pub struct TableOutput {
    pub records: Vec<NplRecord>,
    pub summary: NplSummary,
}

/// All computed outputs of the synthetic-regression pipeline.
#[derive(Debug, Clone)]
pub struct RegressionOutput {
    pub generation: GenerationConfig,
    pub panel: SyntheticPanel,
    pub result: RegressionResult,
}

/// Execute the fixed-table pipeline.
pub fn run_table() -> Result<TableOutput, AppError> {
    let records = rbi_fsr_2025();
    let summary = summarize(&records)?;
    tracing::info!(
        rows = records.len(),
        mean_advantage_pct = summary.mean_advantage_pct,
        "summarized published NPL ratios"
    );
    Ok(TableOutput { records, summary })
}

/// Execute the synthetic-regression pipeline with the paper's constants.
pub fn run_regression() -> Result<RegressionOutput, AppError> {
    run_regression_with(GenerationConfig::default())
}

/// Execute the synthetic-regression pipeline with explicit generating constants.
pub fn run_regression_with(generation: GenerationConfig) -> Result<RegressionOutput, AppError> {
    let panel = generate_panel(&generation)?;
    tracing::info!(
        seed = panel.seed,
        n_obs = panel.len(),
        islamic = panel.islamic_count(),
        "generated synthetic panel"
    );

    let result = fit_npl_regression(&panel)?;
    tracing::info!(
        islamic_coef = result.islamic_bank.estimate,
        islamic_p = result.islamic_bank.p_value,
        r_squared = result.r_squared,
        "fitted NPL regression"
    );

    Ok(RegressionOutput {
        generation,
        panel,
        result,
    })
}
