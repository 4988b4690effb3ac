//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the table and regression pipelines
//! - exported to JSON/CSV
//! - handed to the chart renderers without further conversion

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One reporting period of published NPL ratios (percent of gross advances).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NplRecord {
    pub period: String,
    pub islamic_pct: f64,
    pub conventional_pct: f64,
}

impl NplRecord {
    pub fn new(period: impl Into<String>, islamic_pct: f64, conventional_pct: f64) -> Self {
        Self {
            period: period.into(),
            islamic_pct,
            conventional_pct,
        }
    }

    /// Spread of conventional over Islamic NPL, in percentage points.
    ///
    /// Expected to be non-negative for the published rows, but not enforced.
    pub fn advantage_pct(&self) -> f64 {
        self.conventional_pct - self.islamic_pct
    }
}

/// Arithmetic means across a set of [`NplRecord`]s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NplSummary {
    pub mean_islamic_pct: f64,
    pub mean_conventional_pct: f64,
    pub mean_advantage_pct: f64,
}

/// A single synthetic quarterly observation (percentage scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticObservation {
    /// First day of the quarter.
    pub quarter: NaiveDate,
    /// 1 for an Islamic bank, 0 for a conventional bank.
    pub islamic_bank: u8,
    pub inflation_qoq: f64,
    pub npl_ratio: f64,
}

/// The synthetic panel, ordered by quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticPanel {
    pub seed: u64,
    pub observations: Vec<SyntheticObservation>,
}

impl SyntheticPanel {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn islamic_count(&self) -> usize {
        self.observations.iter().filter(|o| o.islamic_bank == 1).count()
    }
}

/// Constants of the synthetic data-generating process.
///
/// `Default` yields the values used for the paper's Table 4.1. The binary never
/// exposes these as flags; tests build other values directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub seed: u64,
    pub n_obs: usize,
    pub start: NaiveDate,
    /// P(islamic_bank = 1).
    pub islamic_prob: f64,
    pub inflation_mean: f64,
    pub inflation_sd: f64,
    /// Parameters of the placeholder NPL draw that is consumed and discarded.
    pub placeholder_mean: f64,
    pub placeholder_sd: f64,
    pub intercept: f64,
    pub islamic_effect: f64,
    pub inflation_effect: f64,
    pub noise_sd: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            n_obs: 24,
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN),
            islamic_prob: 0.3,
            inflation_mean: 0.5,
            inflation_sd: 0.3,
            placeholder_mean: 3.0,
            placeholder_sd: 1.5,
            intercept: 3.0,
            islamic_effect: -1.87,
            inflation_effect: 0.45,
            noise_sd: 0.8,
        }
    }
}

/// A single estimated regression coefficient with classical OLS inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_stat: f64,
    pub p_value: f64,
}

/// Output of the NPL regression, reported on the percentage-point scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub intercept: Coefficient,
    pub islamic_bank: Coefficient,
    pub inflation_qoq: Coefficient,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    /// Residual standard error (percentage points).
    pub residual_se: f64,
    pub df_resid: usize,
    pub observation_count: usize,
    /// Fitted NPL ratio per observation (percentage points).
    pub fitted: Vec<f64>,
    /// Observed minus fitted (percentage points).
    pub residuals: Vec<f64>,
}

/// Which pipelines a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipelines {
    Table,
    Regression,
    All,
}

impl Pipelines {
    pub fn table(self) -> bool {
        matches!(self, Pipelines::Table | Pipelines::All)
    }

    pub fn regression(self) -> bool {
        matches!(self, Pipelines::Regression | Pipelines::All)
    }
}

/// A full run's configuration as understood by the app layer.
///
/// This is derived from CLI flags (plus defaults). It only controls side effects;
/// the analysis constants live in [`GenerationConfig`].
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub pipelines: Pipelines,
    pub plot: bool,
    pub ascii: bool,
    pub ascii_width: usize,
    pub ascii_height: usize,
    pub output_dir: PathBuf,
    /// Figure resolution; the paper uses 300.
    pub dpi: u32,
    pub export_panel: Option<PathBuf>,
    pub export_result: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advantage_is_conventional_minus_islamic() {
        let r = NplRecord::new("Mar 2025", 1.8, 2.2);
        assert!((r.advantage_pct() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn default_generation_matches_paper_constants() {
        let cfg = GenerationConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.n_obs, 24);
        assert_eq!(cfg.start, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(cfg.islamic_effect, -1.87);
        assert_eq!(cfg.inflation_effect, 0.45);
    }

    #[test]
    fn pipelines_select_expected_work() {
        assert!(Pipelines::All.table() && Pipelines::All.regression());
        assert!(Pipelines::Table.table() && !Pipelines::Table.regression());
        assert!(!Pipelines::Regression.table() && Pipelines::Regression.regression());
    }
}
