//! Published NPL ratios (RBI Financial Stability Report 2025).

use crate::domain::{NplRecord, NplSummary};
use crate::error::AppError;

/// The two reporting periods used in the paper's comparison table.
pub fn rbi_fsr_2025() -> Vec<NplRecord> {
    vec![
        NplRecord::new("Mar 2025", 1.8, 2.2),
        NplRecord::new("Sep 2025", 1.7, 2.1),
    ]
}

/// Compute the arithmetic means of both NPL series and of the advantage column.
pub fn summarize(records: &[NplRecord]) -> Result<NplSummary, AppError> {
    if records.is_empty() {
        return Err(AppError::data("No NPL records to summarize."));
    }

    Ok(NplSummary {
        mean_islamic_pct: mean(records, |r| r.islamic_pct),
        mean_conventional_pct: mean(records, |r| r.conventional_pct),
        mean_advantage_pct: mean(records, NplRecord::advantage_pct),
    })
}

fn mean(records: &[NplRecord], value: impl Fn(&NplRecord) -> f64) -> f64 {
    records.iter().map(value).sum::<f64>() / records.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_rows_have_four_tenths_advantage() {
        let rows = rbi_fsr_2025();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].period, "Mar 2025");
        assert_eq!(rows[1].period, "Sep 2025");
        for r in &rows {
            assert!((r.advantage_pct() - 0.4).abs() < 1e-9, "{}: {}", r.period, r.advantage_pct());
            assert!(r.advantage_pct() >= 0.0);
        }
    }

    #[test]
    fn summary_means() {
        let s = summarize(&rbi_fsr_2025()).unwrap();
        assert!((s.mean_islamic_pct - 1.75).abs() < 1e-9);
        assert!((s.mean_conventional_pct - 2.15).abs() < 1e-9);
        assert!((s.mean_advantage_pct - 0.4).abs() < 1e-9);
    }

    #[test]
    fn summarize_rejects_empty_input() {
        let err = summarize(&[]).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DATA);
    }
}
