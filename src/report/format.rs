//! Formatted terminal output for both pipelines.
//!
//! We keep formatting code in one place so:
//! - the data/fitting code stays clean and testable
//! - output changes are localized (the tables are pasted into the paper as-is)

use crate::domain::{Coefficient, NplRecord, NplSummary, RegressionResult};

const RULE_WIDTH: usize = 58;

/// Format the published NPL table (one decimal, right-aligned columns).
pub fn format_npl_table(records: &[NplRecord]) -> String {
    let mut out = String::new();

    out.push_str("India NPL Ratios (RBI FSR 2025):\n");
    out.push_str(&format!(
        "{:>10} {:>16} {:>21} {:>22}\n",
        "Period", "Islamic_NPL_pct", "Conventional_NPL_pct", "Islamic_Advantage_pct"
    ));
    for r in records {
        out.push_str(&format!(
            "{:>10} {:>16.1} {:>21.1} {:>22.1}\n",
            truncate(&r.period, 10),
            r.islamic_pct,
            r.conventional_pct,
            r.advantage_pct()
        ));
    }

    out
}

/// Format the mean statistics printed under the NPL table.
pub fn format_key_stats(summary: &NplSummary) -> String {
    let mut out = String::new();
    out.push_str("Key Stats:\n");
    out.push_str(&format!("- Average Islamic NPL: {:.1}%\n", summary.mean_islamic_pct));
    out.push_str(&format!("- Average Conv NPL: {:.1}%\n", summary.mean_conventional_pct));
    out.push_str(&format!(
        "- Consistent Advantage: {:.1} percentage points\n",
        summary.mean_advantage_pct
    ));
    out
}

/// Format Table 4.1 (coefficients in percentage points, p-values, R², n).
pub fn format_regression_table(result: &RegressionResult) -> String {
    let mut out = String::new();
    let rule = "-".repeat(RULE_WIDTH);

    out.push_str("Table 4.1: OLS Regression (RBI Quarterly Data 2020-26)\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("{:<16} | {:>12} | {:>8}\n", "Variable", "Coefficient", "p-value"));
    out.push_str(&format!("{:-<16}-+-{:-<12}-+-{:-<8}\n", "", "", ""));
    out.push_str(&coef_row(&result.islamic_bank));
    out.push_str(&coef_row(&result.inflation_qoq));
    out.push_str(&format!("{:<16} | {:>12.3} |\n", "R²", result.r_squared));
    out.push_str(&format!("{:<16} | {:>12} |\n", "Observations", result.observation_count));
    out.push_str(&rule);
    out.push('\n');

    out
}

/// Supplementary fit diagnostics printed beneath Table 4.1.
pub fn format_regression_details(result: &RegressionResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Intercept: {:.3} (se {:.3}, p={:.3})\n",
        result.intercept.estimate, result.intercept.std_error, result.intercept.p_value
    ));
    out.push_str(&format!(
        "Adj. R²: {:.3} | Residual SE: {:.3}pp | df={}\n",
        result.adj_r_squared, result.residual_se, result.df_resid
    ));
    out
}

fn coef_row(c: &Coefficient) -> String {
    format!(
        "{:<16} | {:>11.2}% | {:>8.3}\n",
        truncate(&c.name, 16),
        c.estimate,
        c.p_value
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{rbi_fsr_2025, summarize};

    fn coef(name: &str, estimate: f64, p_value: f64) -> Coefficient {
        Coefficient {
            name: name.to_string(),
            estimate,
            std_error: 0.1,
            t_stat: estimate / 0.1,
            p_value,
        }
    }

    #[test]
    fn npl_table_rounds_to_one_decimal() {
        let txt = format_npl_table(&rbi_fsr_2025());
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 4);
        let row: Vec<&str> = lines[2].split_whitespace().collect();
        assert_eq!(row, vec!["Mar", "2025", "1.8", "2.2", "0.4"]);
        let row: Vec<&str> = lines[3].split_whitespace().collect();
        assert_eq!(row, vec!["Sep", "2025", "1.7", "2.1", "0.4"]);
    }

    #[test]
    fn key_stats_lines() {
        let s = summarize(&rbi_fsr_2025()).unwrap();
        let txt = format_key_stats(&s);
        assert!(txt.contains("Average Islamic NPL: 1.8%"), "{txt}");
        assert!(txt.contains("Consistent Advantage: 0.4 percentage points"), "{txt}");
    }

    #[test]
    fn regression_table_layout() {
        let result = RegressionResult {
            intercept: coef("Intercept", 3.01, 0.0),
            islamic_bank: coef("Islamic_Bank", -1.8712, 0.00012),
            inflation_qoq: coef("Inflation_QoQ", 0.4449, 0.4),
            r_squared: 0.6543,
            adj_r_squared: 0.62,
            residual_se: 0.8,
            df_resid: 21,
            observation_count: 24,
            fitted: vec![],
            residuals: vec![],
        };
        let txt = format_regression_table(&result);
        assert!(txt.contains("Islamic_Bank     |       -1.87% |    0.000"), "{txt}");
        assert!(txt.contains("Inflation_QoQ    |        0.44% |    0.400"), "{txt}");
        assert!(txt.contains("|        0.654 |"), "{txt}");
        assert!(txt.contains("Observations     |           24 |"), "{txt}");

        let details = format_regression_details(&result);
        assert!(details.contains("df=21"));
    }

    #[test]
    fn truncate_long_labels() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
