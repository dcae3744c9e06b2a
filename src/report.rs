// src/report.rs
use std::fmt;

use serde::Serialize;

use crate::features::{extract_batch, FEATURE_NAMES};

/// One scored password: predicted label, confidence, and one percentage per
/// label-map entry (same order as [`StrengthReport::labels`]).
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub password: String,
    pub predicted: String,
    pub confidence: f64,
    pub probabilities: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrengthReport {
    pub labels: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl fmt::Display for StrengthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pwd_width = self
            .rows
            .iter()
            .map(|r| r.password.chars().count())
            .chain(["Password".len()])
            .max()
            .unwrap_or(0);
        let label_width = self
            .rows
            .iter()
            .map(|r| r.predicted.len())
            .chain(["Predicted Strength".len()])
            .max()
            .unwrap_or(0);

        let prob_headers: Vec<String> = self
            .labels
            .iter()
            .map(|l| format!("{l} Probability"))
            .collect();

        write!(
            f,
            "{:<pwd_width$}  {:<label_width$}  {:>10}",
            "Password", "Predicted Strength", "Confidence"
        )?;
        for header in &prob_headers {
            write!(f, "  {header}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(
                f,
                "{:<pwd_width$}  {:<label_width$}  {:>9.2}%",
                row.password, row.predicted, row.confidence
            )?;
            for (value, header) in row.probabilities.iter().zip(&prob_headers) {
                let width = header.len() - 1;
                write!(f, "  {value:>width$.2}%")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render the raw feature table for a list of passwords, one column per
/// feature in model order. Used by the demo to show what the models see.
pub fn format_feature_table<S: AsRef<str>>(passwords: &[S]) -> String {
    let mut out = String::new();
    let pwd_width = passwords
        .iter()
        .map(|p| p.as_ref().chars().count())
        .chain(["password".len()])
        .max()
        .unwrap_or(0);

    out.push_str(&format!("{:<pwd_width$}", "password"));
    for name in FEATURE_NAMES {
        out.push_str(&format!("  {name}"));
    }
    out.push('\n');

    for (password, features) in passwords.iter().zip(extract_batch(passwords)) {
        out.push_str(&format!("{:<pwd_width$}", password.as_ref()));
        for (value, name) in features.as_row().iter().zip(FEATURE_NAMES) {
            out.push_str(&format!("  {:>width$}", *value as u64, width = name.len()));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> StrengthReport {
        StrengthReport {
            labels: vec!["Weak".into(), "Medium".into(), "Strong".into()],
            rows: vec![ReportRow {
                password: "p@ssword".into(),
                predicted: "Weak".into(),
                confidence: 91.25,
                probabilities: vec![91.25, 7.5, 1.25],
            }],
        }
    }

    #[test]
    fn display_has_one_probability_column_per_label() {
        let rendered = sample_report().to_string();
        assert!(rendered.contains("Weak Probability"));
        assert!(rendered.contains("Medium Probability"));
        assert!(rendered.contains("Strong Probability"));
        assert!(rendered.contains("p@ssword"));
        assert!(rendered.contains("91.25%"));
    }

    #[test]
    fn display_emits_header_plus_one_line_per_row() {
        let rendered = sample_report().to_string();
        assert_eq!(rendered.lines().count(), 2);
    }

    #[test]
    fn feature_table_lists_every_column() {
        let table = format_feature_table(&["ab", "12"]);
        for name in FEATURE_NAMES {
            assert!(table.contains(name), "missing column {name}");
        }
        assert!(table.contains("ab"));
        assert!(table.contains("12"));
    }
}
