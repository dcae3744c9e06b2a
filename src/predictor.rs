// src/predictor.rs
use std::collections::BTreeMap;

use thiserror::Error;

use crate::classifier::{Classifier, ModelError};
use crate::features::extract_batch;
use crate::report::{ReportRow, StrengthReport};

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Model predicted class {0}, which is not in the label map")]
    UnknownClass(usize),

    #[error("Model returned {got} predictions for {expected} passwords")]
    RowCountMismatch { expected: usize, got: usize },

    #[error("Model returned {got} probability columns, label map spans {expected}")]
    ClassCountMismatch { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, PredictError>;

/// Mapping from model class index to a human-readable strength name.
///
/// Iterates in ascending index order; probability columns in the report
/// follow that order.
#[derive(Debug, Clone)]
pub struct LabelMap {
    labels: BTreeMap<usize, String>,
}

impl LabelMap {
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (usize, S)>) -> Self {
        Self {
            labels: entries
                .into_iter()
                .map(|(class, name)| (class, name.into()))
                .collect(),
        }
    }

    pub fn get(&self, class: usize) -> Option<&str> {
        self.labels.get(&class).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.labels.iter().map(|(&class, name)| (class, name.as_str()))
    }

    pub fn names(&self) -> Vec<String> {
        self.labels.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of probability columns the model must produce to cover every
    /// mapped class index (max index + 1).
    pub fn column_span(&self) -> usize {
        self.labels.keys().next_back().map_or(0, |&max| max + 1)
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::new([(0, "Weak"), (1, "Medium"), (2, "Strong")])
    }
}

/// Score a batch of passwords against a trained classifier.
///
/// Extracts features in one batch, obtains predictions plus per-class
/// probabilities, and builds one report row per password in input order.
/// Any mismatch between the model's output and the label map is an error;
/// callers get either a full report or none at all.
pub fn predict_password_strength<S: AsRef<str>>(
    model: &dyn Classifier,
    passwords: &[S],
    labels: &LabelMap,
) -> Result<StrengthReport> {
    let rows: Vec<_> = extract_batch(passwords)
        .iter()
        .map(|f| f.as_row())
        .collect();

    let predictions = model.predict(&rows)?;
    let probabilities = model.predict_proba(&rows)?;
    log::debug!("Scored {} passwords", passwords.len());

    if predictions.len() != passwords.len() {
        return Err(PredictError::RowCountMismatch {
            expected: passwords.len(),
            got: predictions.len(),
        });
    }
    if probabilities.len() != passwords.len() {
        return Err(PredictError::RowCountMismatch {
            expected: passwords.len(),
            got: probabilities.len(),
        });
    }

    let span = labels.column_span();
    let mut report_rows = Vec::with_capacity(passwords.len());
    for ((password, &predicted), proba) in
        passwords.iter().zip(&predictions).zip(&probabilities)
    {
        if proba.len() != span {
            return Err(PredictError::ClassCountMismatch {
                expected: span,
                got: proba.len(),
            });
        }
        let name = labels
            .get(predicted)
            .ok_or(PredictError::UnknownClass(predicted))?;
        let confidence = proba.iter().cloned().fold(f64::NEG_INFINITY, f64::max) * 100.0;
        let per_label = labels.iter().map(|(class, _)| proba[class] * 100.0).collect();

        report_rows.push(ReportRow {
            password: password.as_ref().to_string(),
            predicted: name.to_string(),
            confidence,
            probabilities: per_label,
        });
    }

    Ok(StrengthReport {
        labels: labels.names(),
        rows: report_rows,
    })
}
