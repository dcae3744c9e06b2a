// src/classifier.rs
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::FEATURE_COUNT;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model shape mismatch: {0}")]
    ShapeMismatch(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// A trained classifier over the password feature table.
///
/// Implementations are black boxes to the rest of the crate: how they were
/// trained or persisted does not matter, only that they score feature rows.
/// Probability columns are ordered by class index, each row summing to 1.
pub trait Classifier {
    /// Predicted class index per feature row.
    fn predict(&self, rows: &[[f64; FEATURE_COUNT]]) -> Result<Vec<usize>>;

    /// Per-class probability distribution per feature row.
    fn predict_proba(&self, rows: &[[f64; FEATURE_COUNT]]) -> Result<Vec<Vec<f64>>>;
}

/// Gaussian Naive Bayes parameters, deserialized from a JSON artifact
/// produced by an external training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianNbModel {
    pub n_features: usize,
    /// Class indices, contiguous ascending from 0.
    pub classes: Vec<usize>,
    pub class_prior: Vec<f64>,
    /// Per-class feature means, `classes.len()` rows of `n_features`.
    pub theta: Vec<Vec<f64>>,
    /// Per-class feature variances, same shape as `theta`.
    pub var: Vec<Vec<f64>>,
}

impl GaussianNbModel {
    /// Deserialize a model artifact from disk, failing before any prediction
    /// is attempted if the file is unreadable, malformed, or inconsistent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading model artifact from {}", path.display());
        let raw = fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&raw)?;
        model.validate()?;
        log::info!(
            "Loaded model from {} ({} classes, {} features)",
            path.display(),
            model.classes.len(),
            model.n_features
        );
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.n_features != FEATURE_COUNT {
            return Err(ModelError::ShapeMismatch(format!(
                "model expects {} features, this feature table has {}",
                self.n_features, FEATURE_COUNT
            )));
        }
        if self.classes.is_empty() {
            return Err(ModelError::ShapeMismatch("model has no classes".into()));
        }
        for (pos, &class) in self.classes.iter().enumerate() {
            if class != pos {
                return Err(ModelError::ShapeMismatch(format!(
                    "classes must be contiguous ascending from 0, found {class} at position {pos}"
                )));
            }
        }
        let n_classes = self.classes.len();
        if self.class_prior.len() != n_classes {
            return Err(ModelError::ShapeMismatch(format!(
                "{} priors for {} classes",
                self.class_prior.len(),
                n_classes
            )));
        }
        for (name, table) in [("theta", &self.theta), ("var", &self.var)] {
            if table.len() != n_classes {
                return Err(ModelError::ShapeMismatch(format!(
                    "{name} has {} rows for {} classes",
                    table.len(),
                    n_classes
                )));
            }
            for (class, row) in table.iter().enumerate() {
                if row.len() != self.n_features {
                    return Err(ModelError::ShapeMismatch(format!(
                        "{name} row for class {class} has {} columns, expected {}",
                        row.len(),
                        self.n_features
                    )));
                }
            }
        }
        for (class, row) in self.var.iter().enumerate() {
            if row.iter().any(|&v| v <= 0.0 || !v.is_finite()) {
                return Err(ModelError::ShapeMismatch(format!(
                    "non-positive variance for class {class}"
                )));
            }
        }
        Ok(())
    }

    /// Unnormalized log P(class) + log P(row | class), one entry per class.
    fn joint_log_likelihood(&self, row: &[f64; FEATURE_COUNT]) -> Vec<f64> {
        const LN_2PI: f64 = 1.8378770664093453;
        self.classes
            .iter()
            .map(|&class| {
                let mut ll = self.class_prior[class].ln();
                for i in 0..self.n_features {
                    let mean = self.theta[class][i];
                    let var = self.var[class][i];
                    let diff = row[i] - mean;
                    ll += -0.5 * (LN_2PI + var.ln()) - diff * diff / (2.0 * var);
                }
                ll
            })
            .collect()
    }
}

impl Classifier for GaussianNbModel {
    fn predict(&self, rows: &[[f64; FEATURE_COUNT]]) -> Result<Vec<usize>> {
        Ok(rows
            .iter()
            .map(|row| argmax(&self.joint_log_likelihood(row)))
            .collect())
    }

    fn predict_proba(&self, rows: &[[f64; FEATURE_COUNT]]) -> Result<Vec<Vec<f64>>> {
        Ok(rows
            .iter()
            .map(|row| normalize_log(&self.joint_log_likelihood(row)))
            .collect())
    }
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

// Log-sum-exp normalization, shifted by the max for stability.
fn normalize_log(log_likelihoods: &[f64]) -> Vec<f64> {
    let max = log_likelihoods
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = log_likelihoods.iter().map(|&v| (v - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|v| v / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn two_class_model() -> GaussianNbModel {
        GaussianNbModel {
            n_features: FEATURE_COUNT,
            classes: vec![0, 1],
            class_prior: vec![0.5, 0.5],
            theta: vec![vec![0.0; FEATURE_COUNT], vec![10.0; FEATURE_COUNT]],
            var: vec![vec![1.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]],
        }
    }

    #[test]
    fn probabilities_sum_to_one() {
        let model = two_class_model();
        let rows = [[0.0; FEATURE_COUNT], [10.0; FEATURE_COUNT], [5.0; FEATURE_COUNT]];
        for row in model.predict_proba(&rows).unwrap() {
            let total: f64 = row.iter().sum();
            assert!((total - 1.0).abs() < 1e-9, "row sums to {total}");
        }
    }

    #[test]
    fn predict_agrees_with_argmax_of_proba() {
        let model = two_class_model();
        let rows = [[0.0; FEATURE_COUNT], [10.0; FEATURE_COUNT], [4.0; FEATURE_COUNT]];
        let predictions = model.predict(&rows).unwrap();
        let probabilities = model.predict_proba(&rows).unwrap();
        for (prediction, row) in predictions.iter().zip(&probabilities) {
            let argmax = row
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .unwrap()
                .0;
            assert_eq!(*prediction, argmax);
        }
    }

    #[test]
    fn rows_near_a_class_mean_get_that_class() {
        let model = two_class_model();
        let predictions = model
            .predict(&[[0.5; FEATURE_COUNT], [9.5; FEATURE_COUNT]])
            .unwrap();
        assert_eq!(predictions, vec![0, 1]);
    }

    #[test]
    fn wrong_feature_width_is_rejected() {
        let mut model = two_class_model();
        model.n_features = 4;
        model.theta = vec![vec![0.0; 4], vec![10.0; 4]];
        model.var = vec![vec![1.0; 4], vec![1.0; 4]];
        assert!(matches!(
            model.validate(),
            Err(ModelError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn ragged_theta_is_rejected() {
        let mut model = two_class_model();
        model.theta[1].pop();
        assert!(matches!(
            model.validate(),
            Err(ModelError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn non_positive_variance_is_rejected() {
        let mut model = two_class_model();
        model.var[0][3] = 0.0;
        assert!(matches!(
            model.validate(),
            Err(ModelError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn non_contiguous_classes_are_rejected() {
        let mut model = two_class_model();
        model.classes = vec![0, 2];
        assert!(matches!(
            model.validate(),
            Err(ModelError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn corrupt_artifact_fails_to_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(matches!(
            GaussianNbModel::load(file.path()),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn missing_artifact_fails_to_load() {
        assert!(matches!(
            GaussianNbModel::load("/nonexistent/model.json"),
            Err(ModelError::Io(_))
        ));
    }

    #[test]
    fn round_trips_through_json() {
        let model = two_class_model();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&model).unwrap().as_bytes())
            .unwrap();
        let loaded = GaussianNbModel::load(file.path()).unwrap();
        assert_eq!(loaded.classes, model.classes);
        assert_eq!(loaded.theta, model.theta);
    }
}
