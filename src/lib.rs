// src/lib.rs
pub mod classifier;
pub mod cli;
pub mod features;
pub mod predictor;
pub mod report;

pub use classifier::{Classifier, GaussianNbModel, ModelError};
pub use features::{PasswordFeatures, FEATURE_COUNT, FEATURE_NAMES};
pub use predictor::{predict_password_strength, LabelMap, PredictError};
pub use report::{ReportRow, StrengthReport};
