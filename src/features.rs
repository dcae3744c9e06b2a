// src/features.rs
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Width of the feature table the trained models expect.
pub const FEATURE_COUNT: usize = 10;

/// Column names, in the exact order the models were trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "password_length",
    "n_uppercase",
    "n_lowercase",
    "n_digits",
    "n_special",
    "has_uppercase",
    "has_lowercase",
    "has_digits",
    "has_special",
    "n_unique",
];

/// Character-composition summary of a single password.
///
/// Counts are per Unicode scalar value; the upper/lower/digit classes are
/// ASCII only, everything else lands in `n_special`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordFeatures {
    pub password_length: u32,
    pub n_uppercase: u32,
    pub n_lowercase: u32,
    pub n_digits: u32,
    pub n_special: u32,
    pub has_uppercase: u8,
    pub has_lowercase: u8,
    pub has_digits: u8,
    pub has_special: u8,
    pub n_unique: u32,
}

impl PasswordFeatures {
    pub fn extract(password: &str) -> Self {
        let mut n_uppercase = 0u32;
        let mut n_lowercase = 0u32;
        let mut n_digits = 0u32;
        let mut n_special = 0u32;
        let mut seen = HashSet::new();

        for c in password.chars() {
            if c.is_ascii_uppercase() {
                n_uppercase += 1;
            } else if c.is_ascii_lowercase() {
                n_lowercase += 1;
            } else if c.is_ascii_digit() {
                n_digits += 1;
            } else {
                n_special += 1;
            }
            seen.insert(c);
        }

        Self {
            password_length: n_uppercase + n_lowercase + n_digits + n_special,
            n_uppercase,
            n_lowercase,
            n_digits,
            n_special,
            has_uppercase: (n_uppercase > 0) as u8,
            has_lowercase: (n_lowercase > 0) as u8,
            has_digits: (n_digits > 0) as u8,
            has_special: (n_special > 0) as u8,
            n_unique: seen.len() as u32,
        }
    }

    /// The feature vector as one ordered numeric row, column order matching
    /// [`FEATURE_NAMES`].
    pub fn as_row(&self) -> [f64; FEATURE_COUNT] {
        [
            self.password_length as f64,
            self.n_uppercase as f64,
            self.n_lowercase as f64,
            self.n_digits as f64,
            self.n_special as f64,
            self.has_uppercase as f64,
            self.has_lowercase as f64,
            self.has_digits as f64,
            self.has_special as f64,
            self.n_unique as f64,
        ]
    }
}

/// Extract features for a batch of passwords, preserving input order.
pub fn extract_batch<S: AsRef<str>>(passwords: &[S]) -> Vec<PasswordFeatures> {
    passwords
        .iter()
        .map(|p| PasswordFeatures::extract(p.as_ref()))
        .collect()
}
