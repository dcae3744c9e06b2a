// src/cli.rs
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the model trained on the imbalanced dataset
    #[arg(
        long,
        env = "IMBALANCED_MODEL",
        default_value = "models/imbalanced_model.json"
    )]
    pub imbalanced_model: String,

    /// Path to the model trained on the balanced dataset
    #[arg(
        long,
        env = "BALANCED_MODEL",
        default_value = "models/balanced_model.json"
    )]
    pub balanced_model: String,

    /// Passwords to score instead of the built-in demo list
    #[arg(long, num_args = 1..)]
    pub passwords: Vec<String>,
}
