// src/main.rs
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use console::style;

use rust_passrank::classifier::GaussianNbModel;
use rust_passrank::cli::Args;
use rust_passrank::predictor::{predict_password_strength, LabelMap};
use rust_passrank::report::format_feature_table;

const DEMO_PASSWORDS: [&str; 5] = ["p@ssword", "a", "1", "ab", "12"];

fn main() -> anyhow::Result<()> {
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let args = Args::parse();
    log::debug!("Command line args: {:?}", args);

    let passwords: Vec<String> = if args.passwords.is_empty() {
        DEMO_PASSWORDS.iter().map(|p| p.to_string()).collect()
    } else {
        args.passwords.clone()
    };
    let labels = LabelMap::default();

    println!("{}", style("***** IMBALANCED MODEL *****").bold());
    let model = GaussianNbModel::load(&args.imbalanced_model)
        .with_context(|| format!("failed to load model artifact {}", args.imbalanced_model))?;
    score_and_print(&model, &passwords, &labels);

    // Raw feature rows for two degenerate inputs, so the table above can be
    // checked against what the models actually see.
    println!("\n{}", format_feature_table(&["ab", "12"]));

    println!("{}", style("***** BALANCED MODEL *****").bold());
    let model = GaussianNbModel::load(&args.balanced_model)
        .with_context(|| format!("failed to load model artifact {}", args.balanced_model))?;
    score_and_print(&model, &passwords, &labels);

    Ok(())
}

fn score_and_print(model: &GaussianNbModel, passwords: &[String], labels: &LabelMap) {
    match predict_password_strength(model, passwords, labels) {
        Ok(report) => println!("{report}"),
        Err(e) => {
            log::error!("Scoring failed: {e}");
            eprintln!("❌ Scoring failed: {e}");
        }
    }
}
