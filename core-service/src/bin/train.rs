//! Offline trainer
//!
//! Generates synthetic ad / non-ad samples, fits the logistic baseline,
//! prints an evaluation report and writes the JSON artifact the server
//! loads.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use adlens_core::constants;
use adlens_core::logic::dataset::{class_balance, generate_training_data, stratified_split, DEFAULT_TEST_FRACTION};
use adlens_core::logic::features::layout::LayoutInfo;
use adlens_core::logic::model::{cross_validate, evaluate, load_artifact, LogisticModel, TrainingParams};

#[derive(Parser)]
#[command(name = "adlens-train")]
#[command(about = "Train the AdLens baseline ad classifier on synthetic data")]
struct Cli {
    /// Number of synthetic samples to generate
    #[arg(long, default_value_t = constants::DEFAULT_TRAINING_SAMPLES)]
    samples: usize,

    /// Seed for data generation and the train/test split
    #[arg(long, default_value_t = constants::DEFAULT_TRAINING_SEED)]
    seed: u64,

    /// Share of samples held out for evaluation
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    test_fraction: f64,

    /// Gradient descent epochs
    #[arg(long, default_value_t = TrainingParams::default().epochs)]
    epochs: usize,

    #[arg(long, default_value_t = TrainingParams::default().learning_rate)]
    learning_rate: f64,

    /// L2 regularization strength
    #[arg(long, default_value_t = TrainingParams::default().l2)]
    l2: f64,

    /// Cross-validation folds on the training split (0 disables)
    #[arg(long, default_value_t = 5)]
    folds: usize,

    /// Artifact path (defaults to ADLENS_MODEL_PATH or the data dir)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let out = cli.out.clone().unwrap_or_else(constants::get_model_path);
    let params = TrainingParams {
        epochs: cli.epochs,
        learning_rate: cli.learning_rate,
        l2: cli.l2,
    };

    log::info!("{} trainer v{}", constants::APP_NAME, constants::APP_VERSION);

    println!("{}", "=".repeat(60));
    println!("Training Ad Detection Model");
    println!("{}", "=".repeat(60));

    println!("\n1. Generating synthetic training data (seed {})...", cli.seed);
    let samples = generate_training_data(cli.samples, cli.seed);
    let (ads, content) = class_balance(&samples);
    let total = samples.len().max(1) as f64;
    println!("   Total samples: {}", samples.len());
    println!("   Ads: {} ({:.1}%)", ads, ads as f64 / total * 100.0);
    println!("   Not ads: {} ({:.1}%)", content, content as f64 / total * 100.0);

    println!(
        "\n2. Splitting data ({:.0}% train, {:.0}% test)...",
        (1.0 - cli.test_fraction) * 100.0,
        cli.test_fraction * 100.0
    );
    let split = stratified_split(samples, cli.test_fraction, cli.seed);
    println!("   Train: {}  Test: {}", split.train.len(), split.test.len());

    println!("\n3. Training logistic classifier ({} epochs)...", params.epochs);
    let model = LogisticModel::fit(&split.train, &params).context("training failed")?;
    println!("   ✓ Training complete");

    if cli.folds > 0 {
        println!("\n4. Performing {}-fold cross-validation...", cli.folds);
        let cv = cross_validate(&split.train, cli.folds, &params).context("cross-validation failed")?;
        println!("   CV Accuracy: {:.3} (+/- {:.3})", cv.mean, cv.std);
    }

    if !split.test.is_empty() {
        println!("\n5. Evaluating on test set...");
        let report = evaluate(&model, &split.test).context("evaluation failed")?;

        println!("   {:<10} {:>10} {:>10} {:>10} {:>10}", "", "precision", "recall", "f1-score", "support");
        for (name, m) in [("Not Ad", &report.content), ("Ad", &report.ad)] {
            println!(
                "   {:<10} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            );
        }
        println!("   Accuracy: {:.3}", report.accuracy);

        let cm = report.confusion;
        println!("\n   Confusion Matrix:");
        println!("   True Negatives:  {:4}  |  False Positives: {:4}", cm.true_negatives, cm.false_positives);
        println!("   False Negatives: {:4}  |  True Positives:  {:4}", cm.false_negatives, cm.true_positives);
    }

    println!("\n6. Feature weights (standardized):");
    for (i, (name, weight)) in model.ranked_weights().iter().enumerate() {
        println!("   {:2}. {:20} : {:+.3}", i + 1, name, weight);
    }

    println!("\n7. Saving model...");
    model
        .save(&out)
        .with_context(|| format!("failed to write {}", out.display()))?;

    // Load it back the way the server will
    let loaded = load_artifact(&out).context("written artifact failed to load")?;
    let layout = LayoutInfo::current();
    println!("   ✓ Model saved to {}", out.display());
    println!("   Checksum: {}", loaded.info.checksum);
    println!("   Feature layout: v{} (hash {:08x})", layout.version, layout.hash);

    println!("\n{}", "=".repeat(60));
    println!("Training Complete!");
    println!("{}", "=".repeat(60));
    println!("\nStart the server with: ADLENS_MODEL_PATH={} adlens-server", out.display());

    Ok(())
}
