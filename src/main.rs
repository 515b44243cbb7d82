//! Review Sentiment CLI
//!
//! Offline entry point for running predictions and inspecting artifacts
//! without starting the HTTP server.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use review_sentiment::inference::normalize_review;
use review_sentiment::model::{DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH};
use review_sentiment::utils::format_latency;
use review_sentiment::utils::logging::{init_logging, LogConfig};
use review_sentiment::{
    Classifier, ModelArtifacts, Sentiment, SentimentPredictor, NO_REVIEW_MESSAGE,
};

/// Review sentiment prediction from fitted artifacts
#[derive(Parser, Debug)]
#[command(name = "review_sentiment")]
#[command(version)]
#[command(about = "Predict the sentiment of short text reviews", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Path to the classifier artifact
    #[arg(long, env = "SENTIMENT_MODEL_PATH", default_value = DEFAULT_MODEL_PATH, global = true)]
    model: PathBuf,

    /// Path to the vectorizer artifact
    #[arg(long, env = "SENTIMENT_VECTORIZER_PATH", default_value = DEFAULT_VECTORIZER_PATH, global = true)]
    vectorizer: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Predict the sentiment of one or more reviews
    Predict {
        /// Review texts
        #[arg(required = true)]
        reviews: Vec<String>,

        /// Print results as JSON lines
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Show a summary of the loaded artifacts
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };

    let _ = init_logging(&log_config);

    let artifacts = ModelArtifacts::load(&cli.model, &cli.vectorizer).with_context(|| {
        format!(
            "failed to load artifacts from {:?} and {:?}",
            cli.model, cli.vectorizer
        )
    })?;

    match cli.command {
        Commands::Predict { reviews, json } => cmd_predict(artifacts, &reviews, json)?,
        Commands::Inspect => cmd_inspect(&artifacts),
    }

    Ok(())
}

fn cmd_predict(artifacts: ModelArtifacts, reviews: &[String], json: bool) -> Result<()> {
    let predictor = SentimentPredictor::new(artifacts);

    let (usable, blank): (Vec<&str>, Vec<&str>) = reviews
        .iter()
        .map(String::as_str)
        .partition(|review| normalize_review(Some(*review)).is_some());
    for review in &blank {
        println!("{} {:?}: {}", "Skipped:".yellow(), review, NO_REVIEW_MESSAGE);
    }

    info!("Running {} prediction(s)", usable.len());
    let results = predictor.predict_batch(&usable)?;

    for (review, result) in usable.iter().zip(&results) {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "review": review,
                    "sentiment": result.sentiment,
                    "confidence": result.confidence_percent(),
                })
            );
            continue;
        }

        let label = match result.sentiment {
            Sentiment::Positive => result.sentiment.as_str().green().bold(),
            Sentiment::Negative => result.sentiment.as_str().red().bold(),
        };
        println!("{} {}", "Review:".cyan(), review);
        println!("  {} ({})", label, result.confidence_percent());
        println!(
            "  {} terms matched in {}",
            result.matched_terms,
            format_latency(result.inference_time_ms)
        );
    }

    Ok(())
}

fn cmd_inspect(artifacts: &ModelArtifacts) {
    println!("{}", "Artifacts:".cyan().bold());
    if let Some(path) = &artifacts.model_path {
        println!("  Model:      {}", path.display());
    }
    if let Some(path) = &artifacts.vectorizer_path {
        println!("  Vectorizer: {}", path.display());
    }
    println!();
    println!("{}", "Classifier:".cyan().bold());
    println!("  Kind:     {}", artifacts.model.kind());
    println!("  Classes:  {:?}", artifacts.model.classes());
    println!("  Features: {}", artifacts.model.n_features());
    println!();
    println!("{}", "Vectorizer:".cyan().bold());
    println!("  Vocabulary:  {}", artifacts.vectorizer.n_features());
    println!("  IDF:         {}", artifacts.vectorizer.uses_idf());
    println!("  N-grams:     {:?}", artifacts.vectorizer.ngram_range);
    println!("  Sublinear:   {}", artifacts.vectorizer.sublinear_tf);
    println!("  Norm:        {:?}", artifacts.vectorizer.norm);
}
