//! Review Sentiment Server
//!
//! HTTP API serving sentiment predictions for short text reviews.
//! Loads the classifier and vectorizer artifacts once at startup and shares
//! them read-only across requests.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use review_sentiment::utils::logging::{init_logging, LogConfig, LogLevel};
use review_sentiment::{ModelArtifacts, SentimentPredictor};
use tracing::{error, info, warn};

use crate::state::{AppState, ServerConfig};

/// Review Sentiment Server
#[derive(Parser, Debug)]
#[command(name = "review-sentiment-server")]
#[command(version)]
#[command(about = "HTTP API serving review sentiment predictions")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "SENTIMENT_PORT", default_value = "5000")]
    port: u16,

    /// Host to bind to
    #[arg(long, env = "SENTIMENT_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Path to the classifier artifact
    #[arg(long, env = "SENTIMENT_MODEL_PATH")]
    model: Option<PathBuf>,

    /// Path to the vectorizer artifact
    #[arg(long, env = "SENTIMENT_VECTORIZER_PATH")]
    vectorizer: Option<PathBuf>,

    /// Directory containing index.html
    #[arg(long, env = "SENTIMENT_TEMPLATES_DIR")]
    templates_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SENTIMENT_LOG_LEVEL", default_value = "info")]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    if let Err(e) = init_logging(&LogConfig::server(cli.log_level)) {
        eprintln!("{}", e);
    }

    // Build configuration
    let mut config = ServerConfig {
        host: cli.host,
        port: cli.port,
        ..ServerConfig::default()
    };

    if let Some(model) = cli.model {
        config.model_path = model;
    }

    if let Some(vectorizer) = cli.vectorizer {
        config.vectorizer_path = vectorizer;
    }

    if let Some(templates_dir) = cli.templates_dir {
        config.templates_dir = templates_dir;
    }

    info!("Review Sentiment Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Model:      {:?}", config.model_path);
    info!("  Vectorizer: {:?}", config.vectorizer_path);
    info!("  Templates:  {:?}", config.templates_dir);

    if !config.index_template().exists() {
        warn!(
            "Template not found at {:?}. GET / will return 500.",
            config.index_template()
        );
    }

    // Artifacts are loaded exactly once; failure aborts startup
    let artifacts = ModelArtifacts::load(&config.model_path, &config.vectorizer_path)
        .map_err(|e| {
            error!("Failed to load artifacts: {}", e);
            e
        })
        .context("artifact load failed")?;
    info!("Serving {}", artifacts.summary());

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;

    // Create shared state
    let state = Arc::new(AppState::new(config, SentimentPredictor::new(artifacts)));

    let app = routes::router(state);

    // Start server
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
