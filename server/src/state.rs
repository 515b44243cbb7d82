//! Application state for the sentiment server
//!
//! Holds the configuration and the predictor built from artifacts loaded at
//! startup. Everything here is read-only once the server is running.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use review_sentiment::model::{DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH};
use review_sentiment::SentimentPredictor;
use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Path to the classifier artifact
    pub model_path: PathBuf,
    /// Path to the vectorizer artifact
    pub vectorizer_path: PathBuf,
    /// Directory holding `index.html`
    pub templates_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            vectorizer_path: PathBuf::from(DEFAULT_VECTORIZER_PATH),
            templates_dir: PathBuf::from("templates"),
        }
    }
}

impl ServerConfig {
    /// Socket address string, e.g. `0.0.0.0:5000`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Location of the page served on `GET /`
    pub fn index_template(&self) -> PathBuf {
        self.templates_dir.join("index.html")
    }
}

/// Shared application state
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Predictor over the loaded artifacts
    pub predictor: SentimentPredictor,
    /// Server start time
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig, predictor: SentimentPredictor) -> Self {
        Self {
            config,
            predictor,
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

pub type SharedState = Arc<AppState>;
