//! # Review Sentiment
//!
//! Binary sentiment prediction for short text reviews, backed by a fitted
//! vectorizer and linear classifier stored as JSON artifacts.
//!
//! ## Modules
//!
//! - `model`: Vectorizer and classifier artifacts, plus loading from disk
//! - `inference`: Text cleaning and the `SentimentPredictor`
//! - `utils`: Logging, error types and formatting helpers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use review_sentiment::{ModelArtifacts, SentimentPredictor};
//!
//! let artifacts = ModelArtifacts::load(
//!     Path::new("models/sentiment_model.json"),
//!     Path::new("models/tfidf_vectorizer.json"),
//! )?;
//! let predictor = SentimentPredictor::new(artifacts);
//! let result = predictor.predict("This movie was amazing and wonderful")?;
//! println!("{} {}", result.sentiment, result.confidence_percent());
//! ```

pub mod inference;
pub mod model;
pub mod utils;

// Re-export commonly used items for convenience
pub use inference::{PredictionResult, Sentiment, SentimentPredictor, NO_REVIEW_MESSAGE};
pub use model::{Classifier, ModelArtifacts, SentimentModel, TextVectorizer};
pub use utils::error::{Result, SentimentError};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
