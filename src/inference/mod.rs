//! Inference module for review sentiment prediction
//!
//! This module provides:
//! - Review text normalization (`preprocess`)
//! - Single and batch prediction over loaded artifacts (`predictor`)

pub mod predictor;
pub mod preprocess;

// Re-export main types for convenience
pub use predictor::{PredictionResult, Sentiment, SentimentPredictor, NO_REVIEW_MESSAGE};
pub use preprocess::{clean_text, normalize_review};
