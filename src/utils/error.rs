//! Error Handling Module
//!
//! Defines custom error types for the review sentiment library.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for review sentiment operations
#[derive(Error, Debug)]
pub enum SentimentError {
    /// Error loading or validating a serialized artifact
    #[error("Failed to load artifact at '{0}': {1}")]
    Artifact(PathBuf, String),

    /// Error with the text vectorizer
    #[error("Vectorizer error: {0}")]
    Vectorizer(String),

    /// Error with the classifier
    #[error("Model error: {0}")]
    Model(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input (rejected review text)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

impl SentimentError {
    /// True when the error was caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, SentimentError::InvalidInput(_))
    }
}

/// Convenience Result type for review sentiment operations
pub type Result<T> = std::result::Result<T, SentimentError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| SentimentError::Model(format!("{}: {}", msg, e)))
    }
}

impl<T> ResultExt<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| SentimentError::Model(msg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SentimentError::Vectorizer("empty vocabulary".to_string());
        assert_eq!(format!("{}", err), "Vectorizer error: empty vocabulary");
    }

    #[test]
    fn test_artifact_error() {
        let path = PathBuf::from("/models/sentiment_model.json");
        let err = SentimentError::Artifact(path, "file not found".to_string());
        assert!(format!("{}", err).contains("sentiment_model.json"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(SentimentError::InvalidInput("No review provided".into()).is_client_error());
        assert!(!SentimentError::Model("bad coef".into()).is_client_error());
    }

    #[test]
    fn test_option_context() {
        let opt: Option<i32> = None;
        let with_context = opt.context("Value was None");
        assert!(matches!(with_context, Err(SentimentError::Model(_))));
    }

    #[test]
    fn test_result_context() {
        let parsed: std::result::Result<i32, _> = "x".parse::<i32>();
        let err = parsed.context("parsing coefficient").unwrap_err();
        assert!(err.to_string().starts_with("Model error: parsing coefficient: "));
    }
}
