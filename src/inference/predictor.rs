//! Inference Predictor Module
//!
//! Runs a review through cleaning, vectorization and classification using the
//! artifacts loaded at startup.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::preprocess::{clean_text, normalize_review};
use crate::model::{Classifier, ModelArtifacts};
use crate::utils::error::{Result, ResultExt, SentimentError};
use crate::utils::format_percentage;

/// Message returned when a request carries no usable review text
pub const NO_REVIEW_MESSAGE: &str = "No review provided";

/// Class label the classifier uses for positive reviews
pub const POSITIVE_CLASS: i64 = 1;

/// Binary sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Map a predicted class label to a sentiment
    pub fn from_class(class: i64) -> Self {
        if class == POSITIVE_CLASS {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single prediction
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// Predicted class label
    pub predicted_class: i64,

    pub sentiment: Sentiment,

    /// Highest class probability (0.0 to 1.0)
    pub confidence: f64,

    /// Probability per class, in classifier class order
    pub probabilities: Vec<f64>,

    /// Text actually fed to the vectorizer
    pub cleaned_text: String,

    /// Number of vocabulary terms found in the review
    pub matched_terms: usize,

    /// Inference time in milliseconds
    pub inference_time_ms: f64,
}

impl PredictionResult {
    /// Assemble a result from the classifier outputs
    pub fn new(
        predicted_class: i64,
        probabilities: Vec<f64>,
        cleaned_text: String,
        matched_terms: usize,
        inference_time: Duration,
    ) -> Result<Self> {
        let confidence = probabilities
            .iter()
            .cloned()
            .reduce(f64::max)
            .context("classifier returned no probabilities")?;

        Ok(Self {
            predicted_class,
            sentiment: Sentiment::from_class(predicted_class),
            confidence,
            probabilities,
            cleaned_text,
            matched_terms,
            inference_time_ms: inference_time.as_secs_f64() * 1000.0,
        })
    }

    /// Confidence as a percentage string with two decimals, e.g. `87.43%`
    pub fn confidence_percent(&self) -> String {
        format_percentage(self.confidence)
    }
}

/// Predictor owning the fitted artifacts
#[derive(Debug, Clone)]
pub struct SentimentPredictor {
    artifacts: ModelArtifacts,
}

impl SentimentPredictor {
    pub fn new(artifacts: ModelArtifacts) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    /// Normalize review text the same way the vectorizer was fitted
    pub fn clean(&self, text: &str) -> String {
        clean_text(text)
    }

    /// Predict the sentiment of a single review
    ///
    /// Whitespace-only or empty reviews are rejected with `InvalidInput`.
    pub fn predict(&self, review: &str) -> Result<PredictionResult> {
        let review = normalize_review(Some(review))
            .ok_or_else(|| SentimentError::InvalidInput(NO_REVIEW_MESSAGE.to_string()))?;

        let start = Instant::now();

        let cleaned = self.clean(review);
        let features = self.artifacts.vectorizer.transform(&cleaned);
        let predicted_class = self.artifacts.model.predict(&features)?;
        let probabilities = self.artifacts.model.predict_proba(&features)?;

        let result = PredictionResult::new(
            predicted_class,
            probabilities,
            cleaned,
            features.nnz(),
            start.elapsed(),
        )?;

        debug!(
            "Predicted {} ({}) from {} terms in {:.3} ms",
            result.sentiment,
            result.confidence_percent(),
            result.matched_terms,
            result.inference_time_ms
        );

        Ok(result)
    }

    /// Predict several reviews, stopping at the first failure
    pub fn predict_batch<S: AsRef<str>>(&self, reviews: &[S]) -> Result<Vec<PredictionResult>> {
        reviews
            .iter()
            .map(|review| self.predict(review.as_ref()))
            .collect()
    }
}
