//! Prediction endpoint

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use review_sentiment::inference::normalize_review;
use review_sentiment::{Sentiment, NO_REVIEW_MESSAGE};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::state::SharedState;

/// Request body for `POST /predict`
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub review: Option<String>,
}

/// Response body for `POST /predict`
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub sentiment: Sentiment,
    /// Percentage with two decimals, e.g. `87.43%`
    pub confidence: String,
}

/// POST /predict - Classify a single review
pub async fn predict(
    State(state): State<SharedState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload?;

    let review = normalize_review(request.review.as_deref())
        .ok_or_else(|| ApiError::BadRequest(NO_REVIEW_MESSAGE.to_string()))?;

    let result = state.predictor.predict(review)?;

    Ok(Json(PredictResponse {
        sentiment: result.sentiment,
        confidence: result.confidence_percent(),
    }))
}
