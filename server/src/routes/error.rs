//! JSON error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use review_sentiment::SentimentError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned by handlers
#[derive(Debug)]
pub enum ApiError {
    /// The request was unusable; answered with 400
    BadRequest(String),
    /// The request body was refused by the extractor with its own status
    Rejected(StatusCode, String),
    /// Something failed on our side; answered with 500
    Internal(String),
}

impl From<SentimentError> for ApiError {
    fn from(err: SentimentError) -> Self {
        match err {
            SentimentError::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => {
                error!("Prediction failed: {}", other);
                ApiError::Internal("Prediction failed".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::BadRequest(
                "Invalid request body: expected an object with a string review".to_string(),
            ),
            JsonRejection::JsonSyntaxError(_) => {
                ApiError::BadRequest("Invalid request body: malformed JSON".to_string())
            }
            other => ApiError::Rejected(
                other.status(),
                format!("Invalid request body: {}", other.body_text()),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Rejected(status, msg) => (status, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}
