//! HTTP routes

pub mod error;
pub mod health;
pub mod index;
pub mod predict;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

/// Build the application router over the shared state
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/predict", post(predict::predict))
        .route("/health", get(health::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use review_sentiment::model::{LogisticRegression, SentimentModel, TextVectorizer};
    use review_sentiment::{ModelArtifacts, SentimentPredictor};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::state::{AppState, ServerConfig};

    fn test_app(templates: &TempDir) -> Router {
        let vectorizer = TextVectorizer::from_terms(&[
            "amazing", "wonderful", "great", "terrible", "awful", "boring",
        ]);
        let model = SentimentModel::LogisticRegression(LogisticRegression::new(
            vec![2.0, 2.0, 2.0, -2.0, -2.0, -2.0],
            0.0,
        ));
        let predictor = SentimentPredictor::new(ModelArtifacts::new(model, vectorizer).unwrap());
        let config = ServerConfig {
            templates_dir: templates.path().to_path_buf(),
            ..ServerConfig::default()
        };
        router(Arc::new(AppState::new(config, predictor)))
    }

    fn templates_with_index() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("index.html"),
            "<!doctype html><title>Review Sentiment</title>",
        )
        .unwrap();
        dir
    }

    async fn post_raw(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
        post_raw(app, &body.to_string()).await
    }

    fn confidence_value(body: &Value) -> f64 {
        let text = body["confidence"].as_str().unwrap();
        let (number, suffix) = text.split_at(text.len() - 1);
        assert_eq!(suffix, "%");
        let (_, decimals) = number.split_once('.').unwrap();
        assert_eq!(decimals.len(), 2);
        number.parse().unwrap()
    }

    #[tokio::test]
    async fn test_index_served() {
        let templates = templates_with_index();
        let response = test_app(&templates)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&bytes).contains("Review Sentiment"));
    }

    #[tokio::test]
    async fn test_index_missing_template() {
        let empty = TempDir::new().unwrap();
        let response = test_app(&empty)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_predict_positive_review() {
        let templates = templates_with_index();
        let (status, body) = post_json(
            test_app(&templates),
            json!({"review": "This movie was amazing and wonderful"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"sentiment": "Positive", "confidence": "94.42%"}));
    }

    #[tokio::test]
    async fn test_predict_negative_review() {
        let templates = templates_with_index();
        let (status, body) =
            post_json(test_app(&templates), json!({"review": "Boring and awful."})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sentiment"], "Negative");
    }

    #[tokio::test]
    async fn test_confidence_range_and_format() {
        let templates = templates_with_index();
        for review in ["great", "terrible movie", "nothing known here", "!!!", "amazing but boring"] {
            let (status, body) = post_json(test_app(&templates), json!({ "review": review })).await;
            assert_eq!(status, StatusCode::OK, "review {:?}", review);
            let sentiment = body["sentiment"].as_str().unwrap();
            assert!(sentiment == "Positive" || sentiment == "Negative");
            let confidence = confidence_value(&body);
            assert!((50.0..=100.0).contains(&confidence), "confidence {}", confidence);
        }
    }

    #[tokio::test]
    async fn test_punctuation_and_case_are_normalized() {
        let templates = templates_with_index();
        let (_, a) = post_json(test_app(&templates), json!({"review": "Great!!"})).await;
        let (_, b) = post_json(test_app(&templates), json!({"review": "great"})).await;
        let (_, c) = post_json(test_app(&templates), json!({"review": "GREAT"})).await;
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[tokio::test]
    async fn test_identical_input_identical_output() {
        let templates = templates_with_index();
        let app = test_app(&templates);
        let review = json!({"review": "wonderful, but a bit boring"});
        let (_, first) = post_json(app.clone(), review.clone()).await;
        let (_, second) = post_json(app, review).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_or_empty_review() {
        let templates = templates_with_index();
        for body in [
            json!({"review": ""}),
            json!({"review": "   \n"}),
            json!({"review": null}),
            json!({}),
        ] {
            let (status, response) = post_json(test_app(&templates), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response, json!({"error": "No review provided"}));
        }
    }

    #[tokio::test]
    async fn test_non_string_review_rejected() {
        let templates = templates_with_index();
        for body in [
            json!({"review": 42}),
            json!({"review": true}),
            json!({"review": ["great"]}),
            json!({"review": {"text": "great"}}),
        ] {
            let (status, response) = post_json(test_app(&templates), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                response,
                json!({"error": "Invalid request body: expected an object with a string review"})
            );
        }
    }

    #[tokio::test]
    async fn test_non_object_body_rejected() {
        let templates = templates_with_index();
        for body in ["\"great\"", "[1,2]", "null", "42"] {
            let (status, response) = post_raw(test_app(&templates), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
            let error = response["error"].as_str().unwrap();
            assert!(error.contains("expected an object"), "body {}: {}", body, error);
            assert!(!error.contains("must be a string"));
        }
    }

    #[tokio::test]
    async fn test_oversized_body_keeps_413() {
        let templates = templates_with_index();
        let body = format!("{{\"review\": \"{}\"}}", "a".repeat(3 * 1024 * 1024));
        let (status, response) = post_raw(test_app(&templates), &body).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(response["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_missing_content_type_keeps_415() {
        let templates = templates_with_index();
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .body(Body::from(json!({"review": "great"}).to_string()))
            .unwrap();
        let response = test_app(&templates).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let templates = templates_with_index();
        let (status, response) = post_raw(test_app(&templates), "{\"review\": ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"].is_string());
    }

    #[tokio::test]
    async fn test_health() {
        let templates = templates_with_index();
        let response = test_app(&templates)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model_kind"], "logistic_regression");
        assert_eq!(body["n_features"], 6);
    }
}
