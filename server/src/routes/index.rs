//! Static landing page

use axum::{extract::State, response::Html};
use tokio::fs;
use tracing::error;

use super::error::ApiError;
use crate::state::SharedState;

/// GET / - Serve the review form
pub async fn index(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let path = state.config.index_template();
    let page = fs::read_to_string(&path).await.map_err(|e| {
        error!("Failed to read template {:?}: {}", path, e);
        ApiError::Internal("Template not available".to_string())
    })?;
    Ok(Html(page))
}
