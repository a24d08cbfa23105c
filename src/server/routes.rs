//! Route handlers

use crate::feed::get_poetry_feed_with_timeout;
use crate::server::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

/// Body of a failed feed response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `GET /patreon-poetry`: the poems as a JSON array
pub async fn poetry_feed(State(state): State<AppState>) -> Response {
    tracing::info!("Path matched: /patreon-poetry");

    match get_poetry_feed_with_timeout(&state.fetcher, &state.campaign_id, state.feed_timeout)
        .await
    {
        Ok(poems) => Json(poems).into_response(),
        Err(e) => {
            tracing::error!("Poetry feed failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// `GET /test`
pub async fn health() -> &'static str {
    tracing::info!("Path matched: /test");
    "Worker is operational."
}

/// `GET /`
pub async fn root() -> &'static str {
    tracing::info!("Path matched: /");
    "Worker root path accessed."
}

pub async fn not_found(uri: axum::http::Uri) -> (StatusCode, &'static str) {
    tracing::info!("Path '{}' not matched. Returning Not Found.", uri.path());
    (
        StatusCode::NOT_FOUND,
        "Not Found - Path does not match any endpoint",
    )
}
