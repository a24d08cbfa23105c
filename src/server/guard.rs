//! Request guards run before routing
//!
//! - Path normalization (`//patreon-poetry/` routes like `/patreon-poetry`)
//! - CORS preflight answers
//! - Allowed-origin enforcement and CORS response headers

use crate::server::AppState;
use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, ORIGIN, VARY,
};
use axum::http::uri::{PathAndQuery, Uri};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Collapses repeated slashes and drops trailing ones
///
/// The empty result maps to `/`.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}

/// Rewrites the request URI to its normalized path before routing
pub async fn rewrite_request_path(mut request: Request, next: Next) -> Response {
    let original = request.uri().path();
    let normalized = normalize_path(original);
    tracing::debug!("Normalized pathname: '{}'", normalized);

    if normalized != original {
        let path_and_query = match request.uri().query() {
            Some(query) => format!("{}?{}", normalized, query),
            None => normalized,
        };

        let mut parts = request.uri().clone().into_parts();
        if let Ok(path_and_query) = PathAndQuery::try_from(path_and_query) {
            parts.path_and_query = Some(path_and_query);
            if let Ok(uri) = Uri::from_parts(parts) {
                *request.uri_mut() = uri;
            }
        }
    }

    next.run(request).await
}

/// Answers preflights and rejects requests from any other origin
///
/// Preflights succeed regardless of their origin; the browser enforces the
/// returned `Access-Control-Allow-Origin`.
pub async fn enforce_origin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return preflight_response(&state.allowed_origin);
    }

    let allowed = request
        .headers()
        .get(ORIGIN)
        .is_some_and(|origin| origin == &state.allowed_origin);
    if !allowed {
        tracing::warn!(
            "Rejecting request from origin {:?}",
            request.headers().get(ORIGIN)
        );
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, state.allowed_origin.clone());
    headers.insert(VARY, HeaderValue::from_static("Origin"));
    response
}

fn preflight_response(allowed_origin: &HeaderValue) -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin.clone()),
            (
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, OPTIONS"),
            ),
            (
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ),
            (ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400")),
        ],
    )
        .into_response()
}
