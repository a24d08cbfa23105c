//! HTTP boundary for the poetry feed
//!
//! Every request passes, outermost first, through request tracing, path
//! normalization, and the origin guard before it reaches a route. Routes:
//!
//! | Path | Response |
//! |------|----------|
//! | `/patreon-poetry` | JSON array of poems, or `500 {"error": ...}` |
//! | `/test` | `Worker is operational.` |
//! | `/` | `Worker root path accessed.` |
//! | anything else | `404` |

mod guard;
mod routes;

pub use guard::{enforce_origin, normalize_path, rewrite_request_path};
pub use routes::ErrorResponse;

use crate::config::Config;
use crate::upstream::PostFetcher;
use crate::{ConfigError, RelayError};
use axum::http::HeaderValue;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// Shared state for request handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub fetcher: Arc<PostFetcher>,
    pub campaign_id: Arc<str>,
    pub allowed_origin: HeaderValue,
    pub feed_timeout: Duration,
}

impl AppState {
    pub fn new(
        fetcher: PostFetcher,
        campaign_id: &str,
        allowed_origin: &str,
        feed_timeout: Duration,
    ) -> Result<Self, RelayError> {
        let allowed_origin = HeaderValue::from_str(allowed_origin).map_err(|e| {
            ConfigError::Validation(format!(
                "allowed-origin is not a valid header value: {}",
                e
            ))
        })?;

        Ok(Self {
            fetcher: Arc::new(fetcher),
            campaign_id: Arc::from(campaign_id),
            allowed_origin,
            feed_timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, RelayError> {
        Self::new(
            PostFetcher::from_config(config)?,
            &config.api.campaign_id,
            &config.server.allowed_origin,
            Duration::from_secs(config.api.feed_timeout_secs),
        )
    }
}

/// Builds the application router
///
/// The routes sit behind an outer router's fallback so the guards run
/// before route matching, on every path and method.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/patreon-poetry", get(routes::poetry_feed))
        .route("/test", get(routes::health))
        .route("/", get(routes::root))
        .fallback(routes::not_found)
        .with_state(state.clone());

    Router::new()
        .fallback_service(routes)
        .layer(from_fn_with_state(state, enforce_origin))
        .layer(from_fn(rewrite_request_path))
        .layer(TraceLayer::new_for_http())
}

/// Runs the relay until Ctrl-C
pub async fn serve(config: &Config) -> crate::Result<()> {
    let state = AppState::from_config(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    tracing::info!("Allowed origin: {}", config.server.allowed_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
