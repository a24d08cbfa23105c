//! Poetry-Relay: a small HTTP relay for a creator's tagged poetry posts
//!
//! This crate pulls every post of a campaign from the Patreon API, keeps the
//! ones tagged `#poetry`, cleans their markup, and serves the result as JSON
//! to a single trusted web origin.

pub mod config;
pub mod feed;
pub mod poetry;
pub mod server;
pub mod upstream;

use thiserror::Error;

/// Main error type for Poetry-Relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("No access token configured (set api.access-token or PATREON_ACCESS_TOKEN)")]
    MissingCredential,
}

/// Errors raised while talking to the upstream post API
///
/// Any of these fails the whole fetch; pages accumulated before the
/// failure are discarded.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Failed to fetch posts from Patreon API: {detail}")]
    Status { status: u16, detail: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("Pagination stopped after reaching the limit of {limit} pages")]
    PageLimit { limit: u32 },

    #[error("Fetching posts timed out after {limit:?}")]
    Timeout { limit: std::time::Duration },

    #[error("Invalid upstream URL: {0}")]
    Url(#[from] ::url::ParseError),
}

/// Result type alias for Poetry-Relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for upstream operations
pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;

// Re-export commonly used types
pub use config::Config;
pub use feed::get_poetry_feed;
pub use poetry::{structure_posts_data, PoemRecord};
pub use upstream::{IncludedResource, PostCollection, PostFetcher, RawPost};
