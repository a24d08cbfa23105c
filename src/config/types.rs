use serde::Deserialize;

/// Default upstream API origin
pub const DEFAULT_API_BASE_URL: &str = "https://www.patreon.com";

/// Default address the relay listens on
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8787";

/// Main configuration structure for Poetry-Relay
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub server: ServerConfig,
}

/// Upstream API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Origin of the upstream API (overridable for testing)
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Campaign whose posts are relayed
    #[serde(rename = "campaign-id")]
    pub campaign_id: String,

    /// Creator access token; may instead come from the environment
    #[serde(rename = "access-token", default)]
    pub access_token: Option<String>,

    /// Upper bound on pages fetched per feed request (unbounded when absent)
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,

    /// Timeout for a single upstream HTTP request (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Timeout for fetching every page of one feed (seconds)
    #[serde(rename = "feed-timeout-secs", default = "default_feed_timeout")]
    pub feed_timeout_secs: u64,
}

/// Client identification sent with every upstream request
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(rename = "app-name")]
    pub app_name: String,

    #[serde(rename = "app-version")]
    pub app_version: String,

    /// Contact address the upstream operator can reach
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// HTTP boundary configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,

    /// The single web origin allowed to read the feed
    #[serde(rename = "allowed-origin")]
    pub allowed_origin: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_feed_timeout() -> u64 {
    60
}

impl ApiConfig {
    /// Returns the configured access token, or an empty string if none is set
    pub fn access_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or("")
    }
}
