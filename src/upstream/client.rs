//! HTTP client construction for upstream requests

use crate::config::{ApiConfig, UserAgentConfig};
use reqwest::Client;
use std::time::Duration;

/// Formats the client-identifying User-Agent value
///
/// Format: `AppName/Version (contact@email)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} ({})",
        config.app_name, config.app_version, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Client identification sent with every request
/// * `api` - Upstream settings (request timeout)
///
/// # Example
///
/// ```no_run
/// use poetry_relay::config::{ApiConfig, UserAgentConfig};
/// use poetry_relay::upstream::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     app_name: "PoetryRelay".to_string(),
///     app_version: "1.0".to_string(),
///     contact_email: "poet@example.com".to_string(),
/// };
/// let api = ApiConfig {
///     base_url: "https://www.patreon.com".to_string(),
///     campaign_id: "1234567".to_string(),
///     access_token: Some("token".to_string()),
///     max_pages: None,
///     request_timeout_secs: 30,
///     feed_timeout_secs: 60,
/// };
///
/// let client = build_http_client(&user_agent, &api).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    api: &ApiConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(user_agent))
        .timeout(Duration::from_secs(api.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}
