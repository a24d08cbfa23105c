use crate::config::types::{ApiConfig, Config, ServerConfig, UserAgentConfig};
use crate::{ConfigError, ConfigResult};
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_api_config(&config.api)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates upstream API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;
    if base.scheme() != "https" && base.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    let campaign_id = config.campaign_id.trim();
    if campaign_id.is_empty() {
        return Err(ConfigError::Validation(
            "campaign-id cannot be empty".to_string(),
        ));
    }

    // The id is spliced into the request path
    if campaign_id.contains(['/', '?', '#']) {
        return Err(ConfigError::Validation(format!(
            "campaign-id contains characters not allowed in a path segment: '{}'",
            config.campaign_id
        )));
    }

    if config.access_token().trim().is_empty() {
        return Err(ConfigError::MissingCredential);
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1 when set".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.feed_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "feed-timeout-secs must be >= 1, got {}",
            config.feed_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate app name: non-empty, alphanumeric + hyphens only
    if config.app_name.is_empty() {
        return Err(ConfigError::Validation(
            "app-name cannot be empty".to_string(),
        ));
    }

    if !config
        .app_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "app-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.app_name
        )));
    }

    if config.app_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "app-version cannot be empty".to_string(),
        ));
    }

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "Invalid bind-address '{}': {}",
            config.bind_address, e
        ))
    })?;

    validate_origin(&config.allowed_origin)
}

/// Validates that an origin is a bare scheme://host[:port]
///
/// Browsers send the `Origin` header without a path or trailing slash, and
/// the relay compares it byte for byte.
fn validate_origin(origin: &str) -> Result<(), ConfigError> {
    let url = Url::parse(origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid allowed-origin: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "allowed-origin must use http or https, got '{}'",
            origin
        )));
    }

    if origin.ends_with('/') || url.path() != "/" || url.query().is_some() {
        return Err(ConfigError::Validation(format!(
            "allowed-origin must not contain a path, query, or trailing slash, got '{}'",
            origin
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact-email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
