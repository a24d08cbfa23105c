use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable that overrides `api.access-token`
pub const ACCESS_TOKEN_ENV: &str = "PATREON_ACCESS_TOKEN";

/// Loads and parses a configuration file from the given path
///
/// The process environment is consulted for [`ACCESS_TOKEN_ENV`] before
/// validation, so a file without a token is valid when the variable is set.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content, |key| std::env::var(key).ok())?;
    tracing::debug!(
        "Loaded config for campaign {} from {}",
        config.api.campaign_id,
        path.display()
    );
    Ok(config)
}

/// Parses configuration text, applying overrides from `lookup` before validating
///
/// `lookup` resolves environment variable names; tests pass a closure instead
/// of touching the real process environment.
pub fn parse_config<F>(content: &str, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: Config = toml::from_str(content)?;
    apply_env_overrides(&mut config, lookup);
    validate(&config)?;
    Ok(config)
}

/// Replaces file values with environment values where the environment has them
///
/// Empty environment values are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup(ACCESS_TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
        tracing::debug!("Using access token from {}", ACCESS_TOKEN_ENV);
        config.api.access_token = Some(token.trim().to_string());
    }
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so deployments can tell which config a relay runs with.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
