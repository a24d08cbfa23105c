//! Configuration module for Poetry-Relay
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! The access token may be kept out of the file and supplied through the
//! `PATREON_ACCESS_TOKEN` environment variable instead.
//!
//! # Example
//!
//! ```no_run
//! use poetry_relay::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("relay.toml")).unwrap();
//! println!("Relaying campaign {}", config.api.campaign_id);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ApiConfig, Config, ServerConfig, UserAgentConfig, DEFAULT_API_BASE_URL, DEFAULT_BIND_ADDRESS,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, load_config, load_config_with_hash, parse_config,
    ACCESS_TOKEN_ENV,
};
pub use validation::validate;
