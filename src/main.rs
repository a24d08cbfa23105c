//! Poetry-Relay main entry point
//!
//! This is the command-line interface for the Poetry-Relay feed server.

use anyhow::Context;
use clap::Parser;
use poetry_relay::config::{load_config_with_hash, Config};
use poetry_relay::feed::get_poetry_feed_with_timeout;
use poetry_relay::server::serve;
use poetry_relay::upstream::{user_agent_string, PostFetcher};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Poetry-Relay: serves a creator's #poetry posts as JSON
///
/// Poetry-Relay fetches every post of a Patreon campaign, keeps those
/// tagged #poetry, tidies their markup, and serves them to one allowed
/// web origin without exposing the access token to browsers.
#[derive(Parser, Debug)]
#[command(name = "poetry-relay")]
#[command(version = "1.0.0")]
#[command(about = "Relays tagged poetry posts as JSON", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show it without starting the server
    #[arg(long, conflicts_with = "fetch_once")]
    dry_run: bool,

    /// Fetch the feed once, print it as JSON, and exit
    #[arg(long, conflicts_with = "dry_run")]
    fetch_once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A .env file may carry PATREON_ACCESS_TOKEN
    dotenvy::dotenv().ok();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.fetch_once {
        handle_fetch_once(&config).await?;
    } else {
        serve(&config).await.context("Server failed")?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("poetry_relay=info,tower_http=info,warn"),
            1 => EnvFilter::new("poetry_relay=debug,tower_http=debug,info"),
            2 => EnvFilter::new("poetry_relay=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles --dry-run: prints the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Poetry-Relay Dry Run ===\n");

    println!("Upstream:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Campaign: {}", config.api.campaign_id);
    println!("  Access token: {}", mask_token(config.api.access_token()));
    match config.api.max_pages {
        Some(limit) => println!("  Max pages: {}", limit),
        None => println!("  Max pages: unbounded"),
    }
    println!("  Request timeout: {}s", config.api.request_timeout_secs);
    println!("  Feed timeout: {}s", config.api.feed_timeout_secs);

    println!("\nUser Agent:");
    println!("  {}", user_agent_string(&config.user_agent));

    println!("\nServer:");
    println!("  Bind address: {}", config.server.bind_address);
    println!("  Allowed origin: {}", config.server.allowed_origin);

    println!("\n✓ Configuration is valid");
}

/// Handles --fetch-once: prints the current feed to stdout
async fn handle_fetch_once(config: &Config) -> anyhow::Result<()> {
    let fetcher = PostFetcher::from_config(config)?;
    let poems = get_poetry_feed_with_timeout(
        &fetcher,
        &config.api.campaign_id,
        Duration::from_secs(config.api.feed_timeout_secs),
    )
    .await?;

    println!("{}", serde_json::to_string_pretty(&poems)?);
    Ok(())
}

fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    format!("{}… ({} chars)", visible, token.chars().count())
}
