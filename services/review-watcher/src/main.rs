//! Review watcher CLI
//!
//! Command-line interface for the homework review status watcher.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use review_watcher::config::load_env_file;
use review_watcher::engine::current_epoch_secs;
use review_watcher::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "review-watcher")]
#[command(about = "Homework review status watcher with Telegram notifications")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a .env file with credentials (defaults to searching for .env)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Seconds between polls (overrides config file)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval_seconds: Option<u64>,

    /// Unix timestamp to start the first polling window from (defaults to now)
    #[arg(long)]
    from_date: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, env_file={:?}, interval_seconds={:?}, from_date={:?}, log_level={:?}",
        args.config,
        args.env_file,
        args.interval_seconds,
        args.from_date,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    load_env_file(args.env_file.as_deref());
    config.resolve_secrets();

    if let Some(seconds) = args.interval_seconds {
        config.polling.interval = Duration::from_secs(seconds);
    }

    if let Err(e) = config.check_required() {
        tracing::error!("Cannot start review watcher: {}", e);
        return Err(e.into());
    }

    tracing::info!("Starting review watcher");
    tracing::debug!("Configuration: {:?}", config);

    let from_date = args.from_date.unwrap_or_else(current_epoch_secs);
    review_watcher::run(config, from_date).await?;

    Ok(())
}
