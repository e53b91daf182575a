//! Review watcher - homework review status notifications
//!
//! Polls the homework review API, detects status changes, and sends Telegram messages.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod message;
pub mod notifier;
pub mod practicum;
pub mod source;
pub mod state;
pub mod telegram;
pub mod validator;

pub use config::{load_config, Config};
pub use error::{Result, WatcherError};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::engine::PollLoop;
use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::source::StatusSource;
use crate::telegram::TelegramNotifier;

/// Run the watcher with the given configuration, starting the window at `from_date`
pub async fn run(config: Config, from_date: u64) -> Result<()> {
    config.check_required()?;

    let http: Arc<dyn io::HttpClient> =
        Arc::new(ReqwestHttpClient::new(config.practicum.request_timeout)?);
    let cancel = CancellationToken::new();

    let source: Arc<dyn StatusSource> =
        Arc::new(PracticumClient::new(&config.practicum, Arc::clone(&http)));
    let notifier: Arc<dyn Notifier> =
        Arc::new(TelegramNotifier::new(&config.telegram, Arc::clone(&http)));

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    let mut poll_loop = PollLoop::new(
        source,
        notifier,
        config.polling.interval,
        from_date,
        cancel,
    );

    tracing::info!("Review watcher started");
    poll_loop.run().await;
    tracing::info!("Review watcher stopped");

    Ok(())
}
