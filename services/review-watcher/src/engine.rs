//! Poll loop: fetches statuses, dedups messages, and dispatches notifications

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::error::{CycleError, ValidationError};
use crate::message::{format_failure, format_status};
use crate::notifier::Notifier;
use crate::source::{StatusRecord, StatusSource};
use crate::state::{NotificationState, FAILURE_STREAK_WARNING};
use crate::validator::extract_latest;

/// What a single poll cycle ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was handed to the notifier
    Notified { message: String, delivered: bool },
    /// The status message matched the last one sent
    Unchanged,
    /// No homework in the polling window
    Quiet,
    /// Fetch or validation failed; `notified` is false for a repeated error,
    /// `delivered` is true only if the error message reached the channel
    Failed {
        error: CycleError,
        notified: bool,
        delivered: bool,
    },
}

/// Owns the cursor and dedup state, and drives one cycle at a time
#[derive(Debug)]
pub struct PollLoop {
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
    cursor: u64,
    state: NotificationState,
    cancel: CancellationToken,
}

impl PollLoop {
    pub fn new(
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
        interval: Duration,
        cursor: u64,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            notifier,
            interval,
            cursor,
            state: NotificationState::new(),
            cancel,
        }
    }

    /// Start of the next polling window (Unix seconds)
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// Poll until the cancellation token is triggered
    pub async fn run(&mut self) {
        tracing::info!(
            "Polling every {:?} starting from {}",
            self.interval,
            self.cursor
        );

        loop {
            let outcome = self.run_cycle().await;
            tracing::debug!("Cycle finished: {:?} (cursor={})", outcome, self.cursor);

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Poll loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one fetch, validate, format, notify pass
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.check().await {
            Ok(Some(record)) => {
                self.state.note_recovery();
                self.deliver_status(&record).await
            }
            Ok(None) => {
                self.state.note_recovery();
                tracing::info!("No homework updates since {}", self.cursor);
                CycleOutcome::Quiet
            }
            Err(error) => self.handle_failure(error).await,
        }
    }

    async fn check(&mut self) -> Result<Option<StatusRecord>, CycleError> {
        let payload = self.source.fetch(self.cursor).await?;
        self.advance_cursor(payload.current_date());

        match extract_latest(&payload) {
            Ok(record) => Ok(Some(record)),
            Err(ValidationError::NoEntries) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn advance_cursor(&mut self, server_time: Option<u64>) {
        match server_time {
            Some(now) if now > self.cursor => self.cursor = now,
            Some(now) => {
                tracing::debug!("Server time {} not ahead of cursor {}", now, self.cursor)
            }
            None => tracing::debug!("Response has no current_date, keeping cursor"),
        }
    }

    async fn deliver_status(&mut self, record: &StatusRecord) -> CycleOutcome {
        let message = format_status(record);
        if !self.state.record_success(&message) {
            tracing::debug!("Status of '{}' unchanged, not notifying", record.name);
            return CycleOutcome::Unchanged;
        }

        let delivered = self.notify(&message).await;
        CycleOutcome::Notified { message, delivered }
    }

    async fn handle_failure(&mut self, error: CycleError) -> CycleOutcome {
        let message = format_failure(&error);
        tracing::error!("{}", message);

        let streak = self.state.note_failure();
        if streak == FAILURE_STREAK_WARNING {
            tracing::warn!("{} consecutive poll cycles have failed", streak);
        }

        let notified = self.state.record_error(&message);
        let delivered = notified && self.notify(&message).await;

        CycleOutcome::Failed {
            error,
            notified,
            delivered,
        }
    }

    async fn notify(&self, message: &str) -> bool {
        match self.notifier.send(message).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Notification via '{}' failed: {}",
                    self.notifier.type_name(),
                    e
                );
                false
            }
        }
    }
}

/// Current time as Unix seconds
pub fn current_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
