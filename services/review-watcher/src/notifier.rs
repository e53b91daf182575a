//! Notifier trait for delivering messages

use async_trait::async_trait;

use crate::error::NotifyError;

/// Trait for sending notifications to a single destination
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Deliver a message
    async fn send(&self, message: &str) -> Result<(), NotifyError>;
}
