//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::TelegramConfig;
use crate::error::NotifyError;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Sends messages to one chat through a Telegram bot
pub struct TelegramNotifier {
    send_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig, http: Arc<dyn HttpClient>) -> Self {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            config.api_url.trim_end_matches('/'),
            config.token
        );

        tracing::debug!("Created TelegramNotifier for chat {}", config.chat_id);

        Self {
            send_url,
            chat_id: config.chat_id.clone(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", message)];

        tracing::debug!("Sending Telegram message to chat {}", self.chat_id);

        let response = self
            .http
            .post_form(&self.send_url, &params)
            .await
            .map_err(|e| NotifyError::Unreachable(e.to_string()))?;

        if !response.is_success() {
            return Err(NotifyError::Rejected {
                status: response.status,
                body: response.body,
            });
        }

        tracing::info!(
            "Message sent. Chat - {} Message - {}",
            self.chat_id,
            message
        );
        Ok(())
    }
}
