//! Client for the homework review status endpoint

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::PracticumConfig;
use crate::error::FetchError;
use crate::io::HttpClient;
use crate::source::{StatusPayload, StatusSource};

/// Fetches homework statuses with an OAuth token
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &PracticumConfig, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", config.token),
            http,
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: u64) -> Result<StatusPayload, FetchError> {
        let from_date = from_date.to_string();
        tracing::debug!("Fetching statuses from {} since {}", self.endpoint, from_date);

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        if !response.is_success() {
            tracing::debug!(
                "Non-success response from {}: status={}",
                self.endpoint,
                response.status
            );
            return Err(FetchError::BadStatus(response.status));
        }

        let value: serde_json::Value = serde_json::from_str(&response.body)
            .map_err(|e| FetchError::MalformedBody(e.to_string()))?;
        Ok(StatusPayload::new(value))
    }
}
