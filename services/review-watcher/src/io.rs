//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request with extra headers and query parameters
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse>;

    /// Send a POST request with form-encoded body
    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::WatcherError::Http(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

/// Scheme and host of a URL, safe to log when the path carries a secret
fn origin(url: &str) -> String {
    reqwest::Url::parse(url)
        .map(|u| u.origin().ascii_serialization())
        .unwrap_or_else(|_| "<invalid url>".to_string())
}

/// Error text with its kind and full source chain, without the URL
fn describe(e: reqwest::Error) -> String {
    let e = e.without_url();
    let kind = if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };

    let mut text = format!("{}: {}", kind, e);
    let mut source = std::error::Error::source(&e);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        let target = origin(url);
        tracing::debug!("GET {} {:?}", target, query);
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| {
            crate::WatcherError::Http(format!("GET {} failed: {}", target, describe(e)))
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            crate::WatcherError::Http(format!("Reading response body: {}", describe(e)))
        })?;

        tracing::debug!("GET {} -> {} ({} bytes)", target, status, body.len());
        Ok(HttpResponse { status, body })
    }

    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse> {
        let target = origin(url);
        tracing::debug!("POST {}", target);
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                crate::WatcherError::Http(format!("POST {} failed: {}", target, describe(e)))
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            crate::WatcherError::Http(format!("Reading response body: {}", describe(e)))
        })?;

        tracing::debug!("POST {} -> {} ({} bytes)", target, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
