//! Error types for the review watcher

/// Errors that can occur while starting the watcher
#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for watcher startup operations
pub type Result<T> = std::result::Result<T, WatcherError>;

/// Failure to obtain a status payload from the review API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("status endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("status endpoint returned HTTP {0}")]
    BadStatus(u16),

    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// A payload that does not carry a usable status record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("response has no '{0}' field")]
    MissingField(String),

    #[error("field '{field}' is not {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("no homework entries in the polling window")]
    NoEntries,

    #[error("undocumented homework status '{0}'")]
    UnknownStatus(String),
}

/// Failure to deliver a message to the notification channel
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    #[error("notification channel unreachable: {0}")]
    Unreachable(String),

    #[error("notification rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Anything that sends a poll cycle down the error path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
