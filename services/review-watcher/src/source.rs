//! Status source trait and review status types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FetchError;

/// Review state of a homework submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Value used by the review API
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(crate::error::ValidationError::UnknownStatus(
                other.to_string(),
            )),
        }
    }
}

/// Validated name and status of the most recent homework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub name: String,
    pub status: HomeworkStatus,
}

/// Decoded body of a status response, not yet validated
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPayload(serde_json::Value);

impl StatusPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Server time reported alongside the entries, if any
    pub fn current_date(&self) -> Option<u64> {
        self.0.get("current_date").and_then(serde_json::Value::as_u64)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for StatusPayload {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value)
    }
}

/// Trait for fetching review statuses updated since a cursor
#[async_trait]
pub trait StatusSource: Send + Sync + fmt::Debug {
    /// Fetch every status change at or after `from_date` (Unix seconds)
    async fn fetch(&self, from_date: u64) -> Result<StatusPayload, FetchError>;
}
