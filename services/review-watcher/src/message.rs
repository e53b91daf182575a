//! Notification text

use crate::source::{HomeworkStatus, StatusRecord};

/// Fixed verdict text for a review status
pub fn verdict(status: HomeworkStatus) -> &'static str {
    match status {
        HomeworkStatus::Approved => "Review complete: the reviewer liked everything. ",
        HomeworkStatus::Reviewing => "Taken up for review by a reviewer.",
        HomeworkStatus::Rejected => "Review complete: the reviewer has comments.",
    }
}

/// Render the status-change notification for a record
pub fn format_status(record: &StatusRecord) -> String {
    format!(
        "Changed review status for \"{}\". {}",
        record.name,
        verdict(record.status)
    )
}

/// Render the error-path notification for a failed cycle
pub fn format_failure(cause: &impl std::fmt::Display) -> String {
    format!("Program failure: {}", cause)
}
