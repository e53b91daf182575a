//! In-memory dedup state for the poll loop

/// Consecutive failed cycles after which a warning is logged
pub const FAILURE_STREAK_WARNING: u32 = 5;

/// Last message sent per category, plus the current failure streak
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub last_success_message: Option<String>,
    pub last_error_message: Option<String>,
    pub consecutive_failures: u32,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a status message, returning true if it differs from the last one
    pub fn record_success(&mut self, message: &str) -> bool {
        replace_if_changed(&mut self.last_success_message, message)
    }

    /// Record an error message, returning true if it differs from the last one
    pub fn record_error(&mut self, message: &str) -> bool {
        replace_if_changed(&mut self.last_error_message, message)
    }

    /// Count a failed cycle and return the new streak length
    pub fn note_failure(&mut self) -> u32 {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.consecutive_failures
    }

    /// Reset the failure streak after a cycle that completed
    pub fn note_recovery(&mut self) {
        self.consecutive_failures = 0;
    }
}

fn replace_if_changed(slot: &mut Option<String>, message: &str) -> bool {
    if slot.as_deref() == Some(message) {
        return false;
    }
    *slot = Some(message.to_string());
    true
}
