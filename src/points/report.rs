//! Broadcast outcome.

use crate::error::SinkError;

use super::Cookie;

/// One sink that failed during a best-effort broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkFailure {
    /// Cookie of the failing sink.
    pub cookie: Cookie,
    /// What it reported (or the caught panic).
    pub error: SinkError,
}

/// Result of one `notify` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyReport {
    /// Sinks that handled the notification.
    pub delivered: usize,
    /// Sinks that failed, in registration order.
    pub failures: Vec<SinkFailure>,
}

impl NotifyReport {
    /// Number of sinks the broadcast reached.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }

    /// True if no sink failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
