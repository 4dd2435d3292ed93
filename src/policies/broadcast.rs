//! # Broadcast failure policies.
//!
//! [`BroadcastPolicy`] decides what `notify` does when one sink fails or panics.
//!
//! - [`BroadcastPolicy::BestEffort`] every sink is still notified; failures are collected (default).
//! - [`BroadcastPolicy::FailFast`] the first failure aborts the broadcast and is returned as an error.
//!
//! ## Choosing the right policy
//!
//! **Independent observers** (loggers, UI refresh, caches):
//! ```text
//! BroadcastPolicy::BestEffort   → one broken sink never starves the others
//! ```
//!
//! **Veto-style contracts** (a sink may cancel the operation):
//! ```text
//! BroadcastPolicy::FailFast     → first refusal stops the broadcast, caller sees it
//! ```

/// Policy controlling how a broadcast reacts to a failing sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BroadcastPolicy {
    /// Notify everyone; report failures afterwards (default).
    #[default]
    BestEffort,
    /// Stop at the first failure and return it.
    FailFast,
}

impl BroadcastPolicy {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BroadcastPolicy::BestEffort => "best_effort",
            BroadcastPolicy::FailFast => "fail_fast",
        }
    }

    /// True if a failure must stop the broadcast.
    #[inline]
    pub fn aborts_on_failure(&self) -> bool {
        matches!(self, BroadcastPolicy::FailFast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_best_effort() {
        assert_eq!(BroadcastPolicy::default(), BroadcastPolicy::BestEffort);
        assert!(!BroadcastPolicy::default().aborts_on_failure());
        assert!(BroadcastPolicy::FailFast.aborts_on_failure());
    }
}
