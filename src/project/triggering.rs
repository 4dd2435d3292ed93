//! # Event-triggering flags.
//!
//! A host temporarily silences categories of project events (for example while
//! it reloads a project file) by setting [`EventTriggering`] flags.
//!
//! ```text
//! TRIGGER_ALL                       → everything is broadcast
//! DO_NOT_TRIGGER_HIERARCHY_EVENTS   → file opened / closing are skipped
//! DO_NOT_TRIGGER_TRACKER_EVENTS     → item add / remove are skipped
//! ```
//! Configuration events are never suppressed.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Category an event belongs to for suppression purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// Project file open/close.
    Hierarchy,
    /// Item tracking (add/remove).
    Tracker,
    /// Active configuration changes; never suppressed.
    Configuration,
}

/// Bit set of suppressed event categories.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventTriggering(u8);

impl EventTriggering {
    /// Trigger every event.
    pub const TRIGGER_ALL: Self = Self(0);
    /// Skip hierarchy events.
    pub const DO_NOT_TRIGGER_HIERARCHY_EVENTS: Self = Self(1);
    /// Skip tracker events.
    pub const DO_NOT_TRIGGER_TRACKER_EVENTS: Self = Self(2);

    const ALL_BITS: u8 = 0b11;

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds flags from raw bits; unknown bits are dropped.
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    /// True if every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if events of `category` must not be broadcast.
    #[must_use]
    pub fn suppresses(self, category: EventCategory) -> bool {
        match category {
            EventCategory::Hierarchy => self.contains(Self::DO_NOT_TRIGGER_HIERARCHY_EVENTS),
            EventCategory::Tracker => self.contains(Self::DO_NOT_TRIGGER_TRACKER_EVENTS),
            EventCategory::Configuration => false,
        }
    }
}

impl BitOr for EventTriggering {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EventTriggering {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for EventTriggering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("TRIGGER_ALL");
        }
        let mut names = Vec::new();
        if self.contains(Self::DO_NOT_TRIGGER_HIERARCHY_EVENTS) {
            names.push("DO_NOT_TRIGGER_HIERARCHY_EVENTS");
        }
        if self.contains(Self::DO_NOT_TRIGGER_TRACKER_EVENTS) {
            names.push("DO_NOT_TRIGGER_TRACKER_EVENTS");
        }
        f.write_str(&names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_all_suppresses_nothing() {
        let t = EventTriggering::TRIGGER_ALL;
        assert!(!t.suppresses(EventCategory::Hierarchy));
        assert!(!t.suppresses(EventCategory::Tracker));
        assert!(!t.suppresses(EventCategory::Configuration));
    }

    #[test]
    fn test_flags_combine() {
        let t = EventTriggering::DO_NOT_TRIGGER_HIERARCHY_EVENTS
            | EventTriggering::DO_NOT_TRIGGER_TRACKER_EVENTS;
        assert!(t.suppresses(EventCategory::Hierarchy));
        assert!(t.suppresses(EventCategory::Tracker));
        assert!(!t.suppresses(EventCategory::Configuration));
        assert_eq!(t.bits(), 3);
        assert_eq!(
            format!("{t:?}"),
            "DO_NOT_TRIGGER_HIERARCHY_EVENTS | DO_NOT_TRIGGER_TRACKER_EVENTS"
        );
    }

    #[test]
    fn test_unknown_bits_are_truncated() {
        assert_eq!(
            EventTriggering::from_bits_truncate(0xFE),
            EventTriggering::DO_NOT_TRIGGER_TRACKER_EVENTS
        );
    }
}
