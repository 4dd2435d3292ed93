//! # Untyped sink objects.
//!
//! [`Unknown`] is a cheap-to-clone capability table: one entry per contract the
//! object implements, keyed by [`Iid`]. Connection points query it for their own
//! contract when a sink is advised through the type-erased
//! [`Connectable`](crate::Connectable) surface.
//!
//! ```text
//! Unknown ─┬─ {IID_A} → Arc<dyn A>
//!          └─ {IID_B} → Arc<dyn B>
//!
//! query::<dyn A>() → Some(Arc<dyn A>)
//! query::<dyn C>() → None            (IncompatibleSink on advise)
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::{Iid, Interface};

type Capability = Arc<dyn Any + Send + Sync>;

/// Shareable object exposing zero or more sink contracts.
#[derive(Clone)]
pub struct Unknown {
    entries: Arc<[(Iid, Capability)]>,
}

impl Unknown {
    /// Object that implements nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Object implementing exactly one contract.
    #[must_use]
    pub fn of<S: Interface + ?Sized>(sink: Arc<S>) -> Self {
        Self::new().with::<S>(sink)
    }

    /// Adds (or replaces) the implementation of contract `S`.
    #[must_use]
    pub fn with<S: Interface + ?Sized>(self, sink: Arc<S>) -> Self {
        let mut entries: Vec<(Iid, Capability)> = self
            .entries
            .iter()
            .filter(|(iid, _)| *iid != S::IID)
            .cloned()
            .collect();
        let capability: Capability = Arc::new(sink);
        entries.push((S::IID, capability));
        Self {
            entries: entries.into(),
        }
    }

    /// Returns the implementation of contract `S`, if present.
    #[must_use]
    pub fn query<S: Interface + ?Sized>(&self) -> Option<Arc<S>> {
        self.entries
            .iter()
            .find(|(iid, _)| *iid == S::IID)
            .and_then(|(_, cap)| cap.downcast_ref::<Arc<S>>())
            .cloned()
    }

    /// True if an implementation is registered under `iid`.
    #[must_use]
    pub fn supports(&self, iid: Iid) -> bool {
        self.entries.iter().any(|(i, _)| *i == iid)
    }

    /// Identities this object implements, in insertion order.
    pub fn interfaces(&self) -> impl Iterator<Item = Iid> + '_ {
        self.entries.iter().map(|(iid, _)| *iid)
    }
}

impl Default for Unknown {
    fn default() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }
}

impl fmt::Debug for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.interfaces()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Ping: Send + Sync {
        fn ping(&self) -> &'static str;
    }
    impl Interface for dyn Ping {
        const IID: Iid = Iid::from_u128(0x10);
        const NAME: &'static str = "Ping";
    }

    trait Pong: Send + Sync {
        fn pong(&self) -> u8;
    }
    impl Interface for dyn Pong {
        const IID: Iid = Iid::from_u128(0x20);
        const NAME: &'static str = "Pong";
    }

    struct Both;
    impl Ping for Both {
        fn ping(&self) -> &'static str {
            "ping"
        }
    }
    impl Pong for Both {
        fn pong(&self) -> u8 {
            7
        }
    }

    #[test]
    fn test_query_returns_registered_contracts_only() {
        let obj = Arc::new(Both);
        let unk = Unknown::of::<dyn Ping>(obj.clone());

        assert_eq!(unk.query::<dyn Ping>().map(|p| p.ping()), Some("ping"));
        assert!(unk.query::<dyn Pong>().is_none());

        let unk = unk.with::<dyn Pong>(obj);
        assert_eq!(unk.query::<dyn Pong>().map(|p| p.pong()), Some(7));
        assert_eq!(
            unk.interfaces().collect::<Vec<_>>(),
            vec![Iid::from_u128(0x10), Iid::from_u128(0x20)]
        );
    }

    #[test]
    fn test_with_replaces_existing_entry() {
        let unk = Unknown::of::<dyn Ping>(Arc::new(Both)).with::<dyn Ping>(Arc::new(Both));
        assert_eq!(unk.interfaces().count(), 1);
        assert!(unk.supports(<dyn Ping as Interface>::IID));
        assert!(!unk.supports(<dyn Pong as Interface>::IID));
    }

    #[test]
    fn test_empty_object_supports_nothing() {
        assert!(Unknown::new().query::<dyn Ping>().is_none());
    }
}
