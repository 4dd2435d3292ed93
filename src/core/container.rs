//! # Connection point container.
//!
//! [`ConnectionPointContainer`] owns the identity → connection point map of one
//! host object.
//!
//! ## Architecture
//! ```text
//! ContainerBuilder ── register_event_source::<S>(source) ──► ConnectionPoint<S>
//!        │             (DuplicateRegistration on repeat)
//!        └── build() ──► ConnectionPointContainer
//!                            ├─► find_connection_point(iid)   → Arc<dyn Connectable> | NotFound
//!                            ├─► connection_point::<S>()      → Arc<ConnectionPoint<S>>
//!                            ├─► enumerate_connection_points() → snapshot, registration order
//!                            └─► disconnect_all()              → drop every subscription
//! ```
//!
//! ## Rules
//! - The identity set is immutable after `build()`; the map needs no lock.
//! - Each point carries its own lock for its subscriptions.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::core::Config;
use crate::error::{ConnectionError, Result};
use crate::points::{
    Connectable, ConnectionPoint, EnumConnectionPoints, Enumerator, Iid, Interface,
};

use super::builder::ContainerBuilder;

/// Immutable set of connection points keyed by interface identity.
pub struct ConnectionPointContainer {
    cfg: Config,
    points: Arc<[Arc<dyn Connectable>]>,
    index: HashMap<Iid, usize>,
}

impl ConnectionPointContainer {
    /// Returns a builder for a container using `cfg`.
    #[must_use]
    pub fn builder(cfg: Config) -> ContainerBuilder {
        ContainerBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: Config,
        points: Vec<Arc<dyn Connectable>>,
        index: HashMap<Iid, usize>,
    ) -> Self {
        Self {
            cfg,
            points: points.into(),
            index,
        }
    }

    /// Looks up the connection point serving `iid`.
    ///
    /// # Errors
    /// [`ConnectionError::NotFound`] if no point is registered for `iid`.
    pub fn find_connection_point(&self, iid: Iid) -> Result<Arc<dyn Connectable>> {
        self.index
            .get(&iid)
            .map(|&i| Arc::clone(&self.points[i]))
            .ok_or(ConnectionError::NotFound { iid })
    }

    /// Typed lookup of the point serving contract `S`.
    ///
    /// # Errors
    /// - [`ConnectionError::NotFound`] if `S::IID` is not registered.
    /// - [`ConnectionError::IncompatibleSink`] if the registered point serves a
    ///   different Rust type under the same identity.
    pub fn connection_point<S: Interface + ?Sized>(&self) -> Result<Arc<ConnectionPoint<S>>> {
        self.find_connection_point(S::IID)?
            .into_any()
            .downcast::<ConnectionPoint<S>>()
            .map_err(|_| ConnectionError::IncompatibleSink {
                iid: S::IID,
                expected: S::NAME,
            })
    }

    /// Snapshot enumerator over all points, in registration order.
    #[must_use]
    pub fn enumerate_connection_points(&self) -> EnumConnectionPoints {
        Enumerator::new(Arc::clone(&self.points))
    }

    /// True if a point is registered for `iid`.
    #[must_use]
    pub fn contains(&self, iid: Iid) -> bool {
        self.index.contains_key(&iid)
    }

    /// Registered identities, in registration order.
    pub fn iids(&self) -> impl Iterator<Item = Iid> + '_ {
        self.points.iter().map(|p| p.iid())
    }

    /// Number of connection points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no connection point is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Configuration the points were built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Drops every subscription on every point; returns the total removed.
    ///
    /// Hosts call this on shutdown so no sink stays registered.
    pub fn disconnect_all(&self) -> usize {
        let removed: usize = self.points.iter().map(|p| p.disconnect_all()).sum();
        debug!(removed, points = self.points.len(), "container disconnected");
        removed
    }
}

impl fmt::Debug for ConnectionPointContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionPointContainer")
            .field("iids", &self.iids().collect::<Vec<_>>())
            .field("config", &self.cfg)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::{NullSource, Unknown};

    trait Alpha: Send + Sync {
        fn alpha(&self) -> u8;
    }
    impl Interface for dyn Alpha {
        const IID: Iid = Iid::from_u128(0xA1);
        const NAME: &'static str = "Alpha";
    }

    trait Beta: Send + Sync {}
    impl Interface for dyn Beta {
        const IID: Iid = Iid::from_u128(0xB2);
        const NAME: &'static str = "Beta";
    }

    struct Impostor;
    impl Interface for Impostor {
        const IID: Iid = Iid::from_u128(0xA1);
        const NAME: &'static str = "Impostor";
    }

    struct One;
    impl Alpha for One {
        fn alpha(&self) -> u8 {
            1
        }
    }

    fn alpha_only() -> ConnectionPointContainer {
        ConnectionPointContainer::builder(Config::default())
            .register_event_source::<dyn Alpha>(Arc::new(NullSource))
            .unwrap()
            .build()
    }

    #[test]
    fn test_find_registered_and_unregistered() {
        let c = alpha_only();
        let point = c.find_connection_point(Iid::from_u128(0xA1)).unwrap();
        assert_eq!(point.name(), "Alpha");

        let err = c.find_connection_point(Iid::from_u128(0xB2)).err().unwrap();
        assert!(matches!(err, ConnectionError::NotFound { .. }));
        assert!(err.is_not_found());
        assert!(!c.contains(Iid::from_u128(0xB2)));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let result = ConnectionPointContainer::builder(Config::default())
            .register_event_source::<dyn Alpha>(Arc::new(NullSource))
            .unwrap()
            .register_event_source::<dyn Alpha>(Arc::new(NullSource));
        assert!(matches!(
            result,
            Err(ConnectionError::DuplicateRegistration { .. })
        ));
    }

    #[test]
    fn test_typed_lookup_and_mismatch() {
        let c = alpha_only();
        let typed = c.connection_point::<dyn Alpha>().unwrap();
        typed.advise(Arc::new(One)).unwrap();
        let report = typed
            .notify(|s| {
                assert_eq!(s.alpha(), 1);
                Ok(())
            })
            .unwrap();
        assert_eq!(report.delivered, 1);

        assert!(matches!(
            c.connection_point::<Impostor>(),
            Err(ConnectionError::IncompatibleSink { expected: "Impostor", .. })
        ));
        assert!(matches!(
            c.connection_point::<dyn Beta>(),
            Err(ConnectionError::NotFound { .. })
        ));
    }

    #[test]
    fn test_enumerate_points_in_registration_order() {
        let c = ConnectionPointContainer::builder(Config::default())
            .register_event_source::<dyn Beta>(Arc::new(NullSource))
            .unwrap()
            .register_event_source::<dyn Alpha>(Arc::new(NullSource))
            .unwrap()
            .build();

        let mut e = c.enumerate_connection_points();
        let names: Vec<_> = e.clone().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Beta", "Alpha"]);

        assert!(e.skip_items(2));
        assert!(e.next().is_none());
        e.reset();
        assert_eq!(e.remaining(), 2);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_disconnect_all_leaves_nothing_registered() {
        let c = ConnectionPointContainer::builder(Config::default())
            .register_event_source::<dyn Alpha>(Arc::new(NullSource))
            .unwrap()
            .register_event_source::<dyn Beta>(Arc::new(NullSource))
            .unwrap()
            .build();

        let alpha = c.find_connection_point(Iid::from_u128(0xA1)).unwrap();
        alpha.advise_unknown(&Unknown::of::<dyn Alpha>(Arc::new(One))).unwrap();
        alpha.advise_unknown(&Unknown::of::<dyn Alpha>(Arc::new(One))).unwrap();

        assert_eq!(c.disconnect_all(), 2);
        assert!(c.enumerate_connection_points().all(|p| p.connection_count() == 0));
    }
}
