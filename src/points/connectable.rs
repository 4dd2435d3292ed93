//! # Type-erased connection points.
//!
//! [`Connectable`] is the object-safe face of a [`ConnectionPoint<S>`]: what a
//! container hands out from `find_connection_point`. Sinks arrive as
//! [`Unknown`] objects and are queried for the point's contract.

use std::any::Any;
use std::sync::Arc;

use crate::error::{ConnectionError, Result};

use super::{
    Connection, ConnectionPoint, Cookie, EnumConnections, Enumerator, Iid, Interface, Unknown,
};

/// Untyped access to one connection point.
pub trait Connectable: Send + Sync + 'static {
    /// Contract identity served by this point.
    fn iid(&self) -> Iid;

    /// Contract name (for logs/errors).
    fn name(&self) -> &'static str;

    /// Queries `sink` for this point's contract and advises it.
    ///
    /// # Errors
    /// [`ConnectionError::IncompatibleSink`] if `sink` does not implement the contract.
    fn advise_unknown(&self, sink: &Unknown) -> Result<Cookie>;

    /// Removes the subscription named by `cookie`.
    fn unadvise(&self, cookie: Cookie) -> Result<()>;

    /// Snapshot enumerator; each sink is wrapped as an [`Unknown`].
    fn enumerate_unknown(&self) -> EnumConnections<Unknown>;

    /// Number of live subscriptions.
    fn connection_count(&self) -> usize;

    /// Unadvises every sink; returns how many were removed.
    fn disconnect_all(&self) -> usize;

    /// Upcast used for typed lookups.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<S: Interface + ?Sized> Connectable for ConnectionPoint<S> {
    fn iid(&self) -> Iid {
        S::IID
    }

    fn name(&self) -> &'static str {
        S::NAME
    }

    fn advise_unknown(&self, sink: &Unknown) -> Result<Cookie> {
        let typed = sink.query::<S>().ok_or(ConnectionError::IncompatibleSink {
            iid: S::IID,
            expected: S::NAME,
        })?;
        self.advise(typed)
    }

    fn unadvise(&self, cookie: Cookie) -> Result<()> {
        ConnectionPoint::unadvise(self, cookie)
    }

    fn enumerate_unknown(&self) -> EnumConnections<Unknown> {
        let items: Vec<Connection<Unknown>> = self
            .snapshot()
            .iter()
            .map(|c| Connection {
                cookie: c.cookie,
                sink: Unknown::of::<S>(Arc::clone(&c.sink)),
            })
            .collect();
        Enumerator::new(items.into())
    }

    fn connection_count(&self) -> usize {
        self.len()
    }

    fn disconnect_all(&self) -> usize {
        ConnectionPoint::disconnect_all(self)
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }
    impl Interface for dyn Greeter {
        const IID: Iid = Iid::from_u128(0xB0);
        const NAME: &'static str = "Greeter";
    }

    trait Other: Send + Sync {}
    impl Interface for dyn Other {
        const IID: Iid = Iid::from_u128(0xB1);
        const NAME: &'static str = "Other";
    }

    struct Hello;
    impl Greeter for Hello {
        fn greet(&self) -> String {
            "hello".into()
        }
    }
    impl Other for Hello {}

    fn erased() -> Arc<dyn Connectable> {
        Arc::new(ConnectionPoint::<dyn Greeter>::detached())
    }

    #[test]
    fn test_advise_unknown_accepts_compatible_sink() {
        let point = erased();
        let cookie = point
            .advise_unknown(&Unknown::of::<dyn Greeter>(Arc::new(Hello)))
            .unwrap();
        assert_eq!(point.connection_count(), 1);

        let conn = point.enumerate_unknown().next().unwrap();
        assert_eq!(conn.cookie, cookie);
        assert_eq!(conn.sink.query::<dyn Greeter>().unwrap().greet(), "hello");

        point.unadvise(cookie).unwrap();
        assert_eq!(point.connection_count(), 0);
    }

    #[test]
    fn test_advise_unknown_rejects_incompatible_sink() {
        let point = erased();
        let err = point
            .advise_unknown(&Unknown::of::<dyn Other>(Arc::new(Hello)))
            .unwrap_err();
        assert!(matches!(
            err,
            ConnectionError::IncompatibleSink { expected: "Greeter", .. }
        ));
        assert_eq!(point.connection_count(), 0);
    }

    #[test]
    fn test_into_any_downcasts_to_typed_point() {
        let point = erased();
        assert_eq!(point.iid(), Iid::from_u128(0xB0));
        assert_eq!(point.name(), "Greeter");

        let typed = point
            .into_any()
            .downcast::<ConnectionPoint<dyn Greeter>>()
            .unwrap();
        typed.advise(Arc::new(Hello)).unwrap();
        assert_eq!(typed.len(), 1);
    }
}
