//! # ConnectionPoint: typed sink registry for one contract.
//!
//! A [`ConnectionPoint<S>`] keeps the sinks of contract `S` in registration
//! order, hands out cookies, and broadcasts notifications.
//!
//! ## Architecture
//! ```text
//! advise(sink) ──► lock ─► cookie = jar.allocate() ─► push (cookie, sink) ─► unlock
//!                                                                             │
//!                                                    source.on_sink_added ◄───┘
//!
//! notify(f) ──► lock ─► snapshot ─► unlock
//!                          │
//!                          ├──► f(sink1)  ok
//!                          ├──► f(sink2)  Err / panic ─► BestEffort: record, continue
//!                          │                           └► FailFast:   return Broadcast error
//!                          └──► f(sinkN)
//! ```
//!
//! ## Rules
//! - **One lock per point**: guards the connection list and cookie counter only.
//! - **Callbacks outside the lock**: sinks and the event source may re-enter
//!   (advise/unadvise) without deadlocking.
//! - **Snapshot isolation**: enumerators and broadcasts work on a copy taken at
//!   call time; concurrent changes are visible only to later calls.
//! - **Cookies are never reused** within the lifetime of the point.
//!
//! **Warning**: panics are caught with `AssertUnwindSafe`; a sink that panics
//! while holding its own lock may leave its state inconsistent.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::core::Config;
use crate::error::{ConnectionError, Result, SinkError, panic_message};
use crate::policies::BroadcastPolicy;

use super::cookie::CookieJar;
use super::{
    Connection, Cookie, EnumConnections, Enumerator, EventSource, Iid, Interface, NotifyReport,
    NullSource, SinkFailure,
};

/// Registry state guarded by the point's lock.
struct Connections<S: ?Sized> {
    jar: CookieJar,
    entries: Vec<Connection<Arc<S>>>,
    /// Cookies whose `on_sink_added` is still running, and whether they were
    /// unadvised meanwhile.
    announcing: Vec<(Cookie, bool)>,
}

impl<S: ?Sized> Connections<S> {
    /// Ends the add notification for `cookie`; true if it was unadvised meanwhile.
    fn finish_announcing(&mut self, cookie: Cookie) -> bool {
        match self.announcing.iter().position(|(c, _)| *c == cookie) {
            Some(i) => self.announcing.swap_remove(i).1,
            None => false,
        }
    }

    /// True if the removal notification for `cookie` must wait for its add
    /// notification; the advising thread sends it instead.
    fn defer_removal(&mut self, cookie: Cookie) -> bool {
        match self.announcing.iter_mut().find(|(c, _)| *c == cookie) {
            Some((_, removed)) => {
                *removed = true;
                true
            }
            None => false,
        }
    }
}

/// Typed registry of sinks implementing contract `S`.
pub struct ConnectionPoint<S: Interface + ?Sized> {
    source: Arc<dyn EventSource<S>>,
    policy: BroadcastPolicy,
    inner: Mutex<Connections<S>>,
}

impl<S: Interface + ?Sized> ConnectionPoint<S> {
    /// Creates a point with the default [`Config`].
    #[must_use]
    pub fn new(source: Arc<dyn EventSource<S>>) -> Self {
        Self::with_config(source, &Config::default())
    }

    /// Creates a point whose source ignores sink changes.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(Arc::new(NullSource))
    }

    /// Creates a point using the cookie start and broadcast policy from `cfg`.
    #[must_use]
    pub fn with_config(source: Arc<dyn EventSource<S>>, cfg: &Config) -> Self {
        Self {
            source,
            policy: cfg.broadcast,
            inner: Mutex::new(Connections {
                jar: CookieJar::starting_at(cfg.first_cookie_clamped()),
                entries: Vec::with_capacity(cfg.initial_capacity),
                announcing: Vec::new(),
            }),
        }
    }

    /// Identity of the contract served by this point.
    #[inline]
    pub fn iid(&self) -> Iid {
        S::IID
    }

    /// Contract name.
    #[inline]
    pub fn name(&self) -> &'static str {
        S::NAME
    }

    /// Broadcast policy in effect.
    #[inline]
    pub fn policy(&self) -> BroadcastPolicy {
        self.policy
    }

    /// Registers a sink and returns its cookie.
    ///
    /// The event source is told about the new sink after the lock is released.
    /// If the cookie is unadvised while `on_sink_added` runs, the matching
    /// `on_sink_removed` is sent from here once `on_sink_added` returns.
    ///
    /// # Errors
    /// [`ConnectionError::CookiesExhausted`] once every cookie value has been used.
    pub fn advise(&self, sink: Arc<S>) -> Result<Cookie> {
        let cookie = {
            let mut conns = self.inner.lock();
            let cookie = conns
                .jar
                .allocate()
                .ok_or(ConnectionError::CookiesExhausted { iid: S::IID })?;
            conns.entries.push(Connection {
                cookie,
                sink: Arc::clone(&sink),
            });
            conns.announcing.push((cookie, false));
            cookie
        };

        debug!(iid = %S::IID, contract = S::NAME, %cookie, "sink advised");
        let added = panic::catch_unwind(AssertUnwindSafe(|| self.source.on_sink_added(&sink)));
        if self.inner.lock().finish_announcing(cookie) {
            self.source.on_sink_removed(&sink);
        }
        if let Err(payload) = added {
            panic::resume_unwind(payload);
        }
        Ok(cookie)
    }

    /// Removes the sink registered under `cookie`.
    ///
    /// # Errors
    /// [`ConnectionError::UnknownCookie`] if the cookie is not currently advised.
    pub fn unadvise(&self, cookie: Cookie) -> Result<()> {
        let (removed, deferred) = {
            let mut conns = self.inner.lock();
            let idx = conns
                .entries
                .iter()
                .position(|c| c.cookie == cookie)
                .ok_or(ConnectionError::UnknownCookie { iid: S::IID, cookie })?;
            let removed = conns.entries.remove(idx);
            (removed, conns.defer_removal(cookie))
        };

        debug!(iid = %S::IID, contract = S::NAME, %cookie, deferred, "sink unadvised");
        if !deferred {
            self.source.on_sink_removed(&removed.sink);
        }
        Ok(())
    }

    /// True if `cookie` names a live subscription.
    #[must_use]
    pub fn is_connected(&self, cookie: Cookie) -> bool {
        self.inner.lock().entries.iter().any(|c| c.cookie == cookie)
    }

    /// Returns the sink registered under `cookie`.
    #[must_use]
    pub fn sink(&self, cookie: Cookie) -> Option<Arc<S>> {
        self.inner
            .lock()
            .entries
            .iter()
            .find(|c| c.cookie == cookie)
            .map(|c| Arc::clone(&c.sink))
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// True if no sink is advised.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Snapshot enumerator over `(cookie, sink)` in registration order.
    #[must_use]
    pub fn enumerate_connections(&self) -> EnumConnections<Arc<S>> {
        Enumerator::new(self.snapshot())
    }

    /// Calls `invoke` on every sink of a snapshot, in registration order.
    ///
    /// ### Failure handling
    /// A sink fails by returning `Err` or by panicking (the panic is caught).
    /// - [`BroadcastPolicy::BestEffort`]: the failure is logged and recorded in
    ///   the returned [`NotifyReport`]; remaining sinks are still notified.
    /// - [`BroadcastPolicy::FailFast`]: the broadcast stops and the failure is
    ///   returned as [`ConnectionError::Broadcast`].
    ///
    /// Sinks advised while the broadcast runs are not notified by it; sinks
    /// unadvised while it runs may still receive this notification.
    pub fn notify<F>(&self, mut invoke: F) -> Result<NotifyReport>
    where
        F: FnMut(&S) -> std::result::Result<(), SinkError>,
    {
        let snapshot = self.snapshot();
        let mut report = NotifyReport::default();

        for conn in snapshot.iter() {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| invoke(&*conn.sink))) {
                Ok(res) => res,
                Err(payload) => Err(SinkError::Panicked {
                    info: panic_message(&*payload),
                }),
            };

            match outcome {
                Ok(()) => report.delivered += 1,
                Err(error) if self.policy.aborts_on_failure() => {
                    warn!(
                        iid = %S::IID,
                        contract = S::NAME,
                        cookie = %conn.cookie,
                        error = %error,
                        "broadcast aborted"
                    );
                    return Err(ConnectionError::Broadcast {
                        iid: S::IID,
                        cookie: conn.cookie,
                        source: error,
                    });
                }
                Err(error) => {
                    warn!(
                        iid = %S::IID,
                        contract = S::NAME,
                        cookie = %conn.cookie,
                        error = %error,
                        "sink failed during broadcast"
                    );
                    report.failures.push(SinkFailure {
                        cookie: conn.cookie,
                        error,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Unadvises every sink; returns how many were removed.
    ///
    /// The event source sees one `on_sink_removed` per sink, never before that
    /// sink's `on_sink_added` has returned.
    pub fn disconnect_all(&self) -> usize {
        let (drained, announce): (Vec<Connection<Arc<S>>>, Vec<bool>) = {
            let mut conns = self.inner.lock();
            let drained: Vec<_> = conns.entries.drain(..).collect();
            let announce = drained
                .iter()
                .map(|c| !conns.defer_removal(c.cookie))
                .collect();
            (drained, announce)
        };
        for (conn, announce) in drained.iter().zip(announce) {
            if announce {
                self.source.on_sink_removed(&conn.sink);
            }
        }
        if !drained.is_empty() {
            debug!(iid = %S::IID, contract = S::NAME, removed = drained.len(), "all sinks disconnected");
        }
        drained.len()
    }

    pub(crate) fn snapshot(&self) -> Arc<[Connection<Arc<S>>]> {
        self.inner.lock().entries.clone().into()
    }
}

impl<S: Interface + ?Sized> fmt::Debug for ConnectionPoint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionPoint")
            .field("iid", &S::IID)
            .field("contract", &S::NAME)
            .field("policy", &self.policy)
            .field("connections", &self.len())
            .finish()
    }
}
