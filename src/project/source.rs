//! # Project events source.
//!
//! [`ProjectEventsSource`] is the host side of the [`ProjectEvents`] contract:
//! it counts attached sinks, holds the current [`EventTriggering`] flags, and
//! raises events through a connection point unless they are suppressed.
//!
//! ## Flow
//! ```text
//! raise(point, event)
//!     ├─ triggering.suppresses(event.category()) ─► Ok(None)   (nothing sent)
//!     └─ point.notify(|sink| event.deliver(sink)) ─► Ok(Some(NotifyReport))
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use connpoint::{
//!     Config, ConnectionPointContainer, EventTriggering, ProjectEvents, ProjectEventsSource,
//! };
//!
//! struct Quiet;
//! impl ProjectEvents for Quiet {}
//!
//! let source = Arc::new(ProjectEventsSource::new());
//! let container = ConnectionPointContainer::builder(Config::default())
//!     .register_event_source::<dyn ProjectEvents>(source.clone())
//!     .unwrap()
//!     .build();
//!
//! let point = container.connection_point::<dyn ProjectEvents>().unwrap();
//! point.advise(Arc::new(Quiet)).unwrap();
//! assert!(source.is_sink_registered());
//!
//! {
//!     let _guard = source.suppress(EventTriggering::DO_NOT_TRIGGER_HIERARCHY_EVENTS);
//!     assert!(source.signal_open_status(&point, true).unwrap().is_none());
//! }
//! assert_eq!(source.signal_open_status(&point, true).unwrap().unwrap().delivered, 1);
//!
//! container.disconnect_all();
//! assert!(!source.is_sink_registered());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use tracing::trace;

use crate::error::Result;
use crate::points::{ConnectionPoint, EventSource, NotifyReport};

use super::{
    ActiveConfigurationChanged, EventTriggering, ProjectEvent, ProjectEvents, ProjectFileClosing,
    ProjectFileOpened, ProjectItemsChanged,
};

/// Host-side source for [`ProjectEvents`] sinks.
///
/// Effective flags are the base flags from [`set_triggering`](Self::set_triggering)
/// plus every category currently held by a [`TriggeringGuard`]. Guards count
/// holds per category, so they may overlap, nest and drop in any order.
#[derive(Debug, Default)]
pub struct ProjectEventsSource {
    sinks: AtomicUsize,
    triggering: AtomicU8,
    hierarchy_holds: AtomicUsize,
    tracker_holds: AtomicUsize,
}

impl ProjectEventsSource {
    /// Creates a source with no sinks and [`EventTriggering::TRIGGER_ALL`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if at least one sink is attached.
    #[must_use]
    pub fn is_sink_registered(&self) -> bool {
        self.sink_count() > 0
    }

    /// Number of attached sinks.
    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.load(Ordering::Acquire)
    }

    /// Effective triggering flags: base flags plus held suppressions.
    #[must_use]
    pub fn triggering(&self) -> EventTriggering {
        let mut flags =
            EventTriggering::from_bits_truncate(self.triggering.load(Ordering::Acquire));
        if self.hierarchy_holds.load(Ordering::Acquire) > 0 {
            flags |= EventTriggering::DO_NOT_TRIGGER_HIERARCHY_EVENTS;
        }
        if self.tracker_holds.load(Ordering::Acquire) > 0 {
            flags |= EventTriggering::DO_NOT_TRIGGER_TRACKER_EVENTS;
        }
        flags
    }

    /// Replaces the base flags; returns the previous base flags.
    ///
    /// Suppressions held by live guards are not affected.
    pub fn set_triggering(&self, flags: EventTriggering) -> EventTriggering {
        let prev = self.triggering.swap(flags.bits(), Ordering::AcqRel);
        EventTriggering::from_bits_truncate(prev)
    }

    /// Suppresses the categories in `flags` until the returned guard is dropped.
    ///
    /// Each guard releases only its own holds; a category stays suppressed while
    /// any guard holding it is alive.
    #[must_use = "suppression ends when the guard is dropped"]
    pub fn suppress(&self, flags: EventTriggering) -> TriggeringGuard<'_> {
        for holds in self.holds(flags) {
            holds.fetch_add(1, Ordering::AcqRel);
        }
        TriggeringGuard {
            source: self,
            flags,
        }
    }

    fn holds(&self, flags: EventTriggering) -> impl Iterator<Item = &AtomicUsize> {
        [
            (EventTriggering::DO_NOT_TRIGGER_HIERARCHY_EVENTS, &self.hierarchy_holds),
            (EventTriggering::DO_NOT_TRIGGER_TRACKER_EVENTS, &self.tracker_holds),
        ]
        .into_iter()
        .filter(move |(flag, _)| flags.contains(*flag))
        .map(|(_, holds)| holds)
    }

    /// Broadcasts `event` unless its category is suppressed.
    ///
    /// Returns `Ok(None)` when suppressed.
    ///
    /// # Errors
    /// Whatever [`ConnectionPoint::notify`] returns under the point's policy.
    pub fn raise(
        &self,
        point: &ConnectionPoint<dyn ProjectEvents>,
        event: &ProjectEvent,
    ) -> Result<Option<NotifyReport>> {
        let triggering = self.triggering();
        if triggering.suppresses(event.category()) {
            trace!(event = event.as_label(), ?triggering, "project event suppressed");
            return Ok(None);
        }
        point.notify(|sink| event.deliver(sink)).map(Some)
    }

    /// Raises file-opened (`opened = true`) or file-closing (`opened = false`)
    /// for a project entering or leaving the solution, so `added` / `removed`
    /// is `true`.
    ///
    /// Use [`signal_file_opened`](Self::signal_file_opened) or
    /// [`signal_file_closing`](Self::signal_file_closing) for a project that
    /// loads or unloads together with its solution.
    pub fn signal_open_status(
        &self,
        point: &ConnectionPoint<dyn ProjectEvents>,
        opened: bool,
    ) -> Result<Option<NotifyReport>> {
        if opened {
            self.signal_file_opened(point, true)
        } else {
            self.signal_file_closing(point, true)
        }
    }

    /// Raises file-opened; `added` is false when the project opened with its solution.
    pub fn signal_file_opened(
        &self,
        point: &ConnectionPoint<dyn ProjectEvents>,
        added: bool,
    ) -> Result<Option<NotifyReport>> {
        self.raise(point, &ProjectEvent::FileOpened(ProjectFileOpened { added }))
    }

    /// Raises file-closing; `removed` is false when the solution itself closes.
    pub fn signal_file_closing(
        &self,
        point: &ConnectionPoint<dyn ProjectEvents>,
        removed: bool,
    ) -> Result<Option<NotifyReport>> {
        self.raise(
            point,
            &ProjectEvent::FileClosing(ProjectFileClosing { removed }),
        )
    }

    /// Raises an items-changed event.
    pub fn signal_items_changed(
        &self,
        point: &ConnectionPoint<dyn ProjectEvents>,
        added: Vec<String>,
        removed: Vec<String>,
    ) -> Result<Option<NotifyReport>> {
        self.raise(
            point,
            &ProjectEvent::ItemsChanged(ProjectItemsChanged { added, removed }),
        )
    }

    /// Raises an active-configuration-changed event.
    pub fn signal_configuration_changed(
        &self,
        point: &ConnectionPoint<dyn ProjectEvents>,
        configuration: impl Into<String>,
    ) -> Result<Option<NotifyReport>> {
        self.raise(
            point,
            &ProjectEvent::ActiveConfigurationChanged(ActiveConfigurationChanged {
                configuration: configuration.into(),
            }),
        )
    }
}

impl EventSource<dyn ProjectEvents> for ProjectEventsSource {
    fn on_sink_added(&self, _sink: &Arc<dyn ProjectEvents>) {
        self.sinks.fetch_add(1, Ordering::AcqRel);
    }

    fn on_sink_removed(&self, _sink: &Arc<dyn ProjectEvents>) {
        self.sinks.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Releases the suppression holds taken by [`ProjectEventsSource::suppress`] on drop.
#[derive(Debug)]
pub struct TriggeringGuard<'a> {
    source: &'a ProjectEventsSource,
    flags: EventTriggering,
}

impl TriggeringGuard<'_> {
    /// Categories this guard holds.
    #[must_use]
    pub fn flags(&self) -> EventTriggering {
        self.flags
    }
}

impl Drop for TriggeringGuard<'_> {
    fn drop(&mut self) {
        for holds in self.source.holds(self.flags) {
            holds.fetch_sub(1, Ordering::AcqRel);
        }
    }
}
