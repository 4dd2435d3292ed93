//! # Event sources.
//!
//! The host object that owns a connection point is told whenever a sink of its
//! contract comes or goes. Callbacks run after the registry lock is released,
//! so a source may call back into the connection point.

use std::sync::Arc;

use super::Interface;

/// Host-side hook for sinks of contract `S`.
///
/// For each cookie the source sees exactly one `on_sink_added` and, once the
/// sink leaves, exactly one `on_sink_removed`. The removal is never delivered
/// before the add callback has returned, even when another thread unadvises
/// the cookie while `on_sink_added` is still running. Callbacks for different
/// cookies may run concurrently.
pub trait EventSource<S: Interface + ?Sized>: Send + Sync + 'static {
    /// A sink was advised.
    fn on_sink_added(&self, _sink: &Arc<S>) {}

    /// A sink was unadvised.
    fn on_sink_removed(&self, _sink: &Arc<S>) {}
}

/// Source that ignores sink changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSource;

impl<S: Interface + ?Sized> EventSource<S> for NullSource {}
