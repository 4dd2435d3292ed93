//! # Asynchronous sink contract.
//!
//! `AsyncSink` is the extension point for handlers that must not run inside a
//! broadcast (I/O, batching, retries). Each one is driven by a dedicated worker
//! fed by the bounded queue of a [`QueuedSink`](crate::QueuedSink).
//!
//! ## Contract
//! - Implementations may be slow; they do **not** block the broadcasting host
//!   nor other sinks.
//! - Each sink **declares** its preferred queue capacity via
//!   [`AsyncSink::queue_capacity`]. If a queue overflows, events for that sink
//!   are **dropped** (warn) and the broadcast records a `SinkError::Dropped`.

use async_trait::async_trait;

/// Handler driven by a [`QueuedSink`](crate::QueuedSink) worker.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; panics are caught and logged.
#[async_trait]
pub trait AsyncSink<E: Send + Sync + 'static>: Send + Sync + 'static {
    /// Processes a single event. Events arrive in FIFO order.
    async fn on_event(&self, event: &E);

    /// Name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose; override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred queue capacity (clamped to a minimum of 1).
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
