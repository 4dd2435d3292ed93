//! # QueuedSink: non-blocking delivery to an async handler.
//!
//! [`QueuedSink`] turns an [`AsyncSink`] into something a synchronous broadcast
//! can call without waiting: `post` only enqueues.
//!
//! ## Architecture
//! ```text
//! ConnectionPoint::notify ──► QueuedSink::post(ev) ──► [bounded queue] ──► worker ──► AsyncSink::on_event()
//!                                  │ try_send                                  └────► panic → caught, warn
//!                                  └─ full / closed → SinkError::Dropped (warn)
//! ```
//!
//! ## Rules
//! - **Non-blocking**: `post()` returns immediately (uses `try_send`).
//! - **FIFO**: the handler sees events in posting order.
//! - **Isolation**: a panicking handler is logged and the worker keeps going.
//! - **Shutdown**: `shutdown()` stops intake, drains what is queued, awaits the worker.
//!
//! The worker is spawned with `tokio::spawn`; construct queued sinks from
//! within a Tokio runtime.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::Config;
use crate::error::{SinkError, panic_message};

use super::AsyncSink;

/// Bounded queue plus worker in front of one [`AsyncSink`].
pub struct QueuedSink<E> {
    name: &'static str,
    sender: mpsc::Sender<Arc<E>>,
    token: CancellationToken,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<E: Send + Sync + 'static> QueuedSink<E> {
    /// Spawns a worker using the sink's preferred queue capacity.
    #[must_use]
    pub fn spawn(sink: Arc<dyn AsyncSink<E>>) -> Self {
        let cap = sink.queue_capacity();
        Self::spawn_with_capacity(sink, cap)
    }

    /// Spawns a worker using `cfg.queue_capacity`, overriding the sink's preference.
    #[must_use]
    pub fn with_config(sink: Arc<dyn AsyncSink<E>>, cfg: &Config) -> Self {
        Self::spawn_with_capacity(sink, cfg.queue_capacity_clamped())
    }

    fn spawn_with_capacity(sink: Arc<dyn AsyncSink<E>>, cap: usize) -> Self {
        let name = sink.name();
        let (tx, mut rx) = mpsc::channel::<Arc<E>>(cap.max(1));
        let token = CancellationToken::new();
        let stop = token.clone();

        let worker = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Some(ev) => deliver(sink.as_ref(), &*ev).await,
                        None => break,
                    },
                    _ = stop.cancelled() => {
                        rx.close();
                        while let Some(ev) = rx.recv().await {
                            deliver(sink.as_ref(), &*ev).await;
                        }
                        break;
                    }
                }
            }
            debug!(sink = sink.name(), "queued sink worker stopped");
        });

        Self {
            name,
            sender: tx,
            token,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Enqueues one event.
    ///
    /// # Errors
    /// [`SinkError::Dropped`] with reason `"full"` or `"closed"`.
    pub fn post(&self, event: E) -> Result<(), SinkError> {
        self.post_arc(Arc::new(event))
    }

    /// Enqueues a pre-allocated `Arc<E>`; preferred when fanning one event to many sinks.
    ///
    /// # Errors
    /// [`SinkError::Dropped`] with reason `"full"` or `"closed"`.
    pub fn post_arc(&self, event: Arc<E>) -> Result<(), SinkError> {
        match self.sender.try_send(event) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(sink = self.name, "queued sink dropped event: queue full");
                Err(SinkError::Dropped { reason: "full" })
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(sink = self.name, "queued sink dropped event: worker closed");
                Err(SinkError::Dropped { reason: "closed" })
            }
        }
    }

    /// Name of the wrapped sink.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True once the worker no longer accepts events.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Stops intake, drains queued events and awaits the worker.
    ///
    /// Calling it more than once is harmless.
    pub async fn shutdown(&self) {
        self.token.cancel();
        let worker = self.worker.lock().take();
        if let Some(handle) = worker {
            let _ = handle.await;
        }
    }
}

impl<E> fmt::Debug for QueuedSink<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedSink")
            .field("name", &self.name)
            .field("capacity", &self.sender.max_capacity())
            .finish()
    }
}

async fn deliver<E: Send + Sync + 'static>(sink: &dyn AsyncSink<E>, event: &E) {
    let fut = sink.on_event(event);
    if let Err(payload) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
        warn!(
            sink = sink.name(),
            info = %panic_message(&*payload),
            "queued sink panicked"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::{Notify, Semaphore};

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl AsyncSink<u32> for Recorder {
        async fn on_event(&self, event: &u32) {
            if *event == 13 {
                panic!("unlucky");
            }
            self.seen.lock().push(*event);
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    struct Gated {
        started: Notify,
        gate: Semaphore,
        seen: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl AsyncSink<u32> for Gated {
        async fn on_event(&self, event: &u32) {
            self.started.notify_one();
            if let Ok(permit) = self.gate.acquire().await {
                permit.forget();
            }
            self.seen.lock().push(*event);
        }

        fn queue_capacity(&self) -> usize {
            1
        }
    }

    #[tokio::test]
    async fn test_fifo_delivery_and_drain_on_shutdown() {
        let rec = Arc::new(Recorder::default());
        let queued = QueuedSink::<u32>::spawn(rec.clone());

        for i in 1..=5 {
            queued.post(i).unwrap();
        }
        queued.shutdown().await;

        assert_eq!(*rec.seen.lock(), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_panicking_handler_keeps_worker_alive() {
        let rec = Arc::new(Recorder::default());
        let queued = QueuedSink::<u32>::spawn(rec.clone());

        queued.post(12).unwrap();
        queued.post(13).unwrap();
        queued.post(14).unwrap();
        queued.shutdown().await;

        assert_eq!(*rec.seen.lock(), vec![12, 14]);
    }

    #[tokio::test]
    async fn test_overflow_drops_for_this_sink_only() {
        let gated = Arc::new(Gated {
            started: Notify::new(),
            gate: Semaphore::new(0),
            seen: Mutex::new(Vec::new()),
        });
        let queued = QueuedSink::<u32>::spawn(gated.clone());

        queued.post(1).unwrap();
        gated.started.notified().await;

        queued.post(2).unwrap();
        assert_eq!(queued.post(3), Err(SinkError::Dropped { reason: "full" }));

        gated.gate.add_permits(8);
        queued.shutdown().await;
        assert_eq!(*gated.seen.lock(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_post_after_shutdown_is_closed() {
        let queued =
            QueuedSink::<u32>::with_config(Arc::new(Recorder::default()), &Config::default());
        queued.shutdown().await;
        queued.shutdown().await;

        assert!(queued.is_closed());
        assert_eq!(queued.post(1), Err(SinkError::Dropped { reason: "closed" }));
        assert_eq!(queued.name(), "recorder");
    }
}
