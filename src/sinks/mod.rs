//! # Sinks that run outside the broadcast.
//!
//! A connection point calls its sinks synchronously. Sinks that need async I/O
//! or may be slow sit behind a [`QueuedSink`], which only enqueues.
//!
//! ## Architecture
//! ```text
//! ConnectionPoint::notify(f)
//!     ├──► plain sink          (runs inline)
//!     └──► QueuedSink::post ──► [queue] ──► worker ──► AsyncSink::on_event()
//!                                                          │
//!                                                 ┌────────┴────────┐
//!                                                 ▼                 ▼
//!                                             LogWriter        Custom ...
//! ```
//!
//! ## Implementing custom async sinks
//! ```no_run
//! use connpoint::{AsyncSink, ProjectEvent};
//! use async_trait::async_trait;
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl AsyncSink<ProjectEvent> for Audit {
//!     async fn on_event(&self, event: &ProjectEvent) {
//!         // write an audit record for event.as_label() ...
//!         let _ = event;
//!     }
//!
//!     fn name(&self) -> &'static str { "audit" }
//! }
//! ```

mod async_sink;
#[cfg(feature = "logging")]
mod log;
mod queued;

pub use async_sink::AsyncSink;
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use queued::QueuedSink;
