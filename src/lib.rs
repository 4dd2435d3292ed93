//! # connpoint
//!
//! **connpoint** is a small library of typed *connection points*: registries
//! that let a host object broadcast notifications to any number of subscribed
//! sinks, keyed by a 128-bit interface identity.
//!
//! It provides primitives to declare sink contracts, register the event sources
//! a host supports, advise/unadvise sinks with cookies, enumerate everything
//! with snapshot semantics, and broadcast with an explicit failure policy.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ EventSource  │   │ EventSource  │   │ EventSource  │
//!     │ (contract A) │   │ (contract B) │   │ (contract C) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  ContainerBuilder::register_event_source::<S>(source)             │
//! │  - DuplicateRegistration if S::IID is already present             │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼ build()
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  ConnectionPointContainer (immutable identity → point map)        │
//! │  - find_connection_point(iid)    → Arc<dyn Connectable>           │
//! │  - connection_point::<S>()       → Arc<ConnectionPoint<S>>        │
//! │  - enumerate_connection_points() → snapshot enumerator            │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │ConnectionPt A│   │ConnectionPt B│   │ConnectionPt C│
//!     │ (1 lock each)│   │              │   │              │
//!     └┬─────────────┘   └──────────────┘   └──────────────┘
//!      │ advise(sink) → Cookie        unadvise(cookie)
//!      │ enumerate_connections()      notify(|sink| ...)
//!      ▼
//!   sink1, sink2, ... QueuedSink ──► [queue] ──► worker ──► AsyncSink::on_event()
//! ```
//!
//! ### Broadcast
//! ```text
//! notify(f)
//!   ├─► snapshot connections (lock held only for the copy)
//!   ├─► f(sink) for each, in registration order, panics caught
//!   │       ├─ Ok            ─► delivered += 1
//!   │       └─ Err / panic   ─► BroadcastPolicy::BestEffort ─► record, continue
//!   │                          BroadcastPolicy::FailFast   ─► Err(Broadcast), stop
//!   └─► NotifyReport { delivered, failures }
//! ```
//!
//! ## Features
//! | Area              | Description                                                    | Key types / traits                                  |
//! |-------------------|----------------------------------------------------------------|-----------------------------------------------------|
//! | **Identity**      | 128-bit contract identities bound to sink types.               | [`Iid`], [`Interface`]                              |
//! | **Registry**      | Advise/unadvise/enumerate/notify per contract.                 | [`ConnectionPoint`], [`Connectable`], [`Cookie`]    |
//! | **Container**     | One-time registration, lookup by identity, enumeration.        | [`ConnectionPointContainer`], [`ContainerBuilder`]  |
//! | **Enumeration**   | Snapshot, restartable, cloneable enumerators.                  | [`Enumerator`], [`EnumConnections`]                 |
//! | **Policies**      | Best-effort vs fail-fast broadcast.                            | [`BroadcastPolicy`], [`NotifyReport`]               |
//! | **Async sinks**   | Non-blocking delivery to slow handlers.                        | [`QueuedSink`], [`AsyncSink`]                       |
//! | **Project events**| Ready-made contract with suppression flags.                    | [`ProjectEvents`], [`ProjectEventsSource`]          |
//! | **Errors**        | Typed errors for registry and sink failures.                   | [`ConnectionError`], [`SinkError`]                  |
//! | **Configuration** | Centralized settings.                                          | [`Config`]                                          |
//!
//! ## Optional features
//! - `logging` (default): exports the tracing-backed [`LogWriter`] sink.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use connpoint::{Config, ConnectionPointContainer, Iid, Interface, NullSource, SinkError};
//!
//! pub trait Saved: Send + Sync {
//!     fn on_saved(&self, path: &str) -> Result<(), SinkError>;
//! }
//!
//! impl Interface for dyn Saved {
//!     const IID: Iid = Iid::from_u128(0x1f2e3d4c_5b6a_4978_8a9b_0c1d2e3f4a5b);
//!     const NAME: &'static str = "Saved";
//! }
//!
//! struct Printer;
//! impl Saved for Printer {
//!     fn on_saved(&self, path: &str) -> Result<(), SinkError> {
//!         println!("saved {path}");
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), connpoint::ConnectionError> {
//! let container = ConnectionPointContainer::builder(Config::default())
//!     .register_event_source::<dyn Saved>(Arc::new(NullSource))?
//!     .build();
//!
//! let point = container.connection_point::<dyn Saved>()?;
//! let cookie = point.advise(Arc::new(Printer))?;
//!
//! let report = point.notify(|sink| sink.on_saved("main.rs"))?;
//! assert_eq!(report.delivered, 1);
//!
//! point.unadvise(cookie)?;
//! assert!(point.unadvise(cookie).unwrap_err().is_not_found());
//! # Ok(())
//! # }
//! ```
mod core;
mod error;
mod points;
mod policies;
mod project;
mod sinks;

// ---- Public re-exports ----

pub use crate::core::{Config, ConnectionPointContainer, ContainerBuilder};
pub use error::{ConnectionError, Result, SinkError};
pub use points::{
    Connectable, Connection, ConnectionPoint, Cookie, EnumConnectionPoints, EnumConnections,
    Enumerator, EventSource, Iid, Interface, NotifyReport, NullSource, SinkFailure, Unknown,
};
pub use policies::BroadcastPolicy;
pub use project::{
    ActiveConfigurationChanged, EventCategory, EventTriggering, ProjectEvent, ProjectEvents,
    ProjectEventsSource, ProjectFileClosing, ProjectFileOpened, ProjectItemsChanged,
    TriggeringGuard,
};
pub use sinks::{AsyncSink, QueuedSink};

// Optional: expose the built-in tracing logger sink.
// Enabled by default; disable with `--no-default-features`.
#[cfg(feature = "logging")]
pub use sinks::LogWriter;
