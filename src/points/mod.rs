//! # Connection points: typed sink registries keyed by interface identity.
//!
//! This module provides the building blocks a host object uses to publish
//! notifications to subscribed sinks.
//!
//! ## Architecture
//! ```text
//!   Host object ── owns ──► EventSource<S> ◄── on_sink_added / on_sink_removed
//!                                 ▲
//!                                 │
//!   Client ── advise(sink) ──► ConnectionPoint<S> ── notify(f) ──► sink1, sink2, ...
//!          ◄── Cookie ─────────       │
//!                                     └── enumerate_connections() ──► Enumerator (snapshot)
//!
//!   Container ── find_connection_point(iid) ──► Arc<dyn Connectable>
//!                                                   └── advise_unknown(&Unknown)
//! ```
//!
//! ## Contents
//! - [`Iid`], [`Interface`] identity of a sink contract
//! - [`Cookie`] handle of one subscription
//! - [`Unknown`] untyped object queried for contracts
//! - [`EventSource`], [`NullSource`] host-side hooks
//! - [`ConnectionPoint`] typed registry; [`Connectable`] its object-safe view
//! - [`Enumerator`], [`Connection`] snapshot enumeration
//! - [`NotifyReport`], [`SinkFailure`] broadcast outcome

mod connectable;
mod cookie;
mod enumerate;
mod iid;
mod point;
mod report;
mod source;
mod unknown;

pub use connectable::Connectable;
pub use cookie::Cookie;
pub use enumerate::{Connection, EnumConnectionPoints, EnumConnections, Enumerator};
pub use iid::{Iid, Interface};
pub use point::ConnectionPoint;
pub use report::{NotifyReport, SinkFailure};
pub use source::{EventSource, NullSource};
pub use unknown::Unknown;
