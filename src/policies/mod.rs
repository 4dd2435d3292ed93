//! Broadcast policies.
//!
//! This module groups the knobs that control **how** a broadcast behaves when
//! individual sinks misbehave.
//!
//! ## Contents
//! - [`BroadcastPolicy`] best-effort vs fail-fast delivery
//!
//! ## Quick wiring
//! ```text
//! Config { broadcast: BroadcastPolicy, .. }
//!      └─► ContainerBuilder hands it to every ConnectionPoint
//!           └─► ConnectionPoint::notify() uses it to continue or abort
//! ```
//!
//! ## Defaults
//! - `BroadcastPolicy::BestEffort` (failures land in the `NotifyReport`).

mod broadcast;

pub use broadcast::BroadcastPolicy;
