//! # Registry configuration.
//!
//! Provides [`Config`] centralized settings for containers, connection points
//! and queued sinks.
//!
//! Config is used in two ways:
//! 1. **Container creation**: `ConnectionPointContainer::builder(config)`
//! 2. **Standalone points**: `ConnectionPoint::with_config(source, &config)`
//!
//! ## Sentinel values
//! - `first_cookie = 0` → treated as 1 (zero is never a valid cookie)
//! - `queue_capacity = 0` → treated as 1

use crate::policies::BroadcastPolicy;

/// Configuration shared by every connection point of a container.
///
/// ## Field semantics
/// - `broadcast`: how `notify` reacts to failing sinks
/// - `first_cookie`: first cookie value handed out by each point (min 1)
/// - `initial_capacity`: preallocated connection slots per point
/// - `queue_capacity`: default bounded queue size for queued sinks (min 1)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the clamping accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Failure policy for broadcasts.
    pub broadcast: BroadcastPolicy,

    /// First cookie value of every connection point.
    ///
    /// Cookies grow monotonically from here and are never reused.
    pub first_cookie: u32,

    /// Number of connection slots reserved up front per point.
    pub initial_capacity: usize,

    /// Default per-sink queue capacity for [`QueuedSink`](crate::QueuedSink).
    ///
    /// On overflow, events for that sink are dropped (warn).
    pub queue_capacity: usize,
}

impl Config {
    /// Returns the first cookie clamped to a minimum of 1.
    #[inline]
    pub fn first_cookie_clamped(&self) -> u32 {
        self.first_cookie.max(1)
    }

    /// Returns the queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `broadcast = BroadcastPolicy::BestEffort`
    /// - `first_cookie = 1`
    /// - `initial_capacity = 4`
    /// - `queue_capacity = 1024`
    fn default() -> Self {
        Self {
            broadcast: BroadcastPolicy::default(),
            first_cookie: 1,
            initial_capacity: 4,
            queue_capacity: 1024,
        }
    }
}
