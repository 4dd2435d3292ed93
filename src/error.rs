//! Error types used by connection points, containers and sinks.
//!
//! This module defines two main error enums:
//!
//! - [`ConnectionError`]: errors raised by the registry itself (lookup, advise, unadvise, broadcast).
//! - [`SinkError`]: errors raised by an individual sink while handling a notification.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::any::Any;

use thiserror::Error;

use crate::points::{Cookie, Iid};

/// Result alias for registry operations.
pub type Result<T, E = ConnectionError> = std::result::Result<T, E>;

/// # Errors produced by connection points and containers.
///
/// All of them are local and synchronous: they are returned to the caller
/// immediately and nothing is retried internally.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// No connection point is registered for the identity.
    #[error("no connection point for interface {iid}")]
    NotFound {
        /// Requested interface identity.
        iid: Iid,
    },

    /// The cookie does not name a live subscription on this connection point.
    #[error("cookie {cookie} is not advised on interface {iid}")]
    UnknownCookie {
        /// Interface of the connection point.
        iid: Iid,
        /// The rejected cookie.
        cookie: Cookie,
    },

    /// A connection point for the identity already exists in the container.
    #[error("interface {iid} is already registered")]
    DuplicateRegistration {
        /// The duplicated identity.
        iid: Iid,
    },

    /// The subscriber (or connection point) does not implement the expected contract.
    #[error("object does not implement {expected} ({iid})")]
    IncompatibleSink {
        /// Interface that was asked for.
        iid: Iid,
        /// Human-readable name of the expected contract.
        expected: &'static str,
    },

    /// Every cookie value has been handed out once; cookies are never reused.
    #[error("cookie space exhausted on interface {iid}")]
    CookiesExhausted {
        /// Interface of the connection point.
        iid: Iid,
    },

    /// Fail-fast broadcast stopped at a failing sink.
    #[error("broadcast on {iid} aborted at cookie {cookie}: {source}")]
    Broadcast {
        /// Interface of the connection point.
        iid: Iid,
        /// Cookie of the sink that failed.
        cookie: Cookie,
        /// What the sink reported.
        #[source]
        source: SinkError,
    },
}

impl ConnectionError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use connpoint::{ConnectionError, Iid};
    ///
    /// let err = ConnectionError::NotFound { iid: Iid::from_u128(7) };
    /// assert_eq!(err.as_label(), "connection_point_not_found");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConnectionError::NotFound { .. } => "connection_point_not_found",
            ConnectionError::UnknownCookie { .. } => "cookie_not_found",
            ConnectionError::DuplicateRegistration { .. } => "duplicate_registration",
            ConnectionError::IncompatibleSink { .. } => "incompatible_sink",
            ConnectionError::CookiesExhausted { .. } => "cookies_exhausted",
            ConnectionError::Broadcast { .. } => "broadcast_aborted",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ConnectionError::NotFound { iid } => format!("not found: {iid}"),
            ConnectionError::UnknownCookie { iid, cookie } => {
                format!("unknown cookie {cookie} on {iid}")
            }
            ConnectionError::DuplicateRegistration { iid } => format!("duplicate: {iid}"),
            ConnectionError::IncompatibleSink { iid, expected } => {
                format!("incompatible: expected {expected} ({iid})")
            }
            ConnectionError::CookiesExhausted { iid } => format!("cookies exhausted: {iid}"),
            ConnectionError::Broadcast { iid, cookie, source } => {
                format!("broadcast on {iid} aborted at {cookie}: {}", source.as_message())
            }
        }
    }

    /// True for both not-found kinds (unknown identity, unknown cookie).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConnectionError::NotFound { .. } | ConnectionError::UnknownCookie { .. }
        )
    }
}

/// # Errors reported by a sink while handling one notification.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The sink refused or failed to handle the notification.
    #[error("sink rejected notification: {reason}")]
    Rejected {
        /// What went wrong.
        reason: String,
    },

    /// The sink could not accept the notification (queue full or worker closed).
    #[error("notification dropped: {reason}")]
    Dropped {
        /// Short reason (`"full"`, `"closed"`).
        reason: &'static str,
    },

    /// The sink panicked; the panic was caught.
    #[error("sink panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl SinkError {
    /// Convenience constructor for [`SinkError::Rejected`].
    pub fn rejected(reason: impl Into<String>) -> Self {
        SinkError::Rejected {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use connpoint::SinkError;
    ///
    /// assert_eq!(SinkError::rejected("busy").as_label(), "sink_rejected");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SinkError::Rejected { .. } => "sink_rejected",
            SinkError::Dropped { .. } => "sink_dropped",
            SinkError::Panicked { .. } => "sink_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SinkError::Rejected { reason } => format!("rejected: {reason}"),
            SinkError::Dropped { reason } => format!("dropped: {reason}"),
            SinkError::Panicked { info } => format!("panicked: {info}"),
        }
    }
}

/// Renders a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
