//! # Interface identities.
//!
//! Every sink contract is named by a 128-bit [`Iid`]. The host owns these
//! values; this crate only stores and compares them.
//!
//! A contract type (usually `dyn SomeTrait`) is bound to its identity through
//! the [`Interface`] trait:
//!
//! ```rust
//! use connpoint::{Iid, Interface};
//!
//! pub trait BuildEvents: Send + Sync {
//!     fn on_build_done(&self, ok: bool);
//! }
//!
//! impl Interface for dyn BuildEvents {
//!     const IID: Iid = Iid::from_u128(0x6d5140c1_7436_11ce_8034_00aa006009fa);
//!     const NAME: &'static str = "BuildEvents";
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// 128-bit interface identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iid(Uuid);

impl Iid {
    /// Builds an identity from its 128-bit value.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Wraps an existing [`Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying [`Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Returns the raw 128-bit value.
    #[must_use]
    pub const fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    /// Parses the hyphenated, simple, braced or URN form.
    pub fn parse_str(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl FromStr for Iid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl From<Uuid> for Iid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for Iid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.hyphenated())
    }
}

impl fmt::Debug for Iid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iid({})", self.0.hyphenated())
    }
}

/// Binds a sink contract to its identity.
///
/// Implemented on the contract type itself, which is typically a trait object
/// such as `dyn ProjectEvents`.
pub trait Interface: Send + Sync + 'static {
    /// Identity assigned by the host.
    const IID: Iid;

    /// Human-readable contract name (for logs and errors).
    const NAME: &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_braced_hyphenated() {
        let iid = Iid::from_u128(0x6d5140c1_7436_11ce_8034_00aa006009fa);
        assert_eq!(iid.to_string(), "{6d5140c1-7436-11ce-8034-00aa006009fa}");
    }

    #[test]
    fn test_parse_accepts_braced_and_plain() {
        let a: Iid = "{6d5140c1-7436-11ce-8034-00aa006009fa}".parse().unwrap();
        let b = Iid::parse_str("6d5140c1-7436-11ce-8034-00aa006009fa").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_u128(), 0x6d5140c1_7436_11ce_8034_00aa006009fa);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Iid::parse_str("not-an-iid").is_err());
    }
}
