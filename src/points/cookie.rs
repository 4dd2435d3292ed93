//! Subscription cookies.

use std::fmt;
use std::num::NonZeroU32;

/// Opaque handle for one active subscription.
///
/// Cookies are non-zero (zero is the "no connection" value hosts use) and are
/// handed out in increasing order by a connection point.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Cookie(NonZeroU32);

impl Cookie {
    /// Returns `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Raw cookie value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic cookie allocator; never hands out a value twice.
#[derive(Debug)]
pub(crate) struct CookieJar {
    next: Option<u32>,
}

impl CookieJar {
    pub(crate) fn starting_at(first: u32) -> Self {
        Self {
            next: Some(first.max(1)),
        }
    }

    /// Next cookie, or `None` once `u32::MAX` has been used.
    pub(crate) fn allocate(&mut self) -> Option<Cookie> {
        let value = self.next?;
        self.next = value.checked_add(1);
        Cookie::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_a_cookie() {
        assert!(Cookie::new(0).is_none());
        assert_eq!(Cookie::new(5).map(Cookie::get), Some(5));
    }

    #[test]
    fn test_jar_is_monotonic() {
        let mut jar = CookieJar::starting_at(1);
        let got: Vec<u32> = (0..4).filter_map(|_| jar.allocate()).map(Cookie::get).collect();
        assert_eq!(got, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_jar_clamps_zero_start() {
        let mut jar = CookieJar::starting_at(0);
        assert_eq!(jar.allocate().map(Cookie::get), Some(1));
    }

    #[test]
    fn test_jar_exhausts_instead_of_wrapping() {
        let mut jar = CookieJar::starting_at(u32::MAX);
        assert_eq!(jar.allocate().map(Cookie::get), Some(u32::MAX));
        assert!(jar.allocate().is_none());
        assert!(jar.allocate().is_none());
    }
}
