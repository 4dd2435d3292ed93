//! # Snapshot enumerators.
//!
//! [`Enumerator`] walks a frozen copy of a registry taken at creation time.
//! Advise/unadvise after that point never shows up in (or breaks) an existing
//! enumerator.
//!
//! ## Operations
//! ```text
//! next()          one item, cursor += 1
//! next_batch(n)   up to n items
//! skip_items(n)   cursor += n; false if fewer than n remained
//! reset()         cursor = 0
//! clone()         same snapshot, same cursor, independent afterwards
//! ```

use std::sync::Arc;

use super::{Connectable, Cookie};

/// One subscription as seen by an enumerator.
#[derive(Clone)]
pub struct Connection<H> {
    /// Cookie returned by advise.
    pub cookie: Cookie,
    /// The subscribed sink.
    pub sink: H,
}

/// Restartable, cloneable iterator over a snapshot.
pub struct Enumerator<T> {
    items: Arc<[T]>,
    pos: usize,
}

/// Enumerator over the connections of one connection point.
pub type EnumConnections<H> = Enumerator<Connection<H>>;

/// Enumerator over the connection points of a container.
pub type EnumConnectionPoints = Enumerator<Arc<dyn Connectable>>;

impl<T> Clone for Enumerator<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            pos: self.pos,
        }
    }
}

impl<T: Clone> Enumerator<T> {
    pub(crate) fn new(items: Arc<[T]>) -> Self {
        Self { items, pos: 0 }
    }

    /// Returns up to `n` items and advances past them.
    pub fn next_batch(&mut self, n: usize) -> Vec<T> {
        let end = self.pos.saturating_add(n).min(self.items.len());
        let batch = self.items[self.pos..end].to_vec();
        self.pos = end;
        batch
    }

    /// Advances `n` items; `false` when fewer than `n` were left.
    pub fn skip_items(&mut self, n: usize) -> bool {
        let left = self.remaining();
        self.pos = self.pos.saturating_add(n).min(self.items.len());
        n <= left
    }

    /// Rewinds to the first item of the snapshot.
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// Items not yet yielded.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.items.len() - self.pos
    }

    /// Size of the whole snapshot.
    #[must_use]
    pub fn snapshot_len(&self) -> usize {
        self.items.len()
    }
}

impl<T: Clone> Iterator for Enumerator<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.pos)?.clone();
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl<T: Clone> ExactSizeIterator for Enumerator<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: u32) -> Enumerator<u32> {
        Enumerator::new((1..=n).collect::<Vec<_>>().into())
    }

    #[test]
    fn test_batch_skip_and_reset() {
        let mut e = numbers(5);
        assert_eq!(e.next_batch(2), vec![1, 2]);
        assert!(e.skip_items(1));
        assert_eq!(e.next(), Some(4));
        assert!(!e.skip_items(3));
        assert_eq!(e.remaining(), 0);
        assert_eq!(e.next(), None);

        e.reset();
        assert_eq!(e.collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_clone_keeps_cursor_then_diverges() {
        let mut a = numbers(4);
        a.next();
        let mut b = a.clone();
        assert_eq!(b.next(), Some(2));
        assert_eq!(a.next(), Some(2));
        b.reset();
        assert_eq!(b.remaining(), 4);
        assert_eq!(a.remaining(), 2);
    }

    #[test]
    fn test_batch_larger_than_snapshot() {
        let mut e = numbers(2);
        assert_eq!(e.next_batch(usize::MAX), vec![1, 2]);
        assert!(e.next_batch(1).is_empty());
        assert_eq!(e.snapshot_len(), 2);
    }
}
