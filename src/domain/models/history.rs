//! Fixed-capacity FIFO history.
//!
//! Used by the executor for its stability window and by the planner for its
//! capped plan log. Pushing onto a full history evicts the oldest entry.

use std::collections::VecDeque;

/// A ring buffer that never holds more than `capacity` entries.
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// Create an empty history holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest ones beyond capacity.
    ///
    /// Returns the number of evicted entries. A zero-capacity history keeps
    /// nothing.
    pub fn push(&mut self, entry: T) -> usize {
        self.entries.push_back(entry);
        let mut evicted = 0;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the history holds `capacity` entries.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Most recently pushed entry.
    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut h = BoundedHistory::new(3);
        assert_eq!(h.push(1), 0);
        assert_eq!(h.push(2), 0);
        assert_eq!(h.len(), 2);
        assert!(!h.is_full());
        assert_eq!(h.latest(), Some(&2));
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut h = BoundedHistory::new(3);
        for i in 1..=5 {
            h.push(i);
        }
        assert_eq!(h.len(), 3);
        assert!(h.is_full());
        assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut h = BoundedHistory::new(0);
        assert_eq!(h.push("a"), 1);
        assert!(h.is_empty());
        assert!(h.latest().is_none());
    }

    #[test]
    fn test_clear() {
        let mut h = BoundedHistory::new(2);
        h.push(1);
        h.push(2);
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.capacity(), 2);
    }
}
