//! Fixed-capacity leaf block
//!
//! An ordered sequence of up to `capacity` values with no gaps: values occupy
//! slots `[0, len)`. Append-ordered by default; the order-preserving insert
//! mode keeps individual leaves ascending through positional inserts.

use std::fmt;

/// Capacity-bounded block holding the tree's actual values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafBlock<T> {
    values: Vec<T>,
    capacity: usize,
}

impl<T: Copy + Ord> LeafBlock<T> {
    /// Create an empty leaf with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a leaf pre-filled with `values`
    ///
    /// Callers guarantee `values.len() <= capacity`; splits rely on this.
    pub fn from_values(capacity: usize, values: Vec<T>) -> Self {
        debug_assert!(values.len() <= capacity);
        Self { values, capacity }
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no values are stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when the leaf holds `capacity` values
    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    /// Leaf capacity (fixed for the leaf's lifetime)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append at the end; fails iff the leaf is full
    pub fn add(&mut self, value: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.values.push(value);
        true
    }

    /// Insert at `pos`, shifting `[pos, len)` right
    ///
    /// Fails iff `pos > len` or the leaf is full.
    pub fn insert_at(&mut self, pos: usize, value: T) -> bool {
        if self.is_full() || pos > self.values.len() {
            return false;
        }
        self.values.insert(pos, value);
        true
    }

    /// Remove the value at `pos`, shifting the tail left
    ///
    /// Returns `None` iff `pos >= len`; the tree maps that to an
    /// out-of-range error.
    pub fn remove_at(&mut self, pos: usize) -> Option<T> {
        if pos >= self.values.len() {
            return None;
        }
        Some(self.values.remove(pos))
    }

    /// Remove every occurrence equal to `value`; returns how many went
    pub fn remove_value(&mut self, value: T) -> usize {
        let before = self.values.len();
        self.values.retain(|v| *v != value);
        before - self.values.len()
    }

    /// Value at `pos`, or `None` iff `pos >= len`
    pub fn get_at(&self, pos: usize) -> Option<T> {
        self.values.get(pos).copied()
    }

    /// Highest-ordinal stored value under the leaf's current ordering
    ///
    /// Under the order-preserving mode every leaf is ascending, so this is
    /// the true maximum. `None` iff the leaf is empty.
    pub fn max(&self) -> Option<T> {
        self.values.last().copied()
    }

    /// Ascending position for `value` under the order-preserving mode
    ///
    /// First slot whose value exceeds `value`; equal values insert after
    /// their duplicates.
    pub fn ascending_position(&self, value: T) -> usize {
        self.values
            .iter()
            .position(|v| *v > value)
            .unwrap_or(self.values.len())
    }

    /// Snapshot copy of the stored values in slot order
    pub fn to_elements(&self) -> Vec<T> {
        self.values.clone()
    }

    /// Move the stored values out, leaving the leaf empty
    pub fn take_elements(&mut self) -> Vec<T> {
        std::mem::take(&mut self.values)
    }

    /// Append from an iterator until the quota is met or the pool runs dry
    ///
    /// Used by sort redistribution; the caller keeps `quota <= capacity`.
    pub fn refill<I: Iterator<Item = T>>(&mut self, pool: &mut I, quota: usize) {
        debug_assert!(self.values.is_empty());
        self.values.extend(pool.take(quota.min(self.capacity)));
    }

    /// Reset to empty, same capacity
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<T: fmt::Display> fmt::Display for LeafBlock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}
