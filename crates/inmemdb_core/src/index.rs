//! Value-count index.

use std::collections::HashMap;
use tracing::error;

/// Reverse index from a value to the number of variables holding it.
///
/// `ValueIndex` answers exact-match count queries in O(1). The store keeps
/// it in step with the variable table: every insert of a value increments
/// its count and every removal decrements it.
///
/// A count that would drop below zero means the two maps have diverged.
/// That is logged and the count saturates at zero.
#[derive(Debug, Clone)]
pub struct ValueIndex {
    /// Value to occurrence count.
    counts: HashMap<String, usize>,
    /// Drop entries whose count reaches zero.
    prune_zero_counts: bool,
}

impl ValueIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new(prune_zero_counts: bool) -> Self {
        Self {
            counts: HashMap::new(),
            prune_zero_counts,
        }
    }

    /// Records one more variable holding `value`.
    pub fn increment(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_owned(), 1);
            }
        }
    }

    /// Records one fewer variable holding `value`.
    pub fn decrement(&mut self, value: &str) {
        let Some(count) = self.counts.get_mut(value) else {
            error!(value, "count index underflow: value has no entry");
            return;
        };
        if *count == 0 {
            error!(value, "count index underflow: count already zero");
            return;
        }
        *count -= 1;
        if *count == 0 && self.prune_zero_counts {
            self.counts.remove(value);
        }
    }

    /// Returns the number of variables holding `value`.
    ///
    /// Missing and zero-count entries are indistinguishable here.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Iterates over `(value, count)` pairs with a non-zero count.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(value, &count)| (value.as_str(), count))
    }

    /// Returns the number of distinct values with a non-zero count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if no value has a non-zero count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of entries held, including retained zero counts.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.counts.len()
    }
}

impl Default for ValueIndex {
    fn default() -> Self {
        Self::new(true)
    }
}
