//! Transactional key-value store.

use crate::config::Config;
use crate::error::CoreResult;
use crate::index::ValueIndex;
use crate::stats::StoreStats;
use crate::types::TransactionDepth;
use crate::undo::{PriorState, UndoStack};
use std::collections::HashMap;
use tracing::{debug, trace};

/// In-memory key-value store with nested transaction blocks.
///
/// `TransactionalStore` owns:
/// - the variable table (name -> value), which is always the live state
/// - the value index (value -> number of variables holding it)
/// - a stack of undo frames, one per open transaction block
///
/// Reads never consult the undo stack. Because every write lands in the
/// live table immediately, changes made in an outer block are visible in
/// every block nested inside it.
///
/// ## Transactions
///
/// Before a write touches a variable, the innermost frame records the
/// variable's prior state if it has not already done so. `rollback` pops
/// that frame and writes each prior state back. `commit_all` drops every
/// frame, which makes the current state permanent.
///
/// ```rust
/// use inmemdb_core::TransactionalStore;
///
/// let mut store = TransactionalStore::new();
/// store.begin();
/// store.set("a", "10")?;
/// store.begin();
/// store.set("a", "20")?;
///
/// assert!(store.rollback());
/// assert_eq!(store.get("a")?, Some("10"));
/// assert!(store.rollback());
/// assert_eq!(store.get("a")?, None);
/// assert!(!store.rollback());
/// # Ok::<(), inmemdb_core::CoreError>(())
/// ```
///
/// The store is single-threaded. Wrap it in a [`SharedStore`] to use it
/// from several threads.
///
/// [`SharedStore`]: crate::SharedStore
#[derive(Debug)]
pub struct TransactionalStore {
    /// Configuration.
    config: Config,
    /// Variable name -> current value.
    variables: HashMap<String, String>,
    /// Value -> number of variables holding it.
    index: ValueIndex,
    /// One frame per open transaction block.
    undo: UndoStack,
    /// Operation counters.
    stats: StoreStats,
}

impl TransactionalStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            index: ValueIndex::new(config.prune_zero_counts),
            config,
            variables: HashMap::new(),
            undo: UndoStack::new(),
            stats: StoreStats::new(),
        }
    }

    // === Data commands ===

    /// Sets `name` to `value`, overwriting any current value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is empty or either argument
    /// exceeds a configured length limit. The store is left unchanged.
    pub fn set(&mut self, name: &str, value: &str) -> CoreResult<()> {
        self.check(|config| {
            config.check_name(name)?;
            config.check_value(value)
        })?;

        self.capture_prior_state(name);
        self.apply_set(name.to_owned(), value.to_owned());
        self.stats.record_set();
        Ok(())
    }

    /// Returns the current value of `name`, or `None` if it is unset.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is empty.
    pub fn get(&self, name: &str) -> CoreResult<Option<&str>> {
        self.check(|config| config.check_name(name))?;

        self.stats.record_get();
        Ok(self.variables.get(name).map(String::as_str))
    }

    /// Removes `name`. Unsetting an absent variable is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is empty.
    pub fn unset(&mut self, name: &str) -> CoreResult<()> {
        self.check(|config| config.check_name(name))?;

        self.capture_prior_state(name);
        self.apply_unset(name);
        self.stats.record_unset();
        Ok(())
    }

    /// Returns the number of variables currently set to `value`.
    #[must_use]
    pub fn count_equal_to(&self, value: &str) -> usize {
        self.stats.record_count_query();
        self.index.count(value)
    }

    // === Transaction commands ===

    /// Opens a new transaction block nested inside any open block.
    pub fn begin(&mut self) {
        self.undo.push();
        self.stats.record_begin();
        debug!(depth = %self.depth(), "began transaction");
    }

    /// Undoes every change made since the most recent `begin`.
    ///
    /// Returns `false`, changing nothing, if no block is open.
    pub fn rollback(&mut self) -> bool {
        let Some(frame) = self.undo.pop() else {
            return false;
        };

        let restored = frame.len();
        // Restored values are the ones the enclosing block saw, so replay
        // bypasses capture: the enclosing frame's history stays as it was.
        for (name, prior) in frame.into_entries() {
            match prior {
                PriorState::Set(value) => self.apply_set(name, value),
                PriorState::Unset => self.apply_unset(&name),
            }
        }

        self.stats.record_rollback(restored as u64);
        debug!(depth = %self.depth(), restored, "rolled back transaction");
        true
    }

    /// Makes the changes of every open block permanent.
    ///
    /// Returns `false`, changing nothing, if no block is open.
    pub fn commit_all(&mut self) -> bool {
        let discarded = self.undo.clear();
        if discarded == 0 {
            return false;
        }

        self.stats.record_commit(discarded as u64);
        debug!(frames = discarded, "committed all open transactions");
        true
    }

    // === Introspection ===

    /// Returns the number of open transaction blocks.
    #[must_use]
    pub fn depth(&self) -> TransactionDepth {
        TransactionDepth::new(self.undo.depth())
    }

    /// Returns true if at least one transaction block is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Returns the number of variables currently set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if no variable is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterates over the live `(name, value)` pairs.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterates over `(value, count)` pairs with a non-zero count.
    pub fn value_counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.index.iter()
    }

    /// Returns the store's operation counters.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Returns the store's configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // === Internals ===

    /// Runs argument validation, counting rejections.
    fn check(&self, validate: impl FnOnce(&Config) -> CoreResult<()>) -> CoreResult<()> {
        validate(&self.config).inspect_err(|_| self.stats.record_rejected())
    }

    /// Records the prior state of `name` in the innermost frame, once.
    fn capture_prior_state(&mut self, name: &str) {
        let Some(frame) = self.undo.top_mut() else {
            return;
        };
        let current = self.variables.get(name).map(String::as_str);
        if frame.capture_if_absent(name, current) {
            trace!(name, prior = ?current, "captured prior state");
        }
    }

    /// Writes `name -> value` to the live table and index. No capture.
    fn apply_set(&mut self, name: String, value: String) {
        self.index.increment(&value);
        if let Some(previous) = self.variables.insert(name, value) {
            self.index.decrement(&previous);
        }
    }

    /// Removes `name` from the live table and index. No capture.
    fn apply_unset(&mut self, name: &str) {
        if let Some(previous) = self.variables.remove(name) {
            self.index.decrement(&previous);
        }
    }
}

impl Default for TransactionalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn recount(store: &TransactionalStore, value: &str) -> usize {
        store.variables().filter(|(_, v)| *v == value).count()
    }

    #[test]
    fn set_then_get() {
        let mut store = TransactionalStore::new();
        store.set("x", "10").unwrap();
        assert_eq!(store.get("x").unwrap(), Some("10"));

        store.unset("x").unwrap();
        assert_eq!(store.get("x").unwrap(), None);
    }

    #[test]
    fn unset_is_idempotent() {
        let mut store = TransactionalStore::new();
        store.set("x", "10").unwrap();
        store.unset("x").unwrap();
        store.unset("x").unwrap();

        assert_eq!(store.get("x").unwrap(), None);
        assert_eq!(store.count_equal_to("10"), 0);
    }

    #[test]
    fn counts_follow_overwrites() {
        let mut store = TransactionalStore::new();
        store.set("a", "10").unwrap();
        store.set("b", "10").unwrap();
        assert_eq!(store.count_equal_to("10"), 2);
        assert_eq!(store.count_equal_to("20"), 0);

        store.set("b", "30").unwrap();
        assert_eq!(store.count_equal_to("10"), 1);
        assert_eq!(store.count_equal_to("30"), 1);
    }

    #[test]
    fn overwrite_with_same_value_keeps_count() {
        let mut store = TransactionalStore::new();
        store.set("a", "10").unwrap();
        store.set("a", "10").unwrap();
        assert_eq!(store.count_equal_to("10"), 1);
    }

    #[test]
    fn empty_value_is_a_value() {
        let mut store = TransactionalStore::new();
        store.set("a", "").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(""));
        assert_eq!(store.count_equal_to(""), 1);
    }

    #[test]
    fn empty_name_rejected_without_state_change() {
        let mut store = TransactionalStore::new();
        store.begin();

        assert!(matches!(
            store.set("", "10"),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(store.unset("").is_err());
        assert!(store.get("").is_err());

        assert!(store.is_empty());
        assert_eq!(store.count_equal_to("10"), 0);
        assert_eq!(store.stats().rejected_arguments(), 3);
        assert_eq!(store.stats().sets(), 0);
    }

    #[test]
    fn length_limits_enforced() {
        let mut store = TransactionalStore::with_config(Config::new().max_value_len(2));
        assert!(store.set("a", "12").is_ok());
        assert!(store.set("a", "123").is_err());
        assert_eq!(store.get("a").unwrap(), Some("12"));
    }

    #[test]
    fn rollback_without_transaction() {
        let mut store = TransactionalStore::new();
        store.set("a", "10").unwrap();

        assert!(!store.rollback());
        assert!(!store.commit_all());
        assert_eq!(store.get("a").unwrap(), Some("10"));
        assert_eq!(store.stats().transactions_rolled_back(), 0);
        assert_eq!(store.stats().commits(), 0);
    }

    #[test]
    fn rollback_restores_prior_value_and_counts() {
        let mut store = TransactionalStore::new();
        store.set("x", "A").unwrap();
        store.begin();
        store.set("x", "B").unwrap();
        store.set("x", "C").unwrap();
        assert_eq!(store.count_equal_to("A"), 0);

        assert!(store.rollback());
        assert_eq!(store.get("x").unwrap(), Some("A"));
        assert_eq!(store.count_equal_to("A"), 1);
        assert_eq!(store.count_equal_to("B"), 0);
        assert_eq!(store.count_equal_to("C"), 0);
    }

    #[test]
    fn nested_rollback() {
        let mut store = TransactionalStore::new();
        store.begin();
        store.set("a", "10").unwrap();
        assert_eq!(store.get("a").unwrap(), Some("10"));
        store.begin();
        store.set("a", "20").unwrap();
        assert_eq!(store.get("a").unwrap(), Some("20"));

        assert!(store.rollback());
        assert_eq!(store.get("a").unwrap(), Some("10"));
        assert!(store.rollback());
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn commit_makes_changes_permanent() {
        let mut store = TransactionalStore::new();
        store.begin();
        store.set("a", "30").unwrap();
        store.begin();
        store.set("a", "40").unwrap();

        assert!(store.commit_all());
        assert_eq!(store.get("a").unwrap(), Some("40"));
        assert!(!store.rollback());
        assert_eq!(store.stats().frames_committed(), 2);
    }

    #[test]
    fn rollback_after_nested_unset() {
        let mut store = TransactionalStore::new();
        store.set("a", "50").unwrap();
        store.begin();
        assert_eq!(store.get("a").unwrap(), Some("50"));
        store.set("a", "60").unwrap();
        store.begin();
        store.unset("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);

        assert!(store.rollback());
        assert_eq!(store.get("a").unwrap(), Some("60"));
        assert!(store.commit_all());
        assert_eq!(store.get("a").unwrap(), Some("60"));
        assert!(!store.rollback());
    }

    #[test]
    fn rollback_restores_count_after_nested_unset() {
        let mut store = TransactionalStore::new();
        store.set("a", "10").unwrap();
        store.begin();
        assert_eq!(store.count_equal_to("10"), 1);
        store.begin();
        store.unset("a").unwrap();
        assert_eq!(store.count_equal_to("10"), 0);

        assert!(store.rollback());
        assert_eq!(store.count_equal_to("10"), 1);
        assert!(store.commit_all());
    }

    #[test]
    fn inner_rollback_does_not_leak_into_outer_frame() {
        let mut store = TransactionalStore::new();
        store.set("x", "1").unwrap();
        store.begin();
        store.begin();
        store.set("x", "2").unwrap();

        assert!(store.rollback());
        assert_eq!(store.get("x").unwrap(), Some("1"));
        // The outer block never touched x, so it has nothing to undo.
        assert!(store.undo.top().unwrap().is_empty());

        assert!(store.rollback());
        assert_eq!(store.get("x").unwrap(), Some("1"));
        assert_eq!(store.count_equal_to("1"), 1);
        assert_eq!(store.count_equal_to("2"), 0);
    }

    #[test]
    fn prior_state_captured_once_per_frame() {
        let mut store = TransactionalStore::new();
        store.set("a", "1").unwrap();
        store.begin();
        store.set("a", "2").unwrap();
        store.unset("a").unwrap();
        store.set("a", "3").unwrap();

        let frame = store.undo.top().unwrap();
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.prior_state("a"), Some(&PriorState::Set("1".into())));
    }

    #[test]
    fn rollback_of_created_variable_unsets_it() {
        let mut store = TransactionalStore::new();
        store.begin();
        store.unset("ghost").unwrap();
        store.set("fresh", "v").unwrap();

        assert!(store.rollback());
        assert_eq!(store.get("fresh").unwrap(), None);
        assert_eq!(store.get("ghost").unwrap(), None);
        assert_eq!(store.count_equal_to("v"), 0);
        assert_eq!(store.stats().prior_states_restored(), 2);
    }

    #[test]
    fn reads_see_outer_blocks() {
        let mut store = TransactionalStore::new();
        store.set("base", "0").unwrap();
        store.begin();
        store.set("outer", "1").unwrap();
        store.begin();

        assert_eq!(store.get("base").unwrap(), Some("0"));
        assert_eq!(store.get("outer").unwrap(), Some("1"));
        assert_eq!(store.depth(), TransactionDepth::new(2));
        assert!(store.in_transaction());
    }

    #[test]
    fn index_matches_table_after_mixed_operations() {
        let mut store = TransactionalStore::with_config(Config::new().prune_zero_counts(false));
        store.set("a", "1").unwrap();
        store.set("b", "1").unwrap();
        store.begin();
        store.set("c", "2").unwrap();
        store.set("a", "2").unwrap();
        store.begin();
        store.unset("b").unwrap();
        store.rollback();
        store.set("d", "1").unwrap();
        store.rollback();

        for value in ["1", "2"] {
            assert_eq!(store.count_equal_to(value), recount(&store, value));
        }
        assert_eq!(store.len(), 2);
        let mut counts: Vec<_> = store.value_counts().collect();
        counts.sort();
        assert_eq!(counts, vec![("1", 2)]);
    }
}
