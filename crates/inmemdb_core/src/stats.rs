//! Store statistics.
//!
//! Provides operation counters for diagnostics.
//!
//! # Usage
//!
//! ```rust
//! use inmemdb_core::TransactionalStore;
//!
//! let mut store = TransactionalStore::new();
//! store.set("a", "10")?;
//! store.get("a")?;
//!
//! let stats = store.stats().snapshot();
//! assert_eq!(stats.sets, 1);
//! assert_eq!(stats.gets, 1);
//! # Ok::<(), inmemdb_core::CoreError>(())
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Store statistics.
///
/// Counters are atomic so read paths (`get`, `count_equal_to`) can record
/// through a shared reference. Values only ever increase.
#[derive(Debug, Default)]
pub struct StoreStats {
    // Data commands
    /// Successful `set` calls.
    sets: AtomicU64,
    /// Successful `get` calls.
    gets: AtomicU64,
    /// Successful `unset` calls.
    unsets: AtomicU64,
    /// `count_equal_to` calls.
    count_queries: AtomicU64,

    // Transaction commands
    /// Blocks opened.
    transactions_begun: AtomicU64,
    /// Blocks rolled back.
    transactions_rolled_back: AtomicU64,
    /// Successful `commit_all` calls.
    commits: AtomicU64,
    /// Blocks closed by `commit_all`.
    frames_committed: AtomicU64,
    /// Prior states replayed by rollbacks.
    prior_states_restored: AtomicU64,

    // Errors
    /// Calls rejected with `InvalidArgument`.
    rejected_arguments: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Increment methods (internal use) ===

    pub(crate) fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unset(&self) {
        self.unsets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_count_query(&self) {
        self.count_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.transactions_begun.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a rollback that replayed `restored` prior states.
    pub(crate) fn record_rollback(&self, restored: u64) {
        self.transactions_rolled_back.fetch_add(1, Ordering::Relaxed);
        self.prior_states_restored
            .fetch_add(restored, Ordering::Relaxed);
    }

    /// Records a commit that closed `frames` blocks.
    pub(crate) fn record_commit(&self, frames: u64) {
        self.commits.fetch_add(1, Ordering::Relaxed);
        self.frames_committed.fetch_add(frames, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected_arguments.fetch_add(1, Ordering::Relaxed);
    }

    // === Getter methods (public API) ===

    /// Returns the number of successful `set` calls.
    pub fn sets(&self) -> u64 {
        self.sets.load(Ordering::Relaxed)
    }

    /// Returns the number of successful `get` calls.
    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    /// Returns the number of successful `unset` calls.
    pub fn unsets(&self) -> u64 {
        self.unsets.load(Ordering::Relaxed)
    }

    /// Returns the number of count queries.
    pub fn count_queries(&self) -> u64 {
        self.count_queries.load(Ordering::Relaxed)
    }

    /// Returns the number of blocks opened.
    pub fn transactions_begun(&self) -> u64 {
        self.transactions_begun.load(Ordering::Relaxed)
    }

    /// Returns the number of blocks rolled back.
    pub fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back.load(Ordering::Relaxed)
    }

    /// Returns the number of successful commits.
    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }

    /// Returns the number of blocks closed by commits.
    pub fn frames_committed(&self) -> u64 {
        self.frames_committed.load(Ordering::Relaxed)
    }

    /// Returns the number of prior states replayed by rollbacks.
    pub fn prior_states_restored(&self) -> u64 {
        self.prior_states_restored.load(Ordering::Relaxed)
    }

    /// Returns the number of rejected calls.
    pub fn rejected_arguments(&self) -> u64 {
        self.rejected_arguments.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            sets: self.sets(),
            gets: self.gets(),
            unsets: self.unsets(),
            count_queries: self.count_queries(),
            transactions_begun: self.transactions_begun(),
            transactions_rolled_back: self.transactions_rolled_back(),
            commits: self.commits(),
            frames_committed: self.frames_committed(),
            prior_states_restored: self.prior_states_restored(),
            rejected_arguments: self.rejected_arguments(),
        }
    }
}

/// A point-in-time snapshot of store statistics.
///
/// Unlike `StoreStats`, this is a plain struct that can be serialized,
/// compared, or passed across threads without atomics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    /// Successful `set` calls.
    pub sets: u64,
    /// Successful `get` calls.
    pub gets: u64,
    /// Successful `unset` calls.
    pub unsets: u64,
    /// Count queries.
    pub count_queries: u64,
    /// Blocks opened.
    pub transactions_begun: u64,
    /// Blocks rolled back.
    pub transactions_rolled_back: u64,
    /// Successful commits.
    pub commits: u64,
    /// Blocks closed by commits.
    pub frames_committed: u64,
    /// Prior states replayed by rollbacks.
    pub prior_states_restored: u64,
    /// Rejected calls.
    pub rejected_arguments: u64,
}
