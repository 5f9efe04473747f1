//! Store shared between threads behind a single lock.

use crate::config::Config;
use crate::error::CoreResult;
use crate::stats::StatsSnapshot;
use crate::store::TransactionalStore;
use crate::types::TransactionDepth;
use parking_lot::Mutex;
use std::sync::Arc;

/// A `TransactionalStore` behind one coarse-grained mutex.
///
/// The count index and the capture-once rule are not designed for
/// fine-grained concurrent mutation, so every operation takes the whole
/// store lock. Transaction blocks belong to the store, not to a caller:
/// a `begin` from one handle is visible to, and can be rolled back by,
/// every clone.
///
/// Use [`SharedStore::with`] to run several operations under a single
/// lock acquisition.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<TransactionalStore>>,
}

impl SharedStore {
    /// Creates an empty shared store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty shared store with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::from_store(TransactionalStore::with_config(config))
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: TransactionalStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// See [`TransactionalStore::set`].
    pub fn set(&self, name: &str, value: &str) -> CoreResult<()> {
        self.inner.lock().set(name, value)
    }

    /// See [`TransactionalStore::get`]. Returns an owned value since the
    /// lock is released on return.
    pub fn get(&self, name: &str) -> CoreResult<Option<String>> {
        Ok(self.inner.lock().get(name)?.map(str::to_owned))
    }

    /// See [`TransactionalStore::unset`].
    pub fn unset(&self, name: &str) -> CoreResult<()> {
        self.inner.lock().unset(name)
    }

    /// See [`TransactionalStore::count_equal_to`].
    #[must_use]
    pub fn count_equal_to(&self, value: &str) -> usize {
        self.inner.lock().count_equal_to(value)
    }

    /// See [`TransactionalStore::begin`].
    pub fn begin(&self) {
        self.inner.lock().begin();
    }

    /// See [`TransactionalStore::rollback`].
    pub fn rollback(&self) -> bool {
        self.inner.lock().rollback()
    }

    /// See [`TransactionalStore::commit_all`].
    pub fn commit_all(&self) -> bool {
        self.inner.lock().commit_all()
    }

    /// Returns the number of open transaction blocks.
    #[must_use]
    pub fn depth(&self) -> TransactionDepth {
        self.inner.lock().depth()
    }

    /// Returns a snapshot of the store's counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut TransactionalStore) -> R) -> R {
        f(&mut *self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clones_share_state() {
        let store = SharedStore::new();
        let other = store.clone();

        store.set("a", "10").unwrap();
        assert_eq!(other.get("a").unwrap().as_deref(), Some("10"));

        other.begin();
        store.set("a", "20").unwrap();
        assert!(store.rollback());
        assert_eq!(other.get("a").unwrap().as_deref(), Some("10"));
    }

    #[test]
    fn concurrent_writers_keep_counts_consistent() {
        let store = SharedStore::new();
        let mut handles = vec![];

        for t in 0..8 {
            let s = store.clone();
            handles.push(thread::spawn(move || {
                for i in 0..50 {
                    s.set(&format!("t{t}-{i}"), "shared").unwrap();
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.count_equal_to("shared"), 400);
        assert_eq!(store.stats().sets, 400);
    }

    #[test]
    fn with_runs_atomically() {
        let store = SharedStore::new();
        let count = store.with(|s| {
            s.begin();
            s.set("a", "1")?;
            s.set("b", "1")?;
            Ok::<_, crate::CoreError>(s.count_equal_to("1"))
        });

        assert_eq!(count.unwrap(), 2);
        assert_eq!(store.depth(), TransactionDepth::new(1));
        assert!(store.commit_all());
        assert!(!store.commit_all());
    }
}
