//! Naive reference model for differential testing.
//!
//! `ReferenceModel` implements the same observable behavior as
//! `TransactionalStore` in the most direct way possible: `begin` clones the
//! whole table, `rollback` restores the clone, and counts are computed by
//! scanning. It is slow and obviously correct.

use crate::generators::StoreOp;
use crate::invariants::assert_index_consistent;
use inmemdb_core::TransactionalStore;
use std::collections::HashMap;

/// Whole-table snapshot model of the store.
#[derive(Debug, Clone, Default)]
pub struct ReferenceModel {
    current: HashMap<String, String>,
    snapshots: Vec<HashMap<String, String>>,
}

impl ReferenceModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`.
    pub fn set(&mut self, name: &str, value: &str) {
        self.current.insert(name.to_string(), value.to_string());
    }

    /// Returns the value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.current.get(name).map(String::as_str)
    }

    /// Removes `name`.
    pub fn unset(&mut self, name: &str) {
        self.current.remove(name);
    }

    /// Counts variables holding `value` by scanning.
    pub fn count_equal_to(&self, value: &str) -> usize {
        self.current.values().filter(|v| *v == value).count()
    }

    /// Snapshots the table.
    pub fn begin(&mut self) {
        self.snapshots.push(self.current.clone());
    }

    /// Restores the latest snapshot.
    pub fn rollback(&mut self) -> bool {
        match self.snapshots.pop() {
            Some(snapshot) => {
                self.current = snapshot;
                true
            }
            None => false,
        }
    }

    /// Drops every snapshot.
    pub fn commit_all(&mut self) -> bool {
        let open = !self.snapshots.is_empty();
        self.snapshots.clear();
        open
    }

    /// Returns the number of open snapshots.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns the live table.
    pub fn table(&self) -> &HashMap<String, String> {
        &self.current
    }
}

/// Applies `op` to both the store and the model and asserts they agree.
pub fn apply_and_compare(store: &mut TransactionalStore, model: &mut ReferenceModel, op: &StoreOp) {
    match op {
        StoreOp::Set { name, value } => {
            store.set(name, value).expect("set failed");
            model.set(name, value);
        }
        StoreOp::Get { name } => {
            assert_eq!(
                store.get(name).expect("get failed"),
                model.get(name),
                "GET {name} diverged"
            );
        }
        StoreOp::Unset { name } => {
            store.unset(name).expect("unset failed");
            model.unset(name);
        }
        StoreOp::Count { value } => {
            assert_eq!(
                store.count_equal_to(value),
                model.count_equal_to(value),
                "NUMEQUALTO {value} diverged"
            );
        }
        StoreOp::Begin => {
            store.begin();
            model.begin();
        }
        StoreOp::Rollback => {
            assert_eq!(store.rollback(), model.rollback(), "ROLLBACK result diverged");
        }
        StoreOp::Commit => {
            assert_eq!(store.commit_all(), model.commit_all(), "COMMIT result diverged");
        }
    }
}

/// Runs `ops` against a fresh store and model, checking agreement after
/// every step and the count index at the end.
pub fn check_against_model(ops: &[StoreOp]) {
    let mut store = TransactionalStore::new();
    let mut model = ReferenceModel::new();

    for op in ops {
        apply_and_compare(&mut store, &mut model, op);
        assert_eq!(store.depth().as_usize(), model.depth(), "depth diverged after {op:?}");
        assert_eq!(store.len(), model.table().len(), "size diverged after {op:?}");
    }

    assert_tables_equal(&store, &model);
    assert_index_consistent(&store);

    // Unwinding whatever is left open must also agree.
    while model.rollback() {
        assert!(store.rollback());
        assert_tables_equal(&store, &model);
    }
    assert!(!store.rollback());
    assert_index_consistent(&store);
}

/// Asserts the store's live table equals the model's.
pub fn assert_tables_equal(store: &TransactionalStore, model: &ReferenceModel) {
    let actual: HashMap<String, String> = store
        .variables()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    assert_eq!(&actual, model.table(), "tables diverged");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_snapshots() {
        let mut model = ReferenceModel::new();
        model.set("a", "1");
        model.begin();
        model.set("a", "2");
        model.set("b", "2");
        assert_eq!(model.count_equal_to("2"), 2);

        assert!(model.rollback());
        assert_eq!(model.get("a"), Some("1"));
        assert_eq!(model.get("b"), None);
        assert!(!model.rollback());
    }

    #[test]
    fn scripted_sequence_agrees() {
        let ops = vec![
            StoreOp::Set { name: "x".into(), value: "1".into() },
            StoreOp::Begin,
            StoreOp::Begin,
            StoreOp::Set { name: "x".into(), value: "2".into() },
            StoreOp::Rollback,
            StoreOp::Get { name: "x".into() },
            StoreOp::Count { value: "1".into() },
        ];
        check_against_model(&ops);
    }
}
