//! Invariant checks over a live store.

use inmemdb_core::TransactionalStore;
use std::collections::HashMap;

/// Asserts the value index agrees with a full recount of the table.
///
/// Every value held by some variable must report exactly that many
/// holders, and no value may report holders it does not have.
pub fn assert_index_consistent(store: &TransactionalStore) {
    let mut expected: HashMap<&str, usize> = HashMap::new();
    for (_, value) in store.variables() {
        *expected.entry(value).or_insert(0) += 1;
    }

    let actual: HashMap<&str, usize> = store.value_counts().collect();
    assert_eq!(actual, expected, "value index diverged from table");

    for (value, count) in &expected {
        assert_eq!(
            store.count_equal_to(value),
            *count,
            "count_equal_to({value}) is stale"
        );
    }
}
