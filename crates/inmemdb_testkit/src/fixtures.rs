//! Store fixtures.
//!
//! Convenience constructors for stores in a known state.

use inmemdb_core::{Config, TransactionalStore};

/// Creates a store with `count` variables `var0..` whose values cycle
/// through `distinct_values` values `val0..`.
pub fn populated_store(count: usize, distinct_values: usize) -> TransactionalStore {
    populated_store_with_config(Config::default(), count, distinct_values)
}

/// Like [`populated_store`], with an explicit configuration.
pub fn populated_store_with_config(
    config: Config,
    count: usize,
    distinct_values: usize,
) -> TransactionalStore {
    let mut store = TransactionalStore::with_config(config);
    let distinct = distinct_values.max(1);
    for i in 0..count {
        store
            .set(&var_name(i), &value_name(i % distinct))
            .expect("Failed to populate store");
    }
    store
}

/// Creates a store with `depth` open blocks, each of which has set
/// `shared` to its own depth (`"1"` for the outermost block).
pub fn nested_store(depth: usize, shared: &str) -> TransactionalStore {
    let mut store = TransactionalStore::new();
    for level in 1..=depth {
        store.begin();
        store
            .set(shared, &level.to_string())
            .expect("Failed to set nested value");
    }
    store
}

/// Name of the `i`th fixture variable.
pub fn var_name(i: usize) -> String {
    format!("var{i}")
}

/// Name of the `i`th fixture value.
pub fn value_name(i: usize) -> String {
    format!("val{i}")
}
