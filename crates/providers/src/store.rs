// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Persisted key-value store interface.
//!
//! The store is an external collaborator: string keys, string values,
//! read-only from this system's perspective. The audit resolver only
//! enumerates keys and reads values; it never writes. Key enumeration
//! order is store-defined and callers must not rely on it.

use std::collections::HashMap;

/// A synchronous, string-keyed, string-valued store.
pub trait KeyValueStore: Send + Sync {
    /// All keys currently in the store, in store-defined order.
    fn keys(&self) -> Vec<String>;

    /// The value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory store, used by tests and by the CLI after loading a snapshot
/// file.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing entries.
    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Insert an entry. Only callers that own the store mutate it; the
    /// resolver side sees the read-only [`KeyValueStore`] view.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl KeyValueStore for MemoryStore {
    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_reads_back() {
        let mut store = MemoryStore::new();
        store.insert("audit_results_c1", "{}");
        assert_eq!(store.get("audit_results_c1").as_deref(), Some("{}"));
        assert_eq!(store.keys(), vec!["audit_results_c1".to_string()]);
        assert!(store.get("missing").is_none());
    }
}
