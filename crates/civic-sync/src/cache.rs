//! Offline record cache

use std::collections::HashMap;

use parking_lot::RwLock;

/// Key-value store for offline-first reads. Values are opaque JSON.
pub trait RecordCache: Send + Sync {
    fn get(&self, key: &str) -> Option<serde_json::Value>;

    fn put(&self, key: &str, value: serde_json::Value);
}

/// In-memory cache for tests and short-lived processes.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl RecordCache for MemoryCache {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: serde_json::Value) {
        self.entries.write().insert(key.to_string(), value);
    }
}
