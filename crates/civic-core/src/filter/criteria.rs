//! Filter criteria with single-select toggle semantics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::predicate::Predicate;
use crate::record::FilterKey;

/// Value that clears a filter dimension instead of selecting it
pub const ALL_SENTINEL: &str = "all";

/// Result of selecting a filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// The value is now the active filter for its key
    Applied,
    /// The key is no longer constrained (toggle-off or "all")
    Cleared,
    /// Unknown key or mismatched value; criteria unchanged
    Rejected,
}

/// Active filters, at most one predicate per key.
///
/// A missing key means "no constraint on this field".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria<K: Ord> {
    entries: BTreeMap<K, Predicate>,
}

impl<K: Ord> Default for FilterCriteria<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: FilterKey> FilterCriteria<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a value for a key.
    ///
    /// Selecting the value that is already active clears the key, as does
    /// the `"all"` sentinel. Predicates of the wrong kind are rejected.
    pub fn select(&mut self, key: K, predicate: Predicate) -> Selection {
        if is_all_sentinel(&predicate) {
            self.entries.remove(&key);
            return Selection::Cleared;
        }

        if !key.accepts(&predicate) {
            warn!(
                key = %key.name(),
                kind = ?predicate.kind(),
                "ignoring filter value of unsupported kind"
            );
            return Selection::Rejected;
        }

        if let Some(active) = self.entries.get(&key) {
            if active.same_selection(&predicate) {
                self.entries.remove(&key);
                return Selection::Cleared;
            }
        }

        self.entries.insert(key, predicate);
        Selection::Applied
    }

    /// Select using string key and value, as received from a UI or query string.
    ///
    /// Unknown keys and unparseable values are ignored.
    pub fn select_raw(&mut self, key: &str, value: &str) -> Selection {
        let Some(parsed) = K::parse(key) else {
            warn!(key, "ignoring unknown filter key");
            return Selection::Rejected;
        };

        if value.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
            self.entries.remove(&parsed);
            return Selection::Cleared;
        }

        match Predicate::parse(parsed.kind(), value) {
            Some(predicate) => self.select(parsed, predicate),
            None => {
                warn!(key, value, "ignoring unparseable filter value");
                Selection::Rejected
            }
        }
    }

    /// Remove the constraint on a key. Returns `true` if one was active.
    pub fn clear(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, key: &K) -> Option<&Predicate> {
        self.entries.get(key)
    }

    /// Active filters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Predicate)> {
        self.entries.iter()
    }

    /// Active filters as string pairs, for passing to a data source
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(key, predicate)| (key.name(), predicate.to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_all_sentinel(predicate: &Predicate) -> bool {
    predicate
        .text()
        .map_or(false, |text| text.trim().eq_ignore_ascii_case(ALL_SENTINEL))
}
