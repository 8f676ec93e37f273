//! Upstream data source

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Filter selections forwarded to the data source as strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceQuery {
    pub filters: BTreeMap<String, String>,
}

impl SourceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            filters: pairs.into_iter().collect(),
        }
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// Upstream failures. All of them degrade to stale data in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Network collaborator that supplies records.
///
/// Pages are 1-based. A page shorter than `page_size` is the last one.
#[async_trait]
pub trait RecordSource<R: Send>: Send + Sync {
    async fn fetch_page(
        &self,
        query: &SourceQuery,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<R>, SourceError>;

    async fn search(&self, text: &str) -> Result<Vec<R>, SourceError>;

    /// Display name for notices and logs
    fn name(&self) -> &str;
}
