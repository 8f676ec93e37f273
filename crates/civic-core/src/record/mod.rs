//! Civic record types
//!
//! Every entity flowing through the engine implements [`Record`]. Each
//! variant declares its own closed set of searchable fields, filter keys
//! and sort keys, so string keys coming from the outside are validated once
//! at the orchestrator boundary.
//!
//! - **Politician**: name, position, constituency, party history, achievements
//! - **NewsArticle**: headline, summary, source, credibility, sentiment
//!
//! # Example
//!
//! ```rust
//! use civic_core::record::{PoliticianBuilder, Record};
//!
//! let politician = PoliticianBuilder::new()
//!     .id(1)
//!     .name("Anne Waiguru")
//!     .position("Governor")
//!     .category("governor")
//!     .build();
//!
//! assert!(politician.validate().is_ok());
//! ```

mod article;
mod politician;

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::filter::{Predicate, PredicateKind};

pub use article::{ArticleBuilder, ArticleField, ArticleFilter, ArticleSort, NewsArticle};
pub use politician::{
    Politician, PoliticianBuilder, PoliticianField, PoliticianFilter, PoliticianSort,
};

/// Unique record key assigned by the data source.
pub type RecordId = u64;

/// Reasons a record is rejected at ingestion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Id 0 is reserved for "unassigned"
    #[error("record has no id")]
    MissingId,

    /// A required text field is empty
    #[error("record {id} is missing required field '{field}'")]
    MissingField { id: RecordId, field: &'static str },

    /// A numeric field is outside its allowed range
    #[error("record {id} has out-of-range '{field}': {value}")]
    OutOfRange {
        id: RecordId,
        field: &'static str,
        value: i64,
    },

    /// The raw value could not be decoded into a record
    #[error("malformed record: {0}")]
    Decode(String),
}

/// A value exposed to the filter pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(Vec<&'a str>),
    Number(f64),
    Missing,
}

/// A value exposed to the sort comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
    Missing,
}

/// Text fields a search query can be restricted to.
pub trait SearchField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    fn name(&self) -> &'static str;
    fn parse(name: &str) -> Option<Self>;
}

/// Filter dimensions supported by a record variant.
pub trait FilterKey: Clone + Ord + fmt::Debug + Send + Sync + 'static {
    fn parse(key: &str) -> Option<Self>;

    fn name(&self) -> String;

    /// Predicate kind this key accepts; `None` accepts any kind.
    fn kind(&self) -> Option<PredicateKind>;

    /// Whether values for this key must exist in the category registry.
    fn is_category(&self) -> bool {
        false
    }

    fn accepts(&self, predicate: &Predicate) -> bool {
        self.kind().map_or(true, |kind| kind == predicate.kind())
    }
}

/// Sort keys supported by a record variant.
pub trait SortKey: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    fn parse(key: &str) -> Option<Self>;

    fn name(&self) -> &'static str;

    fn default_direction(&self) -> crate::sort::SortDirection {
        crate::sort::SortDirection::Asc
    }
}

/// Common contract for politician and news records.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    type Field: SearchField;
    type Filter: FilterKey;
    type Sort: SortKey;

    fn id(&self) -> RecordId;

    /// Check the fields every consumer relies on.
    fn validate(&self) -> Result<(), RecordError>;

    /// Searchable text in display order. Multi-valued fields yield one
    /// entry per value.
    fn search_text(&self) -> Vec<(Self::Field, &str)>;

    fn filter_value(&self, key: &Self::Filter) -> FieldValue<'_>;

    fn sort_value(&self, key: Self::Sort) -> SortValue<'_>;
}

/// Read a free-form JSON attribute as a filterable value.
pub(crate) fn attribute_value<'a>(
    attributes: &'a HashMap<String, serde_json::Value>,
    name: &str,
) -> FieldValue<'a> {
    match attributes.get(name) {
        Some(serde_json::Value::String(s)) => FieldValue::Text(s),
        Some(serde_json::Value::Number(n)) => {
            n.as_f64().map_or(FieldValue::Missing, FieldValue::Number)
        }
        Some(serde_json::Value::Array(items)) => {
            FieldValue::List(items.iter().filter_map(|v| v.as_str()).collect())
        }
        _ => FieldValue::Missing,
    }
}

/// Parse the `attr:<name>` form shared by both variants.
pub(crate) fn parse_attribute_key(key: &str) -> Option<String> {
    key.strip_prefix("attr:")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

pub(crate) fn require_text(
    id: RecordId,
    field: &'static str,
    value: &str,
) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        Err(RecordError::MissingField { id, field })
    } else {
        Ok(())
    }
}
