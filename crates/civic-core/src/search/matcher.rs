//! SearchMatcher - substring matching over record text fields

use serde::{Deserialize, Serialize};

use super::strategies::contains_folded;
use crate::record::{Record, SearchField};

/// How a multi-word query is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The whole query is one literal substring
    #[default]
    Phrase,
    /// Every term must appear, each in any searched field
    AllTerms,
}

/// A free-text query, optionally restricted to a subset of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "F: Serialize", deserialize = "F: Deserialize<'de>"))]
pub struct SearchQuery<F> {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<F>>,
    #[serde(default)]
    pub mode: MatchMode,
}

impl<F> Default for SearchQuery<F> {
    fn default() -> Self {
        Self {
            text: String::new(),
            fields: None,
            mode: MatchMode::Phrase,
        }
    }
}

impl<F: SearchField> SearchQuery<F> {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = F>) -> Self {
        self.fields = Some(fields.into_iter().collect());
        self
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whitespace-only text means "no search"
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Matcher with the query pre-folded to lowercase
#[derive(Debug, Clone)]
pub struct SearchMatcher<F> {
    needles: Vec<String>,
    fields: Option<Vec<F>>,
}

impl<F: SearchField> SearchMatcher<F> {
    pub fn new(query: &SearchQuery<F>) -> Self {
        let folded = query.text.trim().to_lowercase();
        let needles = if folded.is_empty() {
            Vec::new()
        } else {
            match query.mode {
                MatchMode::Phrase => vec![folded],
                MatchMode::AllTerms => folded.split_whitespace().map(str::to_string).collect(),
            }
        };

        Self {
            needles,
            fields: query.fields.clone(),
        }
    }

    /// True when every record matches
    pub fn is_trivial(&self) -> bool {
        self.needles.is_empty()
    }

    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Record<Field = F>,
    {
        if self.is_trivial() {
            return true;
        }

        let text: Vec<&str> = record
            .search_text()
            .into_iter()
            .filter(|(field, _)| self.includes(*field))
            .map(|(_, text)| text)
            .collect();

        self.needles
            .iter()
            .all(|needle| text.iter().any(|t| contains_folded(t, needle)))
    }

    fn includes(&self, field: F) -> bool {
        match &self.fields {
            Some(fields) => fields.contains(&field),
            None => true,
        }
    }
}

/// One-shot match of a record against a query
pub fn matches<R: Record>(record: &R, query: &SearchQuery<R::Field>) -> bool {
    SearchMatcher::new(query).matches(record)
}
