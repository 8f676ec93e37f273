//! News article records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{
    attribute_value, parse_attribute_key, require_text, FieldValue, FilterKey, Record,
    RecordError, RecordId, SearchField, SortKey, SortValue,
};
use crate::classify::{CredibilityTier, Sentiment};
use crate::filter::PredicateKind;
use crate::sort::SortDirection;

/// A news article from the aggregation feed.
///
/// `credibility` and `sentiment` are supplied by the upstream service; the
/// engine only classifies them for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: RecordId,

    pub headline: String,

    #[serde(default)]
    pub summary: String,

    /// Publisher name (e.g. "Daily Nation")
    #[serde(default)]
    pub source_name: String,

    #[serde(default)]
    pub category: String,

    /// Source credibility rating, 0-100
    #[serde(default)]
    pub credibility: u8,

    /// Raw sentiment label as supplied upstream
    #[serde(default)]
    pub sentiment: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Arbitrary JSON attributes
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl NewsArticle {
    pub fn credibility_tier(&self) -> CredibilityTier {
        CredibilityTier::from_score(self.credibility)
    }

    pub fn sentiment(&self) -> Sentiment {
        Sentiment::parse(&self.sentiment)
    }
}

/// Builder for creating news articles
#[derive(Debug)]
pub struct ArticleBuilder {
    article: NewsArticle,
}

impl Default for ArticleBuilder {
    fn default() -> Self {
        Self {
            article: NewsArticle {
                id: 0,
                headline: String::new(),
                summary: String::new(),
                source_name: String::new(),
                category: String::new(),
                credibility: 0,
                sentiment: String::new(),
                published_at: None,
                url: String::new(),
                tags: Vec::new(),
                attributes: HashMap::new(),
            },
        }
    }
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: RecordId) -> Self {
        self.article.id = id;
        self
    }

    pub fn headline(mut self, headline: impl Into<String>) -> Self {
        self.article.headline = headline.into();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.article.summary = summary.into();
        self
    }

    pub fn source(mut self, source_name: impl Into<String>) -> Self {
        self.article.source_name = source_name.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.article.category = category.into();
        self
    }

    pub fn credibility(mut self, credibility: u8) -> Self {
        self.article.credibility = credibility;
        self
    }

    pub fn sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.article.sentiment = sentiment.into();
        self
    }

    pub fn published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.article.published_at = Some(published_at);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.article.url = url.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.article.tags.push(tag.into());
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.article.attributes.insert(key.into(), value);
        self
    }

    pub fn build(self) -> NewsArticle {
        self.article
    }
}

/// Searchable article fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleField {
    Headline,
    Summary,
    Source,
}

impl SearchField for ArticleField {
    fn name(&self) -> &'static str {
        match self {
            Self::Headline => "headline",
            Self::Summary => "summary",
            Self::Source => "source",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "headline" | "title" => Some(Self::Headline),
            "summary" => Some(Self::Summary),
            "source" | "source_name" => Some(Self::Source),
            _ => None,
        }
    }
}

/// Filter dimensions for the news feed
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleFilter {
    Category,
    Source,
    /// Credibility at or above a threshold
    MinCredibility,
    Sentiment,
    /// Any tag contains the value
    Tag,
    Attribute(String),
}

impl FilterKey for ArticleFilter {
    fn parse(key: &str) -> Option<Self> {
        if let Some(name) = parse_attribute_key(key) {
            return Some(Self::Attribute(name));
        }
        match key.trim().to_ascii_lowercase().as_str() {
            "category" => Some(Self::Category),
            "source" => Some(Self::Source),
            "credibility" | "min_credibility" => Some(Self::MinCredibility),
            "sentiment" => Some(Self::Sentiment),
            "tag" => Some(Self::Tag),
            _ => None,
        }
    }

    fn name(&self) -> String {
        match self {
            Self::Category => "category".to_string(),
            Self::Source => "source".to_string(),
            Self::MinCredibility => "min_credibility".to_string(),
            Self::Sentiment => "sentiment".to_string(),
            Self::Tag => "tag".to_string(),
            Self::Attribute(name) => format!("attr:{name}"),
        }
    }

    fn kind(&self) -> Option<PredicateKind> {
        match self {
            Self::Category | Self::Source | Self::Sentiment => Some(PredicateKind::Exact),
            Self::MinCredibility => Some(PredicateKind::Threshold),
            Self::Tag => Some(PredicateKind::Membership),
            Self::Attribute(_) => None,
        }
    }

    fn is_category(&self) -> bool {
        matches!(self, Self::Category)
    }
}

/// Sort keys for the news feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleSort {
    Headline,
    Source,
    Credibility,
    PublishedAt,
}

impl SortKey for ArticleSort {
    fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "headline" | "title" => Some(Self::Headline),
            "source" => Some(Self::Source),
            "credibility" => Some(Self::Credibility),
            "published_at" | "date" | "latest" => Some(Self::PublishedAt),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Headline => "headline",
            Self::Source => "source",
            Self::Credibility => "credibility",
            Self::PublishedAt => "published_at",
        }
    }

    fn default_direction(&self) -> SortDirection {
        match self {
            Self::Credibility | Self::PublishedAt => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

impl Record for NewsArticle {
    type Field = ArticleField;
    type Filter = ArticleFilter;
    type Sort = ArticleSort;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), RecordError> {
        if self.id == 0 {
            return Err(RecordError::MissingId);
        }
        require_text(self.id, "headline", &self.headline)?;
        if self.credibility > 100 {
            return Err(RecordError::OutOfRange {
                id: self.id,
                field: "credibility",
                value: i64::from(self.credibility),
            });
        }
        Ok(())
    }

    fn search_text(&self) -> Vec<(ArticleField, &str)> {
        vec![
            (ArticleField::Headline, self.headline.as_str()),
            (ArticleField::Summary, self.summary.as_str()),
            (ArticleField::Source, self.source_name.as_str()),
        ]
    }

    fn filter_value(&self, key: &ArticleFilter) -> FieldValue<'_> {
        match key {
            ArticleFilter::Category => FieldValue::Text(&self.category),
            ArticleFilter::Source => FieldValue::Text(&self.source_name),
            ArticleFilter::MinCredibility => FieldValue::Number(f64::from(self.credibility)),
            // Filter on the classified value so blank and unknown read as neutral
            ArticleFilter::Sentiment => FieldValue::Text(self.sentiment().as_str()),
            ArticleFilter::Tag => FieldValue::List(self.tags.iter().map(String::as_str).collect()),
            ArticleFilter::Attribute(name) => attribute_value(&self.attributes, name),
        }
    }

    fn sort_value(&self, key: ArticleSort) -> SortValue<'_> {
        match key {
            ArticleSort::Headline => SortValue::Text(&self.headline),
            ArticleSort::Source => SortValue::Text(&self.source_name),
            ArticleSort::Credibility => SortValue::Number(f64::from(self.credibility)),
            ArticleSort::PublishedAt => self
                .published_at
                .map_or(SortValue::Missing, |at| {
                    SortValue::Number(at.timestamp_millis() as f64)
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_validate_credibility_range() {
        let article = ArticleBuilder::new()
            .id(1)
            .headline("Finance Bill passes second reading")
            .credibility(101)
            .build();
        assert!(matches!(
            article.validate(),
            Err(RecordError::OutOfRange { field: "credibility", .. })
        ));
    }

    #[test]
    fn test_validate_requires_headline() {
        let article = ArticleBuilder::new().id(1).build();
        assert_eq!(
            article.validate(),
            Err(RecordError::MissingField { id: 1, field: "headline" })
        );
    }

    #[test]
    fn test_published_at_sort_value() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let article = ArticleBuilder::new()
            .id(1)
            .headline("New year address")
            .published_at(at)
            .build();
        assert_eq!(
            article.sort_value(ArticleSort::PublishedAt),
            SortValue::Number(1704067200000.0)
        );
    }

    #[test]
    fn test_classification_helpers() {
        let article = ArticleBuilder::new()
            .id(1)
            .headline("Budget")
            .credibility(85)
            .sentiment("Positive")
            .build();
        assert_eq!(article.credibility_tier(), CredibilityTier::High);
        assert_eq!(article.sentiment(), Sentiment::Positive);
    }

    #[test]
    fn test_filter_key_parsing() {
        assert_eq!(ArticleFilter::parse("credibility"), Some(ArticleFilter::MinCredibility));
        assert_eq!(ArticleFilter::MinCredibility.kind(), Some(PredicateKind::Threshold));
        assert_eq!(ArticleFilter::parse("party"), None);
    }
}
