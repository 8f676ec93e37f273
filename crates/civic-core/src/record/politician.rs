//! Politician records

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{
    attribute_value, parse_attribute_key, require_text, FieldValue, FilterKey, Record,
    RecordError, RecordId, SearchField, SortKey, SortValue,
};
use crate::filter::PredicateKind;
use crate::sort::SortDirection;

/// A politician profile as returned by the records service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Politician {
    pub id: RecordId,

    pub name: String,

    /// Current office (e.g. "Governor", "Member of Parliament")
    #[serde(default)]
    pub position: String,

    #[serde(default)]
    pub constituency: String,

    /// Office category used by the archive filter (e.g. "governor")
    #[serde(default)]
    pub category: String,

    /// Parties in chronological order; the last entry is the current party
    #[serde(default)]
    pub party_history: Vec<String>,

    #[serde(default)]
    pub achievements: Vec<String>,

    /// Free-text education summary (e.g. "PhD Economics, University of Nairobi")
    #[serde(default)]
    pub education: String,

    /// Year first elected or appointed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_elected: Option<i32>,

    /// Arbitrary JSON attributes
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl Politician {
    /// Current party, if any
    pub fn current_party(&self) -> Option<&str> {
        self.party_history.last().map(String::as_str)
    }

    pub fn achievement_count(&self) -> usize {
        self.achievements.len()
    }
}

/// Builder for creating politician records
#[derive(Debug)]
pub struct PoliticianBuilder {
    politician: Politician,
}

impl Default for PoliticianBuilder {
    fn default() -> Self {
        Self {
            politician: Politician {
                id: 0,
                name: String::new(),
                position: String::new(),
                constituency: String::new(),
                category: String::new(),
                party_history: Vec::new(),
                achievements: Vec::new(),
                education: String::new(),
                first_elected: None,
                attributes: HashMap::new(),
            },
        }
    }
}

impl PoliticianBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: RecordId) -> Self {
        self.politician.id = id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.politician.name = name.into();
        self
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.politician.position = position.into();
        self
    }

    pub fn constituency(mut self, constituency: impl Into<String>) -> Self {
        self.politician.constituency = constituency.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.politician.category = category.into();
        self
    }

    pub fn party(mut self, party: impl Into<String>) -> Self {
        self.politician.party_history.push(party.into());
        self
    }

    pub fn parties(mut self, parties: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.politician
            .party_history
            .extend(parties.into_iter().map(|p| p.into()));
        self
    }

    pub fn achievement(mut self, achievement: impl Into<String>) -> Self {
        self.politician.achievements.push(achievement.into());
        self
    }

    pub fn achievements(
        mut self,
        achievements: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.politician
            .achievements
            .extend(achievements.into_iter().map(|a| a.into()));
        self
    }

    pub fn education(mut self, education: impl Into<String>) -> Self {
        self.politician.education = education.into();
        self
    }

    pub fn first_elected(mut self, year: i32) -> Self {
        self.politician.first_elected = Some(year);
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.politician.attributes.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Politician {
        self.politician
    }
}

/// Searchable politician fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliticianField {
    Name,
    Position,
    Constituency,
    Party,
}

impl SearchField for PoliticianField {
    fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Position => "position",
            Self::Constituency => "constituency",
            Self::Party => "party",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "position" => Some(Self::Position),
            "constituency" => Some(Self::Constituency),
            "party" | "party_history" => Some(Self::Party),
            _ => None,
        }
    }
}

/// Filter dimensions for the political archive
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliticianFilter {
    /// Exact match on the office category
    Category,
    /// Any party in the history contains the value
    Party,
    /// Exact match on the constituency
    Constituency,
    /// Free-form attribute test
    Attribute(String),
}

impl FilterKey for PoliticianFilter {
    fn parse(key: &str) -> Option<Self> {
        if let Some(name) = parse_attribute_key(key) {
            return Some(Self::Attribute(name));
        }
        match key.trim().to_ascii_lowercase().as_str() {
            "category" => Some(Self::Category),
            "party" => Some(Self::Party),
            "constituency" => Some(Self::Constituency),
            _ => None,
        }
    }

    fn name(&self) -> String {
        match self {
            Self::Category => "category".to_string(),
            Self::Party => "party".to_string(),
            Self::Constituency => "constituency".to_string(),
            Self::Attribute(name) => format!("attr:{name}"),
        }
    }

    fn kind(&self) -> Option<PredicateKind> {
        match self {
            Self::Category | Self::Constituency => Some(PredicateKind::Exact),
            Self::Party => Some(PredicateKind::Membership),
            Self::Attribute(_) => None,
        }
    }

    fn is_category(&self) -> bool {
        matches!(self, Self::Category)
    }
}

/// Sort keys for politician lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliticianSort {
    Name,
    Constituency,
    LastParty,
    Achievements,
    /// By first-elected year, so ascending puts the longest-serving first
    Experience,
}

impl SortKey for PoliticianSort {
    fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "constituency" => Some(Self::Constituency),
            "party" | "last_party" => Some(Self::LastParty),
            "achievements" => Some(Self::Achievements),
            "experience" => Some(Self::Experience),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Constituency => "constituency",
            Self::LastParty => "last_party",
            Self::Achievements => "achievements",
            Self::Experience => "experience",
        }
    }

    fn default_direction(&self) -> SortDirection {
        match self {
            Self::Achievements => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

impl Record for Politician {
    type Field = PoliticianField;
    type Filter = PoliticianFilter;
    type Sort = PoliticianSort;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate(&self) -> Result<(), RecordError> {
        if self.id == 0 {
            return Err(RecordError::MissingId);
        }
        require_text(self.id, "name", &self.name)
    }

    fn search_text(&self) -> Vec<(PoliticianField, &str)> {
        let mut text = Vec::with_capacity(3 + self.party_history.len());
        text.push((PoliticianField::Name, self.name.as_str()));
        text.push((PoliticianField::Position, self.position.as_str()));
        text.push((PoliticianField::Constituency, self.constituency.as_str()));
        for party in &self.party_history {
            text.push((PoliticianField::Party, party.as_str()));
        }
        text
    }

    fn filter_value(&self, key: &PoliticianFilter) -> FieldValue<'_> {
        match key {
            PoliticianFilter::Category => FieldValue::Text(&self.category),
            PoliticianFilter::Party => {
                FieldValue::List(self.party_history.iter().map(String::as_str).collect())
            }
            PoliticianFilter::Constituency => FieldValue::Text(&self.constituency),
            PoliticianFilter::Attribute(name) => attribute_value(&self.attributes, name),
        }
    }

    fn sort_value(&self, key: PoliticianSort) -> SortValue<'_> {
        match key {
            PoliticianSort::Name => SortValue::Text(&self.name),
            PoliticianSort::Constituency => SortValue::Text(&self.constituency),
            PoliticianSort::LastParty => self
                .current_party()
                .map_or(SortValue::Missing, SortValue::Text),
            PoliticianSort::Achievements => SortValue::Number(self.achievements.len() as f64),
            PoliticianSort::Experience => self
                .first_elected
                .map_or(SortValue::Missing, |year| SortValue::Number(year as f64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ruto() -> Politician {
        PoliticianBuilder::new()
            .id(2)
            .name("William Ruto")
            .position("President")
            .constituency("Uasin Gishu")
            .category("president")
            .parties(["KANU", "ODM", "URP", "UDA"])
            .achievement("Elected President 2022")
            .first_elected(1997)
            .build()
    }

    #[test]
    fn test_builder_and_current_party() {
        let p = ruto();
        assert_eq!(p.current_party(), Some("UDA"));
        assert_eq!(p.achievement_count(), 1);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let p = PoliticianBuilder::new().name("No Id").build();
        assert_eq!(p.validate(), Err(RecordError::MissingId));

        let p = PoliticianBuilder::new().id(5).name("  ").build();
        assert_eq!(
            p.validate(),
            Err(RecordError::MissingField { id: 5, field: "name" })
        );
    }

    #[test]
    fn test_search_text_includes_every_party() {
        let p = ruto();
        let parties: Vec<&str> = p
            .search_text()
            .into_iter()
            .filter(|(field, _)| *field == PoliticianField::Party)
            .map(|(_, text)| text)
            .collect();
        assert_eq!(parties, vec!["KANU", "ODM", "URP", "UDA"]);
    }

    #[test]
    fn test_filter_key_parsing() {
        assert_eq!(PoliticianFilter::parse("Category"), Some(PoliticianFilter::Category));
        assert_eq!(
            PoliticianFilter::parse("attr:county"),
            Some(PoliticianFilter::Attribute("county".into()))
        );
        assert_eq!(PoliticianFilter::parse("credibility"), None);
        assert_eq!(PoliticianFilter::Attribute("county".into()).name(), "attr:county");
    }

    #[test]
    fn test_sort_defaults() {
        assert_eq!(PoliticianSort::Achievements.default_direction(), SortDirection::Desc);
        assert_eq!(PoliticianSort::Name.default_direction(), SortDirection::Asc);
        assert_eq!(PoliticianSort::parse("party"), Some(PoliticianSort::LastParty));
    }

    #[test]
    fn test_experience_sorts_earliest_first() {
        let p = ruto();
        assert_eq!(p.sort_value(PoliticianSort::Experience), SortValue::Number(1997.0));
        let fresh = PoliticianBuilder::new().id(3).name("New").build();
        assert_eq!(fresh.sort_value(PoliticianSort::Experience), SortValue::Missing);
        assert_eq!(fresh.sort_value(PoliticianSort::LastParty), SortValue::Missing);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let p: Politician =
            serde_json::from_str(r#"{"id": 9, "name": "Martha Karua"}"#).unwrap();
        assert_eq!(p.name, "Martha Karua");
        assert!(p.party_history.is_empty());
        assert_eq!(p.first_elected, None);
    }
}
