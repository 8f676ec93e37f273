//! Filter predicates

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::FieldValue;
use crate::search::contains_folded;

/// The three predicate kinds a filter key can accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    Exact,
    Membership,
    Threshold,
}

/// A test applied to one field of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Predicate {
    /// Case-insensitive equality
    Equals(String),
    /// Case-insensitive substring; on a list, any element
    Contains(String),
    /// Numeric value at or above the minimum
    AtLeast(f64),
}

impl Predicate {
    pub fn equals(value: impl Into<String>) -> Self {
        Self::Equals(value.into())
    }

    pub fn contains(value: impl Into<String>) -> Self {
        Self::Contains(value.into())
    }

    pub fn at_least(min: f64) -> Self {
        Self::AtLeast(min)
    }

    pub fn kind(&self) -> PredicateKind {
        match self {
            Self::Equals(_) => PredicateKind::Exact,
            Self::Contains(_) => PredicateKind::Membership,
            Self::AtLeast(_) => PredicateKind::Threshold,
        }
    }

    /// Build a predicate from a raw string for the given kind.
    ///
    /// Keys without a fixed kind take the raw value as an exact match.
    /// Returns `None` when a threshold value is not numeric.
    pub fn parse(kind: Option<PredicateKind>, raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match kind {
            Some(PredicateKind::Exact) | None => Some(Self::Equals(raw.to_string())),
            Some(PredicateKind::Membership) => Some(Self::Contains(raw.to_string())),
            Some(PredicateKind::Threshold) => raw.parse::<f64>().ok().map(Self::AtLeast),
        }
    }

    /// Text operand, if this is a text predicate
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Equals(v) | Self::Contains(v) => Some(v),
            Self::AtLeast(_) => None,
        }
    }

    /// Whether two predicates select the same thing (text compared case-insensitively)
    pub fn same_selection(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Equals(a), Self::Equals(b)) | (Self::Contains(a), Self::Contains(b)) => {
                a.trim().eq_ignore_ascii_case(b.trim())
            }
            (Self::AtLeast(a), Self::AtLeast(b)) => a == b,
            _ => false,
        }
    }

    /// Evaluate against a field value. Kind mismatches never match.
    pub fn test(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Self::Equals(expected), FieldValue::Text(actual)) => {
                actual.trim().eq_ignore_ascii_case(expected.trim())
            }
            (Self::Equals(expected), FieldValue::List(items)) => items
                .iter()
                .any(|item| item.trim().eq_ignore_ascii_case(expected.trim())),
            (Self::Equals(expected), FieldValue::Number(actual)) => expected
                .trim()
                .parse::<f64>()
                .map_or(false, |expected| expected == *actual),
            (Self::Contains(needle), FieldValue::Text(actual)) => {
                contains_folded(actual, &needle.trim().to_lowercase())
            }
            (Self::Contains(needle), FieldValue::List(items)) => {
                let needle = needle.trim().to_lowercase();
                items.iter().any(|item| contains_folded(item, &needle))
            }
            (Self::AtLeast(min), FieldValue::Number(actual)) => actual >= min,
            _ => false,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals(v) | Self::Contains(v) => write!(f, "{v}"),
            Self::AtLeast(min) => write!(f, "{min}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let p = Predicate::equals("Governor");
        assert!(p.test(&FieldValue::Text("governor")));
        assert!(!p.test(&FieldValue::Text("deputy governor")));
        assert!(!p.test(&FieldValue::Missing));
    }

    #[test]
    fn test_membership_over_list() {
        let p = Predicate::contains("orange");
        assert!(p.test(&FieldValue::List(vec!["KANU", "Orange Democratic Movement"])));
        assert!(!p.test(&FieldValue::List(vec!["KANU", "UDA"])));
        assert!(!p.test(&FieldValue::List(vec![])));
    }

    #[test]
    fn test_threshold() {
        let p = Predicate::at_least(60.0);
        assert!(p.test(&FieldValue::Number(60.0)));
        assert!(p.test(&FieldValue::Number(85.0)));
        assert!(!p.test(&FieldValue::Number(59.0)));
        assert!(!p.test(&FieldValue::Text("85")));
    }

    #[test]
    fn test_parse_by_kind() {
        assert_eq!(
            Predicate::parse(Some(PredicateKind::Threshold), " 70 "),
            Some(Predicate::AtLeast(70.0))
        );
        assert_eq!(Predicate::parse(Some(PredicateKind::Threshold), "high"), None);
        assert_eq!(
            Predicate::parse(Some(PredicateKind::Membership), "ODM"),
            Some(Predicate::contains("ODM"))
        );
        assert_eq!(Predicate::parse(None, "x"), Some(Predicate::equals("x")));
    }

    #[test]
    fn test_same_selection() {
        assert!(Predicate::equals("Politics").same_selection(&Predicate::equals("politics")));
        assert!(!Predicate::equals("politics").same_selection(&Predicate::contains("politics")));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Predicate::at_least(80.0)).unwrap();
        assert_eq!(json, serde_json::json!({"op": "at_least", "value": 80.0}));
    }
}
