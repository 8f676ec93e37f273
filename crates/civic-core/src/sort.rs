//! Sorting
//!
//! One active sort key at a time. Text keys compare like `localeCompare`
//! (case-insensitive, lowercase before uppercase on ties), numeric keys by
//! value. Records without a value for the key always sort last. The sort is
//! stable, so equal keys keep their input order across reloads.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::record::{Record, SortKey, SortValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(direction: &str) -> Option<Self> {
        match direction.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Active sort key and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: SortKey> SortSpec<K> {
    /// Sort by `key` in its natural direction
    pub fn new(key: K) -> Self {
        Self {
            key,
            direction: key.default_direction(),
        }
    }

    pub fn asc(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }

    /// Parse a key and optional direction. Returns `None` for unknown keys
    /// or directions.
    pub fn parse(key: &str, direction: Option<&str>) -> Option<Self> {
        let key = K::parse(key)?;
        match direction {
            Some(direction) => Some(Self {
                key,
                direction: SortDirection::parse(direction)?,
            }),
            None => Some(Self::new(key)),
        }
    }
}

/// Compare two records under a sort spec.
pub fn compare<R: Record>(a: &R, b: &R, spec: &SortSpec<R::Sort>) -> Ordering {
    match (a.sort_value(spec.key), b.sort_value(spec.key)) {
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, _) => Ordering::Greater,
        (_, SortValue::Missing) => Ordering::Less,
        (x, y) => spec.direction.apply(compare_values(x, y)),
    }
}

/// Stable in-place sort.
pub fn sort_records<R: Record>(records: &mut [R], spec: &SortSpec<R::Sort>) {
    records.sort_by(|a, b| compare(a, b, spec));
}

/// Stable sort of indices into `records`.
pub(crate) fn sort_indices<R: Record>(
    records: &[R],
    indices: &mut [usize],
    spec: &SortSpec<R::Sort>,
) {
    indices.sort_by(|&a, &b| compare(&records[a], &records[b], spec));
}

fn compare_values(a: SortValue<'_>, b: SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => locale_cmp(a, b),
        (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(&b),
        (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
        (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Case-insensitive ordering; ties broken with lowercase before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        for (x, y) in a.chars().zip(b.chars()) {
            if x != y {
                return match (x.is_lowercase(), y.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => x.cmp(&y),
                };
            }
        }
        a.len().cmp(&b.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{
        ArticleBuilder, ArticleSort, Politician, PoliticianBuilder, PoliticianSort,
    };
    use pretty_assertions::assert_eq;

    fn politician(id: u64, name: &str, achievements: usize) -> Politician {
        PoliticianBuilder::new()
            .id(id)
            .name(name)
            .achievements((0..achievements).map(|i| format!("achievement {i}")))
            .build()
    }

    fn names(records: &[Politician]) -> Vec<&str> {
        records.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("anne", "Brian"), Ordering::Less);
        assert_eq!(locale_cmp("Zed", "alpha"), Ordering::Greater);
        assert_eq!(locale_cmp("ruto", "Ruto"), Ordering::Less);
        assert_eq!(locale_cmp("Ruto", "Ruto"), Ordering::Equal);
        assert_eq!(locale_cmp("Rut", "Ruto"), Ordering::Less);
    }

    #[test]
    fn test_lexicographic_name_sort() {
        let mut records = vec![
            politician(1, "William Ruto", 0),
            politician(2, "anne Waiguru", 0),
            politician(3, "Martha Karua", 0),
        ];
        sort_records(&mut records, &SortSpec::new(PoliticianSort::Name));
        assert_eq!(names(&records), vec!["anne Waiguru", "Martha Karua", "William Ruto"]);

        sort_records(&mut records, &SortSpec::desc(PoliticianSort::Name));
        assert_eq!(names(&records), vec!["William Ruto", "Martha Karua", "anne Waiguru"]);
    }

    #[test]
    fn test_achievement_count_descending_and_stable() {
        let mut records = vec![
            politician(1, "A", 1),
            politician(2, "B", 3),
            politician(3, "C", 1),
            politician(4, "D", 3),
        ];
        sort_records(&mut records, &SortSpec::new(PoliticianSort::Achievements));
        assert_eq!(names(&records), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_missing_values_sort_last_both_directions() {
        let mut records = vec![
            PoliticianBuilder::new().id(1).name("No party").build(),
            PoliticianBuilder::new().id(2).name("Two").party("UDA").build(),
            PoliticianBuilder::new().id(3).name("Three").party("ODM").build(),
        ];
        sort_records(&mut records, &SortSpec::asc(PoliticianSort::LastParty));
        assert_eq!(names(&records), vec!["Three", "Two", "No party"]);

        sort_records(&mut records, &SortSpec::desc(PoliticianSort::LastParty));
        assert_eq!(names(&records), vec!["Two", "Three", "No party"]);
    }

    #[test]
    fn test_credibility_default_desc() {
        let mut records = vec![
            ArticleBuilder::new().id(1).headline("a").credibility(40).build(),
            ArticleBuilder::new().id(2).headline("b").credibility(90).build(),
            ArticleBuilder::new().id(3).headline("c").credibility(65).build(),
        ];
        sort_records(&mut records, &SortSpec::new(ArticleSort::Credibility));
        let ids: Vec<u64> = records.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_parse_spec() {
        let spec = SortSpec::<PoliticianSort>::parse("achievements", None).unwrap();
        assert_eq!(spec.direction, SortDirection::Desc);

        let spec = SortSpec::<PoliticianSort>::parse("name", Some("DESC")).unwrap();
        assert_eq!(spec, SortSpec::desc(PoliticianSort::Name));

        assert!(SortSpec::<PoliticianSort>::parse("height", None).is_none());
        assert!(SortSpec::<PoliticianSort>::parse("name", Some("sideways")).is_none());
    }
}
