//! FilterPipeline - applies criteria to a record collection

use tracing::{debug, warn};

use super::criteria::FilterCriteria;
use super::predicate::Predicate;
use super::registry::CategoryRegistry;
use crate::record::{FilterKey, Record};

/// Applies criteria in key order, validating category values against a registry
#[derive(Debug, Clone, Copy)]
pub struct FilterPipeline<'a> {
    registry: &'a CategoryRegistry,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(registry: &'a CategoryRegistry) -> Self {
        Self { registry }
    }

    /// Return the records satisfying every active filter, in input order.
    pub fn apply<R: Record>(
        &self,
        records: &[R],
        criteria: &FilterCriteria<R::Filter>,
    ) -> Vec<R> {
        let mut indices: Vec<usize> = (0..records.len()).collect();
        self.retain(records, &mut indices, criteria);
        indices.into_iter().map(|i| records[i].clone()).collect()
    }

    /// Narrow a list of indices into `records` in place.
    pub fn retain<R: Record>(
        &self,
        records: &[R],
        indices: &mut Vec<usize>,
        criteria: &FilterCriteria<R::Filter>,
    ) {
        let active: Vec<(&R::Filter, &Predicate)> = criteria
            .iter()
            .filter(|(key, predicate)| self.is_usable(*key, predicate))
            .collect();

        if active.is_empty() {
            return;
        }

        let before = indices.len();
        indices.retain(|&i| {
            let record = &records[i];
            active
                .iter()
                .all(|(key, predicate)| predicate.test(&record.filter_value(key)))
        });
        debug!(
            filters = active.len(),
            before,
            after = indices.len(),
            "filters applied"
        );
    }

    /// A category filter naming an unregistered category is treated as absent.
    fn is_usable<K: FilterKey>(&self, key: &K, predicate: &Predicate) -> bool {
        if !key.is_category() {
            return true;
        }
        match predicate.text() {
            Some(category) if self.registry.contains(category) => true,
            _ => {
                warn!(
                    key = %key.name(),
                    value = %predicate,
                    "ignoring filter on unregistered category"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{
        ArticleBuilder, ArticleFilter, NewsArticle, Politician, PoliticianBuilder,
        PoliticianFilter,
    };
    use pretty_assertions::assert_eq;

    fn politicians() -> Vec<Politician> {
        vec![
            PoliticianBuilder::new()
                .id(1)
                .name("Anne Waiguru")
                .category("governor")
                .parties(["Jubilee", "UDA"])
                .build(),
            PoliticianBuilder::new()
                .id(2)
                .name("William Ruto")
                .category("president")
                .parties(["KANU", "ODM", "URP", "UDA"])
                .build(),
            PoliticianBuilder::new()
                .id(3)
                .name("Johnson Sakaja")
                .category("governor")
                .parties(["TNA", "Jubilee", "UDA"])
                .attribute("county", serde_json::json!("Nairobi"))
                .build(),
        ]
    }

    fn articles() -> Vec<NewsArticle> {
        vec![
            ArticleBuilder::new()
                .id(10)
                .headline("Finance Bill protests")
                .source("Daily Nation")
                .category("politics")
                .credibility(92)
                .build(),
            ArticleBuilder::new()
                .id(11)
                .headline("Rumour mill")
                .source("Blog")
                .category("politics")
                .credibility(45)
                .build(),
            ArticleBuilder::new()
                .id(12)
                .headline("Hospital upgrades")
                .source("The Standard")
                .category("health")
                .credibility(70)
                .build(),
        ]
    }

    fn ids<R: Record>(records: &[R]) -> Vec<u64> {
        records.iter().map(Record::id).collect()
    }

    #[test]
    fn test_exact_category() {
        let registry = CategoryRegistry::for_politicians();
        let mut criteria = FilterCriteria::new();
        criteria.select(PoliticianFilter::Category, Predicate::equals("governor"));

        let result = FilterPipeline::new(&registry).apply(&politicians(), &criteria);
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn test_membership_in_party_history() {
        let registry = CategoryRegistry::for_politicians();
        let mut criteria = FilterCriteria::new();
        criteria.select(PoliticianFilter::Party, Predicate::contains("odm"));

        let result = FilterPipeline::new(&registry).apply(&politicians(), &criteria);
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn test_threshold_and_conjunction() {
        let registry = CategoryRegistry::for_articles();
        let mut criteria = FilterCriteria::new();
        criteria.select(ArticleFilter::MinCredibility, Predicate::at_least(60.0));
        criteria.select(ArticleFilter::Category, Predicate::equals("politics"));

        let result = FilterPipeline::new(&registry).apply(&articles(), &criteria);
        assert_eq!(ids(&result), vec![10]);
    }

    #[test]
    fn test_attribute_filter() {
        let registry = CategoryRegistry::for_politicians();
        let mut criteria = FilterCriteria::new();
        criteria.select(
            PoliticianFilter::Attribute("county".into()),
            Predicate::equals("nairobi"),
        );

        let result = FilterPipeline::new(&registry).apply(&politicians(), &criteria);
        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_unregistered_category_is_ignored() {
        let registry = CategoryRegistry::for_articles();
        let mut criteria = FilterCriteria::new();
        criteria.select(ArticleFilter::Category, Predicate::equals("sports"));

        let result = FilterPipeline::new(&registry).apply(&articles(), &criteria);
        assert_eq!(ids(&result), vec![10, 11, 12]);
    }

    #[test]
    fn test_created_category_becomes_usable() {
        let mut registry = CategoryRegistry::for_articles();
        let mut records = articles();
        records[2].category = "sports".into();

        let mut criteria = FilterCriteria::new();
        criteria.select(ArticleFilter::Category, Predicate::equals("sports"));

        registry.create("sports").unwrap();
        let result = FilterPipeline::new(&registry).apply(&records, &criteria);
        assert_eq!(ids(&result), vec![12]);
    }

    #[test]
    fn test_idempotent() {
        let registry = CategoryRegistry::for_articles();
        let mut criteria = FilterCriteria::new();
        criteria.select(ArticleFilter::MinCredibility, Predicate::at_least(50.0));

        let pipeline = FilterPipeline::new(&registry);
        let once = pipeline.apply(&articles(), &criteria);
        let twice = pipeline.apply(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let registry = CategoryRegistry::for_articles();
        let criteria = FilterCriteria::new();
        let result = FilterPipeline::new(&registry).apply(&articles(), &criteria);
        assert_eq!(result, articles());
    }
}
