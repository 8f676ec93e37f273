//! QueryOrchestrator - search, filter, sort and paginate a record store
//!
//! Any change to the query text, filter criteria or sort spec re-derives the
//! result set in a fixed order (search, then filter, then sort) and resets
//! pagination to the first page. Loading more only grows the visible prefix.
//!
//! ```text
//! Idle ──derive──▶ Settled ──change──▶ Querying ──derive──▶ Settled
//! ```
//!
//! Setters derive immediately. Callers that debounce input can instead
//! `stage_query_text` on each keystroke and call [`QueryOrchestrator::requery`]
//! once per debounce window.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::filter::{FilterCriteria, FilterPipeline, Predicate, RegistryHandle, Selection};
use crate::paginate::{PageTicket, PageWindow, Paginator};
use crate::record::{Record, SearchField};
use crate::search::{MatchMode, SearchMatcher, SearchQuery};
use crate::sort::{sort_indices, SortSpec};
use crate::store::{fingerprint_ids, IngestReport, RecordStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryState {
    /// Nothing derived yet
    Idle,
    /// Inputs changed since the last derivation
    Querying,
    /// Results reflect the current inputs
    Settled,
}

/// The visible page plus what a renderer needs around it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "R: Serialize"))]
pub struct QueryView<'a, R> {
    pub records: Vec<&'a R>,
    pub total_matches: usize,
    pub total_records: usize,
    pub has_more: bool,
    pub window: PageWindow,
    /// Hash of the visible ids in order; equal inputs give equal fingerprints
    pub fingerprint: String,
}

/// Owns one record collection and its derived, paginated result set.
#[derive(Debug)]
pub struct QueryOrchestrator<R: Record> {
    store: RecordStore<R>,
    query: SearchQuery<R::Field>,
    criteria: FilterCriteria<R::Filter>,
    sort: Option<SortSpec<R::Sort>>,
    paginator: Paginator,
    registry: RegistryHandle,
    results: Vec<usize>,
    state: QueryState,
}

impl<R: Record> QueryOrchestrator<R> {
    pub fn new(page_size: usize, registry: RegistryHandle) -> Self {
        Self {
            store: RecordStore::new(),
            query: SearchQuery::default(),
            criteria: FilterCriteria::new(),
            sort: None,
            paginator: Paginator::new(page_size),
            registry,
            results: Vec::new(),
            state: QueryState::Idle,
        }
    }

    pub fn from_config(config: &EngineConfig, registry: RegistryHandle) -> Self {
        Self::new(config.page_size, registry)
    }

    // Records

    /// Replace every record and restart from the first page.
    pub fn set_records(&mut self, records: impl IntoIterator<Item = R>) -> IngestReport {
        let report = self.store.replace(records);
        self.rederive(true);
        report
    }

    /// Replace every record from raw JSON, skipping malformed entries.
    pub fn ingest_json(&mut self, values: Vec<serde_json::Value>) -> IngestReport {
        let report = self.store.ingest_json(values);
        self.rederive(true);
        report
    }

    /// Append records fetched for a later page. Pagination is kept.
    pub fn append_records(&mut self, records: impl IntoIterator<Item = R>) -> IngestReport {
        let report = self.store.append(records);
        self.rederive(false);
        report
    }

    // Search

    /// Returns `false` when the text is unchanged, in which case nothing is
    /// re-derived.
    pub fn set_query_text(&mut self, text: impl Into<String>) -> bool {
        if !self.stage_query_text(text) {
            return false;
        }
        self.rederive(true);
        true
    }

    /// Record new query text without deriving. Call [`Self::requery`] later.
    ///
    /// Text that differs only in surrounding whitespace is kept but does not
    /// count as a change, since matching ignores it.
    pub fn stage_query_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim() == self.query.text.trim() {
            self.query.text = text;
            return false;
        }
        self.query.text = text;
        self.state = QueryState::Querying;
        true
    }

    /// Restrict search to some fields; `None` searches all of them.
    pub fn set_search_fields(&mut self, fields: Option<Vec<R::Field>>) {
        if self.query.fields == fields {
            return;
        }
        self.query.fields = fields;
        self.rederive(true);
    }

    /// Parse field names, ignoring unknown ones.
    pub fn set_search_fields_raw<S: AsRef<str>>(&mut self, names: &[S]) {
        let fields: Vec<R::Field> = names
            .iter()
            .filter_map(|name| R::Field::parse(name.as_ref()))
            .collect();
        self.set_search_fields(if fields.is_empty() { None } else { Some(fields) });
    }

    pub fn set_match_mode(&mut self, mode: MatchMode) {
        if self.query.mode == mode {
            return;
        }
        self.query.mode = mode;
        self.rederive(true);
    }

    // Filters

    pub fn select_filter(&mut self, key: R::Filter, predicate: Predicate) -> Selection {
        let selection = self.criteria.select(key, predicate);
        if selection != Selection::Rejected {
            self.rederive(true);
        }
        selection
    }

    /// Select by string key and value. Unknown keys are ignored.
    pub fn select_filter_raw(&mut self, key: &str, value: &str) -> Selection {
        let selection = self.criteria.select_raw(key, value);
        if selection != Selection::Rejected {
            self.rederive(true);
        }
        selection
    }

    pub fn clear_filter(&mut self, key: &R::Filter) -> bool {
        let cleared = self.criteria.clear(key);
        if cleared {
            self.rederive(true);
        }
        cleared
    }

    pub fn clear_filters(&mut self) {
        if self.criteria.is_empty() {
            return;
        }
        self.criteria.clear_all();
        self.rederive(true);
    }

    // Sort

    /// `None` keeps the load order.
    pub fn set_sort(&mut self, sort: Option<SortSpec<R::Sort>>) {
        if self.sort == sort {
            return;
        }
        self.sort = sort;
        self.rederive(true);
    }

    /// Parse a sort key and direction. Returns `false` if either is unknown,
    /// leaving the current sort in place.
    pub fn set_sort_raw(&mut self, key: &str, direction: Option<&str>) -> bool {
        match SortSpec::parse(key, direction) {
            Some(spec) => {
                self.set_sort(Some(spec));
                true
            }
            None => {
                debug!(key, ?direction, "ignoring unknown sort");
                false
            }
        }
    }

    // Pipeline

    /// Re-derive results from the current inputs and restart pagination.
    pub fn requery(&mut self) {
        self.rederive(true);
    }

    /// Grow the visible prefix by one page, with no delay.
    ///
    /// No-op unless settled, not loading, and more results exist.
    pub fn load_more(&mut self) -> bool {
        if self.state != QueryState::Settled {
            return false;
        }
        self.paginator.load_more(self.results.len())
    }

    /// Start a delayed load-more. Returns `None` if one is in flight, the
    /// results are exhausted, or inputs are unsettled.
    pub fn begin_load_more(&mut self) -> Option<PageTicket> {
        if self.state != QueryState::Settled || !self.paginator.has_more(self.results.len()) {
            return None;
        }
        self.paginator.begin_load_more()
    }

    /// Finish a delayed load-more. Returns `false` if the results were
    /// re-derived since the ticket was issued.
    pub fn complete_load_more(&mut self, ticket: PageTicket) -> bool {
        self.paginator.complete(ticket)
    }

    pub fn cancel_load_more(&mut self, ticket: PageTicket) {
        self.paginator.cancel(ticket);
    }

    pub fn is_loading(&self) -> bool {
        self.paginator.is_loading()
    }

    // Accessors

    pub fn view(&self) -> QueryView<'_, R> {
        let records = self.visible();
        let fingerprint = fingerprint_ids(records.iter().map(|r| r.id()));
        QueryView {
            records,
            total_matches: self.results.len(),
            total_records: self.store.len(),
            has_more: self.has_more(),
            window: self.paginator.window(),
            fingerprint,
        }
    }

    /// The visible page in result order
    pub fn visible(&self) -> Vec<&R> {
        let records = self.store.records();
        self.paginator
            .visible(&self.results)
            .iter()
            .map(|&i| &records[i])
            .collect()
    }

    /// Every matching record, ignoring pagination
    pub fn results(&self) -> Vec<&R> {
        let records = self.store.records();
        self.results.iter().map(|&i| &records[i]).collect()
    }

    pub fn has_more(&self) -> bool {
        self.paginator.has_more(self.results.len())
    }

    pub fn window(&self) -> PageWindow {
        self.paginator.window()
    }

    pub fn state(&self) -> QueryState {
        self.state
    }

    pub fn query(&self) -> &SearchQuery<R::Field> {
        &self.query
    }

    pub fn criteria(&self) -> &FilterCriteria<R::Filter> {
        &self.criteria
    }

    pub fn sort(&self) -> Option<&SortSpec<R::Sort>> {
        self.sort.as_ref()
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn registry(&self) -> &RegistryHandle {
        &self.registry
    }

    fn rederive(&mut self, reset: bool) {
        self.state = QueryState::Querying;
        let records = self.store.records();

        let matcher = SearchMatcher::new(&self.query);
        let mut indices: Vec<usize> = (0..records.len())
            .filter(|&i| matcher.matches(&records[i]))
            .collect();
        let searched = indices.len();

        {
            let registry = self.registry.read();
            FilterPipeline::new(&registry).retain(records, &mut indices, &self.criteria);
        }

        if let Some(spec) = &self.sort {
            sort_indices(records, &mut indices, spec);
        }

        self.results = indices;
        if reset {
            self.paginator.reset();
        }
        self.state = QueryState::Settled;

        debug!(
            total = records.len(),
            searched,
            matches = self.results.len(),
            pages = self.paginator.window().pages_loaded(),
            reset,
            "results derived"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::CategoryRegistry;
    use crate::record::{
        ArticleBuilder, ArticleFilter, NewsArticle, Politician, PoliticianBuilder,
        PoliticianField, PoliticianFilter, PoliticianSort,
    };
    use pretty_assertions::assert_eq;

    fn politicians(n: u64) -> Vec<Politician> {
        (1..=n)
            .map(|id| {
                PoliticianBuilder::new()
                    .id(id)
                    .name(format!("Politician {id:02}"))
                    .category(if id % 2 == 0 { "senator" } else { "governor" })
                    .build()
            })
            .collect()
    }

    fn orchestrator() -> QueryOrchestrator<Politician> {
        QueryOrchestrator::new(10, CategoryRegistry::for_politicians().into_handle())
    }

    fn ids<R: Record>(records: &[&R]) -> Vec<u64> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_starts_idle_then_settles() {
        let mut orchestrator = orchestrator();
        assert_eq!(orchestrator.state(), QueryState::Idle);
        orchestrator.set_records(politicians(3));
        assert_eq!(orchestrator.state(), QueryState::Settled);
        assert_eq!(orchestrator.view().total_matches, 3);
    }

    #[test]
    fn test_reset_on_text_change() {
        let mut orchestrator = orchestrator();
        orchestrator.set_records(politicians(40));
        orchestrator.set_query_text("a");
        assert!(orchestrator.load_more());
        assert!(orchestrator.load_more());
        assert_eq!(orchestrator.window().pages_loaded(), 3);

        assert!(orchestrator.set_query_text("ab"));
        assert_eq!(orchestrator.window().pages_loaded(), 1);
    }

    #[test]
    fn test_same_text_is_not_a_change() {
        let mut orchestrator = orchestrator();
        orchestrator.set_records(politicians(25));
        orchestrator.set_query_text("politician");
        orchestrator.load_more();

        assert!(!orchestrator.set_query_text("politician"));
        assert_eq!(orchestrator.window().pages_loaded(), 2);

        assert!(!orchestrator.set_query_text("politician "));
        assert_eq!(orchestrator.window().pages_loaded(), 2);
        assert_eq!(orchestrator.state(), QueryState::Settled);
    }

    #[test]
    fn test_filter_and_sort_reset_pagination() {
        let mut orchestrator = orchestrator();
        orchestrator.set_records(politicians(30));
        orchestrator.load_more();
        orchestrator.select_filter(PoliticianFilter::Category, Predicate::equals("senator"));
        assert_eq!(orchestrator.window().pages_loaded(), 1);
        assert_eq!(orchestrator.view().total_matches, 15);

        orchestrator.load_more();
        orchestrator.set_sort(Some(SortSpec::desc(PoliticianSort::Name)));
        assert_eq!(orchestrator.window().pages_loaded(), 1);
        assert_eq!(orchestrator.visible()[0].name, "Politician 30");
    }

    #[test]
    fn test_append_keeps_pagination() {
        let mut orchestrator = orchestrator();
        orchestrator.set_records(politicians(20));
        orchestrator.load_more();
        assert!(!orchestrator.has_more());

        let more: Vec<Politician> = politicians(25).into_iter().skip(20).collect();
        let report = orchestrator.append_records(more);
        assert_eq!(report.accepted, 5);
        assert_eq!(orchestrator.window().pages_loaded(), 2);
        assert!(orchestrator.has_more());
    }

    #[test]
    fn test_staged_text_waits_for_requery() {
        let mut orchestrator = orchestrator();
        orchestrator.set_records(politicians(12));
        assert!(orchestrator.stage_query_text("07"));
        assert_eq!(orchestrator.state(), QueryState::Querying);
        assert_eq!(orchestrator.view().total_matches, 12);
        assert!(!orchestrator.load_more());

        orchestrator.requery();
        assert_eq!(orchestrator.state(), QueryState::Settled);
        assert_eq!(ids(&orchestrator.visible()), vec![7]);
    }

    #[test]
    fn test_delayed_load_more_ticket() {
        let mut orchestrator = orchestrator();
        orchestrator.set_records(politicians(30));

        let ticket = orchestrator.begin_load_more().unwrap();
        assert!(orchestrator.is_loading());
        assert!(orchestrator.begin_load_more().is_none());
        assert!(orchestrator.complete_load_more(ticket));
        assert_eq!(orchestrator.view().records.len(), 20);

        let stale = orchestrator.begin_load_more().unwrap();
        orchestrator.set_query_text("Politician 1");
        assert!(!orchestrator.complete_load_more(stale));
        assert_eq!(orchestrator.window().pages_loaded(), 1);
    }

    #[test]
    fn test_search_fields_raw() {
        let mut orchestrator = orchestrator();
        orchestrator.set_records(vec![
            PoliticianBuilder::new()
                .id(1)
                .name("Kisumu Person")
                .constituency("Nairobi")
                .build(),
            PoliticianBuilder::new()
                .id(2)
                .name("Someone")
                .constituency("Kisumu Central")
                .build(),
        ]);
        orchestrator.set_query_text("kisumu");
        assert_eq!(orchestrator.view().total_matches, 2);

        orchestrator.set_search_fields_raw(&["constituency", "bogus"]);
        assert_eq!(
            orchestrator.query().fields,
            Some(vec![PoliticianField::Constituency])
        );
        assert_eq!(ids(&orchestrator.visible()), vec![2]);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut orchestrator: QueryOrchestrator<NewsArticle> =
            QueryOrchestrator::new(10, CategoryRegistry::for_articles().into_handle());
        orchestrator.set_records(vec![ArticleBuilder::new().id(1).headline("x").build()]);

        assert_eq!(orchestrator.select_filter_raw("colour", "red"), Selection::Rejected);
        assert!(!orchestrator.set_sort_raw("popularity", None));
        assert!(orchestrator.criteria().is_empty());
        assert_eq!(orchestrator.view().total_matches, 1);
        assert!(!orchestrator.clear_filter(&ArticleFilter::Source));
    }

    #[test]
    fn test_registry_change_applies_on_requery() {
        let mut orchestrator: QueryOrchestrator<NewsArticle> =
            QueryOrchestrator::new(10, CategoryRegistry::for_articles().into_handle());
        orchestrator.set_records(vec![
            ArticleBuilder::new().id(1).headline("Derby").category("sports").build(),
            ArticleBuilder::new().id(2).headline("Budget").category("economy").build(),
        ]);
        orchestrator.select_filter(ArticleFilter::Category, Predicate::equals("sports"));
        assert_eq!(orchestrator.view().total_matches, 2);

        orchestrator.registry().write().create("sports").unwrap();
        orchestrator.requery();
        assert_eq!(ids(&orchestrator.visible()), vec![1]);
    }

    #[test]
    fn test_view_fingerprint_deterministic() {
        let mut a = orchestrator();
        let mut b = orchestrator();
        for o in [&mut a, &mut b] {
            o.set_records(politicians(15));
            o.set_sort(Some(SortSpec::desc(PoliticianSort::Name)));
        }
        assert_eq!(a.view().fingerprint, b.view().fingerprint);

        b.load_more();
        assert_ne!(a.view().fingerprint, b.view().fingerprint);
    }
}
