//! RecordFeed - refresh, fallback and paging against an upstream source
//!
//! The feed owns a [`QueryOrchestrator`] and is the only writer of its
//! record store. Network and cache collaborators are injected, so tests can
//! script them.
//!
//! # Refresh policy
//!
//! Refreshes are queued and coalesced: a refresh requested while another is
//! in flight returns [`RefreshOutcome::Coalesced`] at once, and the running
//! refresh performs exactly one more pass when it finishes. Remote searches
//! wait for any running refresh pass, so two writers never race on the store.
//!
//! Failures never clear the store. When the source is unreachable the feed
//! keeps the records it has (or loads the cache when it has none) and returns
//! a stale outcome carrying a user-facing notice.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use civic::tracing::prefix;
use civic::EngineConfig;
use civic_core::{QueryOrchestrator, QueryView, Record};
use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::RecordCache;
use crate::source::{RecordSource, SourceError, SourceQuery};
use crate::status::SyncStatusProvider;

const DEFAULT_CACHE_KEY: &str = "records";

/// Non-fatal condition shown to the user alongside stale data
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedNotice {
    #[error("{source_name} is unavailable ({reason}); showing saved results")]
    UpstreamUnavailable { source_name: String, reason: String },

    #[error("you are offline; showing saved results")]
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// New records from the source
    Fresh { records: usize },
    /// The source could not be reached; existing or cached records remain
    Stale { records: usize, notice: FeedNotice },
    /// Folded into the refresh already in flight
    Coalesced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadMoreOutcome {
    /// Another local page became visible
    Grew,
    /// A source page was appended and revealed
    Fetched { appended: usize },
    /// A load is already running
    InFlight,
    /// Everything is visible and the source has no more pages
    Exhausted,
    /// Results were replaced while the load ran, or the filters changed
    /// since the first page was fetched; nothing was applied. Refresh to
    /// page the source under the current filters.
    Superseded,
    Failed(FeedNotice),
}

#[derive(Debug, Default)]
struct RefreshState {
    in_flight: bool,
    pending: bool,
}

#[derive(Debug, Default)]
struct RemotePaging {
    pages_fetched: usize,
    exhausted: bool,
    fetching: bool,
    /// Filters page 1 was fetched with; later pages must use the same
    query: SourceQuery,
}

/// Clears the in-flight flag if a refresh is dropped mid-await.
struct RefreshGuard<'a> {
    state: &'a Mutex<RefreshState>,
    armed: bool,
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.state.lock();
            state.in_flight = false;
            state.pending = false;
        }
    }
}

/// Async driver for one record collection.
pub struct RecordFeed<R: Record + Send> {
    source: Arc<dyn RecordSource<R>>,
    cache: Arc<dyn RecordCache>,
    status: Arc<dyn SyncStatusProvider>,
    orchestrator: Mutex<QueryOrchestrator<R>>,
    refresh: Mutex<RefreshState>,
    paging: Mutex<RemotePaging>,
    write_gate: tokio::sync::Mutex<()>,
    last_sync: Mutex<Option<DateTime<Utc>>>,
    cache_key: String,
    fetch_page_size: usize,
    fetch_timeout: Duration,
    load_more_delay: Duration,
}

impl<R> RecordFeed<R>
where
    R: Record + Send + Sync + 'static,
{
    pub fn new(
        source: Arc<dyn RecordSource<R>>,
        cache: Arc<dyn RecordCache>,
        status: Arc<dyn SyncStatusProvider>,
        orchestrator: QueryOrchestrator<R>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            source,
            cache,
            status,
            orchestrator: Mutex::new(orchestrator),
            refresh: Mutex::new(RefreshState::default()),
            paging: Mutex::new(RemotePaging::default()),
            write_gate: tokio::sync::Mutex::new(()),
            last_sync: Mutex::new(None),
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            fetch_page_size: config.fetch_page_size.max(1),
            fetch_timeout: Duration::from_millis(config.fetch_timeout_ms),
            load_more_delay: Duration::from_millis(config.load_more_delay_ms),
        }
    }

    /// Use a distinct cache entry, e.g. one per screen.
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    /// Fetch the first page, falling back to stale data on failure.
    pub async fn refresh(&self) -> RefreshOutcome {
        {
            let mut state = self.refresh.lock();
            if state.in_flight {
                state.pending = true;
                debug!("refresh coalesced into in-flight refresh");
                return RefreshOutcome::Coalesced;
            }
            state.in_flight = true;
        }
        let mut guard = RefreshGuard {
            state: &self.refresh,
            armed: true,
        };

        loop {
            let outcome = self.refresh_pass().await;

            let rerun = {
                let mut state = self.refresh.lock();
                if state.pending {
                    state.pending = false;
                    true
                } else {
                    state.in_flight = false;
                    false
                }
            };
            if !rerun {
                guard.armed = false;
                return outcome;
            }
            debug!("running coalesced refresh");
        }
    }

    /// Reveal the next page, fetching from the source once local results
    /// run out.
    pub async fn load_more(&self) -> LoadMoreOutcome {
        let ticket = {
            let mut orchestrator = self.orchestrator.lock();
            if orchestrator.is_loading() {
                return LoadMoreOutcome::InFlight;
            }
            if !orchestrator.has_more() {
                None
            } else if let Some(ticket) = orchestrator.begin_load_more() {
                Some(ticket)
            } else {
                // Staged query text not yet re-derived
                return LoadMoreOutcome::InFlight;
            }
        };

        if let Some(ticket) = ticket {
            if !self.load_more_delay.is_zero() {
                tokio::time::sleep(self.load_more_delay).await;
            }
            return if self.orchestrator.lock().complete_load_more(ticket) {
                LoadMoreOutcome::Grew
            } else {
                LoadMoreOutcome::Superseded
            };
        }

        self.fetch_next_page().await
    }

    /// Replace the records with the source's search results.
    pub async fn search_remote(&self, text: &str) -> RefreshOutcome {
        let _gate = self.write_gate.lock().await;
        if !self.status.status().is_online {
            return self.offline_fallback();
        }

        match self.with_timeout(self.source.search(text)).await {
            Ok(records) => {
                let accepted = {
                    let mut paging = self.paging.lock();
                    let mut orchestrator = self.orchestrator.lock();
                    let report = orchestrator.set_records(records);
                    // Search results are not paged
                    paging.pages_fetched = 1;
                    paging.exhausted = true;
                    report.accepted
                };
                info!("{} search \"{}\" loaded {} records", prefix::SYNC, text, accepted);
                RefreshOutcome::Fresh { records: accepted }
            }
            Err(error) => self.upstream_fallback(error),
        }
    }

    /// Read the current view under the lock.
    pub fn with_view<T>(&self, f: impl FnOnce(&QueryView<'_, R>) -> T) -> T {
        let orchestrator = self.orchestrator.lock();
        f(&orchestrator.view())
    }

    /// Change query text, filters or sort under the lock.
    pub fn update<T>(&self, f: impl FnOnce(&mut QueryOrchestrator<R>) -> T) -> T {
        let mut orchestrator = self.orchestrator.lock();
        f(&mut *orchestrator)
    }

    /// Time of the last successful fetch
    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        *self.last_sync.lock()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.lock().in_flight
    }

    async fn refresh_pass(&self) -> RefreshOutcome {
        let _gate = self.write_gate.lock().await;
        if !self.status.status().is_online {
            return self.offline_fallback();
        }

        let query = self.source_query();
        let page_size = self.fetch_page_size;
        match self
            .with_timeout(self.source.fetch_page(&query, 1, page_size))
            .await
        {
            Ok(records) => {
                let full_page = records.len() >= page_size;
                let (accepted, snapshot) = {
                    let mut paging = self.paging.lock();
                    let mut orchestrator = self.orchestrator.lock();
                    let report = orchestrator.set_records(records);
                    paging.pages_fetched = 1;
                    paging.exhausted = !full_page;
                    paging.query = query;
                    let snapshot = serde_json::to_value(orchestrator.store().records());
                    (report.accepted, snapshot)
                };

                match snapshot {
                    Ok(value) => self.cache.put(&self.cache_key, value),
                    Err(e) => warn!("{} failed to snapshot records: {}", prefix::CACHE, e),
                }
                *self.last_sync.lock() = Some(Utc::now());
                info!(
                    "{} refreshed {} records from {}",
                    prefix::SYNC,
                    accepted,
                    self.source.name()
                );
                RefreshOutcome::Fresh { records: accepted }
            }
            Err(error) => self.upstream_fallback(error),
        }
    }

    async fn fetch_next_page(&self) -> LoadMoreOutcome {
        if !self.status.status().is_online {
            return LoadMoreOutcome::Failed(FeedNotice::Offline);
        }

        let (page, generation, query) = {
            let mut paging = self.paging.lock();
            if paging.exhausted || paging.pages_fetched == 0 {
                return LoadMoreOutcome::Exhausted;
            }
            if paging.fetching {
                return LoadMoreOutcome::InFlight;
            }
            let current = self.source_query();
            if current != paging.query {
                debug!(
                    page = paging.pages_fetched + 1,
                    "filters changed since first page, not continuing source paging"
                );
                return LoadMoreOutcome::Superseded;
            }
            paging.fetching = true;
            let generation = self.orchestrator.lock().store().generation();
            (paging.pages_fetched + 1, generation, current)
        };

        let page_size = self.fetch_page_size;
        let result = self
            .with_timeout(self.source.fetch_page(&query, page, page_size))
            .await;

        let mut paging = self.paging.lock();
        paging.fetching = false;
        match result {
            Ok(records) => {
                let mut orchestrator = self.orchestrator.lock();
                if orchestrator.store().generation() != generation {
                    debug!(page, "dropping page fetched for replaced results");
                    return LoadMoreOutcome::Superseded;
                }
                paging.pages_fetched = page;
                if records.len() < page_size {
                    paging.exhausted = true;
                }
                let report = orchestrator.append_records(records);
                orchestrator.load_more();
                debug!(page, appended = report.accepted, "appended source page");
                LoadMoreOutcome::Fetched {
                    appended: report.accepted,
                }
            }
            Err(error) => {
                warn!("{} page {} failed: {}", prefix::STALE, page, error);
                LoadMoreOutcome::Failed(self.unavailable(&error))
            }
        }
    }

    /// Current filters as the source sees them. Locks the orchestrator.
    fn source_query(&self) -> SourceQuery {
        SourceQuery::from_pairs(self.orchestrator.lock().criteria().to_pairs())
    }

    async fn with_timeout<T>(
        &self,
        request: impl Future<Output = Result<T, SourceError>>,
    ) -> Result<T, SourceError> {
        match tokio::time::timeout(self.fetch_timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(self.fetch_timeout)),
        }
    }

    fn offline_fallback(&self) -> RefreshOutcome {
        info!("{} offline, reading cache", prefix::STALE);
        self.load_cache();
        RefreshOutcome::Stale {
            records: self.record_count(),
            notice: FeedNotice::Offline,
        }
    }

    fn upstream_fallback(&self, error: SourceError) -> RefreshOutcome {
        warn!(
            "{} {} unavailable, keeping current records: {}",
            prefix::STALE,
            self.source.name(),
            error
        );
        if self.record_count() == 0 {
            self.load_cache();
        }
        RefreshOutcome::Stale {
            records: self.record_count(),
            notice: self.unavailable(&error),
        }
    }

    /// Replace the store with the cached snapshot, if there is one.
    fn load_cache(&self) {
        let Some(value) = self.cache.get(&self.cache_key) else {
            debug!("{} no cached records under {}", prefix::CACHE, self.cache_key);
            return;
        };
        let serde_json::Value::Array(values) = value else {
            warn!("{} cached value under {} is not a list", prefix::CACHE, self.cache_key);
            return;
        };

        let mut paging = self.paging.lock();
        let mut orchestrator = self.orchestrator.lock();
        let report = orchestrator.ingest_json(values);
        // Cached data has no source page position
        paging.pages_fetched = 0;
        paging.exhausted = false;
        info!(
            "{} loaded {} cached records ({} skipped)",
            prefix::CACHE,
            report.accepted,
            report.skipped()
        );
    }

    fn record_count(&self) -> usize {
        self.orchestrator.lock().store().len()
    }

    fn unavailable(&self, error: &SourceError) -> FeedNotice {
        FeedNotice::UpstreamUnavailable {
            source_name: self.source.name().to_string(),
            reason: error.to_string(),
        }
    }
}
