//! Civic Core Engine
//!
//! Query and scoring engine for civic records: politician profiles and news
//! articles. Everything here is synchronous and in-memory; network, cache and
//! sync-status collaborators live in `civic-sync`.
//!
//! # Features
//!
//! - `simd` - SIMD-accelerated substring search via memchr
//!
//! # Example
//!
//! ```rust
//! use civic_core::filter::{CategoryRegistry, Predicate};
//! use civic_core::record::{Politician, PoliticianBuilder, PoliticianFilter};
//! use civic_core::QueryOrchestrator;
//!
//! let mut orchestrator: QueryOrchestrator<Politician> =
//!     QueryOrchestrator::new(10, CategoryRegistry::for_politicians().into_handle());
//!
//! orchestrator.set_records(vec![
//!     PoliticianBuilder::new().id(1).name("Anne Waiguru").category("governor").build(),
//!     PoliticianBuilder::new().id(2).name("William Ruto").category("president").build(),
//! ]);
//! orchestrator.select_filter(PoliticianFilter::Category, Predicate::equals("governor"));
//!
//! let view = orchestrator.view();
//! assert_eq!(view.records.len(), 1);
//! assert_eq!(view.records[0].name, "Anne Waiguru");
//! ```

pub mod classify;
pub mod config;
pub mod filter;
pub mod paginate;
pub mod query;
pub mod record;
pub mod score;
pub mod search;
pub mod sort;
pub mod store;

// Re-export main types at crate root
pub use classify::{classify, CredibilityBadge, CredibilityThresholds, CredibilityTier, Sentiment};
pub use config::EngineConfig;
pub use filter::{
    CategoryRegistry, FilterCriteria, FilterPipeline, Predicate, PredicateKind, RegistryError,
    RegistryHandle, Selection,
};
pub use paginate::{PageTicket, PageWindow, Paginator};
pub use query::{QueryOrchestrator, QueryState, QueryView};
pub use record::{
    ArticleBuilder, NewsArticle, Politician, PoliticianBuilder, Record, RecordError, RecordId,
};
pub use score::{
    AddOutcome, ComparisonMetric, ComparisonSet, MetricKind, ScoringConfig, ScoringEngine,
};
pub use search::{MatchMode, SearchMatcher, SearchQuery};
pub use sort::{SortDirection, SortSpec};
pub use store::{IngestReport, RecordStore};
