//! Civic Sync
//!
//! Async boundary between the synchronous engine in `civic-core` and the
//! outside world:
//!
//! - [`RecordSource`]: network data source (paged fetch and search)
//! - [`RecordCache`]: offline-first key-value cache
//! - [`SyncStatusProvider`]: connectivity and last-sync status
//! - [`RecordFeed`]: serialized refresh, stale fallback and paged loading
//!
//! Collaborators are passed to [`RecordFeed::new`] as trait objects so
//! tests can substitute scripted doubles.

mod cache;
mod feed;
mod source;
mod status;

pub use cache::{MemoryCache, RecordCache};
pub use feed::{FeedNotice, LoadMoreOutcome, RecordFeed, RefreshOutcome};
pub use source::{RecordSource, SourceError, SourceQuery};
pub use status::{StaticStatus, SyncStatus, SyncStatusProvider};
