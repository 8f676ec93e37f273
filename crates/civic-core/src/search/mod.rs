//! Free-text search
//!
//! Case-insensitive substring matching over a record's searchable fields,
//! with platform-specific optimizations:
//!
//! - **simd**: SIMD substring search via memchr
//! - default: `str::find`
//!
//! # Match modes
//!
//! 1. `Phrase` (default): the trimmed query is one literal substring
//! 2. `AllTerms`: every whitespace-separated term must appear in some field
//!
//! # Example
//!
//! ```rust
//! use civic_core::record::PoliticianBuilder;
//! use civic_core::search::{SearchMatcher, SearchQuery};
//!
//! let politician = PoliticianBuilder::new().id(1).name("Anne Waiguru").build();
//! let matcher = SearchMatcher::new(&SearchQuery::new("waig"));
//! assert!(matcher.matches(&politician));
//! ```

mod matcher;
mod strategies;

pub use matcher::{matches, MatchMode, SearchMatcher, SearchQuery};
pub(crate) use strategies::contains_folded;
