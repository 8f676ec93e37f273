//! Politician comparison scoring
//!
//! Five metrics are computed independently per politician:
//!
//! | Metric            | Range | Derivation                                   |
//! |-------------------|-------|----------------------------------------------|
//! | experience        | 0..   | reference year minus first-elected year      |
//! | achievements      | 0..   | number of achievement entries                |
//! | education         | 1..=4 | first keyword tier found in education text   |
//! | party stability   | 0..=5 | ceiling minus party-history length, floor 0  |
//! | public engagement | 1..=5 | first keyword tier found in position title   |
//!
//! # Example
//!
//! ```rust
//! use civic_core::record::PoliticianBuilder;
//! use civic_core::score::{ScoringConfig, ScoringEngine};
//!
//! let engine = ScoringEngine::new(ScoringConfig::for_year(2024));
//! let politician = PoliticianBuilder::new()
//!     .id(1)
//!     .name("Anne Waiguru")
//!     .position("Governor")
//!     .education("MA Economics")
//!     .parties(["Jubilee", "UDA"])
//!     .first_elected(2017)
//!     .build();
//!
//! let metric = engine.score(&politician);
//! assert_eq!(metric.experience, 7);
//! assert_eq!(metric.education, 3);
//! assert_eq!(metric.party_stability, 3);
//! assert_eq!(metric.public_engagement, 4);
//! ```

mod comparison;
mod metrics;
mod tiers;

pub use comparison::{AddOutcome, ComparisonEntry, ComparisonSet, DEFAULT_MAX_COMPARISON};
pub use metrics::{ComparisonMetric, MetricKind, ScoringConfig, ScoringEngine};
pub use tiers::{education_tier, engagement_tier, EDUCATION_MAX_TIER, ENGAGEMENT_MAX_TIER};
