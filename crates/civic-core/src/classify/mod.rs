//! News credibility and sentiment classification
//!
//! Both values are supplied upstream; this module only maps them to display
//! tiers, labels, icons and colors.
//!
//! # Credibility Tiers
//!
//! ```text
//! High (>= 80) > Medium (>= 60) > Low
//! ```
//!
//! # Example
//!
//! ```rust
//! use civic_core::classify::{classify, CredibilityTier, Sentiment};
//!
//! let badge = classify(85);
//! assert_eq!(badge.tier, CredibilityTier::High);
//! assert_eq!(badge.label, "High");
//!
//! assert_eq!(Sentiment::parse("MIXED"), Sentiment::Mixed);
//! assert_eq!(Sentiment::parse("sarcastic"), Sentiment::Neutral);
//! ```

mod credibility;
mod sentiment;

pub use credibility::{classify, CredibilityBadge, CredibilityThresholds, CredibilityTier};
pub use sentiment::Sentiment;
