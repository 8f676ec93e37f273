//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::classify::CredibilityThresholds;
use crate::score::{ScoringConfig, DEFAULT_MAX_COMPARISON};

/// Tunables shared by the orchestrator, the feed and the scorers.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Records revealed per local page
    pub page_size: usize,
    /// Records requested per source page
    pub fetch_page_size: usize,
    /// Pause before a load-more completes
    pub load_more_delay_ms: u64,
    /// Upstream fetch timeout
    pub fetch_timeout_ms: u64,
    /// Comparison set capacity
    pub max_comparison: usize,
    pub scoring: ScoringConfig,
    pub credibility: CredibilityThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            fetch_page_size: 50,
            load_more_delay_ms: 300,
            fetch_timeout_ms: 10_000,
            max_comparison: DEFAULT_MAX_COMPARISON,
            scoring: ScoringConfig::default(),
            credibility: CredibilityThresholds::default(),
        }
    }
}
