//! Side-by-side comparison set

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::metrics::{ComparisonMetric, MetricKind, ScoringEngine};
use super::tiers::{EDUCATION_MAX_TIER, ENGAGEMENT_MAX_TIER};
use crate::record::{Politician, RecordId};

pub const DEFAULT_MAX_COMPARISON: usize = 4;

/// Minimum entries for a meaningful comparison
const MIN_COMPARISON: usize = 2;

/// Result of adding a politician to the set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Added,
    /// Already in the set; nothing changed
    AlreadyPresent,
    /// The set is full; nothing changed
    MaximumReached,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub politician: Politician,
    pub metric: ComparisonMetric,
}

/// Bounded selection of politicians with their derived metrics.
///
/// Metrics are recomputed for every entry whenever membership changes.
#[derive(Debug, Clone)]
pub struct ComparisonSet {
    engine: ScoringEngine,
    capacity: usize,
    entries: Vec<ComparisonEntry>,
}

impl ComparisonSet {
    pub fn new(engine: ScoringEngine) -> Self {
        Self::with_capacity(engine, DEFAULT_MAX_COMPARISON)
    }

    /// A capacity below 2 is raised to 2.
    pub fn with_capacity(engine: ScoringEngine, capacity: usize) -> Self {
        Self {
            engine,
            capacity: capacity.max(MIN_COMPARISON),
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, politician: Politician) -> AddOutcome {
        if self.contains(politician.id) {
            return AddOutcome::AlreadyPresent;
        }
        if self.is_full() {
            debug!(id = politician.id, capacity = self.capacity, "comparison set full");
            return AddOutcome::MaximumReached;
        }
        self.entries.push(ComparisonEntry {
            politician,
            metric: ComparisonMetric::default(),
        });
        self.rescore();
        AddOutcome::Added
    }

    /// Returns the removed politician, if present.
    pub fn remove(&mut self, id: RecordId) -> Option<Politician> {
        let index = self.entries.iter().position(|e| e.politician.id == id)?;
        let entry = self.entries.remove(index);
        self.rescore();
        Some(entry.politician)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// At least two politicians are selected
    pub fn is_ready(&self) -> bool {
        self.entries.len() >= MIN_COMPARISON
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.entries.iter().any(|e| e.politician.id == id)
    }

    pub fn metric(&self, id: RecordId) -> Option<&ComparisonMetric> {
        self.entries
            .iter()
            .find(|e| e.politician.id == id)
            .map(|e| &e.metric)
    }

    /// Shared bar maximum for a metric.
    ///
    /// Ordinal metrics use their fixed ceiling; counts and years use the
    /// largest value in the set.
    pub fn maximum(&self, kind: MetricKind) -> u32 {
        match kind {
            MetricKind::Education => u32::from(EDUCATION_MAX_TIER),
            MetricKind::PublicEngagement => u32::from(ENGAGEMENT_MAX_TIER),
            MetricKind::PartyStability => self.engine.config().party_stability_ceiling,
            MetricKind::Experience | MetricKind::Achievements => self
                .entries
                .iter()
                .map(|e| e.metric.get(kind))
                .max()
                .unwrap_or(0),
        }
    }

    /// Bar length in 0..=1 for one entry's metric. A zero maximum gives 0.
    pub fn bar_fraction(&self, id: RecordId, kind: MetricKind) -> Option<f64> {
        let value = self.metric(id)?.get(kind);
        let max = self.maximum(kind);
        if max == 0 {
            return Some(0.0);
        }
        Some((f64::from(value) / f64::from(max)).min(1.0))
    }

    fn rescore(&mut self) {
        let engine = self.engine;
        for entry in &mut self.entries {
            entry.metric = engine.score(&entry.politician);
        }
    }
}
