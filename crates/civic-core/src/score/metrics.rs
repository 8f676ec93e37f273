//! Per-politician comparison metrics

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::tiers::{education_tier, engagement_tier};
use crate::record::Politician;

/// Inputs to the scoring rules that are not part of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Assumed first-elected year when a record has none
    pub baseline_year: i32,
    /// Year experience is measured up to
    pub reference_year: i32,
    /// Party stability is this minus the number of parties, floored at 0
    pub party_stability_ceiling: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::for_year(Utc::now().year())
    }
}

impl ScoringConfig {
    /// Defaults with a fixed reference year, for reproducible scores.
    pub fn for_year(reference_year: i32) -> Self {
        Self {
            baseline_year: 2013,
            reference_year,
            party_stability_ceiling: 5,
        }
    }
}

/// The five comparison metrics for one politician.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ComparisonMetric {
    /// Years in office since first election
    pub experience: u32,
    pub achievements: u32,
    /// Ordinal 1..=4
    pub education: u8,
    /// Higher means fewer party switches
    pub party_stability: u32,
    /// Ordinal 1..=5
    pub public_engagement: u8,
}

impl ComparisonMetric {
    pub fn get(&self, kind: MetricKind) -> u32 {
        match kind {
            MetricKind::Experience => self.experience,
            MetricKind::Achievements => self.achievements,
            MetricKind::Education => u32::from(self.education),
            MetricKind::PartyStability => self.party_stability,
            MetricKind::PublicEngagement => u32::from(self.public_engagement),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Experience,
    Achievements,
    Education,
    PartyStability,
    PublicEngagement,
}

impl MetricKind {
    /// Display order used by comparison tables
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Experience,
        MetricKind::Achievements,
        MetricKind::Education,
        MetricKind::PartyStability,
        MetricKind::PublicEngagement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Experience => "Experience",
            Self::Achievements => "Achievements",
            Self::Education => "Education",
            Self::PartyStability => "Party Stability",
            Self::PublicEngagement => "Public Engagement",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pure scorer. The same politician and config always give the same metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, politician: &Politician) -> ComparisonMetric {
        ComparisonMetric {
            experience: self.experience(politician),
            achievements: saturating_u32(politician.achievements.len()),
            education: education_tier(&politician.education),
            party_stability: self.party_stability(politician),
            public_engagement: engagement_tier(&politician.position),
        }
    }

    fn experience(&self, politician: &Politician) -> u32 {
        let start = politician.first_elected.unwrap_or(self.config.baseline_year);
        let years = self.config.reference_year.saturating_sub(start).max(0);
        u32::try_from(years).unwrap_or(0)
    }

    fn party_stability(&self, politician: &Politician) -> u32 {
        self.config
            .party_stability_ceiling
            .saturating_sub(saturating_u32(politician.party_history.len()))
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PoliticianBuilder;
    use pretty_assertions::assert_eq;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringConfig::for_year(2024))
    }

    #[test]
    fn test_party_stability() {
        let switcher = PoliticianBuilder::new()
            .id(1)
            .name("A")
            .parties(["KANU", "ODM", "URP", "UDA"])
            .build();
        let loyal = PoliticianBuilder::new().id(2).name("B").party("ODM").build();

        assert_eq!(engine().score(&switcher).party_stability, 1);
        assert_eq!(engine().score(&loyal).party_stability, 4);
    }

    #[test]
    fn test_party_stability_floors_at_zero() {
        let nomad = PoliticianBuilder::new()
            .id(1)
            .name("Nomad")
            .parties(["A", "B", "C", "D", "E", "F", "G"])
            .build();
        assert_eq!(engine().score(&nomad).party_stability, 0);
    }

    #[test]
    fn test_experience_uses_baseline_when_unknown() {
        let p = PoliticianBuilder::new().id(1).name("New").build();
        assert_eq!(engine().score(&p).experience, 11);

        let future = PoliticianBuilder::new().id(2).name("Future").first_elected(2030).build();
        assert_eq!(engine().score(&future).experience, 0);
    }

    #[test]
    fn test_full_metric() {
        let p = PoliticianBuilder::new()
            .id(2)
            .name("William Ruto")
            .position("President")
            .education("PhD Plant Ecology")
            .parties(["KANU", "ODM", "URP", "UDA"])
            .achievements(["Deputy President 2013", "President 2022"])
            .first_elected(1997)
            .build();

        assert_eq!(
            engine().score(&p),
            ComparisonMetric {
                experience: 27,
                achievements: 2,
                education: 4,
                party_stability: 1,
                public_engagement: 5,
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let p = PoliticianBuilder::new()
            .id(1)
            .name("Martha Karua")
            .position("Member of Parliament")
            .education("LLB")
            .party("NARC-Kenya")
            .build();
        assert_eq!(engine().score(&p), engine().score(&p.clone()));
    }

    #[test]
    fn test_metric_get_and_labels() {
        let metric = ComparisonMetric {
            experience: 7,
            achievements: 3,
            education: 3,
            party_stability: 3,
            public_engagement: 4,
        };
        let values: Vec<u32> = MetricKind::ALL.iter().map(|k| metric.get(*k)).collect();
        assert_eq!(values, vec![7, 3, 3, 3, 4]);
        assert_eq!(MetricKind::PartyStability.to_string(), "Party Stability");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"reference_year": 2025}"#).unwrap();
        assert_eq!(config.reference_year, 2025);
        assert_eq!(config.baseline_year, 2013);
        assert_eq!(config.party_stability_ceiling, 5);
    }
}
