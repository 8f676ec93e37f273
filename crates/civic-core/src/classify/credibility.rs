//! Credibility score tiers

use serde::{Deserialize, Serialize};

/// Credibility tiers for news sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredibilityTier {
    Low,
    Medium,
    High,
}

impl CredibilityTier {
    /// Tier under the default 80/60 thresholds
    pub fn from_score(score: u8) -> Self {
        CredibilityThresholds::default().classify(score)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Hex color for badges (green, amber, red)
    pub fn color(&self) -> &'static str {
        match self {
            Self::High => "#10B981",
            Self::Medium => "#F59E0B",
            Self::Low => "#EF4444",
        }
    }

    pub fn badge(&self) -> CredibilityBadge {
        CredibilityBadge {
            tier: *self,
            label: self.label(),
            color: self.color(),
        }
    }
}

impl std::fmt::Display for CredibilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive lower bounds for the High and Medium tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredibilityThresholds {
    pub high: u8,
    pub medium: u8,
}

impl Default for CredibilityThresholds {
    fn default() -> Self {
        Self {
            high: 80,
            medium: 60,
        }
    }
}

impl CredibilityThresholds {
    pub fn classify(&self, score: u8) -> CredibilityTier {
        if score >= self.high {
            CredibilityTier::High
        } else if score >= self.medium {
            CredibilityTier::Medium
        } else {
            CredibilityTier::Low
        }
    }

    /// Both bounds within 0..=100 and high not below medium
    pub fn is_valid(&self) -> bool {
        self.high <= 100 && self.medium <= self.high
    }
}

/// Label and color for a credibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CredibilityBadge {
    pub tier: CredibilityTier,
    pub label: &'static str,
    pub color: &'static str,
}

/// Classify a 0-100 score with the default thresholds
pub fn classify(score: u8) -> CredibilityBadge {
    CredibilityTier::from_score(score).badge()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(CredibilityTier::from_score(100), CredibilityTier::High);
        assert_eq!(CredibilityTier::from_score(80), CredibilityTier::High);
        assert_eq!(CredibilityTier::from_score(79), CredibilityTier::Medium);
        assert_eq!(CredibilityTier::from_score(60), CredibilityTier::Medium);
        assert_eq!(CredibilityTier::from_score(59), CredibilityTier::Low);
        assert_eq!(CredibilityTier::from_score(0), CredibilityTier::Low);
    }

    #[test]
    fn test_classify_badges() {
        let high = classify(85);
        assert_eq!(high.label, "High");
        assert_eq!(high.color, CredibilityTier::High.color());

        let low = classify(45);
        assert_eq!(low.tier, CredibilityTier::Low);
        assert_eq!(low.label, "Low");
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = CredibilityThresholds {
            high: 90,
            medium: 75,
        };
        assert_eq!(strict.classify(85), CredibilityTier::Medium);
        assert!(strict.is_valid());
        assert!(!CredibilityThresholds { high: 50, medium: 60 }.is_valid());
    }

    #[test]
    fn test_ordering() {
        assert!(CredibilityTier::High > CredibilityTier::Medium);
        assert!(CredibilityTier::Medium > CredibilityTier::Low);
    }
}
