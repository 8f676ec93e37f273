//! Article sentiment

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
    Mixed,
}

impl Sentiment {
    /// Case-insensitive parse. Unknown values read as `Neutral`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            "mixed" => Self::Mixed,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Mixed => "mixed",
        }
    }

    /// Icon name in the app's icon set
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Positive => "trending-up",
            Self::Negative => "trending-down",
            Self::Neutral => "remove",
            Self::Mixed => "swap-horizontal",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Positive => "#10B981",
            Self::Negative => "#EF4444",
            Self::Neutral => "#6B7280",
            Self::Mixed => "#8B5CF6",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
