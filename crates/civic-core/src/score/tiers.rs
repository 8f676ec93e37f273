//! Keyword tiering for education and public engagement
//!
//! Rules are scanned in priority order and the first rule with a matching
//! keyword decides the tier. Short keywords (abbreviations like "ma", "mp")
//! must match a whole token so that "diploma" never reads as "ma"; longer
//! keywords and phrases match as substrings.

pub const EDUCATION_MAX_TIER: u8 = 4;
pub const ENGAGEMENT_MAX_TIER: u8 = 5;

/// Keywords at or above this length match as substrings
const SUBSTRING_MIN_LEN: usize = 5;

struct TierRule {
    tier: u8,
    keywords: &'static [&'static str],
}

const EDUCATION_RULES: &[TierRule] = &[
    TierRule {
        tier: 4,
        keywords: &["phd", "doctorate", "doctor of", "dphil"],
    },
    TierRule {
        tier: 3,
        keywords: &["master", "msc", "ma", "mba", "llm", "mphil", "mpa"],
    },
    TierRule {
        tier: 2,
        keywords: &["bachelor", "bsc", "ba", "llb", "bcom", "bed", "degree"],
    },
];

const ENGAGEMENT_RULES: &[TierRule] = &[
    TierRule {
        tier: 4,
        keywords: &["deputy president"],
    },
    TierRule {
        tier: 5,
        keywords: &["president"],
    },
    TierRule {
        tier: 3,
        keywords: &["deputy governor"],
    },
    TierRule {
        tier: 4,
        keywords: &["governor", "senator"],
    },
    TierRule {
        tier: 3,
        keywords: &[
            "member of parliament",
            "mp",
            "women representative",
            "woman representative",
            "cabinet secretary",
        ],
    },
    TierRule {
        tier: 2,
        keywords: &["mca", "member of county assembly", "ward representative"],
    },
];

/// Education tier 1-4 from a free-text education summary
pub fn education_tier(education: &str) -> u8 {
    first_match(EDUCATION_RULES, education).unwrap_or(1)
}

/// Engagement tier 1-5 from a position title
pub fn engagement_tier(position: &str) -> u8 {
    first_match(ENGAGEMENT_RULES, position).unwrap_or(1)
}

fn first_match(rules: &[TierRule], text: &str) -> Option<u8> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }
    let tokens: Vec<&str> = normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    rules
        .iter()
        .find(|rule| {
            rule.keywords
                .iter()
                .any(|keyword| keyword_matches(keyword, &normalized, &tokens))
        })
        .map(|rule| rule.tier)
}

fn keyword_matches(keyword: &str, normalized: &str, tokens: &[&str]) -> bool {
    if keyword.contains(' ') || keyword.len() >= SUBSTRING_MIN_LEN {
        normalized.contains(keyword)
    } else {
        tokens.iter().any(|token| *token == keyword)
    }
}

/// Lowercase with dots and apostrophes dropped, so "Ph.D." reads as "phd"
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| *c != '.' && *c != '\'')
        .collect()
}
