//! Configuration loading
//!
//! [`EngineConfig`] is read from JSON. Missing fields take their defaults,
//! so `{}` is a valid document.

use std::path::Path;

use civic_core::EngineConfig;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Environment variable naming a JSON config file
pub const CONFIG_ENV: &str = "CIVIC_CONFIG";

/// Parse and validate a JSON document.
pub fn from_str(json: &str) -> Result<EngineConfig> {
    let config: EngineConfig = serde_json::from_str(json)?;
    validate(&config)?;
    Ok(config)
}

/// Read, parse and validate a JSON file.
pub fn from_path(path: impl AsRef<Path>) -> Result<EngineConfig> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let config = from_str(&json)?;
    info!(path = %path.display(), "loaded engine config");
    Ok(config)
}

/// Load from the file named by `CIVIC_CONFIG`, or defaults when unset.
pub fn from_env() -> Result<EngineConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => from_path(path),
        None => {
            debug!("{} not set, using default engine config", CONFIG_ENV);
            Ok(EngineConfig::default())
        }
    }
}

/// Reject values the engine cannot run with.
pub fn validate(config: &EngineConfig) -> Result<()> {
    if config.page_size == 0 {
        return Err(Error::Config("page_size must be at least 1".into()));
    }
    if config.fetch_page_size == 0 {
        return Err(Error::Config("fetch_page_size must be at least 1".into()));
    }
    if config.fetch_timeout_ms == 0 {
        return Err(Error::Config("fetch_timeout_ms must be positive".into()));
    }
    if config.max_comparison < 2 {
        return Err(Error::Config(format!(
            "max_comparison must be at least 2, got {}",
            config.max_comparison
        )));
    }
    if !config.credibility.is_valid() {
        return Err(Error::Config(format!(
            "credibility thresholds out of order: high {} medium {}",
            config.credibility.high, config.credibility.medium
        )));
    }
    if config.scoring.reference_year < config.scoring.baseline_year {
        return Err(Error::Config(format!(
            "reference_year {} is before baseline_year {}",
            config.scoring.reference_year, config.scoring.baseline_year
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = from_str("{}").unwrap();
        assert_eq!(config.page_size, EngineConfig::default().page_size);
        assert_eq!(config.fetch_timeout_ms, 10_000);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(from_str(r#"{"page_size": 0}"#), Err(Error::Config(_))));
        assert!(matches!(
            from_str(r#"{"credibility": {"high": 50, "medium": 70}}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            from_str(r#"{"max_comparison": 1}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        assert!(matches!(from_str("{page_size"), Err(Error::Serialization(_))));
    }
}
