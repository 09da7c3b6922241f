//! Engine configuration.
//!
//! Every field has a default, so a JSON file only needs the values it
//! changes:
//!
//! ```json
//! { "lz77": { "window_size": 8192 }, "embed_payload": true }
//! ```

use oxipress_core::error::{OxiPressError, Result};
use oxipress_lz77::Lz77Config;
use oxipress_rle::RleConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// RLE parameters as they appear in a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RleSettings {
    /// Minimum run length stored as a run.
    pub threshold: u8,
    /// Largest count per chunk.
    pub max_chunk: u8,
}

impl Default for RleSettings {
    fn default() -> Self {
        Self {
            threshold: RleConfig::DEFAULT.threshold,
            max_chunk: RleConfig::DEFAULT.max_chunk,
        }
    }
}

impl RleSettings {
    /// Validated codec configuration.
    pub fn to_config(&self) -> Result<RleConfig> {
        RleConfig::new(self.threshold, self.max_chunk)
    }
}

/// LZ77 parameters as they appear in a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lz77Settings {
    /// Sliding window size.
    pub window_size: u16,
    /// Lookahead buffer size.
    pub lookahead_size: u8,
}

impl Default for Lz77Settings {
    fn default() -> Self {
        Self {
            window_size: Lz77Config::DEFAULT.window_size,
            lookahead_size: Lz77Config::DEFAULT.lookahead_size,
        }
    }
}

impl Lz77Settings {
    /// Validated codec configuration.
    pub fn to_config(&self) -> Result<Lz77Config> {
        Lz77Config::new(self.window_size, self.lookahead_size)
    }
}

/// Limits for the pre-compression analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Leading bytes examined by the match and pattern scans.
    pub sample_size: usize,
    /// Shortest back-reference counted as a potential match.
    pub min_match_length: usize,
    /// Pattern lengths stay below this bound.
    pub max_pattern_length: usize,
    /// How many patterns to report.
    pub top_patterns: usize,
}

impl AnalysisConfig {
    /// 10 000-byte sample, 3-byte matches, patterns of 4 to 19 bytes, top 5.
    pub const DEFAULT: Self = Self {
        sample_size: 10_000,
        min_match_length: 3,
        max_pattern_length: 20,
        top_patterns: 5,
    };

    /// Check the limits are usable.
    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            return Err(OxiPressError::invalid_config(
                "analysis sample size must be at least 1",
            ));
        }
        if self.min_match_length == 0 {
            return Err(OxiPressError::invalid_config(
                "minimum match length must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// RLE codec parameters.
    pub rle: RleSettings,
    /// LZ77 codec parameters.
    pub lz77: Lz77Settings,
    /// Analysis limits.
    pub analysis: AnalysisConfig,
    /// Embed the hex-encoded payload in reports.
    pub embed_payload: bool,
}

impl EngineConfig {
    /// Parse a JSON document, then validate it.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| OxiPressError::invalid_config(format!("malformed configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loaded configuration from {}", path.display());
        Self::from_json(&text)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.rle.to_config()?;
        self.lz77.to_config()?;
        self.analysis.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_codecs() {
        let config = EngineConfig::default();
        assert_eq!(config.rle.to_config().unwrap(), RleConfig::DEFAULT);
        assert_eq!(config.lz77.to_config().unwrap(), Lz77Config::DEFAULT);
        assert_eq!(config.analysis.sample_size, 10_000);
        assert!(!config.embed_payload);
    }

    #[test]
    fn test_partial_json() {
        let config =
            EngineConfig::from_json(r#"{ "lz77": { "window_size": 8192 }, "embed_payload": true }"#)
                .unwrap();
        assert_eq!(config.lz77.window_size, 8192);
        assert_eq!(config.lz77.lookahead_size, 18);
        assert_eq!(config.rle, RleSettings::default());
        assert!(config.embed_payload);
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        let err = EngineConfig::from_json(r#"{ "rle": { "threshold": 0 } }"#).unwrap_err();
        assert!(matches!(err, OxiPressError::InvalidConfig { .. }));

        let err = EngineConfig::from_json(r#"{ "lz77": { "window_size": 40000 } }"#).unwrap_err();
        assert!(matches!(err, OxiPressError::InvalidConfig { .. }));

        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, OxiPressError::InvalidConfig { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_path("/nonexistent/oxipress.json").unwrap_err();
        assert!(matches!(err, OxiPressError::Io(_)));
    }
}
