//! RLE configuration.

use oxipress_core::error::{OxiPressError, Result};

/// RLE parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RleConfig {
    /// Minimum run length stored as a run; shorter runs become literals.
    pub threshold: u8,
    /// Largest count a single chunk may carry.
    pub max_chunk: u8,
}

impl RleConfig {
    /// Threshold 3, chunks of up to 255 bytes.
    pub const DEFAULT: Self = Self {
        threshold: 3,
        max_chunk: 255,
    };

    /// Create a validated configuration.
    pub fn new(threshold: u8, max_chunk: u8) -> Result<Self> {
        let config = Self {
            threshold,
            max_chunk,
        };
        config.validate()?;
        Ok(config)
    }

    /// Same chunk cap, different threshold.
    pub fn with_threshold(threshold: u8) -> Result<Self> {
        Self::new(threshold, Self::DEFAULT.max_chunk)
    }

    /// Check that both parameters are non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(OxiPressError::invalid_config("RLE threshold must be at least 1"));
        }
        if self.max_chunk == 0 {
            return Err(OxiPressError::invalid_config("RLE chunk cap must be at least 1"));
        }
        Ok(())
    }
}

impl Default for RleConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        assert_eq!(RleConfig::default().threshold, 3);
        assert_eq!(RleConfig::default().max_chunk, 255);
        assert!(RleConfig::DEFAULT.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero() {
        assert!(RleConfig::new(0, 255).is_err());
        assert!(RleConfig::new(3, 0).is_err());
        assert!(RleConfig::with_threshold(4).is_ok());
    }
}
