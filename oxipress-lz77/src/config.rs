//! LZ77 window configuration.

use oxipress_core::error::{OxiPressError, Result};

/// Largest supported window.
pub const MAX_WINDOW: u16 = 32768;

/// Sliding window parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz77Config {
    /// History searched for back-references (1-32768).
    pub window_size: u16,
    /// Longest match length (1-255).
    pub lookahead_size: u8,
}

impl Lz77Config {
    /// 4 KiB window, 18-byte lookahead.
    pub const DEFAULT: Self = Self {
        window_size: 4096,
        lookahead_size: 18,
    };

    /// Full 32 KiB window and longest lookahead.
    pub const MAX: Self = Self {
        window_size: MAX_WINDOW,
        lookahead_size: u8::MAX,
    };

    /// Create a validated configuration.
    pub fn new(window_size: u16, lookahead_size: u8) -> Result<Self> {
        let config = Self {
            window_size,
            lookahead_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check both parameters are in range.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 || self.window_size > MAX_WINDOW {
            return Err(OxiPressError::invalid_config(format!(
                "window size must be between 1 and {}, got {}",
                MAX_WINDOW, self.window_size
            )));
        }
        if self.lookahead_size == 0 {
            return Err(OxiPressError::invalid_config(
                "lookahead size must be between 1 and 255",
            ));
        }
        Ok(())
    }
}

impl Default for Lz77Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_valid() {
        assert!(Lz77Config::DEFAULT.validate().is_ok());
        assert!(Lz77Config::MAX.validate().is_ok());
    }

    #[test]
    fn test_ranges() {
        assert!(Lz77Config::new(0, 18).is_err());
        assert!(Lz77Config::new(32769, 18).is_err());
        assert!(Lz77Config::new(4096, 0).is_err());
        assert!(Lz77Config::new(1, 1).is_ok());
    }
}
