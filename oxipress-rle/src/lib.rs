//! # OxiPress-RLE: Run-Length Encoding
//!
//! Runs of at least `threshold` identical bytes are stored as
//! `[0xFF][count][value]`; everything between them is gathered into literal
//! segments stored as `[0xFE][count][bytes...]`. Counts are one byte, so runs
//! and segments longer than the chunk cap (255 by default) span several
//! chunks.
//!
//! ## Example
//!
//! ```rust
//! use oxipress_rle::{RleConfig, compress, decompress};
//!
//! let original = vec![0u8; 1000];
//! let compressed = compress(&original, RleConfig::DEFAULT).unwrap();
//! assert_eq!(decompress(&compressed).unwrap(), original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod encoder;
mod runs;

pub use config::RleConfig;
pub use decoder::{RleDecodeStats, decode_payload};
pub use encoder::{RleEncoder, RleStats};
pub use runs::{Runs, Segment, runs, segment};

use oxipress_core::error::Result;
use oxipress_core::traits::{Codec, Decoded, Encoded};

/// Chunk flag for a run.
pub const FLAG_RUN: u8 = 0xFF;
/// Chunk flag for a literal segment.
pub const FLAG_LITERAL: u8 = 0xFE;

/// Run-length codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rle {
    config: RleConfig,
}

impl Rle {
    /// Create a codec with a validated configuration.
    pub fn new(config: RleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> RleConfig {
        self.config
    }
}

impl Codec for Rle {
    type EncodeStats = RleStats;
    type DecodeStats = RleDecodeStats;

    const MAGIC: [u8; 4] = *b"OXR1";

    fn name(&self) -> &'static str {
        "Run-Length Encoding (RLE)"
    }

    fn encode(&self, data: &[u8]) -> Result<Encoded<RleStats>> {
        let (container, payload_len, stats) = RleEncoder::new(self.config)?.encode(Self::MAGIC, data);
        Ok(Encoded {
            container,
            payload_len,
            stats,
        })
    }

    fn decode(&self, container: &[u8]) -> Result<Decoded<RleDecodeStats>> {
        let (header, body) = self.split_header(container)?;
        let (data, stats) = decoder::decode(&header, body)?;
        header.verify(&data)?;
        Ok(Decoded {
            data,
            header,
            stats,
        })
    }
}

/// Compress `data` into an RLE container.
pub fn compress(data: &[u8], config: RleConfig) -> Result<Vec<u8>> {
    Ok(Rle::new(config)?.encode(data)?.container)
}

/// Decompress an RLE container; parameters are read from the container.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    Ok(Rle::default().decode(container)?.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_mixed() {
        let original = b"WWWWWWWWWWWWBWWWWWWWWWWWWBBBWWWWWWWWWWWWWWWWWWWWWWWWBWWWWWWWWWWWWWW";
        let compressed = compress(original, RleConfig::DEFAULT).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_decoder_ignores_local_config() {
        let config = RleConfig::new(5, 10).unwrap();
        let original = b"aaaaaaaaaaaaaaaaaaaaaaaabbbbcdefffff";
        let encoded = Rle::new(config).unwrap().encode(original).unwrap();
        let decoded = Rle::default().decode(&encoded.container).unwrap();
        assert_eq!(decoded.data, original);
        assert_eq!(decoded.stats.threshold_used, 5);
    }

    #[test]
    fn test_empty() {
        let encoded = Rle::default().encode(b"").unwrap();
        assert_eq!(encoded.payload_len, 0);
        assert!(Rle::default().decode(&encoded.container).unwrap().data.is_empty());
    }
}
