//! # OxiPress-LZ77: Sliding Window Compression
//!
//! Classic LZ77 emitting `(offset, length, literal)` triplets.
//!
//! ## Features
//!
//! - **Exhaustive search**: every position inside the window is considered,
//!   and the nearest offset wins among equally long matches
//! - **Self-overlapping matches**: a match may run into the bytes it is
//!   producing, so `ABABABAB` becomes two literals and one `(2, 5, B)` triplet
//! - **Configurable window**: 1 to 32768 bytes of history, 1 to 255 bytes of
//!   lookahead
//!
//! ## Container layout
//!
//! After the shared 24-byte header:
//!
//! ```text
//! window u16 LE | lookahead u8 | (offset u16 BE, length u8, literal u8) *
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipress_lz77::{Lz77Config, compress, decompress};
//!
//! let original = b"ABABABAB";
//! let compressed = compress(original, Lz77Config::DEFAULT).unwrap();
//! assert_eq!(decompress(&compressed).unwrap(), original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod encoder;
mod matcher;
mod triplet;

pub use config::{Lz77Config, MAX_WINDOW};
pub use decoder::{Lz77DecodeStats, decode_payload};
pub use encoder::{Lz77Encoder, Lz77Stats};
pub use matcher::{Match, MatchFinder};
pub use triplet::Triplet;

use oxipress_core::error::Result;
use oxipress_core::traits::{Codec, Decoded, Encoded};

/// LZ77 codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz77 {
    config: Lz77Config,
}

impl Lz77 {
    /// Create a codec with a validated configuration.
    pub fn new(config: Lz77Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> Lz77Config {
        self.config
    }
}

impl Codec for Lz77 {
    type EncodeStats = Lz77Stats;
    type DecodeStats = Lz77DecodeStats;

    const MAGIC: [u8; 4] = *b"OXL1";

    fn name(&self) -> &'static str {
        "LZ77 (Lempel-Ziv 1977)"
    }

    fn encode(&self, data: &[u8]) -> Result<Encoded<Lz77Stats>> {
        let (container, payload_len, stats) = Lz77Encoder::new(self.config)?.encode(Self::MAGIC, data);
        Ok(Encoded {
            container,
            payload_len,
            stats,
        })
    }

    fn decode(&self, container: &[u8]) -> Result<Decoded<Lz77DecodeStats>> {
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

/// Compress `data` into an LZ77 container.
pub fn compress(data: &[u8], config: Lz77Config) -> Result<Vec<u8>> {
    Ok(Lz77::new(config)?.encode(data)?.container)
}

/// Decompress an LZ77 container; window parameters come from the container.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    Ok(Lz77::default().decode(container)?.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_text() {
        let original = b"to be or not to be, that is the question; to be or not to be";
        let compressed = compress(original, Lz77Config::DEFAULT).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_parameters_travel_with_container() {
        let config = Lz77Config::new(16, 4).unwrap();
        let original = b"abcabcabcabcabcabcabcabc".repeat(4);
        let encoded = Lz77::new(config).unwrap().encode(&original).unwrap();
        let decoded = Lz77::default().decode(&encoded.container).unwrap();
        assert_eq!(decoded.data, original);
        assert_eq!(decoded.stats.window_size, 16);
        assert_eq!(decoded.stats.lookahead_size, 4);
    }

    #[test]
    fn test_empty() {
        let encoded = Lz77::default().encode(b"").unwrap();
        assert_eq!(encoded.payload_len, 0);
        assert!(decompress(&encoded.container).unwrap().is_empty());
    }
}
