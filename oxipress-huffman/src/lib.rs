//! # OxiPress-Huffman: Pure Rust Huffman Coding
//!
//! Classic byte-oriented Huffman coding with a deterministic tree.
//!
//! ## Features
//!
//! - **Deterministic ties**: the decoder rebuilds the encoder's tree from the
//!   stored byte weights, so no tree shape is transmitted
//! - **Exact symbol count**: decoding stops after the recorded number of
//!   symbols and never interprets padding bits
//! - **Statistics**: code lengths, tree depth and bit-level accounting
//!
//! ## Container layout
//!
//! After the shared 24-byte header:
//!
//! ```text
//! padding u8 | distinct varint | (byte u8, weight varint) * distinct | bits
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipress_huffman::{compress, decompress};
//!
//! let original = b"aaaaaaaaab";
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codes;
mod decoder;
mod encoder;
mod tree;

pub use codes::{CodeTable, HuffmanCode};
pub use decoder::{HuffmanDecodeStats, HuffmanDecoder, decode_bits};
pub use encoder::{HuffmanEncoder, HuffmanStats, SAMPLE_CODES, encode_bits};
pub use tree::{HuffmanTree, Node};

use oxipress_core::error::Result;
use oxipress_core::traits::{Codec, Decoded, Encoded};

/// Huffman codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Huffman;

impl Codec for Huffman {
    type EncodeStats = HuffmanStats;
    type DecodeStats = HuffmanDecodeStats;

    const MAGIC: [u8; 4] = *b"OXH1";

    fn name(&self) -> &'static str {
        "Huffman Coding"
    }

    fn encode(&self, data: &[u8]) -> Result<Encoded<HuffmanStats>> {
        let (container, payload_len, stats) = HuffmanEncoder::new().encode(Self::MAGIC, data)?;
        Ok(Encoded {
            container,
            payload_len,
            stats,
        })
    }

    fn decode(&self, container: &[u8]) -> Result<Decoded<HuffmanDecodeStats>> {
        let (header, body) = self.split_header(container)?;
        let (data, stats) = HuffmanDecoder::new().decode(&header, body)?;
        header.verify(&data)?;
        Ok(Decoded {
            data,
            header,
            stats,
        })
    }
}

/// Compress `data` into a Huffman container.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(Huffman.encode(data)?.container)
}

/// Decompress a Huffman container.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    Ok(Huffman.decode(container)?.data)
}
