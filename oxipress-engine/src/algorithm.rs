//! Algorithm tags and container detection.
//!
//! Tags are the wire names used in requests and reports (`huffmanCoding`,
//! `runLengthEncoding`, `lZ77`). Detection reads the container magic.

use oxipress_core::error::{OxiPressError, Result};
use oxipress_core::traits::Codec;
use oxipress_huffman::Huffman;
use oxipress_lz77::Lz77;
use oxipress_rle::Rle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported compression algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Huffman coding (`.huff`).
    #[serde(rename = "huffmanCoding")]
    HuffmanCoding,
    /// Run-length encoding (`.rle`).
    #[serde(rename = "runLengthEncoding")]
    RunLengthEncoding,
    /// LZ77 sliding window (`.lz77`).
    #[serde(rename = "lZ77")]
    Lz77,
}

/// Human-readable description of an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Kinds of data the algorithm suits.
    pub best_for: &'static str,
    /// Notable properties.
    pub characteristics: &'static str,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Algorithm; 3] = [Self::HuffmanCoding, Self::RunLengthEncoding, Self::Lz77];

    /// Wire tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::HuffmanCoding => "huffmanCoding",
            Self::RunLengthEncoding => "runLengthEncoding",
            Self::Lz77 => "lZ77",
        }
    }

    /// Display name, as reported by the codec.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HuffmanCoding => Huffman.name(),
            Self::RunLengthEncoding => Rle::default().name(),
            Self::Lz77 => Lz77::default().name(),
        }
    }

    /// File extension for compressed output, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::HuffmanCoding => "huff",
            Self::RunLengthEncoding => "rle",
            Self::Lz77 => "lz77",
        }
    }

    /// Container magic written by this algorithm's codec.
    pub fn magic(&self) -> [u8; 4] {
        match self {
            Self::HuffmanCoding => Huffman::MAGIC,
            Self::RunLengthEncoding => Rle::MAGIC,
            Self::Lz77 => Lz77::MAGIC,
        }
    }

    /// Identify an algorithm from leading container bytes.
    pub fn from_magic(magic: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| magic.len() >= 4 && magic[..4] == a.magic())
    }

    /// Identify the algorithm that produced `container`.
    pub fn detect(container: &[u8]) -> Result<Self> {
        Self::from_magic(container).ok_or_else(|| {
            let shown = &container[..container.len().min(4)];
            OxiPressError::invalid_input(format!("unrecognised container magic {:02x?}", shown))
        })
    }

    /// Guess the algorithm from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.extension().eq_ignore_ascii_case(ext))
    }

    /// Descriptive text for reports.
    pub fn info(&self) -> AlgorithmInfo {
        match self {
            Self::HuffmanCoding => AlgorithmInfo {
                name: self.name(),
                description: "Optimal prefix-free encoding based on character frequencies",
                best_for: "Text files, source code, structured data with non-uniform character distribution",
                characteristics: "Lossless, variable-length codes, optimal for symbol-by-symbol encoding",
            },
            Self::RunLengthEncoding => AlgorithmInfo {
                name: self.name(),
                description: "Stores sequences of identical consecutive values as count-value pairs",
                best_for: "Images with solid areas, simple graphics, bitmap data, repetitive patterns",
                characteristics: "Lossless, simple algorithm, excellent for data with long runs of identical values",
            },
            Self::Lz77 => AlgorithmInfo {
                name: self.name(),
                description: "Sliding window compression that replaces repeated sequences with references to earlier occurrences",
                best_for: "Text files, source code, structured data, HTML/XML, general purpose files",
                characteristics: "Lossless, adaptive learning, foundation for ZIP/GZIP, good balance of ratio and speed",
            },
        }
    }
}

impl FromStr for Algorithm {
    type Err = OxiPressError;

    /// Accepts the wire tags and the short names `huffman`, `rle` and `lz77`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "huffmanCoding" => return Ok(Self::HuffmanCoding),
            "runLengthEncoding" => return Ok(Self::RunLengthEncoding),
            "lZ77" => return Ok(Self::Lz77),
            _ => {}
        }
        match s.to_ascii_lowercase().as_str() {
            "huffman" | "huff" => Ok(Self::HuffmanCoding),
            "rle" => Ok(Self::RunLengthEncoding),
            "lz77" => Ok(Self::Lz77),
            _ => Err(OxiPressError::unsupported_algorithm(s)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_roundtrip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.tag().parse::<Algorithm>().unwrap(), algorithm);
            let json = serde_json::to_string(&algorithm).unwrap();
            assert_eq!(json, format!("\"{}\"", algorithm.tag()));
        }
    }

    #[test]
    fn test_short_names() {
        assert_eq!("RLE".parse::<Algorithm>().unwrap(), Algorithm::RunLengthEncoding);
        assert_eq!("huffman".parse::<Algorithm>().unwrap(), Algorithm::HuffmanCoding);
        assert_eq!("LZ77".parse::<Algorithm>().unwrap(), Algorithm::Lz77);
    }

    #[test]
    fn test_unknown_tag() {
        let err = "deflate".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, OxiPressError::UnsupportedAlgorithm { ref tag } if tag == "deflate"));
    }

    #[test]
    fn test_detect() {
        let container = oxipress_rle::compress(b"aaaa", oxipress_rle::RleConfig::DEFAULT).unwrap();
        assert_eq!(Algorithm::detect(&container).unwrap(), Algorithm::RunLengthEncoding);
        assert!(Algorithm::detect(b"PK\x03\x04").is_err());
        assert!(Algorithm::detect(b"OX").is_err());
    }

    #[test]
    fn test_extension() {
        assert_eq!(Algorithm::from_extension("LZ77"), Some(Algorithm::Lz77));
        assert_eq!(Algorithm::from_extension("zip"), None);
        assert_eq!(Algorithm::HuffmanCoding.extension(), "huff");
    }
}
