//! Structured compression and decompression reports.
//!
//! Each report carries exactly one algorithm-specific variant. The variant
//! enums are internally tagged with `algorithm` and flattened into the
//! report, so the JSON looks like:
//!
//! ```text
//! { "original_filename": ..., "algorithm": "runLengthEncoding",
//!   "compression_details_RLE": { ... }, "file_analysis": { ... }, ... }
//! ```

use crate::algorithm::{Algorithm, AlgorithmInfo};
use crate::analysis::{ByteShare, HuffmanAnalysis, Lz77Analysis, RleAnalysis, display_byte};
use crate::validate::Validation;
use oxipress_huffman::{HuffmanDecodeStats, HuffmanStats};
use oxipress_lz77::{Lz77DecodeStats, Lz77Stats};
use oxipress_rle::{RleDecodeStats, RleStats};
use serde::Serialize;

/// MIME type of every payload.
pub const CONTENT_TYPE: &str = "application/octet-stream";

/// Shortest and longest code length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeLengthRange {
    /// Shortest code, in bits.
    pub min: u8,
    /// Longest code, in bits.
    pub max: u8,
}

/// One entry of the code table sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleCode {
    /// Displayed byte.
    pub byte: String,
    /// Code as a string of `0` and `1`.
    pub code: String,
}

/// Huffman encoding details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuffmanDetails {
    /// Distinct symbols coded.
    pub total_symbols: usize,
    /// Unweighted mean code length, in bits.
    pub average_code_length: f64,
    /// Code length bounds.
    pub code_length_range: CodeLengthRange,
    /// Mean bits per input byte.
    pub weighted_bits_per_symbol: f64,
    /// Longest root-to-leaf path.
    pub tree_depth: usize,
    /// Zero bits appended to fill the last byte.
    pub padding_bits: u8,
    /// First few codes in byte order.
    pub sample_codes: Vec<SampleCode>,
}

impl From<&HuffmanStats> for HuffmanDetails {
    fn from(stats: &HuffmanStats) -> Self {
        Self {
            total_symbols: stats.total_symbols,
            average_code_length: stats.average_code_length,
            code_length_range: CodeLengthRange {
                min: stats.min_code_length,
                max: stats.max_code_length,
            },
            weighted_bits_per_symbol: stats.weighted_bits_per_symbol,
            tree_depth: stats.tree_depth,
            padding_bits: stats.padding_bits,
            sample_codes: stats
                .sample_codes
                .iter()
                .map(|(byte, code)| SampleCode {
                    byte: display_byte(*byte),
                    code: code.clone(),
                })
                .collect(),
        }
    }
}

/// RLE encoding details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RleDetails {
    /// Logical runs emitted.
    pub total_runs: usize,
    /// Logical literal segments emitted.
    pub literal_segments: usize,
    /// Run chunks written.
    pub run_chunks: usize,
    /// Literal chunks written.
    pub literal_chunks: usize,
    /// Minimum run length used.
    pub threshold_used: u8,
    /// Space saved, in percent.
    pub compression_efficiency: f64,
    /// Distinct byte values in the input.
    pub unique_byte_values: usize,
    /// Most frequent byte.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_frequent_byte: Option<ByteShare>,
}

impl RleDetails {
    /// Details for `stats` gathered over `original_size` bytes.
    pub fn new(stats: &RleStats, original_size: u64) -> Self {
        Self {
            total_runs: stats.total_runs,
            literal_segments: stats.literal_segments,
            run_chunks: stats.run_chunks,
            literal_chunks: stats.literal_chunks,
            threshold_used: stats.threshold_used,
            compression_efficiency: stats.compression_efficiency,
            unique_byte_values: stats.unique_bytes,
            most_frequent_byte: stats
                .most_common_byte
                .map(|(byte, count)| ByteShare::new(byte, count, original_size)),
        }
    }
}

/// LZ77 encoding details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lz77Details {
    /// Window size used.
    pub window_size: u16,
    /// Lookahead size used.
    pub lookahead_size: u8,
    /// Triplets emitted.
    pub triplets_generated: usize,
    /// Triplets with a back-reference.
    pub matches_found: usize,
    /// Literal-only triplets.
    pub literals: usize,
    /// Mean back-reference length.
    pub average_match_length: f64,
    /// Longest back-reference.
    pub longest_match: usize,
    /// Bytes saved by back-references.
    pub bytes_saved_from_matches: u64,
    /// Saved bytes relative to the input, in percent.
    pub compression_efficiency: f64,
    /// Distinct byte values in the input.
    pub unique_bytes: usize,
    /// Most frequent byte.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_frequent_byte: Option<ByteShare>,
}

impl Lz77Details {
    /// Details for `stats` gathered over `original_size` bytes.
    pub fn new(stats: &Lz77Stats, original_size: u64) -> Self {
        Self {
            window_size: stats.window_size,
            lookahead_size: stats.lookahead_size,
            triplets_generated: stats.triplets_generated,
            matches_found: stats.matches_found,
            literals: stats.literals,
            average_match_length: stats.average_match_length,
            longest_match: stats.longest_match,
            bytes_saved_from_matches: stats.bytes_saved_from_matches,
            compression_efficiency: stats.compression_efficiency,
            unique_bytes: stats.unique_bytes,
            most_frequent_byte: stats
                .most_common_byte
                .map(|(byte, count)| ByteShare::new(byte, count, original_size)),
        }
    }
}

/// Algorithm-specific part of a compression report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "algorithm")]
pub enum CompressionDetails {
    /// Huffman coding.
    #[serde(rename = "huffmanCoding")]
    Huffman {
        /// Encoder details.
        compression_details: HuffmanDetails,
        /// Pre-compression analysis.
        file_analysis: HuffmanAnalysis,
    },
    /// Run-length encoding.
    #[serde(rename = "runLengthEncoding")]
    Rle {
        /// Encoder details.
        #[serde(rename = "compression_details_RLE")]
        compression_details: RleDetails,
        /// Pre-compression analysis.
        file_analysis: RleAnalysis,
    },
    /// LZ77.
    #[serde(rename = "lZ77")]
    Lz77 {
        /// Encoder details.
        #[serde(rename = "compression_details_LZ77")]
        compression_details: Lz77Details,
        /// Pre-compression analysis.
        #[serde(rename = "file_analysis_LZ77")]
        file_analysis: Lz77Analysis,
    },
}

impl CompressionDetails {
    /// Algorithm this variant belongs to.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Huffman { .. } => Algorithm::HuffmanCoding,
            Self::Rle { .. } => Algorithm::RunLengthEncoding,
            Self::Lz77 { .. } => Algorithm::Lz77,
        }
    }
}

/// Result of one compression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionReport {
    /// Name of the input file.
    pub original_filename: String,
    /// Suggested name for the container.
    pub compressed_filename: String,
    /// Input length.
    pub original_size: u64,
    /// Encoded payload length, excluding header and codec parameters.
    pub compressed_size: u64,
    /// Length of the whole container.
    pub container_size: u64,
    /// `original_size / compressed_size`; 1.0 when nothing was encoded.
    pub compression_ratio: f64,
    /// `(1 - compressed_size / original_size) * 100`.
    pub space_saved_percent: f64,
    /// Wall time spent encoding.
    pub processing_time_seconds: f64,
    /// Unix timestamp written into the container.
    pub compression_timestamp: u64,
    /// Algorithm description.
    pub algorithm_info: AlgorithmInfo,
    /// Tag plus algorithm-specific details and analysis.
    #[serde(flatten)]
    pub details: CompressionDetails,
    /// Hex-encoded container, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compressed_file: Option<String>,
    /// MIME type of the container.
    pub content_type: &'static str,
}

impl CompressionReport {
    /// Algorithm that produced the container.
    pub fn algorithm(&self) -> Algorithm {
        self.details.algorithm()
    }
}

/// Sizes seen during decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// Length of the container.
    pub compressed_file_size: u64,
    /// Length recorded in the container header.
    pub original_size: u64,
    /// Length actually produced.
    pub decompressed_size: u64,
    /// Whether the two lengths agree.
    pub size_match: bool,
}

/// Recorded versus produced length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeComparison {
    /// Length recorded in the container header.
    pub original_size: u64,
    /// Length actually produced.
    pub decompressed_size: u64,
    /// Whether they agree.
    #[serde(rename = "match")]
    pub matches: bool,
}

/// Decompression timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// Wall time spent decoding.
    pub decompression_time_seconds: f64,
    /// Output throughput in KB/s; time is floored at one millisecond.
    pub processing_speed: f64,
    /// Size check.
    pub original_vs_decompressed: SizeComparison,
}

/// Timestamps of both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// From the container header, if it could be read.
    pub compression_timestamp: Option<u64>,
    /// When decompression ran.
    pub decompression_timestamp: u64,
}

/// Huffman decoding details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HuffmanDecodeDetails {
    /// Symbols emitted.
    pub characters_decoded: u64,
    /// Distinct symbols in the code table.
    pub unique_characters: usize,
    /// Depth of the rebuilt tree.
    pub tree_depth: usize,
}

/// Bit-level accounting of a Huffman payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BitAnalysis {
    /// Bits in the payload, padding included.
    pub total_bits_in_file: u64,
    /// Bits consumed by symbols.
    pub effective_bits_used: u64,
    /// Trailing padding bits.
    pub padding_bits: u8,
}

impl From<&HuffmanDecodeStats> for HuffmanDecodeDetails {
    fn from(stats: &HuffmanDecodeStats) -> Self {
        Self {
            characters_decoded: stats.characters_decoded,
            unique_characters: stats.unique_characters,
            tree_depth: stats.tree_depth,
        }
    }
}

impl From<&HuffmanDecodeStats> for BitAnalysis {
    fn from(stats: &HuffmanDecodeStats) -> Self {
        Self {
            total_bits_in_file: stats.total_bits_in_file,
            effective_bits_used: stats.effective_bits_used,
            padding_bits: stats.padding_bits,
        }
    }
}

/// RLE decoding details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RleDecodeDetails {
    /// Logical runs replayed.
    pub runs_processed: usize,
    /// Logical literal segments replayed.
    pub literal_segments_processed: usize,
    /// Whether decoding and validation succeeded.
    pub decompression_successful: bool,
    /// `Passed` or `Failed`.
    pub size_verification: &'static str,
}

impl RleDecodeDetails {
    /// Details for `stats`; default counts when decoding failed.
    pub fn new(stats: Option<&RleDecodeStats>, validation: &Validation) -> Self {
        let stats = stats.cloned().unwrap_or_default();
        Self {
            runs_processed: stats.runs_processed,
            literal_segments_processed: stats.literal_segments_processed,
            decompression_successful: validation.success,
            size_verification: validation.integrity_check.as_str(),
        }
    }
}

/// LZ77 decoding details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lz77DecodeDetails {
    /// Triplets replayed.
    pub triplets_processed: usize,
    /// Triplets with a back-reference.
    pub matches_processed: usize,
    /// Literal-only triplets.
    pub literals_processed: usize,
    /// Whether decoding and validation succeeded.
    pub decompression_successful: bool,
    /// `Passed` or `Failed`.
    pub size_verification: &'static str,
    /// Human-readable outcome of the size check.
    pub integrity_check: &'static str,
}

impl Lz77DecodeDetails {
    /// Details for `stats`; default counts when decoding failed.
    pub fn new(stats: Option<&Lz77DecodeStats>, validation: &Validation) -> Self {
        let stats = stats.cloned().unwrap_or_default();
        Self {
            triplets_processed: stats.triplets_processed,
            matches_processed: stats.matches_processed,
            literals_processed: stats.literals_processed,
            decompression_successful: validation.success,
            size_verification: validation.integrity_check.as_str(),
            integrity_check: if validation.success {
                "Original size matches decompressed size"
            } else {
                "Size mismatch detected"
            },
        }
    }
}

/// Algorithm-specific part of a decompression report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "algorithm")]
pub enum DecompressionDetails {
    /// Huffman coding.
    #[serde(rename = "huffmanCoding")]
    Huffman {
        /// Decoder details.
        decompression_details: HuffmanDecodeDetails,
        /// Bit accounting.
        bit_analysis: BitAnalysis,
    },
    /// Run-length encoding.
    #[serde(rename = "runLengthEncoding")]
    Rle {
        /// Decoder details.
        #[serde(rename = "decompression_details_RLE")]
        decompression_details: RleDecodeDetails,
    },
    /// LZ77.
    #[serde(rename = "lZ77")]
    Lz77 {
        /// Decoder details.
        #[serde(rename = "decompression_details_LZ77")]
        decompression_details: Lz77DecodeDetails,
    },
}

impl DecompressionDetails {
    /// Algorithm this variant belongs to.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Huffman { .. } => Algorithm::HuffmanCoding,
            Self::Rle { .. } => Algorithm::RunLengthEncoding,
            Self::Lz77 { .. } => Algorithm::Lz77,
        }
    }
}

/// Result of one decompression. Failures are reported here, not as errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecompressionReport {
    /// Name of the container file.
    pub original_filename: String,
    /// Suggested name for the output.
    pub decompressed_filename: String,
    /// Sizes.
    pub file_info: FileInfo,
    /// Timing.
    pub performance_metrics: PerformanceMetrics,
    /// Integrity outcome.
    pub validation: Validation,
    /// Tag plus algorithm-specific details.
    #[serde(flatten)]
    pub details: DecompressionDetails,
    /// Hex-encoded output, when requested and successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decompressed_file: Option<String>,
    /// MIME type of the output.
    pub content_type: &'static str,
    /// Timestamps.
    pub metadata: Metadata,
}

impl DecompressionReport {
    /// Algorithm the container was decoded with.
    pub fn algorithm(&self) -> Algorithm {
        self.details.algorithm()
    }

    /// Shorthand for `validation.success`.
    pub fn is_success(&self) -> bool {
        self.validation.success
    }
}
