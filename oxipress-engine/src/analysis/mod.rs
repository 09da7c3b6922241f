//! Pre-compression file analysis.
//!
//! Heuristics that predict how each codec will fare before it runs:
//! entropy and symbol skew for Huffman, run statistics for RLE, and a
//! sampled match scan plus pattern mining for LZ77. [`Analyzer::profile`]
//! combines all three and recommends the codec whose payload is smallest on
//! the sample.

mod bytes;
mod patterns;
mod runs;

pub use bytes::{ByteShare, display_byte, display_bytes, most_frequent_byte, top_bytes};
pub use patterns::{MIN_PATTERN_LENGTH, Pattern, common_patterns};
pub use runs::RunDistribution;

use crate::algorithm::Algorithm;
use crate::config::{AnalysisConfig, EngineConfig};
use oxipress_core::error::Result;
use oxipress_core::frequency::FrequencyTable;
use oxipress_core::traits::Codec;
use oxipress_huffman::Huffman;
use oxipress_lz77::{Lz77, Lz77Config, MatchFinder};
use oxipress_rle::{Rle, RleConfig};
use serde::Serialize;

/// Number of bytes listed in `top_5_bytes`.
pub const TOP_BYTES: usize = 5;

/// Entropy above which data is treated as random or already compressed.
const RANDOM_ENTROPY: f64 = 7.5;

/// Huffman-oriented view of a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuffmanAnalysis {
    /// Input length.
    pub file_size: u64,
    /// Distinct byte values.
    pub unique_bytes: usize,
    /// Shannon entropy in bits per byte.
    pub entropy: f64,
    /// Payload size if every byte cost `max(entropy, 1)` bits.
    pub estimated_compressed_size: u64,
    /// `file_size / estimated_compressed_size`.
    pub estimated_compression_ratio: f64,
    /// Most frequent bytes.
    pub top_5_bytes: Vec<ByteShare>,
    /// The single most frequent byte.
    pub most_frequent_byte: Option<ByteShare>,
    /// Verdict.
    pub recommendation: &'static str,
}

/// RLE-oriented view of a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RleAnalysis {
    /// Input length.
    pub file_size: u64,
    /// Distinct byte values.
    pub unique_bytes: usize,
    /// Histogram of run lengths.
    pub run_distribution: RunDistribution,
    /// Bytes inside runs at or above the threshold.
    pub estimated_compressible_bytes: u64,
    /// `estimated_compressible_bytes / file_size`.
    pub estimated_compression_ratio: f64,
    /// Most frequent bytes.
    pub top_5_bytes: Vec<ByteShare>,
    /// The single most frequent byte.
    pub most_frequent_byte: Option<ByteShare>,
    /// Verdict.
    pub recommendation: &'static str,
}

/// LZ77-oriented view of a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lz77Analysis {
    /// Input length.
    pub file_size: u64,
    /// Leading bytes scanned for matches and patterns.
    pub sample_analyzed: usize,
    /// Distinct byte values.
    pub unique_bytes: usize,
    /// Shannon entropy of the whole file, in bits per byte.
    pub entropy: f64,
    /// Sample positions with a match of at least the minimum length.
    pub potential_matches: u64,
    /// `potential_matches / sample_analyzed`.
    pub estimated_match_ratio: f64,
    /// Mean length of those matches.
    pub average_match_length: f64,
    /// Longest of those matches.
    pub longest_match: usize,
    /// Predicted `original / compressed`.
    pub estimated_compression_ratio: f64,
    /// Most frequent bytes.
    pub top_5_bytes: Vec<ByteShare>,
    /// Repeated sequences in the sample.
    pub common_patterns: Vec<Pattern>,
    /// Verdict.
    pub recommendation: &'static str,
}

/// Space each codec's payload saves on the analysis sample, as a fraction of
/// the sample. Negative when the codec expands it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsEstimate {
    /// Huffman coding.
    pub huffman: f64,
    /// Run-length encoding.
    pub rle: f64,
    /// LZ77.
    pub lz77: f64,
}

impl SavingsEstimate {
    /// Encode `sample` with each codec and compare payload sizes.
    pub fn measure(sample: &[u8], rle: RleConfig, lz77: Lz77Config) -> Result<Self> {
        if sample.is_empty() {
            return Ok(Self {
                huffman: 0.0,
                rle: 0.0,
                lz77: 0.0,
            });
        }
        let size = sample.len() as f64;
        let saved = |payload_len: usize| 1.0 - payload_len as f64 / size;
        Ok(Self {
            huffman: saved(Huffman.encode(sample)?.payload_len),
            rle: saved(Rle::new(rle)?.encode(sample)?.payload_len),
            lz77: saved(Lz77::new(lz77)?.encode(sample)?.payload_len),
        })
    }

    /// Algorithm with the largest predicted saving; Huffman, then LZ77, then
    /// RLE on ties.
    pub fn best(&self) -> Algorithm {
        let mut best = (Algorithm::HuffmanCoding, self.huffman);
        for candidate in [(Algorithm::Lz77, self.lz77), (Algorithm::RunLengthEncoding, self.rle)] {
            if candidate.1 > best.1 {
                best = candidate;
            }
        }
        best.0
    }
}

/// Combined analysis of one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileProfile {
    /// Input length.
    pub file_size: u64,
    /// Distinct byte values.
    pub unique_bytes: usize,
    /// Shannon entropy in bits per byte.
    pub entropy: f64,
    /// Huffman view.
    pub huffman: HuffmanAnalysis,
    /// RLE view.
    pub rle: RleAnalysis,
    /// LZ77 view.
    pub lz77: Lz77Analysis,
    /// Predicted savings.
    pub estimated_savings: SavingsEstimate,
    /// Best predicted algorithm; `None` for empty input.
    pub recommended_algorithm: Option<Algorithm>,
}

/// Runs the heuristics with a fixed set of codec parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
    rle: RleConfig,
    lz77: Lz77Config,
}

impl Analyzer {
    /// Create an analyzer from validated parts.
    pub fn new(config: AnalysisConfig, rle: RleConfig, lz77: Lz77Config) -> Result<Self> {
        config.validate()?;
        rle.validate()?;
        lz77.validate()?;
        Ok(Self { config, rle, lz77 })
    }

    /// Create an analyzer matching an engine configuration.
    pub fn from_engine_config(config: &EngineConfig) -> Result<Self> {
        Self::new(config.analysis, config.rle.to_config()?, config.lz77.to_config()?)
    }

    /// Huffman view of `data`.
    pub fn huffman(&self, data: &[u8]) -> HuffmanAnalysis {
        self.huffman_with(data, &FrequencyTable::from_bytes(data))
    }

    /// RLE view of `data`.
    pub fn rle(&self, data: &[u8]) -> RleAnalysis {
        self.rle_with(data, &FrequencyTable::from_bytes(data))
    }

    /// LZ77 view of `data`.
    pub fn lz77(&self, data: &[u8]) -> Lz77Analysis {
        self.lz77_with(data, &FrequencyTable::from_bytes(data))
    }

    /// All three views and a recommendation based on encoding the sample.
    pub fn profile(&self, data: &[u8]) -> Result<FileProfile> {
        let table = FrequencyTable::from_bytes(data);
        let huffman = self.huffman_with(data, &table);
        let rle = self.rle_with(data, &table);
        let lz77 = self.lz77_with(data, &table);

        let sample = &data[..data.len().min(self.config.sample_size)];
        let estimated_savings = SavingsEstimate::measure(sample, self.rle, self.lz77)?;
        let recommended_algorithm = (!data.is_empty()).then(|| estimated_savings.best());
        log::debug!(
            "profile: {} bytes, entropy {:.2}, recommended {:?}",
            data.len(),
            table.entropy(),
            recommended_algorithm
        );

        Ok(FileProfile {
            file_size: data.len() as u64,
            unique_bytes: table.distinct(),
            entropy: table.entropy(),
            huffman,
            rle,
            lz77,
            estimated_savings,
            recommended_algorithm,
        })
    }

    fn huffman_with(&self, data: &[u8], table: &FrequencyTable) -> HuffmanAnalysis {
        let entropy = table.entropy();
        let file_size = data.len() as u64;
        let bits = entropy.max(1.0) * file_size as f64;
        let estimated_compressed_size = (bits / 8.0).ceil() as u64;
        let estimated_compression_ratio = if estimated_compressed_size == 0 {
            1.0
        } else {
            file_size as f64 / estimated_compressed_size as f64
        };

        HuffmanAnalysis {
            file_size,
            unique_bytes: table.distinct(),
            entropy,
            estimated_compressed_size,
            estimated_compression_ratio,
            top_5_bytes: top_bytes(table, TOP_BYTES),
            most_frequent_byte: most_frequent_byte(table),
            recommendation: huffman_recommendation(file_size, entropy),
        }
    }

    fn rle_with(&self, data: &[u8], table: &FrequencyTable) -> RleAnalysis {
        let threshold = usize::from(self.rle.threshold);
        let mut run_distribution = RunDistribution::default();
        let mut compressible = 0u64;
        for (_, length) in oxipress_rle::runs(data) {
            if length >= 2 {
                run_distribution.record(length);
                if length >= threshold {
                    compressible += length as u64;
                }
            }
        }

        let file_size = data.len() as u64;
        let estimated_compression_ratio = if file_size == 0 {
            0.0
        } else {
            compressible as f64 / file_size as f64
        };
        let qualifying = run_distribution.at_least(threshold);

        RleAnalysis {
            file_size,
            unique_bytes: table.distinct(),
            run_distribution,
            estimated_compressible_bytes: compressible,
            estimated_compression_ratio,
            top_5_bytes: top_bytes(table, TOP_BYTES),
            most_frequent_byte: most_frequent_byte(table),
            recommendation: rle_recommendation(qualifying, file_size),
        }
    }

    fn lz77_with(&self, data: &[u8], table: &FrequencyTable) -> Lz77Analysis {
        let sample = &data[..data.len().min(self.config.sample_size)];
        let mut finder = MatchFinder::new(sample, usize::from(self.lz77.window_size));
        let lookahead = usize::from(self.lz77.lookahead_size);

        let mut potential_matches = 0u64;
        let mut total_match_length = 0u64;
        let mut longest_match = 0usize;
        for pos in 0..sample.len() {
            let found = finder
                .longest_match(pos, lookahead)
                .filter(|m| m.length >= self.config.min_match_length);
            if let Some(m) = found {
                potential_matches += 1;
                total_match_length += m.length as u64;
                longest_match = longest_match.max(m.length);
            }
            finder.insert(pos);
        }

        let entropy = table.entropy();
        let estimated_match_ratio = ratio(potential_matches, sample.len() as u64);
        let average_match_length = ratio(total_match_length, potential_matches);

        Lz77Analysis {
            file_size: data.len() as u64,
            sample_analyzed: sample.len(),
            unique_bytes: table.distinct(),
            entropy,
            potential_matches,
            estimated_match_ratio,
            average_match_length,
            longest_match,
            estimated_compression_ratio: estimate_lz77_ratio(
                potential_matches,
                total_match_length,
                sample.len(),
            ),
            top_5_bytes: top_bytes(table, TOP_BYTES),
            common_patterns: common_patterns(
                sample,
                self.config.max_pattern_length,
                self.config.top_patterns,
            ),
            recommendation: lz77_recommendation(estimated_match_ratio, entropy),
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Matched bytes beyond one triplet's worth are saved, and a tenth of the
/// sample is added back as overhead.
fn estimate_lz77_ratio(matches: u64, total_match_length: u64, sample_size: usize) -> f64 {
    if sample_size == 0 {
        return 1.0;
    }
    let saved = if matches > 0 {
        total_match_length.saturating_sub(4) as f64
    } else {
        0.0
    };
    let sample = sample_size as f64;
    sample / (sample - saved + sample * 0.1).max(1.0)
}

fn huffman_recommendation(file_size: u64, entropy: f64) -> &'static str {
    if file_size == 0 {
        "Huffman coding not applicable - file is empty"
    } else if entropy > RANDOM_ENTROPY {
        "Huffman coding not recommended - byte distribution is nearly uniform"
    } else if entropy > 6.0 {
        "Huffman coding may provide modest compression"
    } else if entropy > 4.0 {
        "Huffman coding should provide good compression - non-uniform byte distribution"
    } else {
        "Huffman coding highly recommended - highly skewed byte distribution"
    }
}

fn rle_recommendation(qualifying_runs: u64, file_size: u64) -> &'static str {
    let size = file_size as f64;
    let runs = qualifying_runs as f64;
    if qualifying_runs == 0 {
        "RLE not recommended - no compressible runs found"
    } else if runs < size * 0.1 {
        "RLE may increase file size - few compressible runs"
    } else if runs < size * 0.3 {
        "RLE may provide modest compression"
    } else {
        "RLE should provide good compression - many repetitive sequences found"
    }
}

fn lz77_recommendation(match_ratio: f64, entropy: f64) -> &'static str {
    if entropy > RANDOM_ENTROPY {
        "LZ77 not recommended - data appears random/already compressed"
    } else if match_ratio < 0.05 {
        "LZ77 may not be effective - few repeated patterns found"
    } else if match_ratio < 0.15 {
        "LZ77 may provide modest compression - some patterns detected"
    } else if match_ratio < 0.30 {
        "LZ77 should provide good compression - many repeated patterns"
    } else {
        "LZ77 highly recommended - excellent pattern repetition detected"
    }
}
