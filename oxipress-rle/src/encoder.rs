//! RLE encoder.

use crate::config::RleConfig;
use crate::runs::{Segment, segment};
use crate::{FLAG_LITERAL, FLAG_RUN};
use oxipress_core::container::ContainerHeader;
use oxipress_core::error::Result;
use oxipress_core::frequency::FrequencyTable;

/// Statistics gathered while encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RleStats {
    /// Logical runs (a run split across chunks counts once).
    pub total_runs: usize,
    /// Logical literal segments.
    pub literal_segments: usize,
    /// Run chunks written.
    pub run_chunks: usize,
    /// Literal chunks written.
    pub literal_chunks: usize,
    /// Input bytes covered by runs.
    pub run_bytes: u64,
    /// Run bytes minus the three bytes each run chunk costs.
    pub run_bytes_saved: i64,
    /// Threshold in effect.
    pub threshold_used: u8,
    /// Distinct byte values in the input.
    pub unique_bytes: usize,
    /// Most frequent byte and its count.
    pub most_common_byte: Option<(u8, u64)>,
    /// Space saved by the payload, in percent of the input.
    pub compression_efficiency: f64,
}

/// Encodes byte buffers into RLE containers.
#[derive(Debug, Clone)]
pub struct RleEncoder {
    config: RleConfig,
}

impl RleEncoder {
    /// Create an encoder with a validated configuration.
    pub fn new(config: RleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> RleConfig {
        self.config
    }

    /// Encode `input` to chunks only (no container).
    pub fn encode_payload(&self, input: &[u8]) -> (Vec<u8>, RleStats) {
        let cap = usize::from(self.config.max_chunk);
        let mut out = Vec::with_capacity(input.len() / 2 + 8);
        let mut stats = RleStats {
            threshold_used: self.config.threshold,
            ..RleStats::default()
        };

        for seg in segment(input, self.config.threshold) {
            match seg {
                Segment::Run { value, length } => {
                    stats.total_runs += 1;
                    stats.run_bytes += length as u64;
                    let mut remaining = length;
                    while remaining > 0 {
                        let take = remaining.min(cap);
                        out.extend_from_slice(&[FLAG_RUN, take as u8, value]);
                        stats.run_chunks += 1;
                        remaining -= take;
                    }
                }
                Segment::Literal(bytes) => {
                    stats.literal_segments += 1;
                    for chunk in bytes.chunks(cap) {
                        out.push(FLAG_LITERAL);
                        out.push(chunk.len() as u8);
                        out.extend_from_slice(chunk);
                        stats.literal_chunks += 1;
                    }
                }
            }
        }

        let table = FrequencyTable::from_bytes(input);
        stats.unique_bytes = table.distinct();
        stats.most_common_byte = table.most_common();
        stats.run_bytes_saved = stats.run_bytes as i64 - 3 * stats.run_chunks as i64;
        if !input.is_empty() {
            stats.compression_efficiency =
                (input.len() as f64 - out.len() as f64) / input.len() as f64 * 100.0;
        }
        (out, stats)
    }

    /// Compress `input` into a complete container.
    pub fn encode(&self, magic: [u8; 4], input: &[u8]) -> (Vec<u8>, usize, RleStats) {
        let (payload, stats) = self.encode_payload(input);
        let mut out = Vec::with_capacity(payload.len() + 32);
        ContainerHeader::describe(magic, input).write_to(&mut out);
        out.push(self.config.threshold);
        out.push(self.config.max_chunk);
        out.extend_from_slice(&payload);

        log::debug!(
            "rle: {} bytes -> {} payload bytes, {} runs, {} literal segments",
            input.len(),
            payload.len(),
            stats.total_runs,
            stats.literal_segments
        );
        (out, payload.len(), stats)
    }
}

impl Default for RleEncoder {
    fn default() -> Self {
        Self {
            config: RleConfig::DEFAULT,
        }
    }
}
