//! Request dispatch: algorithm tag and bytes in, envelope out.

use crate::algorithm::Algorithm;
use crate::analysis::{Analyzer, FileProfile};
use crate::config::EngineConfig;
use crate::envelope::{self, Compressed, CompressionRun, Decompressed, DecompressionRun};
use crate::report::{
    BitAnalysis, CompressionDetails, DecompressionDetails, HuffmanDecodeDetails, HuffmanDetails,
    Lz77DecodeDetails, Lz77Details, RleDecodeDetails, RleDetails,
};
use crate::validate::{Validation, validate, verify_roundtrip};
use oxipress_core::container::ContainerHeader;
use oxipress_core::error::Result;
use oxipress_core::traits::{Codec, Decoded};
use oxipress_huffman::Huffman;
use oxipress_lz77::{Lz77, Lz77Config};
use oxipress_rle::{Rle, RleConfig};
use std::time::{Duration, Instant};

/// Compression engine with a fixed configuration.
///
/// Every call is independent; an `Engine` can be shared across threads.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    rle: RleConfig,
    lz77: Lz77Config,
    analyzer: Analyzer,
}

impl Engine {
    /// Create an engine, validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rle: config.rle.to_config()?,
            lz77: config.lz77.to_config()?,
            analyzer: Analyzer::from_engine_config(&config)?,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyzer configured like this engine.
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Profile `data` for every algorithm.
    pub fn analyze(&self, data: &[u8]) -> Result<FileProfile> {
        self.analyzer.profile(data)
    }

    /// Compress `data` and describe the result.
    ///
    /// `filename` only names things in the report.
    pub fn compress(&self, algorithm: Algorithm, filename: &str, data: &[u8]) -> Result<Compressed> {
        let start = Instant::now();
        let run = match algorithm {
            Algorithm::HuffmanCoding => {
                let encoded = Huffman.encode(data)?;
                let elapsed = start.elapsed();
                CompressionRun {
                    details: CompressionDetails::Huffman {
                        compression_details: HuffmanDetails::from(&encoded.stats),
                        file_analysis: self.analyzer.huffman(data),
                    },
                    container: encoded.container,
                    payload_len: encoded.payload_len,
                    elapsed,
                }
            }
            Algorithm::RunLengthEncoding => {
                let encoded = Rle::new(self.rle)?.encode(data)?;
                let elapsed = start.elapsed();
                CompressionRun {
                    details: CompressionDetails::Rle {
                        compression_details: RleDetails::new(&encoded.stats, data.len() as u64),
                        file_analysis: self.analyzer.rle(data),
                    },
                    container: encoded.container,
                    payload_len: encoded.payload_len,
                    elapsed,
                }
            }
            Algorithm::Lz77 => {
                let encoded = Lz77::new(self.lz77)?.encode(data)?;
                let elapsed = start.elapsed();
                CompressionRun {
                    details: CompressionDetails::Lz77 {
                        compression_details: Lz77Details::new(&encoded.stats, data.len() as u64),
                        file_analysis: self.analyzer.lz77(data),
                    },
                    container: encoded.container,
                    payload_len: encoded.payload_len,
                    elapsed,
                }
            }
        };

        log::debug!(
            "{}: compressed {} ({} bytes) to {} payload bytes in {:?}",
            algorithm,
            filename,
            data.len(),
            run.payload_len,
            run.elapsed
        );
        Ok(envelope::compressed(
            filename,
            data,
            run,
            self.config.embed_payload,
        ))
    }

    /// Compress using a wire tag such as `"lZ77"`.
    pub fn compress_tagged(&self, tag: &str, filename: &str, data: &[u8]) -> Result<Compressed> {
        self.compress(tag.parse()?, filename, data)
    }

    /// Decompress `container` and describe the result.
    ///
    /// Never fails: malformed input yields a report with
    /// `validation.success == false` and empty data.
    pub fn decompress(&self, algorithm: Algorithm, filename: &str, container: &[u8]) -> Decompressed {
        let run = match algorithm {
            Algorithm::HuffmanCoding => {
                let (outcome, elapsed) = timed_decode(&Huffman, container);
                let (header, data, validation, stats) = settle(outcome, container);
                let stats = stats.unwrap_or_default();
                DecompressionRun {
                    header,
                    data,
                    elapsed,
                    validation,
                    details: DecompressionDetails::Huffman {
                        decompression_details: HuffmanDecodeDetails::from(&stats),
                        bit_analysis: BitAnalysis::from(&stats),
                    },
                }
            }
            Algorithm::RunLengthEncoding => {
                let (outcome, elapsed) = timed_decode(&Rle::default(), container);
                let (header, data, validation, stats) = settle(outcome, container);
                DecompressionRun {
                    details: DecompressionDetails::Rle {
                        decompression_details: RleDecodeDetails::new(stats.as_ref(), &validation),
                    },
                    header,
                    data,
                    elapsed,
                    validation,
                }
            }
            Algorithm::Lz77 => {
                let (outcome, elapsed) = timed_decode(&Lz77::default(), container);
                let (header, data, validation, stats) = settle(outcome, container);
                DecompressionRun {
                    details: DecompressionDetails::Lz77 {
                        decompression_details: Lz77DecodeDetails::new(stats.as_ref(), &validation),
                    },
                    header,
                    data,
                    elapsed,
                    validation,
                }
            }
        };

        match &run.validation.error_message {
            Some(message) => log::warn!("{}: decompression of {} failed: {}", algorithm, filename, message),
            None => log::debug!(
                "{}: decompressed {} to {} bytes in {:?}",
                algorithm,
                filename,
                run.data.len(),
                run.elapsed
            ),
        }
        envelope::decompressed(filename, container, run, self.config.embed_payload)
    }

    /// Decompress using a wire tag; only an unknown tag is an error.
    pub fn decompress_tagged(&self, tag: &str, filename: &str, container: &[u8]) -> Result<Decompressed> {
        Ok(self.decompress(tag.parse()?, filename, container))
    }

    /// Compress then decompress `data`, comparing the bytes exactly.
    pub fn verify(&self, algorithm: Algorithm, data: &[u8]) -> Result<Validation> {
        let compressed = self.compress(algorithm, "roundtrip", data)?;
        let decompressed = self.decompress(algorithm, "roundtrip", &compressed.container);
        if !decompressed.report.validation.success {
            return Ok(decompressed.report.validation);
        }
        Ok(verify_roundtrip(data, &decompressed.data))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            rle: RleConfig::DEFAULT,
            lz77: Lz77Config::DEFAULT,
            analyzer: Analyzer::default(),
        }
    }
}

fn timed_decode<C: Codec>(codec: &C, container: &[u8]) -> (Result<Decoded<C::DecodeStats>>, Duration) {
    let start = Instant::now();
    let outcome = codec.decode(container);
    (outcome, start.elapsed())
}

/// Split a decode outcome into the parts every report needs.
fn settle<S>(
    outcome: Result<Decoded<S>>,
    container: &[u8],
) -> (Option<ContainerHeader>, Vec<u8>, Validation, Option<S>) {
    match outcome {
        Ok(decoded) => {
            let validation = validate(&decoded.header, &decoded.data);
            (Some(decoded.header), decoded.data, validation, Some(decoded.stats))
        }
        Err(e) => (
            ContainerHeader::parse(container).ok(),
            Vec::new(),
            Validation::from_error(&e),
            None,
        ),
    }
}
