//! # OxiPress Engine
//!
//! Ties the Huffman, RLE and LZ77 codecs to file analysis and structured
//! reports.
//!
//! - [`algorithm`]: wire tags, descriptions and container detection
//! - [`analysis`]: entropy, run histograms, match sampling, pattern mining
//! - [`report`]: serializable compression and decompression reports
//! - [`validate`]: size, checksum and byte-exact integrity checks
//! - [`engine`]: the dispatcher that runs a codec and assembles a report
//!
//! ## Example
//!
//! ```rust
//! use oxipress_engine::{Algorithm, Engine};
//!
//! let engine = Engine::default();
//! let compressed = engine
//!     .compress(Algorithm::RunLengthEncoding, "pixels.bin", &[0u8; 1000])
//!     .unwrap();
//! assert!(compressed.report.compression_ratio > 1.0);
//!
//! let decompressed = engine.decompress(
//!     Algorithm::RunLengthEncoding,
//!     &compressed.report.compressed_filename,
//!     &compressed.container,
//! );
//! assert!(decompressed.report.validation.success);
//! assert_eq!(decompressed.data, vec![0u8; 1000]);
//!
//! let json = serde_json::to_value(&compressed.report).unwrap();
//! assert_eq!(json["algorithm"], "runLengthEncoding");
//! assert_eq!(json["compression_details_RLE"]["total_runs"], 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod algorithm;
pub mod analysis;
pub mod config;
pub mod engine;
pub mod envelope;
pub mod report;
pub mod validate;

pub use algorithm::{Algorithm, AlgorithmInfo};
pub use analysis::{Analyzer, FileProfile};
pub use config::EngineConfig;
pub use engine::Engine;
pub use envelope::{Compressed, Decompressed};
pub use report::{CompressionReport, DecompressionReport};
pub use validate::{IntegrityCheck, Validation, verify_roundtrip};

pub use oxipress_core::error::{OxiPressError, Result};
