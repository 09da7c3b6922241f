//! Result envelopes: a report together with the bytes it describes.

use crate::algorithm::Algorithm;
use crate::report::{
    CONTENT_TYPE, CompressionDetails, CompressionReport, DecompressionDetails,
    DecompressionReport, FileInfo, Metadata, PerformanceMetrics, SizeComparison,
};
use crate::validate::Validation;
use oxipress_core::container::{ContainerHeader, unix_timestamp};
use std::time::Duration;

/// Shortest time used when computing throughput.
const MIN_SECONDS: f64 = 0.001;

/// A compression report and the container it describes.
#[derive(Debug, Clone)]
pub struct Compressed {
    /// Report.
    pub report: CompressionReport,
    /// Complete container.
    pub container: Vec<u8>,
}

/// A decompression report and the recovered bytes (empty on failure).
#[derive(Debug, Clone)]
pub struct Decompressed {
    /// Report.
    pub report: DecompressionReport,
    /// Recovered bytes.
    pub data: Vec<u8>,
}

/// `<name>.<ext>` for the algorithm's extension.
pub fn compressed_filename(original: &str, algorithm: Algorithm) -> String {
    format!("{}.{}", original, algorithm.extension())
}

/// Strip the algorithm's extension, or append `_decompressed` when absent.
pub fn decompressed_filename(container_name: &str, algorithm: Algorithm) -> String {
    let suffix = format!(".{}", algorithm.extension());
    match container_name.strip_suffix(&suffix) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}_decompressed", container_name),
    }
}

/// `original / compressed`, or 1.0 when nothing was encoded.
pub fn compression_ratio(original: u64, compressed: u64) -> f64 {
    if compressed == 0 {
        1.0
    } else {
        original as f64 / compressed as f64
    }
}

/// Percentage of the input saved; negative when the output is larger.
pub fn space_saved_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        0.0
    } else {
        (1.0 - compressed as f64 / original as f64) * 100.0
    }
}

/// Throughput in KB/s, with the elapsed time floored at one millisecond.
pub fn processing_speed(bytes: u64, seconds: f64) -> f64 {
    bytes as f64 / seconds.max(MIN_SECONDS) / 1024.0
}

/// Everything a compression report needs from the codec run.
pub(crate) struct CompressionRun {
    pub container: Vec<u8>,
    pub payload_len: usize,
    pub elapsed: Duration,
    pub details: CompressionDetails,
}

pub(crate) fn compressed(filename: &str, original: &[u8], run: CompressionRun, embed: bool) -> Compressed {
    let algorithm = run.details.algorithm();
    let original_size = original.len() as u64;
    let compressed_size = run.payload_len as u64;
    let compression_timestamp = ContainerHeader::parse(&run.container)
        .map(|h| h.timestamp)
        .unwrap_or_else(|_| unix_timestamp());

    let report = CompressionReport {
        original_filename: filename.to_string(),
        compressed_filename: compressed_filename(filename, algorithm),
        original_size,
        compressed_size,
        container_size: run.container.len() as u64,
        compression_ratio: compression_ratio(original_size, compressed_size),
        space_saved_percent: space_saved_percent(original_size, compressed_size),
        processing_time_seconds: run.elapsed.as_secs_f64(),
        compression_timestamp,
        algorithm_info: algorithm.info(),
        details: run.details,
        compressed_file: embed.then(|| hex::encode(&run.container)),
        content_type: CONTENT_TYPE,
    };
    Compressed {
        report,
        container: run.container,
    }
}

/// Everything a decompression report needs from the codec run.
pub(crate) struct DecompressionRun {
    pub header: Option<ContainerHeader>,
    pub data: Vec<u8>,
    pub elapsed: Duration,
    pub validation: Validation,
    pub details: DecompressionDetails,
}

pub(crate) fn decompressed(filename: &str, container: &[u8], run: DecompressionRun, embed: bool) -> Decompressed {
    let algorithm = run.details.algorithm();
    let original_size = run.header.map_or(0, |h| h.original_size);
    let decompressed_size = run.data.len() as u64;
    let size_match = run.validation.success && original_size == decompressed_size;
    let seconds = run.elapsed.as_secs_f64();

    let report = DecompressionReport {
        original_filename: filename.to_string(),
        decompressed_filename: decompressed_filename(filename, algorithm),
        file_info: FileInfo {
            compressed_file_size: container.len() as u64,
            original_size,
            decompressed_size,
            size_match,
        },
        performance_metrics: PerformanceMetrics {
            decompression_time_seconds: seconds,
            processing_speed: processing_speed(decompressed_size, seconds),
            original_vs_decompressed: SizeComparison {
                original_size,
                decompressed_size,
                matches: size_match,
            },
        },
        decompressed_file: (embed && run.validation.success).then(|| hex::encode(&run.data)),
        validation: run.validation,
        details: run.details,
        content_type: CONTENT_TYPE,
        metadata: Metadata {
            compression_timestamp: run.header.map(|h| h.timestamp),
            decompression_timestamp: unix_timestamp(),
        },
    };
    Decompressed {
        report,
        data: run.data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filenames() {
        assert_eq!(
            compressed_filename("notes.txt", Algorithm::HuffmanCoding),
            "notes.txt.huff"
        );
        assert_eq!(
            decompressed_filename("notes.txt.lz77", Algorithm::Lz77),
            "notes.txt"
        );
        assert_eq!(
            decompressed_filename("notes.bin", Algorithm::RunLengthEncoding),
            "notes.bin_decompressed"
        );
        assert_eq!(
            decompressed_filename(".rle", Algorithm::RunLengthEncoding),
            ".rle_decompressed"
        );
    }

    #[test]
    fn test_ratios() {
        assert_eq!(compression_ratio(100, 25), 4.0);
        assert_eq!(compression_ratio(0, 0), 1.0);
        assert_eq!(space_saved_percent(100, 25), 75.0);
        assert_eq!(space_saved_percent(100, 150), -50.0);
        assert_eq!(space_saved_percent(0, 0), 0.0);
    }

    #[test]
    fn test_processing_speed_floor() {
        assert!((processing_speed(1024, 0.0) - 1000.0).abs() < 1e-6);
        assert_eq!(processing_speed(2048, 1.0), 2.0);
    }
}
