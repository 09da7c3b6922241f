//! Decompress command implementation.

use crate::utils::{format_size, output_path, print_json, read_input};
use oxipress_engine::{Algorithm, Engine};
use std::fs;
use std::path::Path;

pub fn cmd_decompress(
    input: &Path,
    algorithm: Option<Algorithm>,
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (name, container) = read_input(input)?;
    let algorithm = match algorithm {
        Some(algorithm) => algorithm,
        None => Algorithm::detect(&container)?,
    };

    let decompressed = Engine::default().decompress(algorithm, &name, &container);
    let report = &decompressed.report;

    if json {
        print_json(report)?;
    }

    if !report.validation.success {
        let message = report
            .validation
            .error_message
            .clone()
            .unwrap_or_else(|| "decompression failed".to_string());
        return Err(message.into());
    }

    let output = output_path(input, output, &report.decompressed_filename);
    fs::write(&output, &decompressed.data)?;
    log::info!("wrote {} bytes to {}", decompressed.data.len(), output.display());

    if !json {
        println!("Algorithm: {}", algorithm.name());
        println!("Input: {} ({})", input.display(), format_size(report.file_info.compressed_file_size));
        println!("Output: {} ({})", output.display(), format_size(report.file_info.decompressed_size));
        println!("Integrity: {}", report.validation.integrity_check.as_str());
        println!(
            "Time: {:.4}s ({:.1} KB/s)",
            report.performance_metrics.decompression_time_seconds,
            report.performance_metrics.processing_speed
        );
    }

    Ok(())
}
