//! Compress command implementation.

use crate::utils::{format_ratio, format_size, load_config, output_path, print_json, read_input};
use oxipress_engine::{Algorithm, Engine, EngineConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Flags accepted by `oxipress compress`.
pub struct CompressOptions {
    pub algorithm: Algorithm,
    pub output: Option<PathBuf>,
    pub threshold: Option<u8>,
    pub window: Option<u16>,
    pub lookahead: Option<u8>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub embed: bool,
}

impl CompressOptions {
    /// Configuration file values overridden by any explicit flags.
    fn engine_config(&self) -> oxipress_engine::Result<EngineConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(threshold) = self.threshold {
            config.rle.threshold = threshold;
        }
        if let Some(window) = self.window {
            config.lz77.window_size = window;
        }
        if let Some(lookahead) = self.lookahead {
            config.lz77.lookahead_size = lookahead;
        }
        config.embed_payload |= self.embed;
        Ok(config)
    }
}

pub fn cmd_compress(input: &Path, options: &CompressOptions) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::new(options.engine_config()?)?;
    let (name, data) = read_input(input)?;

    let compressed = engine.compress(options.algorithm, &name, &data)?;
    let report = &compressed.report;
    let output = output_path(input, options.output.as_deref(), &report.compressed_filename);
    fs::write(&output, &compressed.container)?;
    log::info!("wrote {} bytes to {}", compressed.container.len(), output.display());

    if options.json {
        return print_json(report);
    }

    println!("Algorithm: {}", report.algorithm_info.name);
    println!("Input: {} ({})", input.display(), format_size(report.original_size));
    println!(
        "Output: {} ({} payload, {} on disk)",
        output.display(),
        format_size(report.compressed_size),
        format_size(report.container_size)
    );
    println!("Ratio: {}", format_ratio(report.compression_ratio));
    println!("Space saved: {:.2}%", report.space_saved_percent);
    println!("Time: {:.4}s", report.processing_time_seconds);

    Ok(())
}
