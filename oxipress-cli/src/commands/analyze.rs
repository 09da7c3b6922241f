//! Analyze command implementation.

use crate::utils::{format_ratio, format_size, load_config, print_byte_shares, print_json, read_input};
use oxipress_engine::Engine;
use std::path::Path;

pub fn cmd_analyze(input: &Path, config: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::new(load_config(config)?)?;
    let (_, data) = read_input(input)?;
    let profile = engine.analyze(&data)?;

    if json {
        return print_json(&profile);
    }

    println!("File: {}", input.display());
    println!("Size: {}", format_size(profile.file_size));
    println!("Unique bytes: {}", profile.unique_bytes);
    println!("Entropy: {:.4} bits/byte", profile.entropy);
    println!();

    print_byte_shares(&profile.huffman.top_5_bytes);
    println!();

    println!("Huffman: {}", profile.huffman.recommendation);
    println!(
        "  estimated ratio {}, measured savings {:.1}%",
        format_ratio(profile.huffman.estimated_compression_ratio),
        profile.estimated_savings.huffman * 100.0
    );
    println!("RLE: {}", profile.rle.recommendation);
    println!(
        "  {} bytes in runs, measured savings {:.1}%",
        profile.rle.estimated_compressible_bytes,
        profile.estimated_savings.rle * 100.0
    );
    println!("LZ77: {}", profile.lz77.recommendation);
    println!(
        "  {} matches in {} sampled bytes, measured savings {:.1}%",
        profile.lz77.potential_matches,
        profile.lz77.sample_analyzed,
        profile.estimated_savings.lz77 * 100.0
    );

    if !profile.lz77.common_patterns.is_empty() {
        println!();
        println!("Common patterns:");
        for pattern in &profile.lz77.common_patterns {
            println!("  {:?} x{}", pattern.pattern, pattern.occurrences);
        }
    }

    println!();
    match profile.recommended_algorithm {
        Some(algorithm) => println!("Recommended: {}", algorithm.name()),
        None => println!("Recommended: none (empty file)"),
    }

    Ok(())
}
