//! Detect command implementation.

use oxipress_core::container::{ContainerHeader, HEADER_SIZE};
use oxipress_engine::Algorithm;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn cmd_detect(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut header = Vec::with_capacity(HEADER_SIZE);
    File::open(file)?
        .take(HEADER_SIZE as u64)
        .read_to_end(&mut header)?;

    let algorithm = Algorithm::detect(&header)?;
    let info = algorithm.info();

    println!("File: {}", file.display());
    println!("Algorithm: {}", info.name);
    println!("Extension: .{}", algorithm.extension());
    println!("Magic bytes: {:02X?}", algorithm.magic());
    println!("Best for: {}", info.best_for);

    match ContainerHeader::parse(&header) {
        Ok(header) => {
            println!("Original size: {} bytes", header.original_size);
            println!("CRC-32: {:08X}", header.crc32);
            println!("Compressed at: {} (unix seconds)", header.timestamp);
        }
        Err(e) => println!("Header: unreadable ({})", e),
    }

    Ok(())
}
