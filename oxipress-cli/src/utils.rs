//! Utility functions for the CLI.

use oxipress_engine::EngineConfig;
use oxipress_engine::analysis::ByteShare;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a whole file, returning its display name and contents.
pub fn read_input(path: &Path) -> std::io::Result<(String, Vec<u8>)> {
    let data = fs::read(path)?;
    Ok((file_name(path), data))
}

/// Final path component as a string, or the whole path if there is none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Place `name` next to `input` unless an explicit output was given.
pub fn output_path(input: &Path, explicit: Option<&Path>, name: &str) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => input.with_file_name(name),
    }
}

/// Load a configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> oxipress_engine::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(path),
        None => Ok(EngineConfig::default()),
    }
}

/// Pretty-print any report as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a ratio as `N.NN:1`.
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.2}:1", ratio)
}

/// Format a byte count with a binary unit.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Print a byte frequency table.
pub fn print_byte_shares(shares: &[ByteShare]) {
    println!("{:>8} {:>10} {:>8}", "Byte", "Count", "Share");
    println!("{}", "-".repeat(28));
    for share in shares {
        println!(
            "{:>8} {:>10} {:>7.2}%",
            share.value, share.count, share.percentage
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(4.0), "4.00:1");
        assert_eq!(format_ratio(0.5), "0.50:1");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_output_path() {
        let input = Path::new("/tmp/data/notes.txt");
        assert_eq!(
            output_path(input, None, "notes.txt.huff"),
            PathBuf::from("/tmp/data/notes.txt.huff")
        );
        assert_eq!(
            output_path(input, Some(Path::new("out.bin")), "ignored"),
            PathBuf::from("out.bin")
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("/a/b/c.rle")), "c.rle");
    }
}
