//! Byte display and frequency shares.

use oxipress_core::frequency::FrequencyTable;
use serde::Serialize;

/// Printable ASCII as itself, anything else as `\xNN`.
pub fn display_byte(byte: u8) -> String {
    if (32..=126).contains(&byte) {
        char::from(byte).to_string()
    } else {
        format!("\\x{:02x}", byte)
    }
}

/// [`display_byte`] applied to each byte in turn.
pub fn display_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| display_byte(b)).collect()
}

/// A byte value with its count and share of the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ByteShare {
    /// Displayed byte value.
    pub value: String,
    /// Occurrences.
    pub count: u64,
    /// Share of all bytes, in percent.
    pub percentage: f64,
}

impl ByteShare {
    /// Describe `count` occurrences of `byte` out of `total`.
    pub fn new(byte: u8, count: u64, total: u64) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        Self {
            value: display_byte(byte),
            count,
            percentage,
        }
    }
}

/// The `n` most frequent bytes.
pub fn top_bytes(table: &FrequencyTable, n: usize) -> Vec<ByteShare> {
    table
        .top(n)
        .into_iter()
        .map(|(byte, count)| ByteShare::new(byte, count, table.total()))
        .collect()
}

/// The most frequent byte, if any.
pub fn most_frequent_byte(table: &FrequencyTable) -> Option<ByteShare> {
    table
        .most_common()
        .map(|(byte, count)| ByteShare::new(byte, count, table.total()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(display_byte(b'a'), "a");
        assert_eq!(display_byte(b' '), " ");
        assert_eq!(display_byte(b'~'), "~");
        assert_eq!(display_byte(b'\n'), "\\x0a");
        assert_eq!(display_byte(0x7f), "\\x7f");
        assert_eq!(display_bytes(b"ab\x00"), "ab\\x00");
    }

    #[test]
    fn test_top_bytes() {
        let table = FrequencyTable::from_bytes(b"aaabbc");
        let top = top_bytes(&table, 5);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].value, "a");
        assert_eq!(top[0].count, 3);
        assert!((top[0].percentage - 50.0).abs() < 1e-9);
        assert_eq!(top[2].value, "c");
    }

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::new();
        assert!(top_bytes(&table, 5).is_empty());
        assert_eq!(most_frequent_byte(&table), None);
    }
}
