//! Huffman encoder.

use crate::codes::{CodeTable, HuffmanCode};
use crate::tree::HuffmanTree;
use oxipress_core::bitstream::{BitBuffer, BitWriter};
use oxipress_core::container::{ContainerHeader, write_varint};
use oxipress_core::error::{OxiPressError, Result};
use oxipress_core::frequency::FrequencyTable;

/// Number of code samples kept in [`HuffmanStats::sample_codes`].
pub const SAMPLE_CODES: usize = 10;

/// Statistics gathered while encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HuffmanStats {
    /// Number of distinct bytes that received a code.
    pub total_symbols: usize,
    /// Unweighted mean code length over distinct bytes.
    pub average_code_length: f64,
    /// Shortest code length.
    pub min_code_length: u8,
    /// Longest code length.
    pub max_code_length: u8,
    /// Mean bits spent per input byte.
    pub weighted_bits_per_symbol: f64,
    /// Depth of the tree.
    pub tree_depth: usize,
    /// Data bits in the payload.
    pub payload_bits: u64,
    /// Zero bits appended to fill the last byte.
    pub padding_bits: u8,
    /// The first few codes in ascending byte order.
    pub sample_codes: Vec<(u8, String)>,
}

/// Encodes byte buffers into Huffman containers.
#[derive(Debug, Default)]
pub struct HuffmanEncoder {
    tree: HuffmanTree,
    codes: Option<CodeTable>,
}

impl HuffmanEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree built by the last call to [`HuffmanEncoder::encode`].
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Code table built by the last call to [`HuffmanEncoder::encode`].
    pub fn codes(&self) -> Option<&CodeTable> {
        self.codes.as_ref()
    }

    /// Compress `input` into a complete container.
    ///
    /// Returns the container, the payload length and the statistics.
    pub fn encode(
        &mut self,
        magic: [u8; 4],
        input: &[u8],
    ) -> Result<(Vec<u8>, usize, HuffmanStats)> {
        let table = count(input);
        self.tree = HuffmanTree::build(&table);
        let codes = CodeTable::from_tree(&self.tree);

        let bits = encode_bits(input, &codes)?;
        let stats = collect_stats(&table, &codes, &self.tree, &bits);

        let mut out = Vec::with_capacity(64 + table.distinct() * 3 + bits.bytes.len());
        ContainerHeader::describe(magic, input).write_to(&mut out);
        out.push(bits.padding_bits);
        write_varint(&mut out, table.distinct() as u64);
        for (byte, weight) in table.iter() {
            out.push(byte);
            write_varint(&mut out, weight);
        }
        let payload_len = bits.bytes.len();
        out.extend_from_slice(&bits.bytes);

        log::debug!(
            "huffman: {} bytes -> {} payload bytes, {} symbols, depth {}",
            input.len(),
            payload_len,
            stats.total_symbols,
            stats.tree_depth
        );

        self.codes = Some(codes);
        Ok((out, payload_len, stats))
    }
}

#[cfg(feature = "parallel")]
fn count(input: &[u8]) -> FrequencyTable {
    FrequencyTable::from_bytes_parallel(input)
}

#[cfg(not(feature = "parallel"))]
fn count(input: &[u8]) -> FrequencyTable {
    FrequencyTable::from_bytes(input)
}

/// Emit the code of every byte of `input`, most significant bit first, and
/// pad the final byte with zeros.
pub fn encode_bits(input: &[u8], codes: &CodeTable) -> Result<BitBuffer> {
    let mut writer = BitWriter::with_capacity(input.len() / 2 + 1);
    for (pos, &byte) in input.iter().enumerate() {
        let code = codes.get(byte).ok_or_else(|| {
            OxiPressError::invalid_input(format!(
                "byte {:#04x} at offset {} has no code",
                byte, pos
            ))
        })?;
        write_code(&mut writer, code);
    }
    Ok(writer.finish())
}

#[inline]
fn write_code(writer: &mut BitWriter, code: HuffmanCode) {
    if code.len > 64 {
        writer.write_bits((code.bits >> 64) as u64, code.len - 64);
        writer.write_bits(code.bits as u64, 64);
    } else {
        writer.write_bits(code.bits as u64, code.len);
    }
}

fn collect_stats(
    table: &FrequencyTable,
    codes: &CodeTable,
    tree: &HuffmanTree,
    bits: &BitBuffer,
) -> HuffmanStats {
    let (min_code_length, max_code_length) = codes.length_range().unwrap_or((0, 0));
    let weighted_bits_per_symbol = if table.is_empty() {
        0.0
    } else {
        bits.data_bits() as f64 / table.total() as f64
    };

    HuffmanStats {
        total_symbols: codes.len(),
        average_code_length: codes.average_length(),
        min_code_length,
        max_code_length,
        weighted_bits_per_symbol,
        tree_depth: tree.depth(),
        payload_bits: bits.data_bits(),
        padding_bits: bits.padding_bits,
        sample_codes: codes
            .iter()
            .take(SAMPLE_CODES)
            .map(|(b, c)| (b, c.to_bit_string()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_bits_abcd() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"abcd"));
        let codes = CodeTable::from_tree(&tree);
        let bits = encode_bits(b"abcd", &codes).unwrap();
        // 00 01 10 11
        assert_eq!(bits.bytes, vec![0b0001_1011]);
        assert_eq!(bits.padding_bits, 0);
    }

    #[test]
    fn test_encode_bits_missing_code() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"ab"));
        let codes = CodeTable::from_tree(&tree);
        assert!(encode_bits(b"abc", &codes).is_err());
    }

    #[test]
    fn test_stats_for_skewed_input() {
        let mut encoder = HuffmanEncoder::new();
        let (_, payload_len, stats) = encoder.encode(*b"TEST", b"aaaaaaaaab").unwrap();
        assert_eq!(payload_len, 2);
        assert_eq!(stats.total_symbols, 2);
        assert_eq!(stats.average_code_length, 1.0);
        assert_eq!(stats.payload_bits, 10);
        assert_eq!(stats.padding_bits, 6);
        assert!((stats.weighted_bits_per_symbol - 1.0).abs() < 1e-12);
        assert_eq!(
            stats.sample_codes,
            vec![(b'a', "1".to_string()), (b'b', "0".to_string())]
        );
        assert!(encoder.codes().is_some());
    }

    #[test]
    fn test_empty_input_stats() {
        let mut encoder = HuffmanEncoder::new();
        let (_, payload_len, stats) = encoder.encode(*b"TEST", b"").unwrap();
        assert_eq!(payload_len, 0);
        assert_eq!(stats, HuffmanStats::default());
        assert!(encoder.tree().is_empty());
    }
}
