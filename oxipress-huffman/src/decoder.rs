//! Huffman decoder.

use crate::tree::{HuffmanTree, Node};
use oxipress_core::bitstream::BitReader;
use oxipress_core::container::{ByteReader, ContainerHeader};
use oxipress_core::error::{OxiPressError, Result};
use oxipress_core::frequency::FrequencyTable;

/// Statistics gathered while decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanDecodeStats {
    /// Symbols emitted.
    pub characters_decoded: u64,
    /// Distinct bytes in the stored table.
    pub unique_characters: usize,
    /// Depth of the rebuilt tree.
    pub tree_depth: usize,
    /// Payload size in bits, padding included.
    pub total_bits_in_file: u64,
    /// Payload bits that carried data.
    pub effective_bits_used: u64,
    /// Zero bits filling the last payload byte.
    pub padding_bits: u8,
}

/// Decodes Huffman containers.
#[derive(Debug, Default)]
pub struct HuffmanDecoder {
    tree: HuffmanTree,
}

impl HuffmanDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree rebuilt by the last call to [`HuffmanDecoder::decode`].
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Decode the parameters and payload that follow `header`.
    pub fn decode(
        &mut self,
        header: &ContainerHeader,
        body: &[u8],
    ) -> Result<(Vec<u8>, HuffmanDecodeStats)> {
        let mut reader = ByteReader::new(body);
        let padding_bits = reader.read_u8()?;
        let table = read_table(&mut reader)?;

        if table.total() != header.original_size {
            return Err(OxiPressError::corrupted(
                reader.position() as u64,
                format!(
                    "frequency table covers {} bytes, header records {}",
                    table.total(),
                    header.original_size
                ),
            ));
        }

        self.tree = HuffmanTree::build(&table);
        let payload = reader.rest();
        let mut bits = BitReader::with_padding(payload, padding_bits)?;
        let data = decode_bits(&mut bits, &self.tree, header.original_size)?;

        if !bits.is_exhausted() {
            return Err(OxiPressError::corrupted(
                bits.bit_position() / 8,
                format!("{} unused bits after last symbol", bits.remaining_bits()),
            ));
        }

        let total_bits_in_file = payload.len() as u64 * 8;
        let stats = HuffmanDecodeStats {
            characters_decoded: data.len() as u64,
            unique_characters: table.distinct(),
            tree_depth: self.tree.depth(),
            total_bits_in_file,
            effective_bits_used: total_bits_in_file - u64::from(padding_bits),
            padding_bits,
        };
        log::debug!(
            "huffman: decoded {} symbols from {} bits",
            stats.characters_decoded,
            stats.effective_bits_used
        );
        Ok((data, stats))
    }
}

/// Read the `(byte, weight)` table written by the encoder.
fn read_table(reader: &mut ByteReader<'_>) -> Result<FrequencyTable> {
    let distinct = reader.read_varint()?;
    if distinct > 256 {
        return Err(OxiPressError::corrupted(
            reader.position() as u64,
            format!("{} distinct symbols", distinct),
        ));
    }

    let mut table = FrequencyTable::new();
    let mut previous: Option<u8> = None;
    for _ in 0..distinct {
        let offset = reader.position() as u64;
        let byte = reader.read_u8()?;
        let weight = reader.read_varint()?;
        if weight == 0 || previous.is_some_and(|p| p >= byte) {
            return Err(OxiPressError::corrupted(offset, "malformed frequency table"));
        }
        if table.total().checked_add(weight).is_none() {
            return Err(OxiPressError::corrupted(offset, "frequency table overflows"));
        }
        table.set(byte, weight);
        previous = Some(byte);
    }
    Ok(table)
}

/// Walk the tree bit by bit and stop after exactly `symbol_count` symbols.
pub fn decode_bits(
    bits: &mut BitReader<'_>,
    tree: &HuffmanTree,
    symbol_count: u64,
) -> Result<Vec<u8>> {
    let Some(root) = tree.root() else {
        if symbol_count > 0 {
            return Err(OxiPressError::corrupted(0, "no symbols to decode with"));
        }
        return Ok(Vec::new());
    };

    let capacity = usize::try_from(symbol_count).unwrap_or(usize::MAX).min(1 << 24);
    let mut out = Vec::with_capacity(capacity);

    if let Node::Leaf { byte, .. } = *tree.node(root) {
        for _ in 0..symbol_count {
            if bits.read_bit()? {
                return Err(OxiPressError::corrupted(
                    bits.bit_position() / 8,
                    "invalid code for single-symbol tree",
                ));
            }
            out.push(byte);
        }
        return Ok(out);
    }

    for _ in 0..symbol_count {
        let mut idx = root;
        loop {
            match *tree.node(idx) {
                Node::Leaf { byte, .. } => {
                    out.push(byte);
                    break;
                }
                Node::Internal { left, right, .. } => {
                    idx = if bits.read_bit()? { right } else { left };
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::CodeTable;
    use crate::encoder::encode_bits;

    #[test]
    fn test_decode_bits_stops_at_symbol_count() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"abcd"));
        // "ab" then zero padding that would otherwise decode as 'a' 'a'
        let data = [0b0001_0000];
        let mut bits = BitReader::new(&data);
        assert_eq!(decode_bits(&mut bits, &tree, 2).unwrap(), b"ab");
        assert_eq!(bits.remaining_bits(), 4);
    }

    #[test]
    fn test_decode_bits_exhausted() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"abcd"));
        let data = [0b0001_1011];
        let mut bits = BitReader::new(&data);
        let err = decode_bits(&mut bits, &tree, 5).unwrap_err();
        assert!(matches!(err, OxiPressError::CorruptedStream { .. }));
    }

    #[test]
    fn test_single_leaf_rejects_one_bit() {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(b"xx"));
        let data = [0b0100_0000];
        let mut bits = BitReader::with_padding(&data, 6).unwrap();
        assert!(decode_bits(&mut bits, &tree, 2).is_err());
    }

    #[test]
    fn test_bits_roundtrip() {
        let input = b"mississippi river";
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(input));
        let codes = CodeTable::from_tree(&tree);
        let buf = encode_bits(input, &codes).unwrap();
        let mut bits = BitReader::with_padding(&buf.bytes, buf.padding_bits).unwrap();
        assert_eq!(decode_bits(&mut bits, &tree, input.len() as u64).unwrap(), input);
        assert!(bits.is_exhausted());
    }

    #[test]
    fn test_read_table_rejects_unsorted() {
        // two entries: b'b' weight 1, b'a' weight 1
        let raw = [2u8, b'b', 1, b'a', 1];
        let mut reader = ByteReader::new(&raw);
        assert!(read_table(&mut reader).is_err());
    }
}
