//! The `(offset, length, literal)` emission unit and its wire form.

use oxipress_core::container::ByteReader;
use oxipress_core::error::Result;

/// One LZ77 step: copy `length` bytes from `offset` back, then emit `literal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triplet {
    /// Distance back into the output (0 for a literal-only triplet).
    pub offset: u16,
    /// Bytes to copy (0 for a literal-only triplet).
    pub length: u8,
    /// Byte appended after the copy.
    pub literal: u8,
}

impl Triplet {
    /// Encoded size: offset (2, big-endian), length (1), literal (1).
    pub const SIZE: usize = 4;

    /// A literal-only triplet.
    pub fn literal(byte: u8) -> Self {
        Self {
            offset: 0,
            length: 0,
            literal: byte,
        }
    }

    /// Whether this triplet carries a back-reference.
    pub fn is_match(&self) -> bool {
        self.length > 0
    }

    /// Append the wire form to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.offset.to_be_bytes());
        out.push(self.length);
        out.push(self.literal);
    }

    /// Read one triplet.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self> {
        let raw = reader.read_slice(Self::SIZE)?;
        Ok(Self {
            offset: u16::from_be_bytes([raw[0], raw[1]]),
            length: raw[2],
            literal: raw[3],
        })
    }
}
