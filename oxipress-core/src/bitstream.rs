//! MSB-first bit-level I/O.
//!
//! The writer packs bits starting at the most significant bit of each byte
//! and pads the final byte with zero bits. The number of padding bits is
//! carried alongside the bytes in a [`BitBuffer`] so decoders can tell real
//! data from filler.

use crate::error::{OxiPressError, Result};

/// Packed bits plus the count of zero bits appended to fill the last byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    /// Packed bytes.
    pub bytes: Vec<u8>,
    /// Padding bits at the end of the last byte (0-7).
    pub padding_bits: u8,
}

impl BitBuffer {
    /// Total bits stored, padding included.
    pub fn total_bits(&self) -> u64 {
        self.bytes.len() as u64 * 8
    }

    /// Bits that carry data.
    pub fn data_bits(&self) -> u64 {
        self.total_bits()
            .saturating_sub(u64::from(self.padding_bits))
    }

    /// Whether no bits were written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// MSB-first bit writer.
#[derive(Debug, Default)]
pub struct BitWriter {
    output: Vec<u8>,
    /// Pending bits, right-aligned.
    buffer: u64,
    bits_in_buffer: u8,
    total_bits: u64,
}

impl BitWriter {
    /// Create a new bit writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(u64::from(bit), 1);
    }

    /// Write the low `count` bits of `value`, most significant first.
    ///
    /// `count` must be at most 64.
    pub fn write_bits(&mut self, value: u64, count: u8) {
        debug_assert!(count <= 64);
        let mut remaining = count;
        while remaining > 0 {
            let take = remaining.min(32);
            remaining -= take;
            let chunk = (value >> remaining) & ((1u64 << take) - 1);
            self.buffer = (self.buffer << take) | chunk;
            self.bits_in_buffer += take;

            while self.bits_in_buffer >= 8 {
                self.output
                    .push((self.buffer >> (self.bits_in_buffer - 8)) as u8);
                self.bits_in_buffer -= 8;
            }
        }
        self.total_bits += u64::from(count);
    }

    /// Bits written so far, excluding any padding.
    pub fn bits_written(&self) -> u64 {
        self.total_bits
    }

    /// Pad the last byte with zeros and return the packed buffer.
    pub fn finish(mut self) -> BitBuffer {
        let mut padding_bits = 0;
        if self.bits_in_buffer > 0 {
            padding_bits = 8 - self.bits_in_buffer;
            self.output.push((self.buffer << padding_bits) as u8);
        }
        BitBuffer {
            bytes: self.output,
            padding_bits,
        }
    }
}

/// MSB-first bit reader over a borrowed byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: u64,
    bit_limit: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader that may consume every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_pos: 0,
            bit_limit: data.len() as u64 * 8,
        }
    }

    /// Create a reader that stops before the trailing `padding_bits`.
    pub fn with_padding(data: &'a [u8], padding_bits: u8) -> Result<Self> {
        if padding_bits > 7 {
            return Err(OxiPressError::corrupted(
                0,
                format!("padding of {} bits exceeds one byte", padding_bits),
            ));
        }
        let total = data.len() as u64 * 8;
        if total == 0 && padding_bits > 0 {
            return Err(OxiPressError::corrupted(0, "padding declared on empty stream"));
        }
        Ok(Self {
            data,
            bit_pos: 0,
            bit_limit: total - u64::from(padding_bits),
        })
    }

    /// Read one bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.bit_pos >= self.bit_limit {
            return Err(OxiPressError::corrupted(
                self.bit_pos / 8,
                "bit stream exhausted",
            ));
        }
        let byte = self.data[(self.bit_pos >> 3) as usize];
        let bit = (byte >> (7 - (self.bit_pos & 7))) & 1;
        self.bit_pos += 1;
        Ok(bit == 1)
    }

    /// Read `count` bits (at most 64), most significant first.
    pub fn read_bits(&mut self, count: u8) -> Result<u64> {
        debug_assert!(count <= 64);
        if u64::from(count) > self.remaining_bits() {
            return Err(OxiPressError::corrupted(
                self.bit_pos / 8,
                format!(
                    "need {} bits, {} remaining",
                    count,
                    self.remaining_bits()
                ),
            ));
        }
        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Bits consumed so far.
    pub fn bit_position(&self) -> u64 {
        self.bit_pos
    }

    /// Bits left before the limit.
    pub fn remaining_bits(&self) -> u64 {
        self.bit_limit - self.bit_pos
    }

    /// Whether every readable bit has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.bit_pos >= self.bit_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_bits_msb_first() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3);
        writer.write_bits(0b11001, 5);
        writer.write_bit(true);
        let buf = writer.finish();

        assert_eq!(buf.bytes, vec![0b1011_1001, 0b1000_0000]);
        assert_eq!(buf.padding_bits, 7);
        assert_eq!(buf.data_bits(), 9);
        assert_eq!(buf.total_bits(), 16);
    }

    #[test]
    fn test_exact_byte_has_no_padding() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xA5, 8);
        assert_eq!(writer.bits_written(), 8);
        let buf = writer.finish();
        assert_eq!(buf.bytes, vec![0xA5]);
        assert_eq!(buf.padding_bits, 0);
    }

    #[test]
    fn test_wide_writes() {
        let mut writer = BitWriter::new();
        writer.write_bits(0x0123_4567_89AB_CDEF, 64);
        writer.write_bits(0x3, 2);
        let buf = writer.finish();
        assert_eq!(
            &buf.bytes[..8],
            &[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]
        );
        assert_eq!(buf.bytes[8], 0b1100_0000);

        let mut reader = BitReader::with_padding(&buf.bytes, buf.padding_bits).unwrap();
        assert_eq!(reader.read_bits(64).unwrap(), 0x0123_4567_89AB_CDEF);
        assert_eq!(reader.read_bits(2).unwrap(), 3);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_reader_stops_at_padding() {
        let data = [0b1100_0000];
        let mut reader = BitReader::with_padding(&data, 6).unwrap();
        assert!(reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.remaining_bits(), 0);

        let err = reader.read_bit().unwrap_err();
        assert!(matches!(err, OxiPressError::CorruptedStream { .. }));
    }

    #[test]
    fn test_reader_rejects_bad_padding() {
        assert!(BitReader::with_padding(&[0], 8).is_err());
        assert!(BitReader::with_padding(&[], 1).is_err());
        assert!(BitReader::with_padding(&[], 0).is_ok());
    }

    #[test]
    fn test_read_bits_past_end() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);
        assert!(reader.read_bits(9).is_err());
        assert_eq!(reader.bit_position(), 0);
        assert_eq!(reader.read_bits(8).unwrap(), 0xFF);
    }
}
