//! Self-describing container shared by every codec.
//!
//! ```text
//! offset  size  field
//!      0     4  magic (codec identifier)
//!      4     8  original size, little-endian
//!     12     4  CRC-32 of the original bytes, little-endian
//!     16     8  compression timestamp (unix seconds), little-endian
//!     24     -  codec parameters, then payload
//! ```

use crate::crc::Crc32;
use crate::error::{OxiPressError, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Size of the fixed container header in bytes.
pub const HEADER_SIZE: usize = 24;

/// Fixed header at the start of every compressed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Codec identifier.
    pub magic: [u8; 4],
    /// Length of the uncompressed data.
    pub original_size: u64,
    /// CRC-32 of the uncompressed data.
    pub crc32: u32,
    /// Unix timestamp (seconds) recorded at compression time.
    pub timestamp: u64,
}

impl ContainerHeader {
    /// Build a header describing `data`, stamped with the current time.
    pub fn describe(magic: [u8; 4], data: &[u8]) -> Self {
        Self {
            magic,
            original_size: data.len() as u64,
            crc32: Crc32::compute(data),
            timestamp: unix_timestamp(),
        }
    }

    /// Append the encoded header to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.magic);
        out.extend_from_slice(&self.original_size.to_le_bytes());
        out.extend_from_slice(&self.crc32.to_le_bytes());
        out.extend_from_slice(&self.timestamp.to_le_bytes());
    }

    /// Parse a header from the start of `data` without checking the magic.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(OxiPressError::invalid_input(format!(
                "container too short: {} bytes, header needs {}",
                data.len(),
                HEADER_SIZE
            )));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&data[0..4]);
        let mut reader = ByteReader::new(&data[4..HEADER_SIZE]);
        Ok(Self {
            magic,
            original_size: reader.read_u64_le()?,
            crc32: reader.read_u32_le()?,
            timestamp: reader.read_u64_le()?,
        })
    }

    /// Parse a header and require the given magic.
    pub fn parse_expecting(data: &[u8], magic: [u8; 4]) -> Result<Self> {
        let header = Self::parse(data)?;
        if header.magic != magic {
            return Err(OxiPressError::invalid_input(format!(
                "bad magic: expected {:02x?}, found {:02x?}",
                magic, header.magic
            )));
        }
        Ok(header)
    }

    /// Check decoded bytes against the recorded size and checksum.
    pub fn verify(&self, decoded: &[u8]) -> Result<()> {
        if decoded.len() as u64 != self.original_size {
            return Err(OxiPressError::size_mismatch(
                self.original_size,
                decoded.len() as u64,
            ));
        }
        let computed = Crc32::compute(decoded);
        log::trace!(
            "verifying {} bytes: stored crc {:08x}, computed {:08x}",
            decoded.len(),
            self.crc32,
            computed
        );
        if computed != self.crc32 {
            return Err(OxiPressError::checksum_mismatch(self.crc32, computed));
        }
        Ok(())
    }
}

/// Seconds since the unix epoch, or 0 if the clock is before it.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Append `value` as an unsigned LEB128 varint.
pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Cursor over a payload that reports truncation as corruption.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// The unconsumed tail.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Consume `len` bytes.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(OxiPressError::corrupted(
                self.pos as u64,
                format!("truncated: need {} bytes, {} remaining", len, self.remaining()),
            ));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Consume one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_slice(1)?[0])
    }

    /// Consume a little-endian u16.
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let b = self.read_slice(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Consume a big-endian u16.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        let b = self.read_slice(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Consume a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let b = self.read_slice(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Consume a little-endian u64.
    pub fn read_u64_le(&mut self) -> Result<u64> {
        let b = self.read_slice(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(b);
        Ok(u64::from_le_bytes(raw))
    }

    /// Consume an unsigned LEB128 varint.
    pub fn read_varint(&mut self) -> Result<u64> {
        let start = self.pos;
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            if shift >= 64 || (shift == 63 && byte > 1) {
                return Err(OxiPressError::corrupted(start as u64, "varint overflows u64"));
            }
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }
}
