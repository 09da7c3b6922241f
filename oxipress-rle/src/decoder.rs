//! RLE decoder.

use crate::{FLAG_LITERAL, FLAG_RUN};
use oxipress_core::container::{ByteReader, ContainerHeader};
use oxipress_core::error::{OxiPressError, Result};

/// Statistics gathered while decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RleDecodeStats {
    /// Logical runs replayed.
    pub runs_processed: usize,
    /// Logical literal segments copied.
    pub literal_segments_processed: usize,
    /// Run chunks read.
    pub run_chunks: usize,
    /// Literal chunks read.
    pub literal_chunks: usize,
    /// Threshold recorded by the encoder.
    pub threshold_used: u8,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Last {
    None,
    Run(u8),
    Literal,
}

/// Replay the chunk stream in `payload`, refusing to produce more than
/// `expected` bytes.
pub fn decode_payload(payload: &[u8], expected: u64) -> Result<(Vec<u8>, RleDecodeStats)> {
    let mut reader = ByteReader::new(payload);
    let capacity = usize::try_from(expected).unwrap_or(usize::MAX).min(1 << 24);
    let mut out = Vec::with_capacity(capacity);
    let mut stats = RleDecodeStats::default();
    let mut last = Last::None;

    while !reader.is_empty() {
        let offset = reader.position() as u64;
        let flag = reader.read_u8()?;
        let count = reader.read_u8()?;
        if count == 0 {
            return Err(OxiPressError::corrupted(offset, "zero-length chunk"));
        }
        if out.len() as u64 + u64::from(count) > expected {
            return Err(OxiPressError::size_mismatch(
                expected,
                out.len() as u64 + u64::from(count),
            ));
        }

        match flag {
            FLAG_RUN => {
                let value = reader.read_u8()?;
                out.resize(out.len() + usize::from(count), value);
                stats.run_chunks += 1;
                if last != Last::Run(value) {
                    stats.runs_processed += 1;
                }
                last = Last::Run(value);
            }
            FLAG_LITERAL => {
                let bytes = reader.read_slice(usize::from(count))?;
                out.extend_from_slice(bytes);
                stats.literal_chunks += 1;
                if last != Last::Literal {
                    stats.literal_segments_processed += 1;
                }
                last = Last::Literal;
            }
            other => {
                return Err(OxiPressError::corrupted(
                    offset,
                    format!("unknown chunk flag {:#04x}", other),
                ));
            }
        }
    }

    if out.len() as u64 != expected {
        return Err(OxiPressError::size_mismatch(expected, out.len() as u64));
    }
    Ok((out, stats))
}

/// Decode the parameters and chunks that follow `header`.
pub fn decode(header: &ContainerHeader, body: &[u8]) -> Result<(Vec<u8>, RleDecodeStats)> {
    let mut reader = ByteReader::new(body);
    let threshold = reader.read_u8()?;
    let max_chunk = reader.read_u8()?;
    if threshold == 0 || max_chunk == 0 {
        return Err(OxiPressError::corrupted(0, "invalid RLE parameters"));
    }

    let (data, mut stats) = decode_payload(reader.rest(), header.original_size)?;
    stats.threshold_used = threshold;
    log::debug!(
        "rle: decoded {} bytes from {} run and {} literal chunks",
        data.len(),
        stats.run_chunks,
        stats.literal_chunks
    );
    Ok((data, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_payload() {
        let payload = [0xFF, 4, b'a', 0xFE, 2, b'b', b'c'];
        let (data, stats) = decode_payload(&payload, 6).unwrap();
        assert_eq!(data, b"aaaabc");
        assert_eq!(stats.runs_processed, 1);
        assert_eq!(stats.literal_segments_processed, 1);
    }

    #[test]
    fn test_split_chunks_count_once() {
        let payload = [0xFF, 255, 7, 0xFF, 45, 7, 0xFE, 1, 1, 0xFE, 1, 2];
        let (data, stats) = decode_payload(&payload, 302).unwrap();
        assert_eq!(data.len(), 302);
        assert_eq!(stats.runs_processed, 1);
        assert_eq!(stats.run_chunks, 2);
        assert_eq!(stats.literal_segments_processed, 1);
        assert_eq!(stats.literal_chunks, 2);
    }

    #[test]
    fn test_unknown_flag() {
        let err = decode_payload(&[0x01, 1, 0], 1).unwrap_err();
        assert!(matches!(err, OxiPressError::CorruptedStream { offset: 0, .. }));
    }

    #[test]
    fn test_truncated_literal() {
        let err = decode_payload(&[0xFE, 3, b'a'], 3).unwrap_err();
        assert!(matches!(err, OxiPressError::CorruptedStream { .. }));
    }

    #[test]
    fn test_zero_count() {
        assert!(decode_payload(&[0xFF, 0, b'a'], 0).is_err());
    }

    #[test]
    fn test_size_mismatch() {
        let err = decode_payload(&[0xFF, 4, b'a'], 5).unwrap_err();
        assert!(matches!(
            err,
            OxiPressError::SizeMismatch {
                expected: 5,
                actual: 4
            }
        ));

        let err = decode_payload(&[0xFF, 4, b'a'], 3).unwrap_err();
        assert!(matches!(err, OxiPressError::SizeMismatch { .. }));
    }
}
