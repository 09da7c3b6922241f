//! LZ77 decoder.

use crate::config::{Lz77Config, MAX_WINDOW};
use crate::triplet::Triplet;
use oxipress_core::container::{ByteReader, ContainerHeader};
use oxipress_core::error::{OxiPressError, Result};

/// Statistics gathered while decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lz77DecodeStats {
    /// Triplets read.
    pub triplets_processed: usize,
    /// Triplets with a back-reference.
    pub matches_processed: usize,
    /// Literal-only triplets.
    pub literals_processed: usize,
    /// Window recorded by the encoder.
    pub window_size: u16,
    /// Lookahead recorded by the encoder.
    pub lookahead_size: u8,
}

/// Replay `payload` with the limits in `config`, refusing to produce more
/// than `expected` bytes.
pub fn decode_payload(
    payload: &[u8],
    config: Lz77Config,
    expected: u64,
) -> Result<(Vec<u8>, Lz77DecodeStats)> {
    let mut reader = ByteReader::new(payload);
    let capacity = usize::try_from(expected).unwrap_or(usize::MAX).min(1 << 24);
    let mut out: Vec<u8> = Vec::with_capacity(capacity);
    let mut stats = Lz77DecodeStats {
        window_size: config.window_size,
        lookahead_size: config.lookahead_size,
        ..Lz77DecodeStats::default()
    };

    while !reader.is_empty() {
        let at = reader.position() as u64;
        let t = Triplet::read_from(&mut reader)?;
        let offset = usize::from(t.offset);
        let length = usize::from(t.length);

        if (offset == 0) != (length == 0) {
            return Err(OxiPressError::corrupted(
                at,
                format!("inconsistent triplet: offset {}, length {}", offset, length),
            ));
        }
        if offset > out.len() || offset > usize::from(config.window_size) {
            return Err(OxiPressError::corrupted(
                at,
                format!(
                    "offset {} reaches before the window ({} bytes produced)",
                    offset,
                    out.len()
                ),
            ));
        }
        if t.length > config.lookahead_size {
            return Err(OxiPressError::corrupted(
                at,
                format!("length {} exceeds lookahead {}", length, config.lookahead_size),
            ));
        }
        let produced = out.len() as u64 + length as u64 + 1;
        if produced > expected {
            return Err(OxiPressError::size_mismatch(expected, produced));
        }

        // Byte-by-byte so overlapping copies replicate the pattern.
        let start = out.len() - offset;
        for i in 0..length {
            let byte = out[start + i];
            out.push(byte);
        }
        out.push(t.literal);

        stats.triplets_processed += 1;
        if t.is_match() {
            stats.matches_processed += 1;
        } else {
            stats.literals_processed += 1;
        }
    }

    if out.len() as u64 != expected {
        return Err(OxiPressError::size_mismatch(expected, out.len() as u64));
    }
    Ok((out, stats))
}

/// Decode the parameters and triplets that follow `header`.
pub fn decode(header: &ContainerHeader, body: &[u8]) -> Result<(Vec<u8>, Lz77DecodeStats)> {
    let mut reader = ByteReader::new(body);
    let window_size = reader.read_u16_le()?;
    let lookahead_size = reader.read_u8()?;
    if window_size == 0 || window_size > MAX_WINDOW || lookahead_size == 0 {
        return Err(OxiPressError::corrupted(
            0,
            format!(
                "invalid window parameters: window {}, lookahead {}",
                window_size, lookahead_size
            ),
        ));
    }
    let config = Lz77Config {
        window_size,
        lookahead_size,
    };

    let (data, stats) = decode_payload(reader.rest(), config, header.original_size)?;
    log::debug!(
        "lz77: decoded {} bytes from {} triplets",
        data.len(),
        stats.triplets_processed
    );
    Ok((data, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(triplets: &[Triplet]) -> Vec<u8> {
        let mut out = Vec::new();
        for t in triplets {
            t.write_to(&mut out);
        }
        out
    }

    #[test]
    fn test_overlapping_copy() {
        let p = payload(&[
            Triplet::literal(b'A'),
            Triplet::literal(b'B'),
            Triplet {
                offset: 2,
                length: 5,
                literal: b'B',
            },
        ]);
        let (data, stats) = decode_payload(&p, Lz77Config::DEFAULT, 8).unwrap();
        assert_eq!(data, b"ABABABAB");
        assert_eq!(stats.triplets_processed, 3);
        assert_eq!(stats.matches_processed, 1);
        assert_eq!(stats.literals_processed, 2);
    }

    #[test]
    fn test_offset_beyond_output() {
        let p = payload(&[
            Triplet::literal(b'A'),
            Triplet {
                offset: 2,
                length: 1,
                literal: b'x',
            },
        ]);
        let err = decode_payload(&p, Lz77Config::DEFAULT, 3).unwrap_err();
        assert!(matches!(err, OxiPressError::CorruptedStream { offset: 4, .. }));
    }

    #[test]
    fn test_offset_beyond_window() {
        let config = Lz77Config::new(1, 18).unwrap();
        let p = payload(&[
            Triplet::literal(b'A'),
            Triplet::literal(b'B'),
            Triplet {
                offset: 2,
                length: 1,
                literal: b'x',
            },
        ]);
        assert!(decode_payload(&p, config, 4).is_err());
    }

    #[test]
    fn test_inconsistent_triplet() {
        let p = payload(&[Triplet {
            offset: 0,
            length: 3,
            literal: b'x',
        }]);
        assert!(decode_payload(&p, Lz77Config::DEFAULT, 4).is_err());
    }

    #[test]
    fn test_length_above_lookahead() {
        let config = Lz77Config::new(4096, 2).unwrap();
        let p = payload(&[
            Triplet::literal(b'a'),
            Triplet {
                offset: 1,
                length: 3,
                literal: b'a',
            },
        ]);
        assert!(decode_payload(&p, config, 5).is_err());
    }

    #[test]
    fn test_truncated_triplet() {
        let mut p = payload(&[Triplet::literal(b'a'), Triplet::literal(b'b')]);
        p.pop();
        let err = decode_payload(&p, Lz77Config::DEFAULT, 2).unwrap_err();
        assert!(matches!(err, OxiPressError::CorruptedStream { .. }));
    }

    #[test]
    fn test_short_output_is_size_mismatch() {
        let p = payload(&[Triplet::literal(b'a')]);
        let err = decode_payload(&p, Lz77Config::DEFAULT, 2).unwrap_err();
        assert!(matches!(err, OxiPressError::SizeMismatch { .. }));
    }
}
