//! Edge case tests for LZ77.

use oxipress_core::error::OxiPressError;
use oxipress_core::traits::Codec;
use oxipress_lz77::{Lz77, Lz77Config, Lz77Encoder, Triplet, compress, decompress};

#[test]
fn test_repeating_pattern_uses_offset_two() {
    let config = Lz77Config::new(4, 4).unwrap();
    let input = b"ABABABAB";
    let triplets = Lz77Encoder::new(config).unwrap().triplets(input);
    assert!(triplets.iter().any(|t| t.offset == 2));

    let compressed = compress(input, config).unwrap();
    assert_eq!(decompress(&compressed).unwrap(), input);
}

#[test]
fn test_single_byte() {
    let encoded = Lz77::default().encode(b"x").unwrap();
    assert_eq!(encoded.payload_len, Triplet::SIZE);
    assert_eq!(encoded.stats.literals, 1);
    assert_eq!(decompress(&encoded.container).unwrap(), b"x");
}

#[test]
fn test_all_same_byte() {
    let input = vec![0u8; 5000];
    let encoded = Lz77::default().encode(&input).unwrap();
    assert_eq!(encoded.stats.longest_match, 18);
    assert!(encoded.payload_len < input.len() / 3);
    assert_eq!(decompress(&encoded.container).unwrap(), input);
}

#[test]
fn test_window_sizes() {
    let mut input = Vec::new();
    for i in 0..3000u32 {
        input.push((i % 251) as u8);
        if i % 7 == 0 {
            input.extend_from_slice(b"repeat me");
        }
    }
    for &(window, lookahead) in &[(1u16, 1u8), (16, 3), (256, 18), (4096, 255), (32768, 255)] {
        let config = Lz77Config::new(window, lookahead).unwrap();
        let compressed = compress(&input, config).unwrap();
        assert_eq!(
            decompress(&compressed).unwrap(),
            input,
            "window {window} lookahead {lookahead}"
        );
    }
}

#[test]
fn test_matches_never_exceed_window() {
    let config = Lz77Config::new(64, 32).unwrap();
    let input = b"0123456789abcdefghijklmnopqrstuvwxyz".repeat(30);
    let triplets = Lz77Encoder::new(config).unwrap().triplets(&input);
    assert!(triplets.iter().all(|t| t.offset <= 64 && t.length <= 32));
}

#[test]
fn test_truncated_container() {
    let mut compressed = compress(b"hello hello hello", Lz77Config::DEFAULT).unwrap();
    compressed.pop();
    let err = decompress(&compressed).unwrap_err();
    assert!(matches!(err, OxiPressError::CorruptedStream { .. }), "{err}");
}

#[test]
fn test_invalid_window_in_container() {
    let mut compressed = compress(b"hello", Lz77Config::DEFAULT).unwrap();
    // window field follows the 24-byte header
    compressed[24] = 0;
    compressed[25] = 0;
    let err = decompress(&compressed).unwrap_err();
    assert!(matches!(err, OxiPressError::CorruptedStream { .. }), "{err}");
}

#[test]
fn test_pseudo_random_roundtrips() {
    let mut state = 7u64;
    for size in [2usize, 5, 300, 20_000] {
        let input: Vec<u8> = (0..size)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((state >> 58) % 6) as u8 + b'a'
            })
            .collect();
        let compressed = compress(&input, Lz77Config::DEFAULT).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), input, "size {size}");
    }
}
