//! LZ77 encoder.

use crate::config::Lz77Config;
use crate::matcher::MatchFinder;
use crate::triplet::Triplet;
use oxipress_core::container::ContainerHeader;
use oxipress_core::error::Result;
use oxipress_core::frequency::FrequencyTable;

/// Statistics gathered while encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lz77Stats {
    /// Window size used.
    pub window_size: u16,
    /// Lookahead size used.
    pub lookahead_size: u8,
    /// Triplets emitted.
    pub triplets_generated: usize,
    /// Triplets carrying a back-reference.
    pub matches_found: usize,
    /// Literal-only triplets.
    pub literals: usize,
    /// Mean length of the back-references.
    pub average_match_length: f64,
    /// Longest back-reference.
    pub longest_match: usize,
    /// `sum(length - 4)` over matches longer than one triplet.
    pub bytes_saved_from_matches: u64,
    /// Saved bytes as a percentage of the input.
    pub compression_efficiency: f64,
    /// Distinct byte values in the input.
    pub unique_bytes: usize,
    /// Most frequent byte and its count.
    pub most_common_byte: Option<(u8, u64)>,
}

/// Encodes byte buffers into LZ77 triplet streams.
#[derive(Debug, Clone, Default)]
pub struct Lz77Encoder {
    config: Lz77Config,
}

impl Lz77Encoder {
    /// Create an encoder with a validated configuration.
    pub fn new(config: Lz77Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> Lz77Config {
        self.config
    }

    /// Produce the triplet sequence for `input`.
    ///
    /// Match length is capped one short of the remaining input so every
    /// triplet carries a real literal.
    pub fn triplets(&self, input: &[u8]) -> Vec<Triplet> {
        let mut finder = MatchFinder::new(input, usize::from(self.config.window_size));
        let lookahead = usize::from(self.config.lookahead_size);
        let mut out = Vec::with_capacity(input.len() / 4 + 1);
        let mut pos = 0;

        while pos < input.len() {
            let max_len = lookahead.min(input.len() - pos - 1);
            let found = finder.longest_match(pos, max_len);
            let (offset, length) = found.map_or((0, 0), |m| (m.offset, m.length));

            let literal = input[pos + length];
            out.push(Triplet {
                offset: offset as u16,
                length: length as u8,
                literal,
            });
            finder.insert_range(pos..pos + length + 1);
            pos += length + 1;
        }
        out
    }

    /// Encode `input` and gather statistics, without a container.
    pub fn encode_payload(&self, input: &[u8]) -> (Vec<u8>, Lz77Stats) {
        let triplets = self.triplets(input);
        let mut payload = Vec::with_capacity(triplets.len() * Triplet::SIZE);
        for t in &triplets {
            t.write_to(&mut payload);
        }
        (payload, self.collect_stats(input, &triplets))
    }

    /// Compress `input` into a complete container.
    pub fn encode(&self, magic: [u8; 4], input: &[u8]) -> (Vec<u8>, usize, Lz77Stats) {
        let (payload, stats) = self.encode_payload(input);
        let mut out = Vec::with_capacity(payload.len() + 32);
        ContainerHeader::describe(magic, input).write_to(&mut out);
        out.extend_from_slice(&self.config.window_size.to_le_bytes());
        out.push(self.config.lookahead_size);
        out.extend_from_slice(&payload);

        log::debug!(
            "lz77: {} bytes -> {} triplets ({} matches), window {}, lookahead {}",
            input.len(),
            stats.triplets_generated,
            stats.matches_found,
            self.config.window_size,
            self.config.lookahead_size
        );
        (out, payload.len(), stats)
    }

    fn collect_stats(&self, input: &[u8], triplets: &[Triplet]) -> Lz77Stats {
        let mut stats = Lz77Stats {
            window_size: self.config.window_size,
            lookahead_size: self.config.lookahead_size,
            triplets_generated: triplets.len(),
            ..Lz77Stats::default()
        };

        let mut total_match_len = 0u64;
        for t in triplets.iter().filter(|t| t.is_match()) {
            let len = usize::from(t.length);
            stats.matches_found += 1;
            total_match_len += len as u64;
            stats.longest_match = stats.longest_match.max(len);
            stats.bytes_saved_from_matches += len.saturating_sub(Triplet::SIZE) as u64;
        }
        stats.literals = stats.triplets_generated - stats.matches_found;
        if stats.matches_found > 0 {
            stats.average_match_length = total_match_len as f64 / stats.matches_found as f64;
        }
        if !input.is_empty() {
            stats.compression_efficiency =
                stats.bytes_saved_from_matches as f64 / input.len() as f64 * 100.0;
        }

        let table = FrequencyTable::from_bytes(input);
        stats.unique_bytes = table.distinct();
        stats.most_common_byte = table.most_common();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder(window: u16, lookahead: u8) -> Lz77Encoder {
        Lz77Encoder::new(Lz77Config::new(window, lookahead).unwrap()).unwrap()
    }

    #[test]
    fn test_abab_pattern() {
        let triplets = encoder(4096, 18).triplets(b"ABABABAB");
        assert_eq!(
            triplets,
            vec![
                Triplet::literal(b'A'),
                Triplet::literal(b'B'),
                Triplet {
                    offset: 2,
                    length: 5,
                    literal: b'B'
                },
            ]
        );
    }

    #[test]
    fn test_lookahead_caps_length() {
        let triplets = encoder(4096, 4).triplets(&[b'z'; 12]);
        assert_eq!(triplets[0], Triplet::literal(b'z'));
        assert!(
            triplets
                .iter()
                .filter(|t| t.is_match())
                .all(|t| t.length <= 4 && t.offset == 1)
        );
        let covered: usize = triplets.iter().map(|t| usize::from(t.length) + 1).sum();
        assert_eq!(covered, 12);
    }

    #[test]
    fn test_no_repeats_all_literals() {
        let triplets = encoder(4096, 18).triplets(b"abcdefgh");
        assert_eq!(triplets.len(), 8);
        assert!(triplets.iter().all(|t| !t.is_match()));
    }

    #[test]
    fn test_stats() {
        let input = b"abcdefghij".repeat(5);
        let (payload, stats) = encoder(4096, 18).encode_payload(&input);
        assert_eq!(payload.len(), stats.triplets_generated * Triplet::SIZE);
        assert_eq!(stats.literals + stats.matches_found, stats.triplets_generated);
        assert_eq!(stats.unique_bytes, 10);
        assert!(stats.matches_found > 0);
        assert!(stats.longest_match <= 18);
        assert!(stats.bytes_saved_from_matches > 0);
    }

    #[test]
    fn test_empty() {
        let (payload, stats) = Lz77Encoder::default().encode_payload(b"");
        assert!(payload.is_empty());
        assert_eq!(stats.triplets_generated, 0);
        assert_eq!(stats.compression_efficiency, 0.0);
    }
}
