//! Repeated byte-sequence mining.

use super::bytes::display_bytes;
use serde::Serialize;
use std::collections::HashMap;

/// Shortest pattern considered, equal to the size of one LZ77 triplet.
pub const MIN_PATTERN_LENGTH: usize = 4;

/// A byte sequence seen more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    /// Displayed bytes.
    pub pattern: String,
    /// Length in bytes.
    pub length: usize,
    /// Occurrences, overlapping ones included.
    pub occurrences: u64,
    /// `(length - 4) * (occurrences - 1)`: what back-references could save.
    pub bytes_saved: u64,
}

/// The `top` most frequent repeated sequences in `sample`.
///
/// Lengths run from [`MIN_PATTERN_LENGTH`] up to, but excluding,
/// `min(max_length, sample.len() / 4)`. Ties keep first-seen order: shorter
/// patterns first, then earlier positions.
pub fn common_patterns(sample: &[u8], max_length: usize, top: usize) -> Vec<Pattern> {
    let upper = max_length.min(sample.len() / 4);
    let mut seen: HashMap<&[u8], (u64, usize)> = HashMap::new();
    let mut next_rank = 0usize;

    for length in MIN_PATTERN_LENGTH..upper {
        for window in sample.windows(length) {
            let entry = seen.entry(window).or_insert_with(|| {
                next_rank += 1;
                (0, next_rank)
            });
            entry.0 += 1;
        }
    }

    let mut ranked: Vec<(&[u8], u64, usize)> = seen
        .into_iter()
        .filter(|(_, (count, _))| *count > 1)
        .map(|(bytes, (count, rank))| (bytes, count, rank))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(top);

    ranked
        .into_iter()
        .map(|(bytes, count, _)| Pattern {
            pattern: display_bytes(bytes),
            length: bytes.len(),
            occurrences: count,
            bytes_saved: (bytes.len() - MIN_PATTERN_LENGTH) as u64 * (count - 1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_word() {
        let sample = b"the cat and the hat and the bat";
        let patterns = common_patterns(sample, 20, 5);
        assert!(!patterns.is_empty());
        assert!(patterns.iter().all(|p| p.occurrences > 1));
        assert_eq!(patterns[0].pattern, "the ");
        assert_eq!(patterns[0].occurrences, 3);
        assert!(patterns.iter().all(|p| p.length >= MIN_PATTERN_LENGTH));
    }

    #[test]
    fn test_ordering() {
        let sample = b"abcdabcdabcdxyzwqrst";
        let patterns = common_patterns(sample, 20, 5);
        // "abcd" occurs three times and is the first length-4 window.
        assert_eq!(patterns[0].pattern, "abcd");
        assert_eq!(patterns[0].occurrences, 3);
        assert_eq!(patterns[0].bytes_saved, 0);
        for pair in patterns.windows(2) {
            assert!(pair[0].occurrences >= pair[1].occurrences);
        }
    }

    #[test]
    fn test_bytes_saved() {
        let sample = b"0123456789".repeat(4);
        let patterns = common_patterns(&sample, 20, 50);
        let long = patterns.iter().find(|p| p.length == 9).unwrap();
        assert_eq!(long.bytes_saved, 5 * (long.occurrences - 1));
    }

    #[test]
    fn test_short_sample() {
        assert!(common_patterns(b"aaaaaaaaaaaaaaa", 20, 5).is_empty());
        assert!(common_patterns(b"", 20, 5).is_empty());
    }

    #[test]
    fn test_non_printable_display() {
        let sample = [0u8, 1, 2, 3].repeat(8);
        let patterns = common_patterns(&sample, 20, 1);
        assert_eq!(patterns[0].pattern, "\\x00\\x01\\x02\\x03");
    }
}
