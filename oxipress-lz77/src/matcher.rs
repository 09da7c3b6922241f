//! Longest-match search over a sliding window.
//!
//! Every position is linked to the previous position holding the same byte
//! value, so following a chain visits candidates nearest-first. Only a
//! strictly longer match replaces the current best, which makes the nearest
//! offset win among equal lengths. The search is exhaustive within the
//! window.

const NONE: usize = usize::MAX;

/// A back-reference candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Distance back from the current position (at least 1).
    pub offset: usize,
    /// Number of matching bytes.
    pub length: usize,
}

/// Incremental match finder over a complete input buffer.
#[derive(Debug)]
pub struct MatchFinder<'a> {
    data: &'a [u8],
    window: usize,
    head: [usize; 256],
    prev: Vec<usize>,
}

impl<'a> MatchFinder<'a> {
    /// Create a finder over `data` with the given window size.
    pub fn new(data: &'a [u8], window: usize) -> Self {
        Self {
            data,
            window,
            head: [NONE; 256],
            prev: vec![NONE; data.len()],
        }
    }

    /// Make `pos` visible to later searches. Positions must be inserted in
    /// increasing order.
    #[inline]
    pub fn insert(&mut self, pos: usize) {
        let slot = &mut self.head[self.data[pos] as usize];
        self.prev[pos] = *slot;
        *slot = pos;
    }

    /// Insert every position in `range`.
    pub fn insert_range(&mut self, range: std::ops::Range<usize>) {
        for pos in range {
            self.insert(pos);
        }
    }

    /// Longest match for the bytes at `pos`, at most `max_len` long.
    ///
    /// Only positions already inserted and no more than `window` bytes back
    /// are considered. Matches may extend past `pos` (self-overlap).
    pub fn longest_match(&self, pos: usize, max_len: usize) -> Option<Match> {
        let max_len = max_len.min(self.data.len().saturating_sub(pos));
        if max_len == 0 {
            return None;
        }

        let target = &self.data[pos..pos + max_len];
        let mut best: Option<Match> = None;
        let mut candidate = self.head[target[0] as usize];

        while candidate != NONE && candidate < pos {
            let offset = pos - candidate;
            if offset > self.window {
                break;
            }

            let length = self.data[candidate..]
                .iter()
                .zip(target)
                .take_while(|(a, b)| a == b)
                .count();
            if best.is_none_or(|b| length > b.length) {
                best = Some(Match { offset, length });
                if length == max_len {
                    break;
                }
            }
            candidate = self.prev[candidate];
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finder_at<'a>(data: &'a [u8], window: usize, pos: usize) -> MatchFinder<'a> {
        let mut finder = MatchFinder::new(data, window);
        finder.insert_range(0..pos);
        finder
    }

    #[test]
    fn test_no_history() {
        let finder = finder_at(b"abc", 16, 0);
        assert_eq!(finder.longest_match(0, 3), None);
    }

    #[test]
    fn test_self_overlapping_match() {
        let finder = finder_at(b"ABABABAB", 16, 2);
        assert_eq!(
            finder.longest_match(2, 5),
            Some(Match {
                offset: 2,
                length: 5
            })
        );
    }

    #[test]
    fn test_nearest_offset_wins_ties() {
        // "abc" occurs at 0 and 4; both give length 3 at position 8.
        let data = b"abcXabcYabcZ";
        let finder = finder_at(data, 64, 8);
        assert_eq!(
            finder.longest_match(8, 4),
            Some(Match {
                offset: 4,
                length: 3
            })
        );
    }

    #[test]
    fn test_longer_distant_match_preferred() {
        let data = b"abcdXabcYabcd";
        let finder = finder_at(data, 64, 9);
        assert_eq!(
            finder.longest_match(9, 4),
            Some(Match {
                offset: 9,
                length: 4
            })
        );
    }

    #[test]
    fn test_window_limit() {
        let data = b"abcd____abcd";
        let finder = finder_at(data, 4, 8);
        assert_eq!(finder.longest_match(8, 4), None);

        let finder = finder_at(data, 8, 8);
        assert_eq!(finder.longest_match(8, 4).map(|m| m.offset), Some(8));
    }
}
