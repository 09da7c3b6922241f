//! Maximal-run scanning and segmentation.

/// Iterator over maximal runs of identical bytes as `(value, length)`.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    data: &'a [u8],
    pos: usize,
}

/// Scan `data` into maximal runs.
pub fn runs(data: &[u8]) -> Runs<'_> {
    Runs { data, pos: 0 }
}

impl Iterator for Runs<'_> {
    type Item = (u8, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let value = *self.data.get(self.pos)?;
        let length = self.data[self.pos..]
            .iter()
            .take_while(|&&b| b == value)
            .count();
        self.pos += length;
        Some((value, length))
    }
}

/// A logical unit of the encoding before chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// `length` copies of `value`.
    Run {
        /// Repeated byte.
        value: u8,
        /// Run length.
        length: usize,
    },
    /// Bytes stored verbatim.
    Literal(&'a [u8]),
}

impl Segment<'_> {
    /// Input bytes covered by this segment.
    pub fn len(&self) -> usize {
        match self {
            Segment::Run { length, .. } => *length,
            Segment::Literal(bytes) => bytes.len(),
        }
    }

    /// Whether the segment covers no input.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `data` into runs of at least `threshold` bytes and the literal
/// segments between them. Adjacent short runs merge into one literal.
pub fn segment(data: &[u8], threshold: u8) -> Vec<Segment<'_>> {
    let threshold = usize::from(threshold.max(1));
    let mut segments = Vec::new();
    let mut pos = 0;
    let mut literal_start: Option<usize> = None;

    for (value, length) in runs(data) {
        if length >= threshold {
            if let Some(start) = literal_start.take() {
                segments.push(Segment::Literal(&data[start..pos]));
            }
            segments.push(Segment::Run { value, length });
        } else {
            literal_start.get_or_insert(pos);
        }
        pos += length;
    }
    if let Some(start) = literal_start {
        segments.push(Segment::Literal(&data[start..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs() {
        let found: Vec<_> = runs(b"aaabccdddd").collect();
        assert_eq!(found, vec![(b'a', 3), (b'b', 1), (b'c', 2), (b'd', 4)]);
        assert_eq!(runs(b"").count(), 0);
    }

    #[test]
    fn test_segment_threshold() {
        let segs = segment(b"aaabccdddd", 3);
        assert_eq!(
            segs,
            vec![
                Segment::Run {
                    value: b'a',
                    length: 3
                },
                Segment::Literal(b"bcc"),
                Segment::Run {
                    value: b'd',
                    length: 4
                },
            ]
        );
    }

    #[test]
    fn test_segment_all_literal() {
        let segs = segment(b"abcabc", 3);
        assert_eq!(segs, vec![Segment::Literal(b"abcabc")]);
        assert_eq!(segs[0].len(), 6);
    }

    #[test]
    fn test_segment_threshold_one() {
        let segs = segment(b"ab", 1);
        assert_eq!(segs.len(), 2);
        assert!(segs.iter().all(|s| matches!(s, Segment::Run { length: 1, .. })));
    }

    #[test]
    fn test_segment_empty() {
        assert!(segment(b"", 3).is_empty());
    }
}
