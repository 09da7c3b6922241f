//! Prefix codes derived from a [`HuffmanTree`].

use crate::tree::{HuffmanTree, Node};
use std::fmt;

/// A code word: the low `len` bits of `bits`, read most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HuffmanCode {
    /// Code bits, right-aligned.
    pub bits: u128,
    /// Code length in bits (0 means no code).
    pub len: u8,
}

impl HuffmanCode {
    /// Render as a string of `0` and `1`.
    pub fn to_bit_string(&self) -> String {
        (0..self.len)
            .rev()
            .map(|i| if (self.bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for HuffmanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

/// Byte to code lookup table.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [HuffmanCode; 256],
}

impl CodeTable {
    /// Walk the tree depth-first, appending `0` for left and `1` for right.
    /// A lone leaf gets the one-bit code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = [HuffmanCode::default(); 256];
        let Some(root) = tree.root() else {
            return Self { codes };
        };

        if let Node::Leaf { byte, .. } = *tree.node(root) {
            codes[byte as usize] = HuffmanCode { bits: 0, len: 1 };
            return Self { codes };
        }

        let mut stack = vec![(root, 0u128, 0u8)];
        while let Some((idx, bits, len)) = stack.pop() {
            match *tree.node(idx) {
                Node::Leaf { byte, .. } => {
                    codes[byte as usize] = HuffmanCode { bits, len };
                }
                Node::Internal { left, right, .. } => {
                    stack.push((right, (bits << 1) | 1, len + 1));
                    stack.push((left, bits << 1, len + 1));
                }
            }
        }
        Self { codes }
    }

    /// Code for `byte`, if it occurs.
    #[inline]
    pub fn get(&self, byte: u8) -> Option<HuffmanCode> {
        let code = self.codes[byte as usize];
        (code.len > 0).then_some(code)
    }

    /// Assigned codes in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, HuffmanCode)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.len > 0)
            .map(|(b, &c)| (b as u8, c))
    }

    /// Number of bytes with a code.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no byte has a code.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|c| c.len == 0)
    }

    /// Shortest and longest code lengths.
    pub fn length_range(&self) -> Option<(u8, u8)> {
        self.iter().fold(None, |acc, (_, c)| match acc {
            None => Some((c.len, c.len)),
            Some((lo, hi)) => Some((lo.min(c.len), hi.max(c.len))),
        })
    }

    /// Unweighted mean of the code lengths.
    pub fn average_length(&self) -> f64 {
        let (sum, count) = self
            .iter()
            .fold((0u64, 0u64), |(s, n), (_, c)| (s + u64::from(c.len), n + 1));
        if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        }
    }
}
