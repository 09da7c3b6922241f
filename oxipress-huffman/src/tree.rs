//! Huffman tree stored as an index arena.
//!
//! Construction is deterministic so the decoder can rebuild the exact tree
//! from the stored byte weights. Nodes are merged lowest `(weight, rank)`
//! first, where a leaf's rank is its byte value and an internal node's rank
//! is `256 + creation order`. Leaves therefore win ties against internal
//! nodes, lower byte values win ties among leaves, and older internal nodes
//! win ties among internals. The first node popped becomes the left child.

use oxipress_core::FrequencyTable;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Terminal node carrying a byte value.
    Leaf {
        /// Byte value.
        byte: u8,
        /// Occurrence count.
        weight: u64,
    },
    /// Interior node; `weight` is the sum of the children's weights.
    Internal {
        /// Combined weight.
        weight: u64,
        /// Arena index of the `0` branch.
        left: usize,
        /// Arena index of the `1` branch.
        right: usize,
    },
}

impl Node {
    /// Weight of the subtree rooted here.
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }
}

/// Huffman tree built from a frequency table.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl HuffmanTree {
    /// Build the tree for every byte with a non-zero count.
    ///
    /// An empty table yields an empty tree; a table with one distinct byte
    /// yields a single leaf.
    pub fn build(table: &FrequencyTable) -> Self {
        let distinct = table.distinct();
        let mut nodes = Vec::with_capacity(distinct.saturating_mul(2));
        let mut heap = BinaryHeap::with_capacity(distinct);

        for (byte, weight) in table.iter() {
            heap.push(Reverse((weight, u32::from(byte), nodes.len())));
            nodes.push(Node::Leaf { byte, weight });
        }

        let mut next_rank = 256u32;
        while heap.len() > 1 {
            let (Some(Reverse((lw, _, left))), Some(Reverse((rw, _, right)))) =
                (heap.pop(), heap.pop())
            else {
                break;
            };
            let weight = lw.saturating_add(rw);
            heap.push(Reverse((weight, next_rank, nodes.len())));
            nodes.push(Node::Internal {
                weight,
                left,
                right,
            });
            next_rank += 1;
        }

        let root = heap.pop().map(|Reverse((_, _, idx))| idx);
        Self { nodes, root }
    }

    /// Arena index of the root, if any symbol exists.
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    /// Node at `idx`.
    #[inline]
    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Whether the tree has no symbols.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Whether the tree is a lone leaf (one distinct byte).
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.root.map(|r| &self.nodes[r]), Some(Node::Leaf { .. }))
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Longest root-to-leaf path in edges. A single-leaf tree counts as
    /// depth 1 since its symbol still costs one bit.
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        if self.is_single_leaf() {
            return 1;
        }
        let mut max = 0;
        let mut stack = vec![(root, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            match self.nodes[idx] {
                Node::Leaf { .. } => max = max.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        max
    }
}
