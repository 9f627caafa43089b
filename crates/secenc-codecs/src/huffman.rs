//! Huffman prefix-code compressor
//!
//! Static frequency-driven coding over Unicode scalars. Each compress
//! call builds a fresh frequency table, merges a min-heap of nodes into
//! a binary tree, and derives one prefix code per symbol (`0` left,
//! `1` right). The artifact carries both the encoded bit string and the
//! serialized tree, so decompression needs no out-of-band state:
//!
//! ```text
//! base64( json { "compressed_data": base64(bit string),
//!                "serialized_tree": <leaf|internal> } )
//! ```
//!
//! Leaves serialize as `{"char": c}`, internal nodes as
//! `{"left": .., "right": ..}`. Heap ordering is `(frequency,
//! insertion sequence)`, which fixes tie-breaks and makes artifacts
//! stable across calls. Inputs with a single distinct symbol get a
//! synthetic second symbol of frequency 1 so a two-leaf tree always
//! exists and codes are never empty.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::transport;

/// A node of the serialized coding tree.
///
/// The untagged representation matches the wire shape: leaves carry a
/// symbol, internal nodes carry only child links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TreeNode {
    Leaf {
        char: char,
    },
    Internal {
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// Artifact payload: encoded bits plus the tree that decodes them.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    compressed_data: String,
    serialized_tree: TreeNode,
}

/// Heap item ordered by `(frequency, insertion sequence)`.
struct HeapItem {
    freq: u64,
    seq: u64,
    node: TreeNode,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.freq, self.seq).cmp(&(other.freq, other.seq))
    }
}

/// Compress text into a Huffman artifact.
///
/// Empty input maps to an empty artifact. Artifacts are deterministic:
/// identical input yields an identical artifact.
pub fn compress(text: &str) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let mut frequencies = frequency_table(text);
    if frequencies.len() == 1 {
        // A one-leaf tree would assign an empty code; pad the alphabet
        // with a symbol that never appears in the bit string.
        let filler = if frequencies[0].0 == '\0' { '\u{1}' } else { '\0' };
        frequencies.push((filler, 1));
    }

    let tree = build_tree(frequencies)
        .ok_or_else(|| CodecError::format("huffman", "empty frequency table"))?;
    let mut codebook = HashMap::new();
    assign_codes(&tree, String::new(), &mut codebook);

    let mut bits = String::new();
    for c in text.chars() {
        let code = codebook
            .get(&c)
            .ok_or_else(|| CodecError::format("huffman", format!("symbol {c:?} missing from codebook")))?;
        bits.push_str(code);
    }

    let envelope = Envelope {
        compressed_data: transport::wrap(bits.as_bytes()),
        serialized_tree: tree,
    };
    let json = serde_json::to_string(&envelope)
        .map_err(|e| CodecError::format("huffman", format!("tree serialization failed: {e}")))?;
    Ok(transport::wrap(json.as_bytes()))
}

/// Decompress a Huffman artifact back to text.
pub fn decompress(artifact: &str) -> Result<String> {
    if artifact.is_empty() {
        return Ok(String::new());
    }

    let json = transport::unwrap(artifact, "huffman")?;
    let envelope: Envelope = serde_json::from_slice(&json)
        .map_err(|e| CodecError::format("huffman", format!("invalid envelope: {e}")))?;

    let bit_bytes = transport::unwrap(&envelope.compressed_data, "huffman")?;
    let bits = String::from_utf8(bit_bytes)
        .map_err(|_| CodecError::format("huffman", "bit string is not ASCII"))?;

    let root = &envelope.serialized_tree;
    let mut out = String::new();
    let mut node = root;
    for bit in bits.chars() {
        node = match (node, bit) {
            (TreeNode::Internal { left, .. }, '0') => left,
            (TreeNode::Internal { right, .. }, '1') => right,
            (TreeNode::Leaf { .. }, _) => {
                return Err(CodecError::format("huffman", "tree root is a leaf"))
            }
            (_, other) => {
                return Err(CodecError::format(
                    "huffman",
                    format!("bit string contains {other:?}"),
                ))
            }
        };
        if let TreeNode::Leaf { char } = node {
            out.push(*char);
            node = root;
        }
    }

    // Every codeword must complete; a walk stranded mid-tree means the
    // bit string was truncated.
    if !std::ptr::eq(node, root) {
        return Err(CodecError::format(
            "huffman",
            "bit string ends in the middle of a codeword",
        ));
    }

    Ok(out)
}

/// Count symbol frequencies in first-appearance order.
///
/// The order feeds the heap tie-break, so it must be deterministic; a
/// hash map iteration would scramble artifacts between calls.
fn frequency_table(text: &str) -> Vec<(char, u64)> {
    let mut order: Vec<(char, u64)> = Vec::new();
    let mut index: HashMap<char, usize> = HashMap::new();
    for c in text.chars() {
        match index.get(&c) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(c, order.len());
                order.push((c, 1));
            }
        }
    }
    order
}

/// Merge leaves into a single coding tree.
///
/// Repeatedly joins the two lowest-frequency nodes; the first popped
/// becomes the left child. Returns `None` for an empty table.
fn build_tree(frequencies: Vec<(char, u64)>) -> Option<TreeNode> {
    let mut seq = 0u64;
    let mut heap: BinaryHeap<Reverse<HeapItem>> = BinaryHeap::with_capacity(frequencies.len());
    for (char, freq) in frequencies {
        heap.push(Reverse(HeapItem {
            freq,
            seq,
            node: TreeNode::Leaf { char },
        }));
        seq += 1;
    }

    while let Some(Reverse(left)) = heap.pop() {
        let Some(Reverse(right)) = heap.pop() else {
            return Some(left.node);
        };
        heap.push(Reverse(HeapItem {
            freq: left.freq + right.freq,
            seq,
            node: TreeNode::Internal {
                left: Box::new(left.node),
                right: Box::new(right.node),
            },
        }));
        seq += 1;
    }

    None
}

/// Walk the tree assigning `0` for left edges and `1` for right edges.
fn assign_codes(node: &TreeNode, prefix: String, codebook: &mut HashMap<char, String>) {
    match node {
        TreeNode::Leaf { char } => {
            codebook.insert(*char, prefix);
        }
        TreeNode::Internal { left, right } => {
            assign_codes(left, format!("{prefix}0"), codebook);
            assign_codes(right, format!("{prefix}1"), codebook);
        }
    }
}
