//! Tree codec: the frame carries the tree's shape as a pre-order bit grammar
//! followed by the leaf symbols as literal bytes.
//!
//! Grammar: a leaf writes `0`; a branch writes `1`, its left subtree, `1`,
//! its right subtree. A closing `0` would only follow a node lacking both
//! children, which in this tree is exactly the leaves. Leaf symbols are not
//! inlined in the shape bits - they trail the structure as one byte each, in
//! visitation order.

use crate::bitstream::{BitReader, BitWriter};
use crate::error::HencError;
use crate::huffman::tree::{Node, NodeId, NodeKind, Tree};

/// A parsed shape can never hold more leaves than the alphabet.
const MAX_LEAVES: usize = 256;
/// A genuine tree is depth-bounded by its leaf count; a hostile all-ones
/// prefix is not, so the parser enforces the same bound.
const MAX_DEPTH: usize = 256;

/// Write the tree's shape bits, then its leaf symbols.
pub fn serialize(tree: &Tree, bw: &mut BitWriter) {
    let mut symbols: Vec<u8> = Vec::with_capacity(MAX_LEAVES);
    serialize_node(tree, tree.head(), bw, &mut symbols);
    bw.write_bytes(&symbols);
}

fn serialize_node(tree: &Tree, id: NodeId, bw: &mut BitWriter, symbols: &mut Vec<u8>) {
    match tree.node(id).kind {
        NodeKind::Leaf { symbol } => {
            symbols.push(symbol);
            bw.write_bits(0, 1);
        }
        NodeKind::Branch { left, right, .. } => {
            bw.write_bits(1, 1);
            serialize_node(tree, left, bw, symbols);
            bw.write_bits(1, 1);
            serialize_node(tree, right, bw, symbols);
        }
    }
}

/// Parse a tree out of the bitstream: shape bits into a fresh arena, leaf
/// symbol slots collected by index, then one byte per slot backpatched in
/// the order the slots were met.
pub fn deserialize(br: &mut BitReader<'_>) -> Result<Tree, HencError> {
    let mut nodes: Vec<Node> = Vec::with_capacity(2 * MAX_LEAVES);
    let mut pending: Vec<NodeId> = Vec::with_capacity(MAX_LEAVES);
    let mut next_id = 0_u32;
    let head = parse_node(br, &mut nodes, &mut pending, &mut next_id, 1)?;

    for &slot in &pending {
        let symbol = br
            .byte()
            .ok_or(HencError::Truncated("tree leaf symbols"))?;
        nodes[slot].kind = NodeKind::Leaf { symbol };
    }
    Ok(Tree::from_parts(nodes, head))
}

fn parse_node(
    br: &mut BitReader<'_>,
    nodes: &mut Vec<Node>,
    pending: &mut Vec<NodeId>,
    next_id: &mut u32,
    depth: usize,
) -> Result<NodeId, HencError> {
    if depth > MAX_DEPTH {
        return Err(HencError::MalformedFrame(format!(
            "tree deeper than {} levels",
            MAX_DEPTH
        )));
    }
    let bit = br.bit().ok_or(HencError::Truncated("tree shape"))?;
    if bit == 0 {
        // Leaf. Its symbol arrives after the shape bits; note the slot.
        if pending.len() == MAX_LEAVES {
            return Err(HencError::MalformedFrame(format!(
                "more than {} leaves",
                MAX_LEAVES
            )));
        }
        let id = nodes.len();
        nodes.push(Node {
            weight: 0.0,
            kind: NodeKind::Leaf { symbol: 0 },
        });
        pending.push(id);
        return Ok(id);
    }

    let left = parse_node(br, nodes, pending, next_id, depth + 1)?;
    // The encoder always emits both children, but the grammar bit is read and
    // honored rather than assumed. A lone-child branch has no representation
    // here, so it is reported instead of misparsed.
    let right_bit = br.bit().ok_or(HencError::Truncated("tree shape"))?;
    if right_bit == 0 {
        return Err(HencError::MalformedFrame(
            "branch without a right child".to_string(),
        ));
    }
    let right = parse_node(br, nodes, pending, next_id, depth + 1)?;

    let id = nodes.len();
    nodes.push(Node {
        weight: 0.0,
        kind: NodeKind::Branch {
            left,
            right,
            id: *next_id,
        },
    });
    *next_id += 1;
    Ok(id)
}
