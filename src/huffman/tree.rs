use std::fmt::Write as _;

/// Index of a node within its tree's arena.
pub type NodeId = usize;

/// A node is either a coding leaf or an internal branch. Branches always have
/// exactly two children; a one-child branch cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Leaf {
        symbol: u8,
    },
    Branch {
        left: NodeId,
        right: NodeId,
        /// Merge sequence number, kept for trace output only.
        id: u32,
    },
}

/// One arena slot: the node's frequency fraction and its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Occurrence count over total symbol count, in (0,1] for real symbols.
    pub weight: f64,
    pub kind: NodeKind,
}

/// A Huffman tree stored as an arena of nodes. The head is the last surviving
/// node of the merge loop, or the sole leaf for a one-symbol alphabet.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    head: NodeId,
}

impl Tree {
    /// Build a tree from a byte histogram using the greedy two-smallest-merge.
    ///
    /// Leaves are created in 0x00..=0xFF enumeration order and sorted by
    /// descending weight with a strict greater-than comparison, so equal
    /// weights keep their enumeration order. Each merge takes the two lowest
    /// weight nodes from the tail of the list: the very last becomes the left
    /// child, the second-to-last the right child.
    pub fn build(freqs: &[u32; 256], total: usize) -> Tree {
        let mut nodes: Vec<Node> = Vec::with_capacity(512);
        for (symbol, &count) in freqs.iter().enumerate() {
            if count != 0 {
                nodes.push(Node {
                    weight: count as f64 / total as f64,
                    kind: NodeKind::Leaf {
                        symbol: symbol as u8,
                    },
                });
            }
        }

        // An empty histogram still needs a well-formed frame, so give it a
        // single placeholder leaf. Decode emits zero symbols either way.
        if nodes.is_empty() {
            nodes.push(Node {
                weight: 0.0,
                kind: NodeKind::Leaf { symbol: 0 },
            });
        }

        // List of arena indices, to be kept sorted by descending weight.
        let mut sorted: Vec<NodeId> = (0..nodes.len()).collect();
        for i in 0..sorted.len() {
            for j in i..sorted.len() {
                if nodes[sorted[j]].weight > nodes[sorted[i]].weight {
                    sorted.swap(i, j);
                }
            }
        }

        // Merge until one node remains. The tail of the list holds the two
        // lowest weights: last is the new left child, second-to-last the right.
        let mut next_id = 0_u32;
        while sorted.len() > 1 {
            let left = sorted[sorted.len() - 1];
            let right = sorted[sorted.len() - 2];
            let branch = nodes.len();
            nodes.push(Node {
                weight: nodes[left].weight + nodes[right].weight,
                kind: NodeKind::Branch {
                    left,
                    right,
                    id: next_id,
                },
            });
            next_id += 1;

            // Replace the pair with the branch at the tail, then one bubble
            // pass toward the front. Only the new entry can be out of place.
            sorted.truncate(sorted.len() - 1);
            let mut i = sorted.len() - 1;
            sorted[i] = branch;
            while i > 0 && nodes[sorted[i - 1]].weight < nodes[sorted[i]].weight {
                sorted.swap(i - 1, i);
                i -= 1;
            }
        }

        Tree {
            head: sorted[0],
            nodes,
        }
    }

    /// Assemble a tree directly from arena parts (used by deserialization).
    pub(crate) fn from_parts(nodes: Vec<Node>, head: NodeId) -> Tree {
        Tree { nodes, head }
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Longest root-to-leaf path, counting both ends. A lone leaf has depth 1.
    /// Bounded by the alphabet: at most 256 leaves means depth never passes 256.
    pub fn max_depth(&self) -> usize {
        self.probe(self.head, 1)
    }

    fn probe(&self, id: NodeId, depth: usize) -> usize {
        match self.nodes[id].kind {
            NodeKind::Leaf { .. } => depth,
            NodeKind::Branch { left, right, .. } => self
                .probe(left, depth + 1)
                .max(self.probe(right, depth + 1)),
        }
    }

    /// Render the tree pre-order for trace logging.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.head, &mut out);
        out
    }

    fn dump_node(&self, id: NodeId, out: &mut String) {
        match self.nodes[id].kind {
            NodeKind::Leaf { symbol } => {
                if (0x21..0x7f).contains(&symbol) {
                    let _ = write!(out, "LEAF {} ", symbol as char);
                } else {
                    let _ = write!(out, "LEAF 0x{:02x} ", symbol);
                }
            }
            NodeKind::Branch { left, right, id: n } => {
                let _ = write!(out, "BRANCH {} ( ", n);
                self.dump_node(left, out);
                self.dump_node(right, out);
                let _ = write!(out, ") ");
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{NodeKind, Tree};
    use crate::tools::freq_count::freqs;

    #[test]
    fn aaab_merge_order() {
        // A:3 B:1 -> descending sort [A(.75), B(.25)]; the merge takes the two
        // lowest entries smallest-first, so left = B and right = A.
        let f = freqs(b"AAAB");
        let tree = Tree::build(&f, 4);
        match tree.node(tree.head()).kind {
            NodeKind::Branch { left, right, .. } => {
                assert_eq!(tree.node(left).kind, NodeKind::Leaf { symbol: b'B' });
                assert_eq!(tree.node(right).kind, NodeKind::Leaf { symbol: b'A' });
            }
            _ => panic!("expected a branch at the head"),
        }
        assert!((tree.node(tree.head()).weight - 1.0).abs() < 1e-9);
        assert_eq!(tree.max_depth(), 2);
    }

    #[test]
    fn single_symbol_is_lone_leaf() {
        let f = freqs(b"zzzz");
        let tree = Tree::build(&f, 4);
        assert_eq!(tree.node(tree.head()).kind, NodeKind::Leaf { symbol: b'z' });
        assert_eq!(tree.max_depth(), 1);
    }

    #[test]
    fn empty_input_gets_placeholder_leaf() {
        let f = freqs(b"");
        let tree = Tree::build(&f, 0);
        assert_eq!(tree.node(tree.head()).kind, NodeKind::Leaf { symbol: 0 });
    }

    #[test]
    fn equal_weights_keep_enumeration_order() {
        // Four symbols, all weight .25. The first merge must take the last two
        // of the descending list, which with a stable sort are 'c' and 'd'.
        let f = freqs(b"abcd");
        let tree = Tree::build(&f, 4);
        // Branch 0 is the first merge performed.
        let first = (0..tree.len()).find(|&i| {
            matches!(tree.node(i).kind, NodeKind::Branch { id: 0, .. })
        });
        match tree.node(first.expect("merge happened")).kind {
            NodeKind::Branch { left, right, .. } => {
                assert_eq!(tree.node(left).kind, NodeKind::Leaf { symbol: b'd' });
                assert_eq!(tree.node(right).kind, NodeKind::Leaf { symbol: b'c' });
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn dump_marks_unprintable_symbols() {
        let f = freqs(&[b'a', b'a', 0x07]);
        let tree = Tree::build(&f, 3);
        let dump = tree.dump();
        assert!(dump.contains("LEAF a"));
        assert!(dump.contains("LEAF 0x07"));
        assert!(dump.starts_with("BRANCH 0"));
    }
}
