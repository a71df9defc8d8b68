//! Huffman coding for the HENC compressor.
//!
//! One static tree per compression level, built from a byte histogram with
//! the classic greedy two-smallest-merge. The tree's shape travels inside the
//! frame as a pre-order bit grammar, its leaf symbols as a trailing byte run.
//!
//! The tree lives in an arena (a vec of nodes addressed by index) rather than
//! boxed children. That keeps deserialization simple: leaf symbol slots are
//! collected by index while the shape is parsed and backpatched afterwards.
//!
pub mod code;
pub mod serialize;
pub mod tree;

pub use code::{Code, SymbolTable};
pub use serialize::{deserialize, serialize};
pub use tree::{NodeId, NodeKind, Tree};
