//! Rust version of the HENC iterative Huffman file compressor.
//!
//! Version 0.1.0
//! (This version does NOT contain API calls.)
//!
//! Provides safe compression and decompression of files using the HENC1 format.
//!
//! The compressor applies static Huffman coding repeatedly: each "level" treats
//! the previous level's framed output as raw bytes and codes it again. A
//! heuristic stops when a level no longer shrinks the data, or an explicit
//! level count can be requested.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> henc test.txt`
//!
//! This will compress the file and create `encoded.bin`. Running henc on a
//! compressed file decodes it back under its recorded name.
//!
pub mod bitstream;
pub mod error;
pub mod huffman;
pub mod pipeline;
pub mod tools;

pub use error::HencError;
