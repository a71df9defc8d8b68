//! The bitstream module forms the bit-level I/O subsystem for the HENC compressor.
//!
//! HENC frames are bit-packed: the tree grammar and the Huffman codes are not
//! byte aligned, so both sides of the codec work through these two types.
//!
//! All reads and writes are MSB-first within each byte. The writer owns a
//! growable buffer and never overruns; the reader walks a borrowed slice and
//! reports exhaustion through `Option` so the pipelines can turn it into a
//! proper truncation error.
//!
pub mod bitreader;
pub mod bitwriter;

pub use bitreader::BitReader;
pub use bitwriter::BitWriter;
