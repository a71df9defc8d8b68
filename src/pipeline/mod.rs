//! The multi-level coding pipelines.
//!
//! One "level" is a full histogram -> tree -> code pass over a byte buffer,
//! producing a self-contained frame (`frame` module); the pipelines feed each
//! level's output into the next as plain bytes. Encoding stops at an explicit
//! level count, or automatically once a level stops shrinking the data.
//! Decoding peels frames until the requested count, or until the output no
//! longer starts with a nested frame header.
//!
pub mod decode;
pub mod encode;
pub mod frame;

pub use decode::{decode, decompress};
pub use encode::{compress, encode};
