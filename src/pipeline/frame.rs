//! The byte/bit layout of one level's frame.
//!
//! | Field             | Encoding                                       |
//! |-------------------|------------------------------------------------|
//! | Magic             | literal bytes `HENC1\0`                        |
//! | Original filename | null-terminated byte string                    |
//! | Symbol count      | u32, 4 little-endian bytes                     |
//! | Huffman tree      | pre-order bit grammar plus leaf symbol bytes   |
//! | Encoded data      | concatenated codes, MSB-first, zero bit padded |
//!
//! Every level carries the original file's basename; only the innermost
//! frame's copy is meaningful on decode.

use crate::bitstream::{BitReader, BitWriter};
use crate::error::HencError;

/// Frame signature: format name, version digit, terminator.
pub const MAGIC: &[u8; 6] = b"HENC1\0";

/// Hard limit on the size of a file accepted for encoding.
pub const MAX_INPUT_SIZE: usize = 1_000_000;

/// Longest filename a frame may carry, terminator included.
pub const MAX_FILENAME: usize = 256;

/// Encoding levels never exceed this in auto mode.
pub const AUTO_MAX_DEPTH: u32 = 10;

/// Fixed path the encoder writes and the debug round trip reads back.
pub const OUTPUT_PATH: &str = "encoded.bin";

/// The fields in front of the tree and the coded data.
#[derive(Debug)]
pub struct FrameHeader {
    pub filename: String,
    pub num_symbols: u32,
}

/// True if the buffer starts with a frame header: bytes 0-3 spell the format
/// name and byte 5 terminates it. The version digit at byte 4 is deliberately
/// not inspected, keeping mode detection and the decoder's auto-continuation
/// in agreement.
pub fn looks_like_frame(data: &[u8]) -> bool {
    data.len() >= 6 && data[0..4] == MAGIC[0..4] && data[5] == 0
}

/// Write the magic, the filename, and the symbol count.
pub fn write_header(bw: &mut BitWriter, fname: &str, num_symbols: u32) {
    bw.write_bytes(MAGIC);
    bw.write_cstr(fname);
    bw.write_bytes(&num_symbols.to_le_bytes());
}

/// Parse and validate the fields in front of the tree.
pub fn read_header(br: &mut BitReader<'_>) -> Result<FrameHeader, HencError> {
    let magic = br.bytes(6).ok_or(HencError::Truncated("frame magic"))?;
    if !looks_like_frame(&magic) {
        return Err(HencError::BadMagic);
    }

    let raw_name = br
        .cstr(MAX_FILENAME)
        .ok_or(HencError::Truncated("file name"))?;
    let filename = String::from_utf8_lossy(&raw_name).into_owned();

    let count = br.bytes(4).ok_or(HencError::Truncated("symbol count"))?;
    let num_symbols = u32::from_le_bytes([count[0], count[1], count[2], count[3]]);

    Ok(FrameHeader {
        filename,
        num_symbols,
    })
}
