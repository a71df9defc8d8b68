use std::fs;
use std::path::Path;

use log::{debug, info, trace};

use crate::bitstream::BitReader;
use crate::error::HencError;
use crate::huffman::serialize::deserialize;
use crate::huffman::tree::{NodeKind, Tree};
use crate::pipeline::frame::{looks_like_frame, read_header};
use crate::tools::cli::HencOpts;

/// No frame legitimately codes more symbols than this. The original input is
/// capped at 1,000,000 bytes and levels grow by at most a small frame
/// overhead, so a count beyond the cap means a forged header, not data.
const MAX_FRAME_SYMBOLS: u32 = 8_000_000;

/// Decompress the file named in opts (HencOpts) and write the output under
/// the filename recorded in the innermost frame, or `decoded_<name>` if a
/// file of that name already exists.
pub fn decompress(opts: &HencOpts) -> Result<(), HencError> {
    let data = fs::read(&opts.file)?;
    let (out, fname) = decode(&data, opts.levels)?;

    // Collision avoidance. Only a plain existence probe - nothing is opened
    // here, so there is no handle to mismanage.
    let save_name = if Path::new(&fname).exists() {
        format!("decoded_{}", fname)
    } else {
        fname
    };
    fs::write(&save_name, &out)?;
    info!("Successfully decoded file to {}", save_name);
    Ok(())
}

/// Decode a framed stream through one or more levels. `levels` of 0 keeps
/// peeling frames while the decoded output itself starts with a nested frame
/// header; an explicit count decodes exactly that many times. Returns the
/// final output and the filename recorded in the last frame decoded.
pub fn decode(data: &[u8], levels: u32) -> Result<(Vec<u8>, String), HencError> {
    let (mut out, mut fname) = decode_level(data, 1)?;
    let mut level = 1_u32;

    loop {
        let more = if levels != 0 {
            level < levels
        } else {
            looks_like_frame(&out)
        };
        if !more {
            debug!("Finished decoding after {} level(s).", level);
            return Ok((out, fname));
        }
        level += 1;
        let (next, name) = decode_level(&out, level)?;
        out = next;
        fname = name;
    }
}

/// Decode one frame: header, tree, then `num_symbols` bit-by-bit descents.
fn decode_level(data: &[u8], level: u32) -> Result<(Vec<u8>, String), HencError> {
    let mut br = BitReader::new(data);
    let header = read_header(&mut br)?;
    if header.num_symbols > MAX_FRAME_SYMBOLS {
        return Err(HencError::MalformedFrame(format!(
            "frame claims {} symbols",
            header.num_symbols
        )));
    }

    let tree = deserialize(&mut br)?;
    trace!(
        "Level {} tree (depth {}): {}",
        level,
        tree.max_depth(),
        tree.dump()
    );

    let mut out = Vec::with_capacity(header.num_symbols as usize);
    for _ in 0..header.num_symbols {
        out.push(next_symbol(&tree, &mut br)?);
    }

    debug!(
        "Level {}: decoded {} symbols for {}.",
        level,
        out.len(),
        header.filename
    );
    Ok((out, header.filename))
}

/// Walk the tree from the head, one bit per branch, until a leaf. The
/// degenerate lone-leaf tree consumes no bits at all.
fn next_symbol(tree: &Tree, br: &mut BitReader<'_>) -> Result<u8, HencError> {
    let mut node = tree.head();
    loop {
        match tree.node(node).kind {
            NodeKind::Leaf { symbol } => return Ok(symbol),
            NodeKind::Branch { left, right, .. } => {
                let bit = br.bit().ok_or(HencError::Truncated("encoded data"))?;
                node = if bit == 1 { right } else { left };
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::decode;
    use crate::error::HencError;
    use crate::pipeline::encode::encode;

    fn round_trip(data: &[u8], levels: u32) {
        let (stream, depth) = encode(data, "file.bin", levels).unwrap();
        let decode_levels = if levels == 0 { 0 } else { depth };
        let (out, fname) = decode(&stream, decode_levels).unwrap();
        assert_eq!(out, data);
        assert_eq!(fname, "file.bin");
    }

    #[test]
    fn single_level_round_trip() {
        round_trip(b"the quick brown fox jumps over the lazy dog", 1);
    }

    #[test]
    fn multi_level_round_trip() {
        round_trip(b"mississippi mississippi mississippi", 3);
    }

    #[test]
    fn auto_round_trip() {
        let data: Vec<u8> = (0..4096).map(|i| (i % 7) as u8 * 3).collect();
        round_trip(&data, 0);
    }

    #[test]
    fn degenerate_round_trip() {
        round_trip(&vec![b'q'; 1234], 1);
        round_trip(&vec![0_u8; 5], 2);
    }

    #[test]
    fn empty_round_trip() {
        round_trip(b"", 1);
        round_trip(b"", 0);
    }

    #[test]
    fn single_byte_round_trip() {
        round_trip(b"K", 1);
    }

    #[test]
    fn all_byte_values_round_trip() {
        let data: Vec<u8> = (0_u8..=255).cycle().take(2048).collect();
        round_trip(&data, 1);
    }

    #[test]
    fn explicit_levels_decode_explicitly() {
        let data = b"abracadabra abracadabra";
        let (stream, _) = encode(data, "a", 4).unwrap();
        let (out, _) = decode(&stream, 4).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn garbage_is_rejected() {
        match decode(b"this is not a henc stream at all", 1) {
            Err(HencError::BadMagic) => {}
            other => panic!("expected bad magic, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let (stream, _) = encode(b"some reasonable test data here", "t", 1).unwrap();
        match decode(&stream[..stream.len() - 2], 1) {
            Err(HencError::Truncated(_)) => {}
            other => panic!("expected truncation, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn forged_symbol_count_is_rejected() {
        let mut stream = b"HENC1\0f\0".to_vec();
        stream.extend_from_slice(&u32::MAX.to_le_bytes());
        stream.push(0);
        match decode(&stream, 1) {
            Err(HencError::MalformedFrame(_)) => {}
            other => panic!("expected malformed frame, got {:?}", other.map(|_| ())),
        }
    }
}
