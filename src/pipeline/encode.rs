use std::fs;

use log::{debug, info, trace};

use crate::bitstream::BitWriter;
use crate::error::HencError;
use crate::huffman::{serialize, SymbolTable, Tree};
use crate::pipeline::frame::{
    write_header, AUTO_MAX_DEPTH, MAX_INPUT_SIZE, OUTPUT_PATH,
};
use crate::tools::cli::HencOpts;
use crate::tools::freq_count::freqs;

/// Compress the input file named in opts (HencOpts) and write the result to
/// the fixed output path. Logs the coding depth that was achieved.
pub fn compress(opts: &HencOpts) -> Result<(), HencError> {
    // Check the size from metadata before touching the contents, so an
    // oversized file is refused without reading it.
    let metadata = fs::metadata(&opts.file)?;
    if metadata.len() > MAX_INPUT_SIZE as u64 {
        return Err(HencError::InputTooLarge(metadata.len() as usize));
    }
    let data = fs::read(&opts.file)?;

    let (stream, depth) = encode(&data, basename(&opts.file), opts.levels)?;

    fs::write(OUTPUT_PATH, &stream)?;
    info!(
        "Successfully encoded the file with encoding depth {}",
        depth
    );
    info!(
        "{} bytes in, {} bytes out ({}).",
        data.len(),
        stream.len(),
        OUTPUT_PATH
    );
    Ok(())
}

/// Encode a buffer through one or more coding levels. `levels` of 0 selects
/// the depth automatically: coding continues while each level shrinks the
/// data, up to a hard cap. Returns the final framed stream and the number of
/// levels it represents.
pub fn encode(data: &[u8], fname: &str, levels: u32) -> Result<(Vec<u8>, u32), HencError> {
    if data.len() > MAX_INPUT_SIZE {
        return Err(HencError::InputTooLarge(data.len()));
    }

    let mut current = encode_level(data, fname, 1);
    let mut level = 1_u32;

    if levels != 0 {
        // Explicit depth: run exactly the requested number of levels.
        while level < levels {
            level += 1;
            current = encode_level(&current, fname, level);
        }
        return Ok((current, level));
    }

    // Auto mode: keep coding while the output shrinks. The previous level's
    // buffer is held until the comparison decides which one survives.
    loop {
        if level >= AUTO_MAX_DEPTH {
            info!("Reached the maximum automatic coding depth.");
            return Ok((current, level));
        }
        let next = encode_level(&current, fname, level + 1);
        level += 1;
        if current.len() < next.len() {
            // This level expanded the data; the previous output is final.
            debug!(
                "Level {} grew the stream from {} to {} bytes, backing off.",
                level,
                current.len(),
                next.len()
            );
            return Ok((current, level - 1));
        }
        current = next;
    }
}

/// One coding level: histogram, tree, symbol table, then the frame.
fn encode_level(input: &[u8], fname: &str, level: u32) -> Vec<u8> {
    let histogram = freqs(input);
    let tree = Tree::build(&histogram, input.len());
    let table = SymbolTable::from_tree(&tree);
    trace!("Level {} tree (depth {}): {}", level, tree.max_depth(), tree.dump());

    let mut bw = BitWriter::new(input.len() + 1024);
    write_header(&mut bw, fname, input.len() as u32);
    serialize(&tree, &mut bw);

    for &byte in input {
        let code = table.code(byte);
        bw.write_bits(code.bits, code.len as usize);
    }

    debug!(
        "Level {}: {} symbols coded into {} bytes.",
        level,
        input.len(),
        bw.byte_len()
    );
    bw.into_bytes()
}

/// The filename recorded in the frame is the basename of the input path;
/// both separator styles are recognized.
fn basename(path: &str) -> &str {
    match path.rfind(|c| c == '/' || c == '\\') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}
