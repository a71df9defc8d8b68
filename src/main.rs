//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::fs::File;
use std::io::Read;

use henc::pipeline::frame::{looks_like_frame, OUTPUT_PATH};
use henc::pipeline::{compress, decompress};
use henc::tools::cli::{henc_opts_init, HencOpts, Mode};
use henc::HencError;

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::AlwaysAnsi,
    )
    .unwrap();

    let opts = henc_opts_init();

    // With no mode flag, the file's first bytes decide for us.
    let mode = opts.op_mode.unwrap_or_else(|| sniff_mode(&opts.file));

    //----- Go do it
    let result = match mode {
        Mode::Encode => compress(&opts),
        Mode::Decode => decompress(&opts),
        Mode::DebugRoundTrip => debug_round_trip(&opts),
    };

    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(1);
    }
    info!("Done.\n");
}

/// Read the first six bytes of the target and look for the frame magic. A
/// compressed file gets decoded; anything else, including a file too short
/// to hold the magic, gets encoded.
fn sniff_mode(path: &str) -> Mode {
    let mut start = [0_u8; 6];
    let found = File::open(path)
        .and_then(|mut f| f.read_exact(&mut start))
        .is_ok();
    if found && looks_like_frame(&start) {
        info!("Compressed file header found, decoding {}.", path);
        Mode::Decode
    } else {
        info!("No compressed file header, encoding {}.", path);
        Mode::Encode
    }
}

/// Debug round trip: encode the input file, then immediately decode the
/// just-written output so the two can be compared.
fn debug_round_trip(opts: &HencOpts) -> Result<(), HencError> {
    compress(opts)?;
    println!("----------------------");
    let decode_opts = HencOpts {
        file: OUTPUT_PATH.to_string(),
        op_mode: Some(Mode::Decode),
        levels: opts.levels,
    };
    decompress(&decode_opts)
}
