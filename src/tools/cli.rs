use clap::Parser;
use log::info;
use std::fmt::{Display, Formatter};

/// Encode, Decode, or encode-then-decode for debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
    DebugRoundTrip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// All user settable options that control program behavior.
#[derive(Debug)]
pub struct HencOpts {
    /// Name of the file to read for input.
    pub file: String,
    /// Requested mode. None means sniff the file header to decide.
    pub op_mode: Option<Mode>,
    /// Compression levels to apply; 0 selects the depth automatically.
    pub levels: u32,
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "henc, an iterative Huffman file compressor.",
    long_about = "
    Compresses a file by applying static Huffman coding repeatedly: each level
    re-codes the previous level's output. With no mode flag the first bytes of
    the target decide whether it is encoded or decoded.

    It is done in the spirit of learning, both learning Rust and learning
    compression techniques."
)]
struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Force encoding of the input file
    #[clap(short = 'e', long = "encode")]
    encode: bool,

    /// Force decoding of the input file
    #[clap(short = 'd', long = "decode")]
    decode: bool,

    /// Encode the input file, then immediately decode the just-written output
    #[clap(short = 'z', long = "debug")]
    debug: bool,

    /// Number of coding levels to apply. 0 picks the depth automatically
    #[clap(short = 'l', long = "levels", default_value_t = 0)]
    levels: u32,

    /// Sets verbosity. -v1 shows very little, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

/// Put command line information from CLAP into our internal structure.
pub fn henc_opts_init() -> HencOpts {
    let args = Args::parse();

    // Set the log level
    match args.v {
        0 => log::set_max_level(log::LevelFilter::Off),
        1 => log::set_max_level(log::LevelFilter::Error),
        2 => log::set_max_level(log::LevelFilter::Warn),
        3 => log::set_max_level(log::LevelFilter::Info),
        4 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    let op_mode = if args.debug {
        Some(Mode::DebugRoundTrip)
    } else if args.encode {
        Some(Mode::Encode)
    } else if args.decode {
        Some(Mode::Decode)
    } else {
        None
    };

    let opts = HencOpts {
        file: args.filename,
        op_mode,
        levels: args.levels,
    };

    // Below we report initialization status to the user
    info!("---- Henc Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    match opts.op_mode {
        Some(mode) => info!("Operational mode set to {}", mode),
        None => info!("Operational mode will be detected from the file header"),
    }
    info!("Getting input from the file {}", opts.file);
    if opts.levels == 0 {
        info!("Coding depth will be selected automatically");
    } else {
        info!("Coding depth set to {}", opts.levels);
    }
    info!("---- Henc Initialization End ----\n");

    opts
}
