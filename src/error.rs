use thiserror::Error;

/// Errors surfaced by the encode and decode pipelines.
#[derive(Debug, Error)]
pub enum HencError {
    /// The input file exceeds the 1,000,000 byte limit. Checked before any work is done.
    #[error("the file cannot be encoded because it exceeds 1MB in size ({0} bytes)")]
    InputTooLarge(usize),

    /// The frame header does not carry the HENC magic.
    #[error("not a HENC compressed stream (bad magic)")]
    BadMagic,

    /// The bitstream ran out of data mid-frame.
    #[error("compressed stream ended early while reading {0}")]
    Truncated(&'static str),

    /// The frame structure is inconsistent (bad tree grammar, leaf overflow, etc).
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
