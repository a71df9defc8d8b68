//! Support tools for the HENC compressor: the byte histogram feeding the
//! tree builder, and the command line surface.
pub mod cli;
pub mod freq_count;
