//! Snappy decompression implementation
//!
//! This module provides the block decoder. It is the crate's trust boundary:
//! any byte sequence may be handed to it, and malformed lengths, offsets or
//! tags are reported as errors before any out-of-bounds access.

mod decoder;
mod reader;
mod state;

pub use reader::SnappyReader;
pub use state::DecodeState;

use crate::common::CompressionStats;
use crate::Result;

/// Largest output produced per compressed body byte, rounded up
///
/// A 3-byte copy element yields at most 64 bytes.
pub const MAX_EXPANSION_RATIO: usize = 22;

/// Read the uncompressed length from a block header without decoding it
pub fn decompressed_len(data: &[u8]) -> Result<usize> {
    state::read_header(data).map(|(len, _)| len)
}

/// Decompress a Snappy block
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_stats(data).map(|(output, _)| output)
}

/// Decompress a Snappy block and report element statistics
pub fn decompress_with_stats(data: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
    let mut state = DecodeState::new(data)?;

    if let Err(e) = state.run() {
        log::debug!(
            "snappy: rejected block at byte {} of {} ({} of {} bytes decoded): {}",
            state.pos,
            data.len(),
            state.output.len(),
            state.expected_len,
            e
        );
        return Err(e);
    }

    Ok((state.output, state.stats))
}
