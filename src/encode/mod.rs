//! Snappy compression implementation
//!
//! This module provides the block encoder: a varint length header followed
//! by literal and copy elements found with a greedy, single-pass hash match.

mod hash;
mod pattern;
mod state;
mod writer;

pub use hash::HashTable;
pub use pattern::{find_match, MatchResult};
pub use state::EncodeState;
pub use writer::SnappyWriter;

use crate::common::{CompressionLevel, CompressionStats, MAX_INPUT_SIZE};

/// Smallest hash table (256 buckets)
pub const MIN_TABLE_BITS: u32 = 8;

/// Largest hash table (16384 buckets)
pub const MAX_TABLE_BITS: u32 = 14;

/// Upper bound on the compressed size of an `input_len`-byte block
pub const fn max_compressed_len(input_len: usize) -> usize {
    32 + input_len + input_len / 6
}

/// Compress `data` into a Snappy block with the default level
pub fn compress(data: &[u8]) -> Vec<u8> {
    compress_with(data, CompressionLevel::Default)
}

/// Compress `data` into a Snappy block with the given level
pub fn compress_with(data: &[u8], level: CompressionLevel) -> Vec<u8> {
    compress_with_stats(data, level).0
}

/// Compress `data` and report element statistics
///
/// Inputs longer than `MAX_INPUT_SIZE` cannot be described by the header;
/// callers are expected to split them.
pub fn compress_with_stats(data: &[u8], level: CompressionLevel) -> (Vec<u8>, CompressionStats) {
    debug_assert!(data.len() as u64 <= MAX_INPUT_SIZE);

    let mut state = EncodeState::new(data.len(), level);
    state.compress_block(data);

    log::debug!(
        "snappy: compressed {} -> {} bytes ({} literals, {} copies)",
        state.stats.input_bytes,
        state.stats.output_bytes,
        state.stats.literal_count,
        state.stats.copy_count
    );

    (state.output, state.stats)
}
