//! Pattern matching for Snappy compression
//!
//! Greedy match search: the single candidate remembered by the hash table is
//! verified and extended; no alternatives are compared.

use super::hash::{load_u32, HashTable};
use crate::common::{MAX_OFFSET, MIN_MATCH_LENGTH};

/// Result of pattern matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Backward distance to the earlier occurrence
    pub offset: usize,
    /// Number of matching bytes (at least 4, not yet split into copies)
    pub length: usize,
}

impl MatchResult {
    /// Create a new match result
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }
}

/// Find a backward match for the bytes at `pos`
///
/// The position is recorded in `table` whether or not a match is found.
/// Returns `None` if fewer than 4 bytes remain, the bucket is empty, the
/// candidate is out of the copy window, or its bytes differ.
pub fn find_match(input: &[u8], pos: usize, table: &mut HashTable) -> Option<MatchResult> {
    if pos + MIN_MATCH_LENGTH > input.len() {
        return None;
    }

    let fingerprint = load_u32(input, pos);
    let candidate = table.replace(fingerprint, pos)?;

    if candidate >= pos || pos - candidate > MAX_OFFSET {
        return None;
    }
    if load_u32(input, candidate) != fingerprint {
        return None;
    }

    let length = MIN_MATCH_LENGTH + common_prefix(input, candidate + MIN_MATCH_LENGTH, pos + MIN_MATCH_LENGTH);
    Some(MatchResult::new(pos - candidate, length))
}

/// Count equal bytes at `earlier` and `later`, stopping at the end of input
///
/// The regions may overlap; `earlier < later` so `later` hits the end first.
fn common_prefix(input: &[u8], earlier: usize, later: usize) -> usize {
    let tail = &input[later..];
    let source = &input[earlier..earlier + tail.len()];

    let mut length = 0;
    let mut chunks = tail.chunks_exact(8).zip(source.chunks_exact(8));
    for (a, b) in &mut chunks {
        let diff = load_u64(a) ^ load_u64(b);
        if diff != 0 {
            return length + (diff.trailing_zeros() / 8) as usize;
        }
        length += 8;
    }

    length
        + tail[length..]
            .iter()
            .zip(&source[length..])
            .take_while(|(a, b)| a == b)
            .count()
}

/// Read an 8-byte chunk as a little-endian word
///
/// Callers pass `chunks_exact(8)` items, so the length always matches.
fn load_u64(chunk: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(chunk);
    u64::from_le_bytes(raw)
}
