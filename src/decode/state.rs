//! Decompression state management
//!
//! This module tracks the read position in the compressed stream and the
//! output produced so far. Every access to the input goes through `take`,
//! which never reads past the end of the slice.

use super::MAX_EXPANSION_RATIO;
use crate::common::CompressionStats;
use crate::varint::decode_varint_u32;
use crate::{Result, SnappyError};

/// Decoder state for one block
#[derive(Debug)]
pub struct DecodeState<'a> {
    /// Entire compressed block, header included
    pub input: &'a [u8],
    /// Current position in `input`
    pub pos: usize,
    /// Uncompressed length declared by the header
    pub expected_len: usize,
    /// Decoded bytes
    pub output: Vec<u8>,
    /// Element counters
    pub stats: CompressionStats,
}

impl<'a> DecodeState<'a> {
    /// Parse the length header and allocate the output buffer
    pub fn new(input: &'a [u8]) -> Result<Self> {
        let (expected_len, pos) = read_header(input)?;
        if pos == input.len() && expected_len > 0 {
            return Err(SnappyError::MalformedHeader);
        }

        // A lying header must not be able to force a huge allocation
        let body_len = input.len() - pos;
        let capacity = expected_len.min(body_len.saturating_mul(MAX_EXPANSION_RATIO));

        Ok(Self {
            input,
            pos,
            expected_len,
            output: Vec::with_capacity(capacity),
            stats: CompressionStats {
                input_bytes: expected_len as u64,
                output_bytes: input.len() as u64,
                ..CompressionStats::default()
            },
        })
    }

    /// Bytes of the compressed stream not yet consumed
    pub fn remaining(&self) -> usize {
        self.input.len().saturating_sub(self.pos)
    }

    /// Whether the output has reached the declared length
    pub fn is_complete(&self) -> bool {
        self.output.len() >= self.expected_len
    }

    /// Consume `n` bytes of input, or `None` if fewer remain
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let input: &'a [u8] = self.input;
        let end = self.pos.checked_add(n)?;
        let bytes = input.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }
}

/// Read the uncompressed length header
///
/// Returns `(length, header_len)`.
pub fn read_header(input: &[u8]) -> Result<(usize, usize)> {
    let (len, pos) = decode_varint_u32(input, 0).map_err(|_| SnappyError::MalformedHeader)?;
    let len = usize::try_from(len).map_err(|_| SnappyError::MalformedHeader)?;
    Ok((len, pos))
}
