//! Compression state management
//!
//! This module owns the per-call encoder state: the hash table, the output
//! buffer, and the tag-byte emission for literal and copy elements.

use super::hash::HashTable;
use super::max_compressed_len;
use super::pattern::{find_match, MatchResult};
use crate::common::{
    CompressionLevel, CompressionStats, Element, MAX_COPY_LENGTH, MAX_INLINE_LITERAL,
    MAX_OFFSET, MAX_SHORT_COPY_LENGTH, MAX_SHORT_COPY_OFFSET, MIN_MATCH_LENGTH, TAG_COPY1,
    TAG_COPY2, TAG_LITERAL,
};
use crate::varint::write_varint;

/// Encoder state for one block
#[derive(Debug)]
pub struct EncodeState {
    /// Fingerprint table, sized for the block being encoded
    pub table: HashTable,
    /// Compressed output (header followed by elements)
    pub output: Vec<u8>,
    /// Table update policy inside matched regions
    pub level: CompressionLevel,
    /// Element counters
    pub stats: CompressionStats,
}

impl EncodeState {
    /// Create a new state for an input of `input_len` bytes
    pub fn new(input_len: usize, level: CompressionLevel) -> Self {
        Self {
            table: HashTable::for_input(input_len),
            output: Vec::with_capacity(max_compressed_len(input_len)),
            level,
            stats: CompressionStats::default(),
        }
    }

    /// Encode `input` as a complete block into `self.output`
    pub fn compress_block(&mut self, input: &[u8]) {
        write_varint(&mut self.output, input.len() as u64);

        let mut pos = 0;
        let mut literal_start = 0;

        while pos + MIN_MATCH_LENGTH <= input.len() {
            match find_match(input, pos, &mut self.table) {
                Some(found) => {
                    if literal_start < pos {
                        self.emit_literal(&input[literal_start..pos]);
                    }
                    self.emit_match(found);

                    let end = pos + found.length;
                    self.record_matched_region(input, pos + 1, end);
                    pos = end;
                    literal_start = end;
                }
                None => pos += 1,
            }
        }

        if literal_start < input.len() {
            self.emit_literal(&input[literal_start..]);
        }

        self.stats.input_bytes = input.len() as u64;
        self.stats.output_bytes = self.output.len() as u64;
    }

    /// Update the hash table for positions inside a match
    fn record_matched_region(&mut self, input: &[u8], start: usize, end: usize) {
        match self.level {
            CompressionLevel::Default => {
                for pos in start..end {
                    self.table.insert_at(input, pos);
                }
            }
            CompressionLevel::Fast => {
                if end > start {
                    self.table.insert_at(input, end - 1);
                }
            }
        }
    }

    /// Emit a literal element
    ///
    /// Lengths up to 60 live in the tag byte; longer ones use a 1 to 4 byte
    /// little-endian field holding `len - 1`, selected by tag values 60..=63.
    pub fn emit_literal(&mut self, literal: &[u8]) {
        debug_assert!(!literal.is_empty());
        let n = literal.len() - 1;

        if literal.len() <= MAX_INLINE_LITERAL {
            self.output.push(((n as u8) << 2) | TAG_LITERAL);
        } else {
            let field_len = (usize::BITS - n.leading_zeros()).div_ceil(8) as usize;
            let selector = (MAX_INLINE_LITERAL - 1 + field_len) as u8;
            self.output.push((selector << 2) | TAG_LITERAL);
            self.output
                .extend_from_slice(&(n as u32).to_le_bytes()[..field_len]);
        }

        self.output.extend_from_slice(literal);
        self.stats.record(&Element::Literal(literal));
    }

    /// Emit the copy elements covering one match
    ///
    /// Matches longer than 64 bytes are split so that every piece stays in
    /// 4..=64: 64-byte pieces while at least 68 remain, then one 60-byte piece
    /// if more than 64 remain.
    pub fn emit_match(&mut self, found: MatchResult) {
        let MatchResult { offset, mut length } = found;
        self.stats.longest_match = self.stats.longest_match.max(length);

        while length >= MAX_COPY_LENGTH + MIN_MATCH_LENGTH {
            self.emit_copy(offset, MAX_COPY_LENGTH);
            length -= MAX_COPY_LENGTH;
        }
        if length > MAX_COPY_LENGTH {
            self.emit_copy(offset, MAX_COPY_LENGTH - MIN_MATCH_LENGTH);
            length -= MAX_COPY_LENGTH - MIN_MATCH_LENGTH;
        }
        self.emit_copy(offset, length);
    }

    /// Emit a single copy element of 4..=64 bytes
    pub fn emit_copy(&mut self, offset: usize, length: usize) {
        debug_assert!((MIN_MATCH_LENGTH..=MAX_COPY_LENGTH).contains(&length));
        debug_assert!((1..=MAX_OFFSET).contains(&offset));

        if length <= MAX_SHORT_COPY_LENGTH && offset <= MAX_SHORT_COPY_OFFSET {
            let high_offset = ((offset >> 8) as u8) << 5;
            let len_bits = ((length - MIN_MATCH_LENGTH) as u8) << 2;
            self.output.push(high_offset | len_bits | TAG_COPY1);
            self.output.push(offset as u8);
        } else {
            self.output.push((((length - 1) as u8) << 2) | TAG_COPY2);
            self.output
                .extend_from_slice(&(offset as u16).to_le_bytes());
        }

        self.stats.record(&Element::Copy { length, offset });
    }
}
