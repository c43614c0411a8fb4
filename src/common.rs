//! Common types and constants for the Snappy block format
//!
//! This module defines the core types, constants, and structures used by both
//! the compression (encode) and decompression (decode) paths.

use thiserror::Error;

/// Compression level for the Snappy encoder
///
/// Both levels produce valid Snappy blocks; they only differ in how many
/// positions of a matched region are recorded in the hash table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Record only the last position of each match
    Fast = 0,
    /// Record every position covered by a match
    #[default]
    Default = 1,
}

impl CompressionLevel {
    /// Create a CompressionLevel from a raw value
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CompressionLevel::Fast),
            1 => Ok(CompressionLevel::Default),
            _ => Err(SnappyError::InvalidCompressionLevel(value)),
        }
    }
}

/// Error type for Snappy operations
#[derive(Debug, Error)]
pub enum SnappyError {
    /// A varint field is truncated or overflows its target range
    #[error("Malformed varint")]
    MalformedVarint,

    /// The uncompressed length header cannot be parsed
    #[error("Malformed length header")]
    MalformedHeader,

    /// A literal declares more bytes than remain in the input
    #[error("Truncated literal: needs {needed} bytes, {available} available")]
    TruncatedLiteral {
        /// Bytes required by the literal
        needed: usize,
        /// Bytes left in the compressed stream
        available: usize,
    },

    /// A copy tag is missing its offset bytes
    #[error("Truncated copy element")]
    TruncatedCopy,

    /// A copy references before the start of output, or has offset 0
    #[error("Invalid copy offset {offset} with {written} bytes written")]
    InvalidOffset {
        /// Offset carried by the copy element
        offset: usize,
        /// Bytes already produced when the copy was applied
        written: usize,
    },

    /// A reserved tag was encountered
    #[error("Unsupported tag: {0:#04x}")]
    UnsupportedTag(u8),

    /// The produced output length differs from the declared header length
    #[error("Length mismatch: header declares {expected} bytes, stream yields {actual}")]
    LengthMismatch {
        /// Length declared by the header
        expected: usize,
        /// Length the stream produced, or would have produced
        actual: usize,
    },

    /// Bytes remain in the stream after the output is complete
    #[error("Trailing data: {0} unconsumed bytes")]
    TrailingData(usize),

    /// Input exceeds the largest length the header can describe
    #[error("Input too large: {0} bytes (maximum {MAX_INPUT_SIZE})")]
    InputTooLarge(u64),

    /// Invalid compression level value
    #[error("Invalid compression level: {0} (expected 0 or 1)")]
    InvalidCompressionLevel(u8),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type returned by the decoder
pub type DecodeError = SnappyError;

/// Result type alias for Snappy operations
pub type Result<T> = std::result::Result<T, SnappyError>;

// Snappy block format constants

/// Largest uncompressed length a block header can carry
pub const MAX_INPUT_SIZE: u64 = u32::MAX as u64;

/// Largest backward distance a copy element can express
pub const MAX_OFFSET: usize = 0xFFFF;

/// Largest offset representable by the 1-byte-offset copy form
pub const MAX_SHORT_COPY_OFFSET: usize = 0x7FF;

/// Minimum copy length (also the fingerprint width of the match finder)
pub const MIN_MATCH_LENGTH: usize = 4;

/// Maximum length of a single copy element
pub const MAX_COPY_LENGTH: usize = 64;

/// Maximum length of a copy using the 1-byte-offset form
pub const MAX_SHORT_COPY_LENGTH: usize = 11;

/// Longest literal whose length fits inside the tag byte
pub const MAX_INLINE_LITERAL: usize = 60;

/// Tag for literal elements (low 2 bits)
pub const TAG_LITERAL: u8 = 0b00;

/// Tag for copies with a 1-byte offset tail
pub const TAG_COPY1: u8 = 0b01;

/// Tag for copies with a 2-byte offset tail
pub const TAG_COPY2: u8 = 0b10;

/// Reserved tag (4-byte offset copies, unsupported in this profile)
pub const TAG_COPY4: u8 = 0b11;

/// One decoded element of a compressed block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element<'a> {
    /// Raw bytes copied verbatim from the compressed stream
    Literal(&'a [u8]),
    /// Back-reference into already produced output
    Copy {
        /// Number of bytes to replicate (4..=64)
        length: usize,
        /// Distance back from the write position (1..=65535)
        offset: usize,
    },
}

impl Element<'_> {
    /// Number of output bytes this element produces
    pub fn output_len(&self) -> usize {
        match self {
            Element::Literal(bytes) => bytes.len(),
            Element::Copy { length, .. } => *length,
        }
    }
}

/// Statistics for compression/decompression operations
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompressionStats {
    /// Number of literal elements
    pub literal_count: usize,
    /// Bytes carried by literal elements
    pub literal_bytes: usize,
    /// Number of copy elements
    pub copy_count: usize,
    /// Bytes produced by copy elements
    pub copied_bytes: usize,
    /// Longest single match (before splitting into copy elements)
    pub longest_match: usize,
    /// Uncompressed bytes
    pub input_bytes: u64,
    /// Compressed bytes
    pub output_bytes: u64,
}

impl CompressionStats {
    /// Compressed size divided by uncompressed size (0.0 for empty input)
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes > 0 {
            self.output_bytes as f64 / self.input_bytes as f64
        } else {
            0.0
        }
    }

    pub(crate) fn record(&mut self, element: &Element<'_>) {
        match element {
            Element::Literal(bytes) => {
                self.literal_count += 1;
                self.literal_bytes += bytes.len();
            }
            Element::Copy { length, .. } => {
                self.copy_count += 1;
                self.copied_bytes += length;
            }
        }
    }
}
