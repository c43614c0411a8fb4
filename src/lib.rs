//! snappy-block - Rust implementation of the Snappy block format
//!
//! This crate provides a pure Rust implementation of the Snappy block format, a
//! compression scheme that trades compression ratio for very high encode and
//! decode speed. A block is a varint length header followed by literal and copy
//! elements, and is bit-compatible with other Snappy block consumers.
//!
//! # Features
//!
//! - Compression (greedy single-pass hash matching), total on any input
//! - Decompression that never reads or writes out of bounds on malformed input
//! - Two compression levels trading encoder work for ratio
//! - Streaming API via Read/Write traits
//! - Element statistics for inspection tooling
//!
//! # Example - Decompression
//!
//! ```no_run
//! use snappy_block::{decompress, SnappyReader};
//! use std::io::Read;
//!
//! // Decompress a Snappy block
//! let compressed_data = std::fs::read("data.snappy")?;
//! let decompressed = decompress(&compressed_data)?;
//!
//! // Or use streaming API
//! let mut reader = SnappyReader::new(std::io::Cursor::new(compressed_data));
//! let mut output = Vec::new();
//! reader.read_to_end(&mut output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Example - Compression
//!
//! ```
//! use snappy_block::{compress, compress_with, decompress, CompressionLevel, SnappyWriter};
//! use std::io::Write;
//!
//! // Compress data in-memory
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! let compressed = compress(data);
//! assert_eq!(decompress(&compressed)?, data);
//!
//! // Trade ratio for encoder speed
//! let fast = compress_with(data, CompressionLevel::Fast);
//! assert_eq!(decompress(&fast)?, data);
//!
//! // Or use streaming API
//! let mut writer = SnappyWriter::new(Vec::new());
//! writer.write_all(data)?;
//! let output = writer.finish()?;
//! assert_eq!(output, compressed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod decode;
pub mod encode;
pub mod error;
pub mod varint;

// Re-export commonly used types
pub use common::{
    CompressionLevel, CompressionStats, DecodeError, Element, Result, SnappyError,
    MAX_COPY_LENGTH, MAX_INPUT_SIZE, MAX_OFFSET,
};
pub use decode::{decompress_with_stats, decompressed_len, SnappyReader};
pub use encode::{compress_with, compress_with_stats, max_compressed_len, SnappyWriter};
pub use varint::{decode_varint, encode_varint};

// Convenience functions

/// Compress data into a Snappy block
///
/// # Arguments
/// * `data` - The data to compress (at most `MAX_INPUT_SIZE` bytes)
///
/// # Returns
/// The varint length header followed by the encoded elements. Never fails.
pub fn compress(data: &[u8]) -> Vec<u8> {
    encode::compress(data)
}

/// Decompress a Snappy block
///
/// # Arguments
/// * `data` - The compressed block
///
/// # Returns
/// A vector containing exactly the number of bytes declared by the header
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decode::decompress(data)
}
