//! SnappyReader - Streaming decompression reader
//!
//! This module implements the SnappyReader that provides a Read interface
//! over the block decoder. The whole block is read from the inner reader on
//! first use, decoded, and then served from memory.

use super::decompress;
use std::io::Read;

/// Streaming decompression reader implementing Read trait
#[derive(Debug)]
pub struct SnappyReader<R: Read> {
    reader: R,
    initialized: bool,
    output_buffer: Vec<u8>,
    output_pos: usize,
}

impl<R: Read> SnappyReader<R> {
    /// Create a new SnappyReader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            initialized: false,
            output_buffer: Vec::new(),
            output_pos: 0,
        }
    }

    /// Read and decode the block
    fn initialize(&mut self) -> std::io::Result<()> {
        if self.initialized {
            return Ok(());
        }

        let mut compressed = Vec::new();
        self.reader.read_to_end(&mut compressed)?;

        self.output_buffer = decompress(&compressed)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.output_pos = 0;
        self.initialized = true;
        Ok(())
    }

    /// Consume the reader and return the inner reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Read for SnappyReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.initialize()?;

        let pending = &self.output_buffer[self.output_pos..];
        let n = pending.len().min(buf.len());
        buf[..n].copy_from_slice(&pending[..n]);
        self.output_pos += n;
        Ok(n)
    }
}
