//! SnappyWriter - Streaming compression writer
//!
//! This module implements the SnappyWriter that provides a Write interface
//! over the block encoder. A block header carries the total length, so input
//! is buffered and encoded once when the writer is finished.

use super::state::EncodeState;
use crate::common::{CompressionLevel, MAX_INPUT_SIZE};
use crate::{Result, SnappyError};
use std::io::Write;

/// Streaming compression writer implementing Write trait
#[derive(Debug)]
pub struct SnappyWriter<W: Write> {
    writer: Option<W>,
    level: CompressionLevel,
    input_buffer: Vec<u8>,
}

impl<W: Write> SnappyWriter<W> {
    /// Create a new SnappyWriter with the default compression level
    pub fn new(writer: W) -> Self {
        Self::with_level(writer, CompressionLevel::Default)
    }

    /// Create a new SnappyWriter with an explicit compression level
    pub fn with_level(writer: W, level: CompressionLevel) -> Self {
        Self {
            writer: Some(writer),
            level,
            input_buffer: Vec::new(),
        }
    }

    /// Number of uncompressed bytes buffered so far
    pub fn buffered_len(&self) -> usize {
        self.input_buffer.len()
    }

    /// Finish compression, write the block and return the inner writer
    ///
    /// The inner writer is consumed even when writing fails, so a failed
    /// finish never leaves a second block behind on drop.
    pub fn finish(mut self) -> Result<W> {
        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| SnappyError::Io(std::io::ErrorKind::BrokenPipe.into()))?;
        self.write_block(&mut writer)?;
        Ok(writer)
    }

    /// Encode the buffered input into `writer`
    fn write_block(&mut self, writer: &mut W) -> Result<()> {
        let input = std::mem::take(&mut self.input_buffer);
        let mut state = EncodeState::new(input.len(), self.level);
        state.compress_block(&input);

        log::trace!(
            "snappy: writer flushing block of {} bytes ({} compressed)",
            input.len(),
            state.output.len()
        );

        writer.write_all(&state.output)?;
        writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Write for SnappyWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let total = self.input_buffer.len() as u64 + buf.len() as u64;
        if total > MAX_INPUT_SIZE {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                SnappyError::InputTooLarge(total),
            ));
        }

        self.input_buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        // Nothing can be emitted until the block length is known
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for SnappyWriter<W> {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            // Try to finish compression, but ignore errors in drop
            let _ = self.write_block(&mut writer);
        }
    }
}
