//! Element decoding for Snappy blocks
//!
//! Tags are dispatched on their low 2 bits. Lengths and offsets taken from the
//! stream are validated against the input and the output before use.

use super::state::DecodeState;
use crate::common::{
    Element, MAX_INLINE_LITERAL, MIN_MATCH_LENGTH, TAG_COPY1, TAG_COPY2, TAG_LITERAL,
};
use crate::{Result, SnappyError};

impl<'a> DecodeState<'a> {
    /// Decode every element until the declared length is produced
    pub fn run(&mut self) -> Result<()> {
        while !self.is_complete() {
            if self.remaining() == 0 {
                return Err(SnappyError::LengthMismatch {
                    expected: self.expected_len,
                    actual: self.output.len(),
                });
            }

            let element = self.next_element()?;
            self.apply(element)?;
        }

        match self.remaining() {
            0 => Ok(()),
            extra => Err(SnappyError::TrailingData(extra)),
        }
    }

    /// Parse the element starting at the current position
    pub fn next_element(&mut self) -> Result<Element<'a>> {
        let tag = self.take(1).ok_or(SnappyError::LengthMismatch {
            expected: self.expected_len,
            actual: self.output.len(),
        })?[0];

        match tag & 0b11 {
            TAG_LITERAL => self.decode_literal(tag),
            TAG_COPY1 => {
                let low = self.take(1).ok_or(SnappyError::TruncatedCopy)?[0];
                Ok(Element::Copy {
                    length: MIN_MATCH_LENGTH + ((tag >> 2) & 0x07) as usize,
                    offset: (((tag >> 5) as usize) << 8) | low as usize,
                })
            }
            TAG_COPY2 => {
                let raw = self.take(2).ok_or(SnappyError::TruncatedCopy)?;
                Ok(Element::Copy {
                    length: 1 + (tag >> 2) as usize,
                    offset: u16::from_le_bytes([raw[0], raw[1]]) as usize,
                })
            }
            _ => Err(SnappyError::UnsupportedTag(tag)),
        }
    }

    /// Decode the length field and payload of a literal tag
    fn decode_literal(&mut self, tag: u8) -> Result<Element<'a>> {
        let selector = (tag >> 2) as usize;

        let len = if selector < MAX_INLINE_LITERAL {
            selector + 1
        } else {
            let field_len = selector - (MAX_INLINE_LITERAL - 1);
            let available = self.remaining();
            let field = self.take(field_len).ok_or(SnappyError::TruncatedLiteral {
                needed: field_len,
                available,
            })?;

            let mut raw = [0u8; 4];
            raw[..field_len].copy_from_slice(field);
            let len = u32::from_le_bytes(raw) as u64 + 1;
            usize::try_from(len).map_err(|_| SnappyError::TruncatedLiteral {
                needed: usize::MAX,
                available: self.remaining(),
            })?
        };

        let available = self.remaining();
        let bytes = self.take(len).ok_or(SnappyError::TruncatedLiteral {
            needed: len,
            available,
        })?;
        Ok(Element::Literal(bytes))
    }

    /// Append the bytes an element produces to the output
    pub fn apply(&mut self, element: Element<'a>) -> Result<()> {
        let written = self.output.len();
        let end = written
            .checked_add(element.output_len())
            .filter(|&end| end <= self.expected_len)
            .ok_or(SnappyError::LengthMismatch {
                expected: self.expected_len,
                actual: written.saturating_add(element.output_len()),
            })?;

        self.stats.record(&element);

        match element {
            Element::Literal(bytes) => self.output.extend_from_slice(bytes),
            Element::Copy { length, offset } => {
                if offset == 0 || offset > written {
                    return Err(SnappyError::InvalidOffset { offset, written });
                }
                self.stats.longest_match = self.stats.longest_match.max(length);

                let start = written - offset;
                if offset >= length {
                    self.output.extend_from_within(start..start + length);
                } else {
                    // Overlapping copy: each byte may be one this copy just wrote
                    for i in start..start + length {
                        let byte = self.output[i];
                        self.output.push(byte);
                    }
                }
            }
        }

        debug_assert_eq!(self.output.len(), end);
        Ok(())
    }
}
