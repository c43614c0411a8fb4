//! Variable-length integer codec
//!
//! Unsigned integers are stored 7 bits per byte, least-significant group
//! first. Every byte except the last has its high bit set. The Snappy block
//! header is a varint holding the uncompressed length.

use crate::{Result, SnappyError};

/// Maximum encoded length of a `u64` (ceil(64 / 7))
pub const MAX_VARINT_LEN: usize = 10;

/// Maximum encoded length of a `u32`
pub const MAX_VARINT_LEN_U32: usize = 5;

/// Append the varint encoding of `n` to `buf`
pub fn write_varint(buf: &mut Vec<u8>, mut n: u64) {
    while n >= 0x80 {
        buf.push((n as u8 & 0x7F) | 0x80);
        n >>= 7;
    }
    buf.push(n as u8);
}

/// Encode `n` as a standalone varint
pub fn encode_varint(n: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(varint_len(n));
    write_varint(&mut buf, n);
    buf
}

/// Number of bytes `n` occupies once encoded
pub fn varint_len(n: u64) -> usize {
    let bits = 64 - (n | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Decode a varint starting at `pos`
///
/// Returns `(value, new_pos)`. Fails with `MalformedVarint` when the input
/// ends before a terminating byte or the value does not fit in 64 bits.
pub fn decode_varint(buf: &[u8], pos: usize) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    let mut cursor = pos;

    loop {
        let byte = *buf.get(cursor).ok_or(SnappyError::MalformedVarint)?;
        cursor += 1;

        let group = (byte & 0x7F) as u64;
        // The tenth byte may only carry the top bit of a u64
        if shift == 63 && group > 1 {
            return Err(SnappyError::MalformedVarint);
        }
        value |= group << shift;

        if byte & 0x80 == 0 {
            return Ok((value, cursor));
        }

        shift += 7;
        if shift > 63 {
            return Err(SnappyError::MalformedVarint);
        }
    }
}

/// Decode a varint that must fit in a `u32`
pub fn decode_varint_u32(buf: &[u8], pos: usize) -> Result<(u32, usize)> {
    let (value, new_pos) = decode_varint(buf, pos)?;
    if new_pos - pos > MAX_VARINT_LEN_U32 {
        return Err(SnappyError::MalformedVarint);
    }
    let value = u32::try_from(value).map_err(|_| SnappyError::MalformedVarint)?;
    Ok((value, new_pos))
}
