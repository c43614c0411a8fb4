//! Hash table for Snappy compression
//!
//! A fixed-size array indexed by a multiplicative hash of 4 input bytes.
//! Each bucket holds the most recent position with that fingerprint; older
//! positions are overwritten on collision, there is no chaining.

use super::{MAX_TABLE_BITS, MIN_TABLE_BITS};

/// Multiplier for the fingerprint hash
const HASH_MULTIPLIER: u32 = 0x1E35_A7BD;

/// Load 4 bytes at `pos` as a little-endian `u32`
///
/// The caller guarantees `pos + 4 <= buffer.len()`.
#[inline]
pub fn load_u32(buffer: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([
        buffer[pos],
        buffer[pos + 1],
        buffer[pos + 2],
        buffer[pos + 3],
    ])
}

/// Single-slot fingerprint table
#[derive(Debug, Clone)]
pub struct HashTable {
    /// Position + 1 of the last occurrence per bucket, 0 when empty
    slots: Vec<u32>,
    /// Right shift that maps a 32-bit hash onto the table
    shift: u32,
}

impl HashTable {
    /// Create a table sized for an input of `input_len` bytes
    ///
    /// The table grows from 2^8 to 2^14 buckets until it covers the input.
    pub fn for_input(input_len: usize) -> Self {
        let mut bits = MIN_TABLE_BITS;
        while bits < MAX_TABLE_BITS && (1usize << bits) < input_len {
            bits += 1;
        }
        Self::with_bits(bits)
    }

    /// Create a table with 2^`bits` buckets
    pub fn with_bits(bits: u32) -> Self {
        let bits = bits.clamp(MIN_TABLE_BITS, MAX_TABLE_BITS);
        Self {
            slots: vec![0; 1 << bits],
            shift: 32 - bits,
        }
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table has no buckets (never true)
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Bucket index for a 4-byte fingerprint
    #[inline]
    pub fn bucket(&self, fingerprint: u32) -> usize {
        (fingerprint.wrapping_mul(HASH_MULTIPLIER) >> self.shift) as usize
    }

    /// Most recent position recorded for `fingerprint`
    #[inline]
    pub fn lookup(&self, fingerprint: u32) -> Option<usize> {
        match self.slots[self.bucket(fingerprint)] {
            0 => None,
            stored => Some(stored as usize - 1),
        }
    }

    /// Record `pos` as the latest occurrence of `fingerprint`
    #[inline]
    pub fn insert(&mut self, fingerprint: u32, pos: usize) {
        let bucket = self.bucket(fingerprint);
        // Inputs are capped at u32::MAX bytes, so pos + 1 always fits
        self.slots[bucket] = (pos as u32).wrapping_add(1);
    }

    /// Record the fingerprint starting at `pos` in `input`, if 4 bytes remain
    #[inline]
    pub fn insert_at(&mut self, input: &[u8], pos: usize) {
        if pos + 4 <= input.len() {
            self.insert(load_u32(input, pos), pos);
        }
    }

    /// Fetch the previous occurrence of `fingerprint` and replace it with `pos`
    #[inline]
    pub fn replace(&mut self, fingerprint: u32, pos: usize) -> Option<usize> {
        let bucket = self.bucket(fingerprint);
        let previous = self.slots[bucket];
        self.slots[bucket] = (pos as u32).wrapping_add(1);
        match previous {
            0 => None,
            stored => Some(stored as usize - 1),
        }
    }

    /// Forget all recorded positions
    pub fn clear(&mut self) {
        self.slots.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_u32() {
        assert_eq!(load_u32(b"\x01\x02\x03\x04\x05", 0), 0x0403_0201);
        assert_eq!(load_u32(b"\x01\x02\x03\x04\x05", 1), 0x0504_0302);
    }

    #[test]
    fn test_table_sizing() {
        assert_eq!(HashTable::for_input(0).len(), 1 << MIN_TABLE_BITS);
        assert_eq!(HashTable::for_input(256).len(), 256);
        assert_eq!(HashTable::for_input(257).len(), 512);
        assert_eq!(HashTable::for_input(10_000).len(), 16_384);
        assert_eq!(HashTable::for_input(1 << 20).len(), 1 << MAX_TABLE_BITS);
        assert_eq!(HashTable::with_bits(30).len(), 1 << MAX_TABLE_BITS);
    }

    #[test]
    fn test_bucket_in_range() {
        let table = HashTable::with_bits(9);
        for fingerprint in [0u32, 1, 0xDEAD_BEEF, u32::MAX] {
            assert!(table.bucket(fingerprint) < table.len());
        }
    }

    #[test]
    fn test_insert_lookup() {
        let mut table = HashTable::for_input(64);
        let fingerprint = load_u32(b"abcd", 0);

        assert_eq!(table.lookup(fingerprint), None);
        table.insert(fingerprint, 0);
        assert_eq!(table.lookup(fingerprint), Some(0));
        table.insert(fingerprint, 17);
        assert_eq!(table.lookup(fingerprint), Some(17));

        assert_eq!(table.replace(fingerprint, 40), Some(17));
        assert_eq!(table.lookup(fingerprint), Some(40));

        table.clear();
        assert_eq!(table.lookup(fingerprint), None);
    }

    #[test]
    fn test_insert_at_bounds() {
        let mut table = HashTable::for_input(8);
        let input = b"abcdab";

        table.insert_at(input, 3); // only 3 bytes left
        assert_eq!(table.lookup(load_u32(b"dab\0", 0)), None);

        table.insert_at(input, 1);
        assert_eq!(table.lookup(load_u32(input, 1)), Some(1));
    }
}
