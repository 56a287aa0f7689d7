//! Bit-addressable buffer used to slice and pad meta-blocks.
//!
//! Bits are numbered LSB first within each byte, matching the order in which
//! a Brotli decoder consumes them: bit `i` lives in byte `i / 8` at position
//! `i % 8`.

use crate::block::types::error::{BlockError, Result};

/// An owned, mutable sequence of bits with an explicit logical length.
///
/// The backing storage may hold more bits than the logical length. Bits past
/// the logical length are never observed: growing the sequence zeroes them
/// first.
#[derive(Debug, Clone, Default)]
pub struct BitSequence {
    bytes: Vec<u8>,
    len: usize,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a byte buffer; the logical length covers every bit.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            len: bytes.len() * 8,
        }
    }

    /// Logical length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bits the backing storage can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len() * 8
    }

    #[inline]
    pub fn is_byte_aligned(&self) -> bool {
        self.len % 8 == 0
    }

    /// Read bit `index`, or `None` past the logical length.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some((self.bytes[index / 8] >> (index % 8)) & 1 != 0)
    }

    /// Set bit `index`.
    ///
    /// # Panics
    /// Panics if `index` is not below the logical length.
    #[inline]
    pub fn set(&mut self, index: usize, bit: bool) {
        assert!(
            index < self.len,
            "bit index {} out of range for length {}",
            index,
            self.len
        );
        let mask = 1u8 << (index % 8);
        if bit {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Discard the first `count` bits, so that bit `count` becomes bit 0.
    ///
    /// Shifting by the whole length or more leaves an empty sequence.
    pub fn shift_down(&mut self, count: usize) {
        if count >= self.len {
            self.bytes.clear();
            self.len = 0;
            return;
        }

        let byte_shift = count / 8;
        let bit_shift = count % 8;
        self.bytes.drain(..byte_shift);

        if bit_shift != 0 {
            for i in 0..self.bytes.len() {
                let next = self.bytes.get(i + 1).copied().unwrap_or(0);
                self.bytes[i] = (self.bytes[i] >> bit_shift) | (next << (8 - bit_shift));
            }
        }
        self.len -= count;
    }

    /// Shorten the logical length. Has no effect if `len` is not shorter.
    ///
    /// The backing storage is kept, so capacity does not change.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    /// Set the logical length, zero-filling any newly exposed bits.
    pub fn resize(&mut self, new_len: usize) {
        if new_len <= self.len {
            self.len = new_len;
            return;
        }

        let old_len = self.len;
        let needed = new_len.div_ceil(8);
        if self.bytes.len() < needed {
            self.bytes.resize(needed, 0);
        }

        // Clear stale bits in the partially used byte, then whole bytes after it.
        if old_len % 8 != 0 {
            let byte = old_len / 8;
            self.bytes[byte] &= (1u8 << (old_len % 8)) - 1;
        }
        for byte in old_len.div_ceil(8)..needed {
            self.bytes[byte] = 0;
        }
        self.len = new_len;
    }

    /// Append the low `count` bits of `value`, LSB first.
    pub fn push_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32);
        let start = self.len;
        self.resize(start + count as usize);
        for i in 0..count as usize {
            self.set(start + i, (value >> i) & 1 != 0);
        }
    }

    /// Iterate the bits within the logical length.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| (self.bytes[i / 8] >> (i % 8)) & 1 != 0)
    }

    /// Consume the sequence, returning exactly `len / 8` bytes.
    ///
    /// # Errors
    /// Returns [`BlockError::Unaligned`] if the length is not a multiple of 8.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        if !self.is_byte_aligned() {
            return Err(BlockError::Unaligned { bits: self.len });
        }
        self.bytes.truncate(self.len / 8);
        Ok(self.bytes)
    }
}

/// Sequences are equal when their logical bits are equal, whatever the
/// backing capacity.
impl PartialEq for BitSequence {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for BitSequence {}
