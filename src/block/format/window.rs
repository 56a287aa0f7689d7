//! Window-size (WBITS) field at the start of every Brotli stream.
//!
//! The field is a prefix code of 1, 4 or 7 bits, read LSB first from the
//! first byte of the stream (RFC 7932, section 9.1):
//!
//! ```text
//! Value    Bit Pattern (rightmost bit read first)
//! -----    -----------
//!    10        0100001
//!    11        0110001
//!    12        1000001
//!    13        1010001
//!    14        1100001
//!    15        1110001
//!    16              0
//!    17        0000001
//!    18           0011
//!    19           0101
//!    20           0111
//!    21           1001
//!    22           1011
//!    23           1101
//!    24           1111
//! ```
//!
//! The 7-bit pattern `0010001` is reserved (large-window streams) and is
//! rejected.

use crate::block::types::error::{BlockError, Result};

/// One row of the window-size prefix code.
///
/// A byte matches a row when `byte & mask == pattern`. Rows are evaluated in
/// table order and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCode {
    pub mask: u8,
    pub pattern: u8,
    /// Number of leading stream bits the field occupies.
    pub bit_length: usize,
    /// Decoded WBITS value, `None` for the reserved pattern.
    pub window_bits: Option<u32>,
}

const fn code(mask: u8, pattern: u8, bit_length: usize, window_bits: u32) -> WindowCode {
    WindowCode {
        mask,
        pattern,
        bit_length,
        window_bits: Some(window_bits),
    }
}

/// Every pattern of the window-size code, in match order.
///
/// Each byte matches exactly one row, so the order only matters for
/// readability: 1-bit, then 4-bit, then 7-bit codes.
pub const WINDOW_CODES: [WindowCode; 16] = [
    code(0x01, 0x00, 1, 16),
    code(0x0F, 0x03, 4, 18),
    code(0x0F, 0x05, 4, 19),
    code(0x0F, 0x07, 4, 20),
    code(0x0F, 0x09, 4, 21),
    code(0x0F, 0x0B, 4, 22),
    code(0x0F, 0x0D, 4, 23),
    code(0x0F, 0x0F, 4, 24),
    code(0x7F, 0x01, 7, 17),
    WindowCode {
        mask: 0x7F,
        pattern: 0x11,
        bit_length: 7,
        window_bits: None,
    },
    code(0x7F, 0x21, 7, 10),
    code(0x7F, 0x31, 7, 11),
    code(0x7F, 0x41, 7, 12),
    code(0x7F, 0x51, 7, 13),
    code(0x7F, 0x61, 7, 14),
    code(0x7F, 0x71, 7, 15),
];

/// Find the code row for the first byte of a stream.
///
/// # Errors
/// Returns [`BlockError::Format`] for the reserved pattern.
pub fn lookup(first_byte: u8) -> Result<&'static WindowCode> {
    WINDOW_CODES
        .iter()
        .find(|code| first_byte & code.mask == code.pattern)
        .filter(|code| code.window_bits.is_some())
        .ok_or(BlockError::Format { byte: first_byte })
}

/// Number of leading bits occupied by the window-size field: 1, 4 or 7.
pub fn header_bit_length(first_byte: u8) -> Result<usize> {
    lookup(first_byte).map(|code| code.bit_length)
}

/// Decoded WBITS value (10..=24).
pub fn window_bits(first_byte: u8) -> Result<u32> {
    lookup(first_byte)?
        .window_bits
        .ok_or(BlockError::Format { byte: first_byte })
}
