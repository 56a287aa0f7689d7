//! Slicing the final meta-block out of a compressed stream.

use log::{debug, trace};

use crate::block::bits::BitSequence;
use crate::block::format::window;
use crate::block::types::{
    error::{BlockError, Result},
    models::MetaBlockBitRange,
};

/// Cut the bits of a compressed stream up to the end of its final meta-block.
///
/// The window-size field is discarded, so bit 0 of the result is the first
/// bit after the stream header. Everything up to `range.end` is kept,
/// including any meta-blocks that precede the final one; the result is not
/// padded.
///
/// # Errors
/// - [`BlockError::EmptyInput`] if `buffer` is empty
/// - [`BlockError::Format`] if the first byte is not a valid window code
/// - [`BlockError::Range`] if `range.end` does not lie past the header bits
/// - [`BlockError::RangeOutOfBounds`] if `range.end` lies past the buffer
pub fn extract(buffer: &[u8], range: MetaBlockBitRange) -> Result<BitSequence> {
    let first_byte = *buffer.first().ok_or(BlockError::EmptyInput)?;
    let header_bits = window::header_bit_length(first_byte)?;
    trace!(
        "Window byte {:#04x} -> {} header bits",
        first_byte,
        header_bits
    );

    if range.end <= header_bits {
        return Err(BlockError::Range {
            end: range.end,
            header_bits,
        });
    }
    let available = buffer.len() * 8;
    if range.end > available {
        return Err(BlockError::RangeOutOfBounds {
            end: range.end,
            available,
        });
    }

    let mut bits = BitSequence::from_bytes(buffer);
    bits.shift_down(header_bits);
    bits.truncate(range.end - header_bits);

    debug!(
        "Extracted {} meta-block bits (stream bits {}..{})",
        bits.len(),
        header_bits,
        range.end
    );
    Ok(bits)
}
