//! Byte-alignment padding for extracted meta-blocks.
//!
//! A sequence that does not end on a byte boundary is closed with an empty
//! metadata meta-block header (ISLAST = 0, MNIBBLES = 0 encoded as `11`,
//! reserved bit 0, MSKIPBYTES = 0). The decoder skips such a block without
//! producing output and then jumps to the next byte boundary, which the zero
//! bits after the marker fill.

use log::trace;

use crate::block::bits::BitSequence;
use crate::block::types::models::BlockClosing;

/// Empty metadata meta-block header, written LSB first: `0 11 0 00`.
pub const EMPTY_METADATA_MARKER: u32 = 0x6;

/// Width of [`EMPTY_METADATA_MARKER`] in bits.
pub const MARKER_BITS: usize = 6;

/// Pad `bits` to a whole number of bytes.
///
/// Byte-aligned input is returned unchanged. Otherwise the marker is written
/// at the old end and the remainder of the final byte is zero-filled, which
/// leaves the decoded content of the stream unchanged.
pub fn pad(mut bits: BitSequence) -> BitSequence {
    if bits.is_byte_aligned() {
        return bits;
    }

    let end = bits.len();
    let target_bytes = (end + MARKER_BITS).div_ceil(8);
    bits.resize(target_bytes * 8);
    for i in 0..MARKER_BITS {
        bits.set(end + i, (EMPTY_METADATA_MARKER >> i) & 1 != 0);
    }

    trace!(
        "Padded {} bits to {} bytes with empty metadata marker",
        end,
        target_bytes
    );
    bits
}

/// Pad `bits` to a whole number of bytes with zeros only.
///
/// Used after a meta-block that carries ISLAST: the decoder stops there and
/// requires the rest of the byte to be zero.
pub fn zero_fill(mut bits: BitSequence) -> BitSequence {
    let end = bits.len();
    bits.resize(end.div_ceil(8) * 8);
    bits
}

/// Pad `bits` the way its closing requires.
pub fn close(bits: BitSequence, closing: BlockClosing) -> BitSequence {
    match closing {
        BlockClosing::Continued => pad(bits),
        BlockClosing::Final => zero_fill(bits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn from_bits(bits: &[u8]) -> BitSequence {
        let mut seq = BitSequence::new();
        for &b in bits {
            seq.push_bits(b as u32, 1);
        }
        seq
    }

    #[test]
    fn test_aligned_is_noop() {
        let seq = BitSequence::from_bytes(&[0xDE, 0xAD]);
        let padded = pad(seq.clone());
        assert_eq!(padded, seq);
        assert_eq!(padded.into_bytes().unwrap(), vec![0xDE, 0xAD]);
    }

    #[test]
    fn test_empty_is_noop() {
        let padded = pad(BitSequence::new());
        assert!(padded.is_empty());
    }

    #[test]
    fn test_marker_fits_in_current_byte() {
        // 2 payload bits + 6 marker bits = exactly one byte.
        let padded = pad(from_bits(&[1, 1]));
        assert_eq!(padded.len(), 8);
        // LSB first: 1 1 | 0 1 1 0 0 0
        assert_eq!(padded.into_bytes().unwrap(), vec![0b0001_1011]);
    }

    #[test]
    fn test_marker_spills_into_next_byte() {
        // 5 payload bits + 6 marker bits = 11, rounded up to 16.
        let padded = pad(from_bits(&[1, 0, 1, 0, 1]));
        assert_eq!(padded.len(), 16);
        // LSB first: 1 0 1 0 1 | 0 1 1 | 0 0 0 | 0 0 0 0 0
        assert_eq!(padded.into_bytes().unwrap(), vec![0b1101_0101, 0x00]);
    }

    #[test]
    fn test_marker_after_seven_bits() {
        let padded = pad(from_bits(&[1, 1, 1, 1, 1, 1, 1]));
        assert_eq!(padded.len(), 16);
        assert_eq!(padded.into_bytes().unwrap(), vec![0x7F, 0b0000_0011]);
    }

    #[test]
    fn test_overwrites_stale_capacity() {
        // Truncated bits still sit in the backing storage; padding must not
        // expose them.
        let mut seq = BitSequence::from_bytes(&[0xFF, 0xFF]);
        seq.truncate(3);
        let padded = pad(seq);
        assert_eq!(padded.into_bytes().unwrap(), vec![0b0011_0111, 0x00]);
    }

    #[test]
    fn test_zero_fill() {
        let padded = zero_fill(from_bits(&[1, 0, 1]));
        assert_eq!(padded.into_bytes().unwrap(), vec![0b0000_0101]);

        let mut stale = BitSequence::from_bytes(&[0xFF, 0xFF]);
        stale.truncate(9);
        assert_eq!(zero_fill(stale).into_bytes().unwrap(), vec![0xFF, 0x01]);
    }

    #[test]
    fn test_close_by_kind() {
        let continued = close(from_bits(&[1, 1]), BlockClosing::Continued);
        assert_eq!(continued.into_bytes().unwrap(), vec![0b0001_1011]);
        let last = close(from_bits(&[1, 1]), BlockClosing::Final);
        assert_eq!(last.into_bytes().unwrap(), vec![0b0000_0011]);
    }

    proptest! {
        #[test]
        fn prop_pad_is_byte_aligned(bytes in proptest::collection::vec(any::<u8>(), 0..32), cut in 0usize..8) {
            let mut seq = BitSequence::from_bytes(&bytes);
            seq.truncate(seq.len().saturating_sub(cut));
            prop_assert_eq!(pad(seq).len() % 8, 0);
        }

        #[test]
        fn prop_pad_is_idempotent(bytes in proptest::collection::vec(any::<u8>(), 0..32), cut in 0usize..8) {
            let mut seq = BitSequence::from_bytes(&bytes);
            seq.truncate(seq.len().saturating_sub(cut));
            let once = pad(seq);
            let twice = pad(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_pad_keeps_payload(bytes in proptest::collection::vec(any::<u8>(), 1..32), cut in 1usize..8) {
            let mut seq = BitSequence::from_bytes(&bytes);
            let len = seq.len() - cut;
            seq.truncate(len);
            let payload: Vec<bool> = seq.iter().collect();
            let padded = pad(seq);
            let bits: Vec<bool> = padded.iter().collect();
            prop_assert_eq!(&bits[..len], &payload[..]);
            prop_assert_eq!(&bits[len..len + MARKER_BITS], &[false, true, true, false, false, false][..]);
            prop_assert!(bits[len + MARKER_BITS..].iter().all(|b| !b));
        }
    }
}
