//! Locating the end of the final meta-block of a stream.
//!
//! The `brotli` crate does not expose bit positions, so the end is found
//! by trial decoding. A candidate offset `e` is cut out of the stream exactly as the
//! pipeline cuts a bare block, padded, and wrapped behind the synthetic
//! header. It is accepted when that stream decodes to the stream content.
//! Every accepted offset therefore yields a bare block that decodes.
//!
//! Two closings are tried in order:
//!
//! - Flushed streams end their last data meta-block with more meta-blocks
//!   after it. The cut is followed by a sentinel meta-block, and the decoded
//!   output must end with the sentinel byte.
//! - Streams finished without a flush set ISLAST on the data meta-block
//!   itself. The cut is zero-filled and must decode to the content alone.

use log::{debug, trace};

use super::Codec;
use crate::block::format::{extract, padding, window, wrapper};
use crate::block::types::{
    error::{BlockError, Result},
    models::{BlockClosing, MetaBlockBitRange},
};

/// Uncompressed meta-block holding the single byte [`SENTINEL_BYTE`].
///
/// Bits, LSB first: ISLAST = 0, MNIBBLES = 4 (`00`), MLEN - 1 = 0 over 16
/// bits, ISUNCOMPRESSED = 1, zero padding to the byte boundary, then the
/// payload byte. It must start byte-aligned.
pub const SENTINEL_BLOCK: [u8; 4] = [0x00, 0x00, 0x08, SENTINEL_BYTE];

pub const SENTINEL_BYTE: u8 = 0xA5;

/// Where the final data-carrying meta-block of a stream ends, and how it is
/// closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastBlock {
    pub range: MetaBlockBitRange,
    pub closing: BlockClosing,
}

/// Find the end of the final data-carrying meta-block of `stream`.
///
/// `content` is the decoded content of the whole stream. Candidate offsets
/// are taken from the last `search_bits` bits of the stream, lowest first.
/// The returned range starts right after the window-size field. A stream
/// without content yields an empty range ending at the header, which
/// extraction rejects.
///
/// # Errors
/// - [`BlockError::EmptyInput`] if `stream` is empty
/// - [`BlockError::Format`] if the window byte is reserved
/// - [`BlockError::BoundaryNotFound`] if no candidate offset yields a bare block
///   that decodes to `content`
pub fn last_block_range<C: Codec + ?Sized>(
    codec: &C,
    stream: &[u8],
    content: &[u8],
    search_bits: usize,
) -> Result<LastBlock> {
    let first_byte = *stream.first().ok_or(BlockError::EmptyInput)?;
    let header_bits = window::header_bit_length(first_byte)?;
    if content.is_empty() {
        debug!("Stream carries no data, no meta-block to locate");
        return Ok(LastBlock {
            range: MetaBlockBitRange::new(header_bits, header_bits),
            closing: BlockClosing::Continued,
        });
    }

    let total_bits = stream.len() * 8;
    let lowest = (header_bits + 1).max(total_bits.saturating_sub(search_bits));

    for closing in [BlockClosing::Continued, BlockClosing::Final] {
        for end in lowest..=total_bits {
            let range = MetaBlockBitRange::new(header_bits, end);
            if decodes_as_bare(codec, stream, range, closing, content)? {
                debug!(
                    "Final meta-block ends at bit {} of {} (header {} bits, {:?})",
                    end, total_bits, header_bits, closing
                );
                return Ok(LastBlock { range, closing });
            }
        }
    }

    Err(BlockError::BoundaryNotFound {
        searched: 2 * (total_bits + 1).saturating_sub(lowest),
    })
}

/// Cut `range` out of `stream`, close it, wrap it and check what it decodes to.
fn decodes_as_bare<C: Codec + ?Sized>(
    codec: &C,
    stream: &[u8],
    range: MetaBlockBitRange,
    closing: BlockClosing,
    content: &[u8],
) -> Result<bool> {
    let bits = extract::extract(stream, range)?;
    let bare = padding::close(bits, closing).into_bytes()?;
    let wrapped = match closing {
        BlockClosing::Continued => wrapper::wrap_all(&[&bare[..], &SENTINEL_BLOCK[..]]),
        BlockClosing::Final => wrapper::wrap(&bare),
    };

    let decoded = match codec.decompress(&wrapped) {
        Ok(decoded) => decoded,
        Err(e) => {
            trace!("Candidate end at bit {} rejected: {}", range.end, e);
            return Ok(false);
        }
    };
    let accepted = match closing {
        BlockClosing::Continued => decoded.split_last() == Some((&SENTINEL_BYTE, content)),
        BlockClosing::Final => decoded == content,
    };
    if !accepted {
        trace!(
            "Candidate end at bit {} decoded {} bytes for {} content bytes",
            range.end,
            decoded.len(),
            content.len()
        );
    }
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::codec::BrotliCodec;
    use crate::block::format::wrapper::{STREAM_HEADER, STREAM_TERMINATOR};
    use std::io::Write;

    #[test]
    fn test_sentinel_decodes_alone() {
        let codec = BrotliCodec::default();
        let mut stream = STREAM_HEADER.to_vec();
        stream.extend_from_slice(&SENTINEL_BLOCK);
        stream.extend_from_slice(&STREAM_TERMINATOR);
        assert_eq!(codec.decompress(&stream).unwrap(), vec![SENTINEL_BYTE]);
    }

    #[test]
    fn test_range_inside_stream() {
        let codec = BrotliCodec::default();
        let text = b"trial decoding keeps the meta-block boundary exact. ".repeat(12);
        let compressed = codec.compress(&text).unwrap();
        let last = last_block_range(&codec, &compressed, &text, 64).unwrap();
        assert_eq!(last.closing, BlockClosing::Continued);
        assert_eq!(last.range.start, 4);
        assert!(last.range.end > last.range.start);
        // The terminating empty last meta-block is never part of the range.
        assert!(last.range.end <= (compressed.len() - 1) * 8);
    }

    #[test]
    fn test_unflushed_stream_is_final() {
        let codec = BrotliCodec::default();
        let text = b"a stream finished without a flush sets ISLAST on its data. ".repeat(10);
        let mut writer = brotli::CompressorWriter::new(Vec::new(), 4096, 11, 22);
        writer.write_all(&text).unwrap();
        let compressed = writer.into_inner();

        let last = last_block_range(&codec, &compressed, &text, 64).unwrap();
        assert_eq!(last.closing, BlockClosing::Final);
        assert!(last.range.end <= compressed.len() * 8);
    }

    #[test]
    fn test_empty_content_gives_empty_range() {
        let codec = BrotliCodec::default();
        let compressed = codec.compress(&[]).unwrap();
        let last = last_block_range(&codec, &compressed, &[], 64).unwrap();
        assert!(last.range.is_empty());
        assert_eq!(last.range.end, 4);
    }

    #[test]
    fn test_wrong_content_is_not_found() {
        let codec = BrotliCodec::default();
        let text = b"content that no candidate will ever reproduce. ".repeat(8);
        let compressed = codec.compress(&text).unwrap();
        assert!(matches!(
            last_block_range(&codec, &compressed, b"something else", 64),
            Err(BlockError::BoundaryNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_stream() {
        let codec = BrotliCodec::default();
        assert!(matches!(
            last_block_range(&codec, &[], &[], 64),
            Err(BlockError::EmptyInput)
        ));
    }
}
