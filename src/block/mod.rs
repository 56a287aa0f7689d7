//! Bare meta-block extraction and re-wrapping.

pub mod bits;
pub mod codec;
pub mod format;
pub mod types;

use log::{debug, info, warn};

use codec::Codec;
use format::{extract, padding, window, wrapper};
pub use types::error::{BlockError, Result};
use types::models::ExtractedBlock;

/// Cut the final meta-block of a compressed stream into a bare block.
///
/// The stream is decoded once to learn where its final meta-block ends;
/// the bits after the window-size field and up to that end are padded to a
/// byte boundary. A block that carries ISLAST in its source stream is
/// zero-padded instead, and must be the last block of any stream it is
/// spliced into.
///
/// # Errors
/// Returns an error if:
/// - The stream does not decode
/// - The window byte is reserved
/// - The stream carries no data, so its range does not extend past the
///   window-size field ([`BlockError::Range`])
/// - No cut of the stream decodes once re-wrapped, as with uncompressed
///   meta-blocks ([`BlockError::BoundaryNotFound`])
pub fn extract_raw_meta_block<C: Codec + ?Sized>(
    codec: &C,
    buffer: &[u8],
) -> Result<ExtractedBlock> {
    info!("Extracting final meta-block from {} byte stream", buffer.len());

    let first_byte = *buffer.first().ok_or(BlockError::EmptyInput)?;
    let source_window = window::window_bits(first_byte)?;
    if source_window > wrapper::STREAM_WINDOW_BITS {
        warn!(
            "Source window {} exceeds the wrapper window {}; long back-references will not decode after re-wrapping",
            source_window,
            wrapper::STREAM_WINDOW_BITS
        );
    }

    let decoded = codec.decompress_with_range(buffer)?;
    let bits = extract::extract(buffer, decoded.last_block)?;
    let bare_block = padding::close(bits, decoded.closing).into_bytes()?;

    debug!(
        "Bare block: {} bytes for {} decoded bytes",
        bare_block.len(),
        decoded.content.len()
    );
    Ok(ExtractedBlock {
        decompressed: decoded.content,
        bare_block,
        range: decoded.last_block,
        closing: decoded.closing,
    })
}

/// Compress `input` and return only its bare block.
pub fn compress_to_bare_block<C: Codec + ?Sized>(codec: &C, input: &[u8]) -> Result<Vec<u8>> {
    info!("Compressing {} bytes to a bare block", input.len());
    let compressed = codec.compress(input)?;
    extract_raw_meta_block(codec, &compressed).map(|block| block.bare_block)
}

/// Wrap bare blocks, in order, into one stream and decode it.
pub fn decompress_bare_blocks<C, B>(codec: &C, blocks: &[B]) -> Result<Vec<u8>>
where
    C: Codec + ?Sized,
    B: AsRef<[u8]>,
{
    info!("Decoding {} bare block(s)", blocks.len());
    let stream = wrapper::wrap_all(blocks);
    codec.decompress(&stream)
}

/// Check that a bare block decodes on its own to `expected`.
///
/// # Errors
/// Returns [`BlockError::VerificationFailed`] with the first differing
/// offset if the content differs, or the codec error if the wrapped block
/// does not decode at all.
pub fn verify_bare_block<C: Codec + ?Sized>(codec: &C, bare: &[u8], expected: &[u8]) -> Result<()> {
    let actual = codec.decompress(&wrapper::wrap(bare))?;
    if actual == expected {
        debug!("Bare block verified ({} bytes)", expected.len());
        return Ok(());
    }

    let offset = actual
        .iter()
        .zip(expected)
        .position(|(a, e)| a != e)
        .unwrap_or_else(|| actual.len().min(expected.len()));
    Err(BlockError::VerificationFailed {
        offset,
        expected: expected.len(),
        actual: actual.len(),
    })
}
