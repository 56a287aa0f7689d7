//! Synthetic stream header and terminator around bare blocks.

/// Minimal stream header.
///
/// Bits, LSB first: WBITS code `1011` (window 22), then an empty metadata
/// meta-block (`0 11 0 00`) and zero padding up to bit 16, so the first bare
/// block starts on a byte boundary.
pub const STREAM_HEADER: [u8; 2] = [0x6b, 0x00];

/// Window size announced by [`STREAM_HEADER`].
pub const STREAM_WINDOW_BITS: u32 = 22;

/// Final meta-block marker: ISLAST = 1, ISLASTEMPTY = 1, zero padding.
pub const STREAM_TERMINATOR: [u8; 1] = [0x03];

/// Wrap a single bare block into a stream a standard decoder accepts.
pub fn wrap(bare: &[u8]) -> Vec<u8> {
    wrap_all(&[bare])
}

/// Splice several bare blocks, in order, between one header and one terminator.
///
/// Each block must have been padded to a byte boundary so the decoder finds
/// the next meta-block header where the previous block ends.
pub fn wrap_all<B: AsRef<[u8]>>(blocks: &[B]) -> Vec<u8> {
    let body: usize = blocks.iter().map(|b| b.as_ref().len()).sum();
    let mut stream = Vec::with_capacity(STREAM_HEADER.len() + body + STREAM_TERMINATOR.len());
    stream.extend_from_slice(&STREAM_HEADER);
    for block in blocks {
        stream.extend_from_slice(block.as_ref());
    }
    stream.extend_from_slice(&STREAM_TERMINATOR);
    stream
}
