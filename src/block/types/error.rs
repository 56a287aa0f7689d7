//! Custom error types for the brotli-blocks crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum BlockError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The first byte of the stream does not carry a valid window-size code.
    #[error("Unexpected window byte: {byte:#04x}")]
    Format { byte: u8 },

    /// The reported meta-block end does not lie past the window-size field.
    #[error("Meta-block range ends at bit {end}, which is not past the {header_bits}-bit stream header")]
    Range { end: usize, header_bits: usize },

    /// The reported meta-block end lies beyond the compressed buffer.
    #[error("Meta-block range ends at bit {end}, but the buffer only holds {available} bits")]
    RangeOutOfBounds { end: usize, available: usize },

    /// The compressed buffer is empty, so there is no window-size byte to read.
    #[error("Compressed buffer is empty")]
    EmptyInput,

    /// No bit offset in the searched tail of the stream closes the final meta-block.
    #[error("Could not locate the end of the final meta-block ({searched} offsets tried)")]
    BoundaryNotFound { searched: usize },

    /// A bit sequence was converted to bytes before being padded to a byte boundary.
    #[error("Bit sequence of {bits} bits is not byte-aligned")]
    Unaligned { bits: usize },

    /// The external codec failed to compress its input.
    #[error("Compression failed: {0}")]
    Compression(String),

    /// The external codec failed to decompress its input, usually because the
    /// stream is corrupted or truncated.
    #[error("Decompression failed: {0}")]
    Decompression(String),

    /// Codec parameters are outside the range the wrapper can represent.
    #[error("Invalid codec configuration: {0}")]
    InvalidConfig(String),

    /// A wrapped bare block decoded to different content than its source stream.
    #[error("Bare block verification failed at byte {offset}: expected {expected} bytes, decoded {actual} bytes")]
    VerificationFailed {
        offset: usize,
        expected: usize,
        actual: usize,
    },
}

/// A convenience `Result` type alias using the crate's `BlockError` type.
pub type Result<T> = std::result::Result<T, BlockError>;
