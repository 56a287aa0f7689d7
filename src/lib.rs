//! # brotli-blocks
//!
//! Cut the final meta-block out of a Brotli stream as a byte-aligned
//! "bare block", and splice bare blocks back into streams that any standard
//! Brotli decoder accepts.
//!
//! A bare block has no window-size field and no terminator. Decoding one
//! requires wrapping it with [`STREAM_HEADER`] and [`STREAM_TERMINATOR`];
//! several bare blocks can share one wrapper and decode as the concatenation
//! of their contents.
pub mod block;

// Re-export the main types for convenience
pub use block::{
    bits::BitSequence,
    codec::{BrotliCodec, BrotliConfig, Codec},
    compress_to_bare_block, decompress_bare_blocks, extract_raw_meta_block,
    format::wrapper::{wrap, wrap_all, STREAM_HEADER, STREAM_TERMINATOR},
    types::{
        error::{BlockError, Result},
        models::{BlockClosing, Decoded, ExtractedBlock, MetaBlockBitRange},
    },
    verify_bare_block,
};
