//! Codec layer wrapping the external Brotli implementation.
//!
//! The extraction pipeline never touches entropy coding itself. It needs two
//! capabilities from a codec, expressed by the [`Codec`] trait: compress raw
//! bytes into a complete stream, and decompress a stream while reporting
//! where its final meta-block ends.
//!
//! # Submodules
//!
//! - [`compression`][]: [`BrotliCodec`], backed by the `brotli` crate
//! - [`config`][]: Encoder and search settings
//! - [`locate`][]: Finds the final meta-block end by trial decoding of the stream tail

pub mod compression;
pub mod config;
pub mod locate;

pub use compression::BrotliCodec;
pub use config::BrotliConfig;

use crate::block::types::{error::Result, models::Decoded};

/// The capabilities the extraction pipeline needs from a compression library.
pub trait Codec {
    /// Compress `input` into a complete container stream.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Decompress a complete container stream.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Decompress a container stream and report the bit range of its final
    /// data-carrying meta-block.
    fn decompress_with_range(&self, input: &[u8]) -> Result<Decoded>;
}
