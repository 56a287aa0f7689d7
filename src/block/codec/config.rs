//! Parameters for the Brotli codec.

use crate::block::format::wrapper::STREAM_WINDOW_BITS;
use crate::block::types::error::{BlockError, Result};

/// Highest quality the encoder accepts.
pub const MAX_QUALITY: u32 = 11;

/// Highest quality whose bare blocks can be spliced behind other content.
///
/// Qualities 0 and 1 code every block on its own. From quality 2 on the
/// encoder uses the static dictionary, the distance cache and literal
/// context, all of which depend on the output that precedes a block.
/// Those blocks still decode in isolation.
pub const MAX_SPLICE_QUALITY: u32 = 1;

pub const DEFAULT_QUALITY: u32 = MAX_SPLICE_QUALITY;

/// Smallest window the format can announce.
pub const MIN_LGWIN: u32 = 10;

pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// How many trailing bits of a stream are searched for the final meta-block end.
pub const DEFAULT_TAIL_SEARCH_BITS: usize = 64;

/// Settings for [`BrotliCodec`](super::compression::BrotliCodec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrotliConfig {
    /// Encoder quality, 0..=11. Above [`MAX_SPLICE_QUALITY`] bare blocks
    /// only decode on their own.
    pub quality: u32,
    /// Encoder window, 10..=22. Capped by the window of the synthetic
    /// stream header so back-references stay reachable after re-wrapping.
    pub lgwin: u32,
    /// Internal buffer size for the streaming encoder.
    pub buffer_size: usize,
    /// Number of trailing stream bits searched when locating the final
    /// meta-block end.
    pub tail_search_bits: usize,
}

impl Default for BrotliConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            lgwin: STREAM_WINDOW_BITS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            tail_search_bits: DEFAULT_TAIL_SEARCH_BITS,
        }
    }
}

impl BrotliConfig {
    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_lgwin(mut self, lgwin: u32) -> Self {
        self.lgwin = lgwin;
        self
    }

    pub fn with_tail_search_bits(mut self, bits: usize) -> Self {
        self.tail_search_bits = bits;
        self
    }

    /// Whether bare blocks made with this config decode when spliced after
    /// other blocks.
    pub fn splice_safe(&self) -> bool {
        self.quality <= MAX_SPLICE_QUALITY
    }

    /// Check every field against the range the codec and wrapper support.
    ///
    /// # Errors
    /// Returns [`BlockError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.quality > MAX_QUALITY {
            return Err(BlockError::InvalidConfig(format!(
                "quality {} exceeds {}",
                self.quality, MAX_QUALITY
            )));
        }
        if !(MIN_LGWIN..=STREAM_WINDOW_BITS).contains(&self.lgwin) {
            return Err(BlockError::InvalidConfig(format!(
                "window {} outside {}..={}",
                self.lgwin, MIN_LGWIN, STREAM_WINDOW_BITS
            )));
        }
        if self.buffer_size == 0 {
            return Err(BlockError::InvalidConfig(
                "buffer size must be non-zero".to_string(),
            ));
        }
        if self.tail_search_bits == 0 {
            return Err(BlockError::InvalidConfig(
                "tail search window must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
