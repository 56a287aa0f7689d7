//! Brotli codec backed by the `brotli` crate.

use std::io::Write;

use brotli::CompressorWriter;
use log::{debug, trace, warn};

use super::config::BrotliConfig;
use super::{locate, Codec};
use crate::block::types::{
    error::{BlockError, Result},
    models::Decoded,
};

/// [`Codec`] implementation using the `brotli` crate's streaming encoder and
/// decoder.
///
/// Streams produced by [`compress`](Codec::compress) are flushed before they
/// are finished, so the data meta-blocks are closed by a byte-alignment
/// marker and followed by a separate empty last meta-block. That keeps the
/// end of the final data meta-block inside the stream tail where
/// [`locate`] searches for it.
#[derive(Debug, Clone, Default)]
pub struct BrotliCodec {
    config: BrotliConfig,
}

impl BrotliCodec {
    /// Create a codec after validating `config`.
    ///
    /// # Errors
    /// Returns [`BlockError::InvalidConfig`] if any setting is out of range.
    pub fn new(config: BrotliConfig) -> Result<Self> {
        config.validate()?;
        if !config.splice_safe() {
            warn!(
                "Quality {} bare blocks only decode on their own; splicing needs quality {} or lower",
                config.quality,
                super::config::MAX_SPLICE_QUALITY
            );
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &BrotliConfig {
        &self.config
    }
}

impl Codec for BrotliCodec {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        trace!(
            "Compressing {} bytes (quality={}, lgwin={})",
            input.len(),
            self.config.quality,
            self.config.lgwin
        );
        let mut writer = CompressorWriter::new(
            Vec::with_capacity(input.len() / 2 + 16),
            self.config.buffer_size,
            self.config.quality,
            self.config.lgwin,
        );
        writer
            .write_all(input)
            .map_err(|e| BlockError::Compression(format!("Brotli encoder write failed: {}", e)))?;
        writer
            .flush()
            .map_err(|e| BlockError::Compression(format!("Brotli encoder flush failed: {}", e)))?;
        let compressed = writer.into_inner();

        debug!("Compressed {} bytes -> {} bytes", input.len(), compressed.len());
        Ok(compressed)
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() * 4);
        let mut reader = input;
        brotli::BrotliDecompress(&mut reader, &mut output)
            .map_err(|e| BlockError::Decompression(format!("Brotli stream rejected: {}", e)))?;
        trace!("Decompressed {} bytes -> {} bytes", input.len(), output.len());
        Ok(output)
    }

    fn decompress_with_range(&self, input: &[u8]) -> Result<Decoded> {
        let content = self.decompress(input)?;
        let last =
            locate::last_block_range(self, input, &content, self.config.tail_search_bits)?;
        Ok(Decoded {
            content,
            last_block: last.range,
            closing: last.closing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::types::models::BlockClosing;

    #[test]
    fn test_roundtrip() {
        let codec = BrotliCodec::default();
        let text = b"A Brotli stream round-trips through the codec unchanged. ".repeat(10);
        let compressed = codec.compress(&text).unwrap();
        assert!(compressed.len() < text.len());
        assert_eq!(codec.decompress(&compressed).unwrap(), text);
    }

    #[test]
    fn test_stream_layout() {
        let codec = BrotliCodec::default();
        let compressed = codec.compress(b"layout").unwrap();
        // Window 22 in the low nibble of the first byte.
        assert_eq!(compressed[0] & 0x0F, 0x0B);
        // Flushed before finishing: the stream closes with a separate
        // empty last meta-block.
        assert_eq!(compressed.last(), Some(&0x03));
    }

    #[test]
    fn test_empty_input_roundtrip() {
        let codec = BrotliCodec::default();
        let compressed = codec.compress(&[]).unwrap();
        assert!(codec.decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_garbage() {
        let codec = BrotliCodec::default();
        assert!(matches!(
            codec.decompress(&[0x1b, 0xff, 0xff, 0xff, 0xff]),
            Err(BlockError::Decompression(_))
        ));
    }

    #[test]
    fn test_rejects_truncated_stream() {
        let codec = BrotliCodec::default();
        let text = b"truncated streams must not decode. ".repeat(6);
        let compressed = codec.compress(&text).unwrap();
        assert!(codec.decompress(&compressed[..compressed.len() / 2]).is_err());
    }

    #[test]
    fn test_invalid_config() {
        let config = BrotliConfig::default().with_quality(42);
        assert!(matches!(
            BrotliCodec::new(config),
            Err(BlockError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_reports_range() {
        let codec = BrotliCodec::new(BrotliConfig::default().with_quality(11)).unwrap();
        let text = b"range reporting works at every quality level. ".repeat(20);
        let compressed = codec.compress(&text).unwrap();
        let decoded = codec.decompress_with_range(&compressed).unwrap();
        assert_eq!(decoded.content, text);
        assert_eq!(decoded.last_block.start, 4);
        assert!(decoded.last_block.end > 4);
        assert_eq!(decoded.closing, BlockClosing::Continued);
    }

    #[test]
    fn test_default_config_splices() {
        let codec = BrotliCodec::default();
        assert!(codec.config().splice_safe());
        let codec = BrotliCodec::new(BrotliConfig::default().with_quality(4)).unwrap();
        assert!(!codec.config().splice_safe());
    }
}
