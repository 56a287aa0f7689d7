//! Core data structures shared by the extraction pipeline.

/// Absolute bit offsets into a compressed buffer.
///
/// `end` is one past the last bit of the final meta-block that carries data.
/// `start` is where the reported bits begin. Produced by
/// [`Codec::decompress_with_range`](crate::block::codec::Codec::decompress_with_range)
/// and consumed once by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaBlockBitRange {
    pub start: usize,
    pub end: usize,
}

impl MetaBlockBitRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bits covered by the range.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How the final data-carrying meta-block is closed in its source stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockClosing {
    /// More meta-blocks follow (a flushed stream). The bare block is padded
    /// with the empty metadata marker and can be spliced anywhere.
    #[default]
    Continued,
    /// The block carries ISLAST itself. Its bare block is zero-padded and
    /// ends any stream it is wrapped into, so it must be spliced last.
    Final,
}

/// Output of a range-reporting decompression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The fully decompressed content of the stream.
    pub content: Vec<u8>,
    /// Where the final data-carrying meta-block ends.
    pub last_block: MetaBlockBitRange,
    pub closing: BlockClosing,
}

/// A bare block together with what it was cut from.
///
/// The bare block holds the meta-block bits followed by alignment padding,
/// with no stream header or terminator. Its length is always a whole number
/// of bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock {
    /// Decompressed content of the source stream.
    pub decompressed: Vec<u8>,
    /// The byte-aligned bare block.
    pub bare_block: Vec<u8>,
    /// Bit range the codec reported for the final meta-block.
    pub range: MetaBlockBitRange,
    pub closing: BlockClosing,
}
