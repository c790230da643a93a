//! Error types for NCW decoding

use sample_shared::{ErrorCategory, ReadError, Reportable};
use thiserror::Error;

/// Errors that can occur while decoding an NCW stream.
///
/// Block-level variants carry the block and channel index.
#[derive(Debug, Error)]
pub enum NcwError {
    #[error("Invalid NCW magic 0x{0:08X}")]
    InvalidMagic(u32),

    #[error("Unsupported NCW version 0x{0:X}")]
    UnsupportedVersion(u32),

    #[error("Invalid channel count {0}")]
    InvalidChannelCount(u16),

    /// More than two channels; a decoder limit rather than a format one
    #[error("{0} channels not supported (max 2)")]
    TooManyChannels(u16),

    #[error("Unsupported bit depth {0}")]
    UnsupportedBitDepth(u16),

    #[error("Invalid offset table: address {address}, data {data}")]
    InvalidOffsetTable { address: u32, data: u32 },

    #[error("First block offset is {0}, expected 0")]
    FirstOffsetNotZero(u32),

    #[error("Block offsets decrease at block {block}")]
    OffsetsNotIncreasing { block: usize },

    #[error("Block {block} starts at byte {actual}, table says {expected}")]
    BlockOffsetMismatch {
        block: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid block magic 0x{found:08X} (block {block}, channel {channel})")]
    InvalidBlockMagic {
        block: usize,
        channel: usize,
        found: u32,
    },

    #[error("Invalid bit width {bits} (block {block}, channel {channel})")]
    InvalidBitWidth {
        block: usize,
        channel: usize,
        bits: i16,
    },

    #[error("Unsupported block flags {flags} (block {block}, channel {channel})")]
    UnsupportedFlags {
        block: usize,
        channel: usize,
        flags: u16,
    },

    #[error("Mid/side coding requires 2 channels, stream has {0}")]
    MidSideChannels(u16),

    #[error("Sample value {value} exceeds the bit depth (block {block}, channel {channel})")]
    SampleOutOfRange {
        block: usize,
        channel: usize,
        value: i32,
    },

    #[error("Stream declares {declared} samples, blocks hold {decoded}")]
    SampleCountMismatch { declared: u32, decoded: usize },

    #[error("{0} unread bytes after the last block")]
    UnreadBytes(usize),

    #[error("Truncated NCW stream{}: {source}", block_suffix(.block))]
    Truncated {
        block: Option<usize>,
        #[source]
        source: ReadError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

fn block_suffix(block: &Option<usize>) -> String {
    block.map(|b| format!(" in block {b}")).unwrap_or_default()
}

impl NcwError {
    pub(crate) fn truncated(block: Option<usize>) -> impl Fn(ReadError) -> Self {
        move |source| Self::Truncated { block, source }
    }
}

impl Reportable for NcwError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::TooManyChannels(_) | Self::UnsupportedBitDepth(_) => ErrorCategory::Unsupported,
            Self::Truncated { .. } | Self::Io(_) | Self::Wav(_) => ErrorCategory::Io,
            _ => ErrorCategory::Format,
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidMagic(_) => "ncw.header.magic",
            Self::UnsupportedVersion(_) => "ncw.header.version",
            Self::InvalidChannelCount(_) => "ncw.header.channels",
            Self::TooManyChannels(_) => "ncw.unsupported.channels",
            Self::UnsupportedBitDepth(_) => "ncw.unsupported.bit_depth",
            Self::InvalidOffsetTable { .. } => "ncw.offsets.table",
            Self::FirstOffsetNotZero(_) => "ncw.offsets.first",
            Self::OffsetsNotIncreasing { .. } => "ncw.offsets.order",
            Self::BlockOffsetMismatch { .. } => "ncw.block.offset",
            Self::InvalidBlockMagic { .. } => "ncw.block.magic",
            Self::InvalidBitWidth { .. } => "ncw.block.bits",
            Self::UnsupportedFlags { .. } => "ncw.block.flags",
            Self::MidSideChannels(_) => "ncw.block.mid_side",
            Self::SampleOutOfRange { .. } => "ncw.samples.range",
            Self::SampleCountMismatch { .. } => "ncw.samples.count",
            Self::UnreadBytes(_) => "ncw.unread_bytes",
            Self::Truncated { .. } => "ncw.truncated",
            Self::Io(_) => "ncw.io",
            Self::Wav(_) => "ncw.wav",
        }
    }

    fn message_args(&self) -> Vec<String> {
        match self {
            Self::InvalidMagic(v) => vec![format!("0x{v:08X}")],
            Self::UnsupportedVersion(v) => vec![format!("0x{v:X}")],
            Self::InvalidChannelCount(n)
            | Self::TooManyChannels(n)
            | Self::UnsupportedBitDepth(n)
            | Self::MidSideChannels(n) => vec![n.to_string()],
            Self::InvalidOffsetTable { address, data } => {
                vec![address.to_string(), data.to_string()]
            }
            Self::FirstOffsetNotZero(v) => vec![v.to_string()],
            Self::OffsetsNotIncreasing { block } => vec![block.to_string()],
            Self::BlockOffsetMismatch {
                block,
                expected,
                actual,
            } => vec![block.to_string(), expected.to_string(), actual.to_string()],
            Self::InvalidBlockMagic {
                block,
                channel,
                found,
            } => vec![block.to_string(), channel.to_string(), format!("0x{found:08X}")],
            Self::InvalidBitWidth {
                block,
                channel,
                bits,
            } => vec![block.to_string(), channel.to_string(), bits.to_string()],
            Self::UnsupportedFlags {
                block,
                channel,
                flags,
            } => vec![block.to_string(), channel.to_string(), flags.to_string()],
            Self::SampleOutOfRange {
                block,
                channel,
                value,
            } => vec![block.to_string(), channel.to_string(), value.to_string()],
            Self::SampleCountMismatch { declared, decoded } => {
                vec![declared.to_string(), decoded.to_string()]
            }
            Self::UnreadBytes(n) => vec![n.to_string()],
            Self::Truncated { block, source } => vec![
                block.map(|b| b.to_string()).unwrap_or_default(),
                source.to_string(),
            ],
            Self::Io(e) => vec![e.to_string()],
            Self::Wav(e) => vec![e.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_context_in_message() {
        let err = NcwError::UnsupportedFlags {
            block: 3,
            channel: 1,
            flags: 7,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported block flags 7 (block 3, channel 1)"
        );
        assert_eq!(err.category(), ErrorCategory::Format);
        assert_eq!(err.message_args(), vec!["3", "1", "7"]);
    }

    #[test]
    fn test_truncated_display() {
        let source = ReadError::UnexpectedEof {
            position: 10,
            wanted: 4,
            available: 1,
        };
        let err = NcwError::truncated(Some(2))(source);
        assert!(err.to_string().starts_with("Truncated NCW stream in block 2:"));
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn test_channel_limit_is_unsupported() {
        assert_eq!(
            NcwError::TooManyChannels(6).category(),
            ErrorCategory::Unsupported
        );
    }
}
