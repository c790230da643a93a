//! Error types for container reading

use sample_shared::{ErrorCategory, ReadError, Reportable};
use thiserror::Error;

use crate::ChunkType;

/// Errors that can occur while reading a chunk container
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The stream ended before a declared frame length was satisfied
    #[error("Stream truncated: frame declares {declared} bytes, {available} available")]
    Truncated { declared: u64, available: u64 },

    /// IO error while reading the underlying stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame length too small to hold the mandatory header
    #[error("Frame too short: {length} bytes (minimum {minimum})")]
    FrameTooShort { length: u64, minimum: u64 },

    /// Header version other than the known one
    #[error("Unsupported chunk version {version} for chunk type 0x{type_id:X}")]
    UnsupportedVersion { type_id: u32, version: u32 },

    /// Type id outside the closed chunk type set
    #[error("Unknown chunk type 0x{type_id:X} in domain '{domain}'")]
    UnknownChunkType { type_id: u32, domain: String },

    /// Payload could not be decoded within its frame
    #[error("Invalid {chunk_type:?} payload: {source}")]
    Payload {
        chunk_type: ChunkType,
        #[source]
        source: ReadError,
    },

    /// Encrypted sub-tree content was requested
    #[error("Encrypted sub-tree is not supported")]
    EncryptedSubTree,

    /// IFF/RIFF group chunk with an unknown top-level tag
    #[error("Not an IFF/RIFF stream: tag '{0}'")]
    NotIff(String),
}

impl ContainerError {
    pub(crate) fn payload(chunk_type: ChunkType, source: ReadError) -> Self {
        Self::Payload { chunk_type, source }
    }
}

impl Reportable for ContainerError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Truncated { .. } | Self::Io(_) => ErrorCategory::Io,
            Self::Payload {
                source: ReadError::UnexpectedEof { .. },
                ..
            } => ErrorCategory::Io,
            Self::EncryptedSubTree => ErrorCategory::Unsupported,
            Self::FrameTooShort { .. }
            | Self::UnsupportedVersion { .. }
            | Self::UnknownChunkType { .. }
            | Self::Payload { .. }
            | Self::NotIff(_) => ErrorCategory::Format,
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            Self::Truncated { .. } => "container.truncated",
            Self::Io(_) => "container.io",
            Self::FrameTooShort { .. } => "container.frame.too_short",
            Self::UnsupportedVersion { .. } => "container.chunk.version",
            Self::UnknownChunkType { .. } => "container.chunk.unknown_type",
            Self::Payload { .. } => "container.chunk.payload",
            Self::EncryptedSubTree => "container.subtree.encrypted",
            Self::NotIff(_) => "container.iff.not_iff",
        }
    }

    fn message_args(&self) -> Vec<String> {
        match self {
            Self::Truncated {
                declared,
                available,
            } => vec![declared.to_string(), available.to_string()],
            Self::Io(e) => vec![e.to_string()],
            Self::FrameTooShort { length, minimum } => {
                vec![length.to_string(), minimum.to_string()]
            }
            Self::UnsupportedVersion { type_id, version } => {
                vec![format!("0x{type_id:X}"), version.to_string()]
            }
            Self::UnknownChunkType { type_id, domain } => {
                vec![format!("0x{type_id:X}"), domain.clone()]
            }
            Self::Payload { chunk_type, source } => {
                vec![chunk_type.name().to_string(), source.to_string()]
            }
            Self::EncryptedSubTree => Vec::new(),
            Self::NotIff(tag) => vec![tag.clone()],
        }
    }
}
