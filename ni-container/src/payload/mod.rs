//! Chunk payload decoders and encoders, one per chunk kind

mod authoring;
mod sound_info;
mod sub_tree;

pub use authoring::{AuthoringApp, AuthoringApplication};
pub use sound_info::SoundInfo;
pub use sub_tree::SubTree;

use sample_shared::ByteReader;

use crate::{ChunkType, ContainerError};

/// Opaque preset blob, parsed later by the preset object model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetBlob(pub Vec<u8>);

impl PresetBlob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// A known chunk kind without a decoder; the payload is kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedChunk {
    pub chunk_type: ChunkType,
    pub raw: Vec<u8>,
}

/// Decoded payload of a chunk
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkData {
    Terminator,
    AuthoringApplication(AuthoringApplication),
    SoundInfo(SoundInfo),
    SubTree(SubTree),
    Preset(PresetBlob),
    Unsupported(UnsupportedChunk),
}

impl ChunkData {
    /// Decode the payload of a chunk of the given type.
    ///
    /// Bytes left over after the decoder finishes are ignored.
    pub fn decode(chunk_type: ChunkType, payload: &[u8]) -> Result<Self, ContainerError> {
        let mut reader = ByteReader::new(payload);
        let data = match chunk_type {
            ChunkType::Terminator => ChunkData::Terminator,
            ChunkType::AuthoringApplication => ChunkData::AuthoringApplication(
                AuthoringApplication::decode(&mut reader)
                    .map_err(|e| ContainerError::payload(chunk_type, e))?,
            ),
            ChunkType::SoundInfo => ChunkData::SoundInfo(
                SoundInfo::decode(&mut reader)
                    .map_err(|e| ContainerError::payload(chunk_type, e))?,
            ),
            ChunkType::SubTree => ChunkData::SubTree(SubTree::decode(&mut reader)?),
            ChunkType::Preset => ChunkData::Preset(PresetBlob(payload.to_vec())),
            ChunkType::Authorization
            | ChunkType::ControllerAssignments
            | ChunkType::Resources
            | ChunkType::BniSoundHeader => ChunkData::Unsupported(UnsupportedChunk {
                chunk_type,
                raw: payload.to_vec(),
            }),
        };

        if !reader.is_empty() && !matches!(data, ChunkData::Preset(_) | ChunkData::Unsupported(_))
        {
            tracing::trace!(
                chunk = chunk_type.name(),
                unread = reader.remaining(),
                "ignoring trailing payload bytes"
            );
        }
        Ok(data)
    }

    /// Serialize the payload
    pub fn encode(&self, out: &mut Vec<u8>) {
        match self {
            ChunkData::Terminator => {}
            ChunkData::AuthoringApplication(app) => app.encode(out),
            ChunkData::SoundInfo(info) => info.encode(out),
            ChunkData::SubTree(sub) => sub.encode(out),
            ChunkData::Preset(blob) => out.extend_from_slice(&blob.0),
            ChunkData::Unsupported(chunk) => out.extend_from_slice(&chunk.raw),
        }
    }

    pub fn chunk_type(&self) -> ChunkType {
        match self {
            ChunkData::Terminator => ChunkType::Terminator,
            ChunkData::AuthoringApplication(_) => ChunkType::AuthoringApplication,
            ChunkData::SoundInfo(_) => ChunkType::SoundInfo,
            ChunkData::SubTree(_) => ChunkType::SubTree,
            ChunkData::Preset(_) => ChunkType::Preset,
            ChunkData::Unsupported(chunk) => chunk.chunk_type,
        }
    }
}

/// Write a `u32` character count followed by UTF-16LE code units
pub(crate) fn write_utf16(out: &mut Vec<u8>, s: &str) {
    let units: Vec<u16> = s.encode_utf16().collect();
    out.extend_from_slice(&(units.len() as u32).to_le_bytes());
    for unit in units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
}
