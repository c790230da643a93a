//! Nested chunk chain payload

use sample_shared::ByteReader;

use crate::writer::ChunkWriter;
use crate::{ChunkChain, ChunkType, ContainerError};

/// A chunk whose payload is itself a chunk chain
#[derive(Debug, Clone, PartialEq)]
pub enum SubTree {
    /// Readable nested chain
    Clear(ChunkChain),
    /// Encrypted content, kept opaque
    Encrypted(Vec<u8>),
}

impl SubTree {
    pub(crate) fn decode(reader: &mut ByteReader<'_>) -> Result<Self, ContainerError> {
        let encrypted = reader
            .u32()
            .map_err(|e| ContainerError::payload(ChunkType::SubTree, e))?
            != 0;
        let rest = reader.rest();
        reader
            .skip(rest.len())
            .map_err(|e| ContainerError::payload(ChunkType::SubTree, e))?;

        if encrypted {
            tracing::debug!(bytes = rest.len(), "encrypted sub-tree kept opaque");
            return Ok(SubTree::Encrypted(rest.to_vec()));
        }
        Ok(SubTree::Clear(crate::reader::parse_chain(rest)?))
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        match self {
            SubTree::Clear(chain) => {
                out.extend_from_slice(&0u32.to_le_bytes());
                out.extend_from_slice(&ChunkWriter::new().write_chain(chain));
            }
            SubTree::Encrypted(raw) => {
                out.extend_from_slice(&1u32.to_le_bytes());
                out.extend_from_slice(raw);
            }
        }
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self, SubTree::Encrypted(_))
    }

    /// The nested chain, or [`ContainerError::EncryptedSubTree`]
    pub fn chain(&self) -> Result<&ChunkChain, ContainerError> {
        match self {
            SubTree::Clear(chain) => Ok(chain),
            SubTree::Encrypted(_) => Err(ContainerError::EncryptedSubTree),
        }
    }
}
