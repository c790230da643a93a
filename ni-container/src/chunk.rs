//! Owned chunk tree

use core::fmt;

use crate::payload::{ChunkData, PresetBlob, SoundInfo};
use crate::{ChunkType, ContainerError};

/// 4-character tag naming the application or subsystem that wrote a chunk
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainId(pub [u8; 4]);

impl DomainId {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainId(\"{self}\")")
    }
}

/// A single decoded chunk
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub(crate) domain: DomainId,
    pub(crate) chunk_type: ChunkType,
    pub(crate) version: u32,
    pub(crate) data: ChunkData,
}

impl Chunk {
    pub fn new(domain: DomainId, data: ChunkData) -> Self {
        Self {
            domain,
            chunk_type: data.chunk_type(),
            version: crate::CHUNK_VERSION,
            data,
        }
    }

    pub fn domain(&self) -> DomainId {
        self.domain
    }

    pub fn chunk_type(&self) -> ChunkType {
        self.chunk_type
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn data(&self) -> &ChunkData {
        &self.data
    }
}

/// A sibling chain of chunks, terminated by exactly one terminator.
///
/// Stored as a flat sequence; [`ChunkRef::next`] walks it like the on-disk
/// singly-linked form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChunkChain {
    pub(crate) chunks: Vec<Chunk>,
}

impl ChunkChain {
    /// Build a chain from chunks, appending the terminator when missing.
    pub fn from_chunks(mut chunks: Vec<Chunk>, domain: DomainId) -> Self {
        chunks.retain(|c| !c.chunk_type.is_terminal());
        chunks.push(Chunk::new(domain, ChunkData::Terminator));
        Self { chunks }
    }

    /// Number of chunks, terminator included
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    /// Head of the chain
    pub fn first(&self) -> Option<ChunkRef<'_>> {
        (!self.chunks.is_empty()).then_some(ChunkRef {
            chain: self,
            index: 0,
        })
    }

    /// First chunk of the given type in this chain (sub-trees not searched)
    pub fn find(&self, chunk_type: ChunkType) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.chunk_type == chunk_type)
    }

    /// Depth-first search through this chain and its readable sub-trees.
    ///
    /// Encrypted sub-trees are skipped; `encrypted_seen` is set when one was
    /// passed over so callers can tell "absent" from "locked away".
    pub fn find_deep(&self, chunk_type: ChunkType, encrypted_seen: &mut bool) -> Option<&Chunk> {
        let mut stack: Vec<&ChunkChain> = vec![self];
        while let Some(chain) = stack.pop() {
            // Push sub-trees in reverse so the first one is searched first
            let mut nested = Vec::new();
            for chunk in chain.iter() {
                if chunk.chunk_type == chunk_type {
                    return Some(chunk);
                }
                if let ChunkData::SubTree(sub) = &chunk.data {
                    match sub.chain() {
                        Ok(inner) => nested.push(inner),
                        Err(_) => *encrypted_seen = true,
                    }
                }
            }
            stack.extend(nested.into_iter().rev());
        }
        None
    }

    /// Metadata record, searched through readable sub-trees
    pub fn sound_info(&self) -> Option<&SoundInfo> {
        let mut encrypted = false;
        match self.find_deep(ChunkType::SoundInfo, &mut encrypted)?.data() {
            ChunkData::SoundInfo(info) => Some(info),
            _ => None,
        }
    }

    /// Preset blob, searched through readable sub-trees.
    ///
    /// Fails with [`ContainerError::EncryptedSubTree`] when no readable blob
    /// exists but an encrypted sub-tree was passed over.
    pub fn preset(&self) -> Result<Option<&PresetBlob>, ContainerError> {
        let mut encrypted = false;
        match self.find_deep(ChunkType::Preset, &mut encrypted) {
            Some(chunk) => match chunk.data() {
                ChunkData::Preset(blob) => Ok(Some(blob)),
                _ => Ok(None),
            },
            None if encrypted => Err(ContainerError::EncryptedSubTree),
            None => Ok(None),
        }
    }
}

/// Cursor into a chain exposing the sibling link
#[derive(Debug, Clone, Copy)]
pub struct ChunkRef<'a> {
    chain: &'a ChunkChain,
    index: usize,
}

impl<'a> ChunkRef<'a> {
    pub fn chunk(&self) -> &'a Chunk {
        &self.chain.chunks[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The following sibling; always `None` for the terminator
    pub fn next(&self) -> Option<ChunkRef<'a>> {
        if self.chunk().chunk_type.is_terminal() {
            return None;
        }
        let index = self.index + 1;
        (index < self.chain.chunks.len()).then_some(ChunkRef {
            chain: self.chain,
            index,
        })
    }
}
