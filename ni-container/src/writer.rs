//! Chunk chain writer
//!
//! Produces the nested frame layout the reader expects. Used to re-emit
//! containers and to build fixtures.

use crate::chunk::{Chunk, ChunkChain};
use crate::FRAME_LENGTH_SIZE;

/// Serializes chunk chains into NI container frames
#[derive(Debug, Default)]
pub struct ChunkWriter {
    _private: (),
}

impl ChunkWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize a chain into one top-level frame.
    ///
    /// Frames are built back to front since every chunk embeds its sibling.
    pub fn write_chain(&self, chain: &ChunkChain) -> Vec<u8> {
        let mut tail: Vec<u8> = Vec::new();
        for chunk in chain.chunks.iter().rev() {
            tail = self.write_frame(chunk, &tail);
        }
        tail
    }

    fn write_frame(&self, chunk: &Chunk, sibling: &[u8]) -> Vec<u8> {
        let mut payload = Vec::new();
        chunk.data.encode(&mut payload);

        let mut body = Vec::with_capacity(12 + sibling.len() + payload.len());
        body.extend_from_slice(chunk.domain.as_bytes());
        body.extend_from_slice(&chunk.chunk_type.id().to_le_bytes());
        body.extend_from_slice(&chunk.version.to_le_bytes());
        if !chunk.chunk_type.is_terminal() {
            body.extend_from_slice(sibling);
        }
        body.extend_from_slice(&payload);

        let mut frame = Vec::with_capacity(FRAME_LENGTH_SIZE + body.len());
        frame.extend_from_slice(&((body.len() + FRAME_LENGTH_SIZE) as u64).to_le_bytes());
        frame.extend_from_slice(&body);
        frame
    }
}
