//! Chunk chain reader

use std::io::Read;

use sample_shared::{ByteReader, ReadError};

use crate::chunk::{Chunk, ChunkChain, DomainId};
use crate::frame::{FrameLayout, read_frame, split_frame};
use crate::payload::ChunkData;
use crate::{CHUNK_VERSION, ChunkType, ContainerError};


/// Header of a chunk whose payload has not been decoded yet
struct PendingChunk<'a> {
    domain: DomainId,
    chunk_type: ChunkType,
    version: u32,
    payload: &'a [u8],
}

/// Read one chunk chain from a stream.
///
/// Exactly one top-level frame is consumed from `reader`.
pub fn read_chain<R: Read>(reader: &mut R) -> Result<ChunkChain, ContainerError> {
    let frame = read_frame(reader, FrameLayout::NiContainer)?;
    parse_frame_body(&frame.body)
}

/// Parse the chunk chain whose frame starts at the head of `bytes`.
///
/// Bytes after the top-level frame are not looked at.
pub fn parse_chain(bytes: &[u8]) -> Result<ChunkChain, ContainerError> {
    let (_, body, _) = split_frame(bytes, FrameLayout::NiContainer)?;
    parse_frame_body(body)
}

/// Walk the nested sibling frames iteratively, then decode every payload.
fn parse_frame_body(body: &[u8]) -> Result<ChunkChain, ContainerError> {
    let mut pending = Vec::new();
    let mut current = body;

    loop {
        let mut reader = ByteReader::new(current);
        let domain = DomainId(reader.tag().map_err(header_truncated)?);
        let type_id = reader.u32().map_err(header_truncated)?;
        let version = reader.u32().map_err(header_truncated)?;

        let Some(chunk_type) = ChunkType::from_id(type_id) else {
            return Err(ContainerError::UnknownChunkType {
                type_id,
                domain: domain.to_string(),
            });
        };
        if version != CHUNK_VERSION {
            return Err(ContainerError::UnsupportedVersion { type_id, version });
        }

        if chunk_type.is_terminal() {
            pending.push(PendingChunk {
                domain,
                chunk_type,
                version,
                payload: reader.rest(),
            });
            break;
        }

        let (_, sibling, payload) = split_frame(reader.rest(), FrameLayout::NiContainer)?;
        pending.push(PendingChunk {
            domain,
            chunk_type,
            version,
            payload,
        });
        current = sibling;
    }

    let chunks = pending
        .into_iter()
        .map(|p| {
            tracing::trace!(
                domain = %p.domain,
                chunk = p.chunk_type.name(),
                bytes = p.payload.len(),
                "decoding chunk"
            );
            Ok(Chunk {
                domain: p.domain,
                chunk_type: p.chunk_type,
                version: p.version,
                data: ChunkData::decode(p.chunk_type, p.payload)?,
            })
        })
        .collect::<Result<Vec<_>, ContainerError>>()?;

    Ok(ChunkChain { chunks })
}

fn header_truncated(e: ReadError) -> ContainerError {
    match e {
        ReadError::UnexpectedEof {
            wanted, available, ..
        } => ContainerError::Truncated {
            declared: wanted as u64,
            available: available as u64,
        },
        ReadError::InvalidString { .. } => ContainerError::Truncated {
            declared: 0,
            available: 0,
        },
    }
}
