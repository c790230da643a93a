//! Minimal IFF/RIFF chunk tree reader.
//!
//! Shares its framing with the NI reader. `RIFF` streams are little-endian,
//! `RIFX` and `FORM` streams big-endian. Group chunks (`RIFF`, `RIFX`, `FORM`,
//! `LIST`, `CAT `) carry a form type followed by child chunks; every other
//! chunk is kept as raw data.

use std::io::Read;

use crate::error::ContainerError;
use crate::frame::{FrameLayout, read_frame, split_frame};

const GROUP_TAGS: [&[u8; 4]; 5] = [b"RIFF", b"RIFX", b"FORM", b"LIST", b"CAT "];

/// One IFF/RIFF chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IffChunk {
    pub id: [u8; 4],
    pub body: IffBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IffBody {
    Data(Vec<u8>),
    Group {
        form_type: [u8; 4],
        children: Vec<IffChunk>,
    },
}

impl IffChunk {
    /// Chunk id as text
    pub fn id_str(&self) -> String {
        String::from_utf8_lossy(&self.id).into_owned()
    }

    /// Children of a group chunk; empty for data chunks
    pub fn children(&self) -> &[IffChunk] {
        match &self.body {
            IffBody::Group { children, .. } => children,
            IffBody::Data(_) => &[],
        }
    }

    /// First direct child with the given id
    pub fn find(&self, id: &[u8; 4]) -> Option<&IffChunk> {
        self.children().iter().find(|c| &c.id == id)
    }

    pub fn data(&self) -> Option<&[u8]> {
        match &self.body {
            IffBody::Data(data) => Some(data),
            IffBody::Group { .. } => None,
        }
    }
}

/// Pick the framing from the top-level tag
fn layout_for(tag: &[u8; 4]) -> Result<FrameLayout, ContainerError> {
    match tag {
        b"RIFF" => Ok(FrameLayout::Riff),
        b"RIFX" | b"FORM" => Ok(FrameLayout::Iff),
        other => Err(ContainerError::NotIff(
            String::from_utf8_lossy(other).into_owned(),
        )),
    }
}

/// Parse the IFF/RIFF chunk tree at the head of `bytes`
pub fn parse_iff(bytes: &[u8]) -> Result<IffChunk, ContainerError> {
    if bytes.len() < 4 {
        return Err(ContainerError::Truncated {
            declared: 4,
            available: bytes.len() as u64,
        });
    }
    let layout = layout_for(&[bytes[0], bytes[1], bytes[2], bytes[3]])?;
    let (tag, body, _) = split_frame(bytes, layout)?;
    let id = tag.unwrap_or_default();
    build_chunk(id, body, layout)
}

/// Read one top-level IFF/RIFF chunk from a stream
pub fn read_iff<R: Read>(reader: &mut R) -> Result<IffChunk, ContainerError> {
    let mut tag = [0u8; 4];
    reader.read_exact(&mut tag).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            ContainerError::Truncated {
                declared: 4,
                available: 0,
            }
        } else {
            ContainerError::Io(e)
        }
    })?;
    let layout = layout_for(&tag)?;

    // Put the tag back in front of the stream for the framed read
    let mut chained = std::io::Cursor::new(tag).chain(reader);
    let frame = read_frame(&mut chained, layout)?;
    build_chunk(tag, &frame.body, layout)
}

fn build_chunk(id: [u8; 4], body: &[u8], layout: FrameLayout) -> Result<IffChunk, ContainerError> {
    if !GROUP_TAGS.contains(&&id) {
        return Ok(IffChunk {
            id,
            body: IffBody::Data(body.to_vec()),
        });
    }

    if body.len() < 4 {
        return Err(ContainerError::Truncated {
            declared: 4,
            available: body.len() as u64,
        });
    }
    let form_type = [body[0], body[1], body[2], body[3]];
    let mut rest = &body[4..];
    let mut children = Vec::new();
    while !rest.is_empty() {
        let (tag, child_body, next) = split_frame(rest, layout)?;
        children.push(build_chunk(tag.unwrap_or_default(), child_body, layout)?);
        rest = next;
    }

    Ok(IffChunk {
        id,
        body: IffBody::Group {
            form_type,
            children,
        },
    })
}
