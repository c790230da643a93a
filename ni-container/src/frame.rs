//! Length framing shared by the NI container and IFF/RIFF readers.
//!
//! A frame is read in full before anything inside it is interpreted, so a
//! malformed chunk can only corrupt itself and the outer cursor always moves
//! by exactly the declared length.

use std::io::Read;

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};

use crate::error::ContainerError;
use crate::{CHUNK_HEADER_SIZE, FRAME_LENGTH_SIZE};

/// How a frame declares its length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLayout {
    /// `u64` LE total length (length field included)
    NiContainer,
    /// 4-byte tag + `u32` LE body length, odd bodies padded to even
    Riff,
    /// 4-byte tag + `u32` BE body length, odd bodies padded to even
    Iff,
}

impl FrameLayout {
    /// Bytes in front of the body
    pub const fn prefix_len(self) -> usize {
        match self {
            FrameLayout::NiContainer => FRAME_LENGTH_SIZE,
            FrameLayout::Riff | FrameLayout::Iff => 8,
        }
    }

    fn tagged_length(self, raw: [u8; 4]) -> u32 {
        match self {
            FrameLayout::Iff => BigEndian::read_u32(&raw),
            _ => LittleEndian::read_u32(&raw),
        }
    }
}

/// One buffered frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Chunk tag for IFF/RIFF frames, `None` for NI frames
    pub tag: Option<[u8; 4]>,
    /// Exactly the declared number of body bytes
    pub body: Vec<u8>,
}

/// Read one frame from a stream, buffering exactly its declared body.
pub fn read_frame<R: Read>(reader: &mut R, layout: FrameLayout) -> Result<Frame, ContainerError> {
    let (tag, body_len) = match layout {
        FrameLayout::NiContainer => {
            let length = reader.read_u64::<LittleEndian>().map_err(eof_as_truncated(8))?;
            (None, ni_body_len(length)?)
        }
        FrameLayout::Riff | FrameLayout::Iff => {
            let mut tag = [0u8; 4];
            reader
                .read_exact(&mut tag)
                .map_err(eof_as_truncated(8))?;
            let mut raw = [0u8; 4];
            reader.read_exact(&mut raw).map_err(eof_as_truncated(8))?;
            (Some(tag), layout.tagged_length(raw) as u64)
        }
    };

    let mut body = Vec::new();
    let read = reader.by_ref().take(body_len).read_to_end(&mut body)?;
    if (read as u64) < body_len {
        return Err(ContainerError::Truncated {
            declared: body_len,
            available: read as u64,
        });
    }

    if tag.is_some() && body_len % 2 == 1 {
        // A missing pad byte at the very end of a file is tolerated
        let mut pad = [0u8; 1];
        let _ = reader.read(&mut pad)?;
    }

    Ok(Frame { tag, body })
}

/// Split the frame at the head of `bytes` into `(tag, body, rest)`.
pub(crate) fn split_frame(
    bytes: &[u8],
    layout: FrameLayout,
) -> Result<(Option<[u8; 4]>, &[u8], &[u8]), ContainerError> {
    let prefix = layout.prefix_len();
    if bytes.len() < prefix {
        return Err(ContainerError::Truncated {
            declared: prefix as u64,
            available: bytes.len() as u64,
        });
    }

    let (tag, body_len) = match layout {
        FrameLayout::NiContainer => (None, ni_body_len(LittleEndian::read_u64(&bytes[..8]))?),
        FrameLayout::Riff | FrameLayout::Iff => {
            let tag = [bytes[0], bytes[1], bytes[2], bytes[3]];
            let raw = [bytes[4], bytes[5], bytes[6], bytes[7]];
            (Some(tag), layout.tagged_length(raw) as u64)
        }
    };

    let available = (bytes.len() - prefix) as u64;
    if body_len > available {
        return Err(ContainerError::Truncated {
            declared: body_len,
            available,
        });
    }

    let body_end = prefix + body_len as usize;
    let mut rest_start = body_end;
    if tag.is_some() && body_len % 2 == 1 && rest_start < bytes.len() {
        rest_start += 1;
    }
    Ok((tag, &bytes[prefix..body_end], &bytes[rest_start..]))
}

/// NI frame lengths include the length field and must fit a header
fn ni_body_len(length: u64) -> Result<u64, ContainerError> {
    let minimum = (FRAME_LENGTH_SIZE + CHUNK_HEADER_SIZE) as u64;
    if length < minimum {
        return Err(ContainerError::FrameTooShort { length, minimum });
    }
    Ok(length - FRAME_LENGTH_SIZE as u64)
}

fn eof_as_truncated(declared: u64) -> impl Fn(std::io::Error) -> ContainerError {
    move |e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            ContainerError::Truncated {
                declared,
                available: 0,
            }
        } else {
            ContainerError::Io(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ni_frame(body: &[u8]) -> Vec<u8> {
        let mut out = ((body.len() + 8) as u64).to_le_bytes().to_vec();
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn test_read_ni_frame_exact() {
        let mut data = ni_frame(&[7u8; 12]);
        data.extend_from_slice(b"next");
        let mut cursor = Cursor::new(data);

        let frame = read_frame(&mut cursor, FrameLayout::NiContainer).unwrap();
        assert_eq!(frame.tag, None);
        assert_eq!(frame.body, vec![7u8; 12]);
        assert_eq!(cursor.position(), 20);
    }

    #[test]
    fn test_read_ni_frame_truncated() {
        let mut data = ni_frame(&[0u8; 16]);
        data.truncate(18);
        let err = read_frame(&mut Cursor::new(data), FrameLayout::NiContainer).unwrap_err();
        assert!(matches!(
            err,
            ContainerError::Truncated {
                declared: 16,
                available: 10
            }
        ));
    }

    #[test]
    fn test_ni_frame_too_short() {
        let data = 12u64.to_le_bytes();
        let err = read_frame(&mut Cursor::new(data), FrameLayout::NiContainer).unwrap_err();
        assert!(matches!(err, ContainerError::FrameTooShort { length: 12, .. }));
    }

    #[test]
    fn test_split_riff_with_pad() {
        let mut data = b"abcd".to_vec();
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&[1, 2, 3, 0]);
        data.extend_from_slice(b"tail");

        let (tag, body, rest) = split_frame(&data, FrameLayout::Riff).unwrap();
        assert_eq!(tag, Some(*b"abcd"));
        assert_eq!(body, &[1, 2, 3]);
        assert_eq!(rest, b"tail");
    }

    #[test]
    fn test_split_iff_big_endian() {
        let mut data = b"COMM".to_vec();
        data.extend_from_slice(&2u32.to_be_bytes());
        data.extend_from_slice(&[9, 9]);

        let (tag, body, rest) = split_frame(&data, FrameLayout::Iff).unwrap();
        assert_eq!(tag, Some(*b"COMM"));
        assert_eq!(body, &[9, 9]);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_read_riff_frame_missing_final_pad() {
        let mut data = b"data".to_vec();
        data.extend_from_slice(&1u32.to_le_bytes());
        data.push(0x55);
        let frame = read_frame(&mut Cursor::new(data), FrameLayout::Riff).unwrap();
        assert_eq!(frame.body, vec![0x55]);
    }
}
