//! NI-Container: typed chunk container reader
//!
//! Reads the chunk container used by NI sound files (NKI 5+ and friends) into an
//! owned chunk tree, and shares its length framing with a small IFF/RIFF reader.
//!
//! # Chunk Layout
//!
//! ```text
//! [u64 frame length, including these 8 bytes]
//! [4-byte domain tag][u32 type id][u32 version]
//! [sibling chunk frame...]      (absent for the terminator)
//! [payload...]
//! ```
//!
//! Each chunk embeds the frame of its sibling before its own payload, so a chain
//! is a nested sequence of frames ending at exactly one terminator. The reader
//! flattens that nesting into a [`ChunkChain`] without recursing per sibling;
//! recursion only happens for [`SubTree`] payloads, which contain a complete
//! chain of their own.
//!
//! The type id set is closed. An id that is not in [`ChunkType`] is fatal since
//! there is no way to know where the payload of this chunk version ends.
//!
//! # Usage
//!
//! ```ignore
//! use ni_container::{parse_chain, ChunkData};
//!
//! let data = std::fs::read("Piano.nki").unwrap();
//! let chain = parse_chain(&data).unwrap();
//! for chunk in chain.iter() {
//!     println!("{} {:?}", chunk.domain(), chunk.chunk_type());
//! }
//! ```

mod chunk;
mod chunk_type;
mod error;
mod frame;
mod iff;
mod payload;
mod reader;
mod writer;

pub use chunk::{Chunk, ChunkChain, ChunkRef, DomainId};
pub use chunk_type::ChunkType;
pub use error::ContainerError;
pub use frame::{Frame, FrameLayout, read_frame};
pub use iff::{IffBody, IffChunk, parse_iff, read_iff};
pub use payload::{
    AuthoringApp, AuthoringApplication, ChunkData, PresetBlob, SoundInfo, SubTree,
    UnsupportedChunk,
};
pub use reader::{parse_chain, read_chain};
pub use writer::ChunkWriter;

// =============================================================================
// Constants
// =============================================================================

/// The only chunk header version this reader understands
pub const CHUNK_VERSION: u32 = 1;

/// Size of the NI frame length field
pub const FRAME_LENGTH_SIZE: usize = 8;

/// Domain tag + type id + version
pub const CHUNK_HEADER_SIZE: usize = 12;

/// Domain tag written by NI sound containers
pub const DOMAIN_NI_SOUND: DomainId = DomainId(*b"hsin");

/// Domain tag used by Kontakt-specific chunks
pub const DOMAIN_KONTAKT: DomainId = DomainId(*b"4KIN");
