//! Closed set of chunk type ids and the id lookup table

use std::sync::OnceLock;

use hashbrown::HashMap;

/// Every chunk type this reader knows about.
///
/// Types without a decoder still belong here so they can be framed and kept
/// as [`UnsupportedChunk`](crate::UnsupportedChunk); anything else is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkType {
    /// End of a chunk chain, empty payload
    Terminator,
    /// Tool id and version string of the authoring application
    AuthoringApplication,
    /// Licensing data
    Authorization,
    /// Host automation assignments
    ControllerAssignments,
    /// Metadata record (name, author, vendor, tags, ...)
    SoundInfo,
    /// Opaque preset blob handed to the preset parser
    Preset,
    /// Embedded resources (images, scripts)
    Resources,
    /// Nested chunk chain, optionally encrypted
    SubTree,
    /// Sound header of a BNI preset
    BniSoundHeader,
}

impl ChunkType {
    pub const ALL: [ChunkType; 9] = [
        ChunkType::Terminator,
        ChunkType::AuthoringApplication,
        ChunkType::Authorization,
        ChunkType::ControllerAssignments,
        ChunkType::SoundInfo,
        ChunkType::Preset,
        ChunkType::Resources,
        ChunkType::SubTree,
        ChunkType::BniSoundHeader,
    ];

    /// Numeric id as stored in the chunk header
    pub const fn id(self) -> u32 {
        match self {
            ChunkType::Terminator => 0x01,
            ChunkType::AuthoringApplication => 0x03,
            ChunkType::Authorization => 0x04,
            ChunkType::ControllerAssignments => 0x6A,
            ChunkType::SoundInfo => 0x6C,
            ChunkType::Preset => 0x71,
            ChunkType::Resources => 0x73,
            ChunkType::SubTree => 0x76,
            ChunkType::BniSoundHeader => 0x7A,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ChunkType::Terminator => "Terminator",
            ChunkType::AuthoringApplication => "AuthoringApplication",
            ChunkType::Authorization => "Authorization",
            ChunkType::ControllerAssignments => "ControllerAssignments",
            ChunkType::SoundInfo => "SoundInfo",
            ChunkType::Preset => "Preset",
            ChunkType::Resources => "Resources",
            ChunkType::SubTree => "SubTree",
            ChunkType::BniSoundHeader => "BniSoundHeader",
        }
    }

    /// Look up a type id. `None` means the id is outside the closed set.
    pub fn from_id(id: u32) -> Option<ChunkType> {
        registry().get(&id).copied()
    }

    /// The terminator is the only type without a following sibling
    pub const fn is_terminal(self) -> bool {
        matches!(self, ChunkType::Terminator)
    }
}

/// id -> type table, built on first use and never mutated afterwards
fn registry() -> &'static HashMap<u32, ChunkType> {
    static REGISTRY: OnceLock<HashMap<u32, ChunkType>> = OnceLock::new();
    REGISTRY.get_or_init(|| ChunkType::ALL.iter().map(|t| (t.id(), *t)).collect())
}
