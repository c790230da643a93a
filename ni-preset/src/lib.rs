//! NI-Preset: Kontakt preset object model
//!
//! Parses the opaque preset blob found in NI sound containers into a
//! program → group → zone → modulator tree.
//!
//! # Record Layout
//!
//! ```text
//! Record:  [u16 id][u32 length][body]
//! Object:  [u16 version][u32 fields length][fields][u32 children length][child records]
//! ```
//!
//! The blob holds one Program record. Its children are the group list, the
//! zone list and the shared sample file table. Zones refer to their group and
//! sample file by index; both indices are checked when the program is built.
//! Child records with unknown ids are skipped since their length is explicit.
//!
//! # Usage
//!
//! ```ignore
//! use ni_preset::parse_preset;
//!
//! let program = parse_preset(blob.as_bytes())?;
//! for group in &program.groups {
//!     println!("{}: {} zones", group.name, group.zones.len());
//! }
//! ```

mod builder;
mod error;
mod model;
mod parser;
mod writer;

pub use builder::{GroupBuilder, ProgramBuilder, ZoneBuilder};
pub use error::PresetError;
pub use model::{
    EnvelopeSource, EnvelopeTarget, ExternalModulator, Fade, FileTable, Group, InternalModulator,
    Loop, LoopMode, ModDestination, ModSource, Program, Range, Zone,
};
pub use parser::parse_preset;
pub use writer::write_preset;

// =============================================================================
// Record ids
// =============================================================================

pub const RECORD_PROGRAM: u16 = 0x28;
pub const RECORD_GROUP_LIST: u16 = 0x32;
pub const RECORD_GROUP: u16 = 0x33;
pub const RECORD_ZONE_LIST: u16 = 0x34;
pub const RECORD_ZONE: u16 = 0x35;
pub const RECORD_EXTERNAL_MOD_LIST: u16 = 0x36;
pub const RECORD_EXTERNAL_MOD: u16 = 0x37;
pub const RECORD_INTERNAL_MOD_LIST: u16 = 0x3A;
pub const RECORD_INTERNAL_MOD: u16 = 0x3B;
pub const RECORD_FILE_LIST: u16 = 0x4B;

/// Object version written by [`write_preset`]
pub const OBJECT_VERSION: u16 = 0x80;
