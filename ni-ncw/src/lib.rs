//! NI-NCW: decoder for the NCW lossless sample codec
//!
//! NCW files hold integer PCM split into blocks of 512 samples per channel.
//! Each channel block is stored with one of three codings, selected by the
//! sign of its `bits` field:
//!
//! | `bits` | Coding | Sample value |
//! |--------|--------|--------------|
//! | `> 0`  | Delta | running base, then `+= delta` per sample |
//! | `< 0`  | Truncated | value read directly at `-bits` width |
//! | `0`    | Native | little-endian at the file's bit depth |
//!
//! Stereo blocks may be mid/side coded, flagged on the first channel block.
//!
//! **This is a decoder only.** There is no NCW encoder.
//!
//! # File Layout
//!
//! ```text
//! Header (120 bytes):
//!   0x00: magic (u32 LE, 0xD69EA801)
//!   0x04: version (u32, 0x130)
//!   0x08: channels (u16)
//!   0x0A: bits_per_sample (u16)
//!   0x0C: sample_rate (u32)
//!   0x10: number_of_samples (u32)
//!   0x14: offset_block_address (u32)
//!   0x18: offset_block_data (u32)
//!   0x1C: total_block_size (u32, ignored)
//!   0x20: reserved (88 bytes)
//!
//! Offset table at offset_block_address:
//!   (data - address) / 4 x u32, relative to offset_block_data
//!
//! Block, per channel:
//!   magic (u32 LE, 0x160C9A3E) | base (i32) | bits (i16) | flags (u16) | reserved (4)
//!   packed samples (|bits| * 64 bytes, or bits_per_sample * 64 when bits = 0)
//! ```
//!
//! Decoding is strict: every block must start at its table offset and the
//! stream must end exactly after the last block.
//!
//! # Usage
//!
//! ```ignore
//! let data = std::fs::read("Piano_C3.ncw")?;
//! let audio = ni_ncw::decode_ncw(&data)?;
//! audio.save_wav("Piano_C3.wav")?;
//! ```

mod bits;
mod block;
mod decode;
mod error;
mod header;
mod wav;

#[cfg(test)]
mod fixture;

pub use block::{BlockHeader, Coding};
pub use decode::{NcwAudio, decode_ncw};
pub use error::NcwError;
pub use header::NcwHeader;

// =============================================================================
// Constants
// =============================================================================

/// File magic, read as a little-endian `u32`
pub const NCW_MAGIC: u32 = 0xD69E_A801;

/// The only accepted format version
pub const NCW_VERSION: u32 = 0x130;

/// Channel block magic, read as a little-endian `u32`
pub const BLOCK_MAGIC: u32 = 0x160C_9A3E;

/// Samples per channel block
pub const BLOCK_SAMPLES: usize = 512;

/// Header size including the reserved region
pub const HEADER_SIZE: usize = 120;

/// Channel block sub-header size
pub const BLOCK_HEADER_SIZE: usize = 14;

/// Highest channel count the decoder handles
pub const MAX_CHANNELS: u16 = 2;
