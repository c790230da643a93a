//! Zone, key/velocity ranges and loops

use serde::Serialize;

/// Inclusive MIDI range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub low: u8,
    pub high: u8,
}

impl Range {
    pub const FULL: Range = Range { low: 0, high: 127 };

    pub fn new(low: u8, high: u8) -> Self {
        Self { low, high }
    }
}

/// Crossfade widths at the low and high edge of a range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Fade {
    pub low: u8,
    pub high: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoopMode {
    Off,
    UntilEnd,
    UntilRelease,
    OneShot,
}

impl LoopMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(LoopMode::Off),
            1 => Some(LoopMode::UntilEnd),
            2 => Some(LoopMode::UntilRelease),
            3 => Some(LoopMode::OneShot),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            LoopMode::Off => 0,
            LoopMode::UntilEnd => 1,
            LoopMode::UntilRelease => 2,
            LoopMode::OneShot => 3,
        }
    }

    /// Modes that play a sustaining loop
    pub fn is_sustaining(self) -> bool {
        matches!(self, LoopMode::UntilEnd | LoopMode::UntilRelease)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Loop {
    pub mode: LoopMode,
    /// First looped sample frame
    pub start: u32,
    /// Loop length in frames
    pub length: u32,
    /// Crossfade length in frames
    pub crossfade: u32,
    /// Ping-pong instead of forward
    pub alternating: bool,
}

/// Key/velocity mapped sample region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    pub group_index: usize,
    /// Index into the program's [`FileTable`](crate::FileTable)
    pub file_index: usize,
    pub key_range: Range,
    pub velocity_range: Range,
    pub key_fade: Fade,
    pub velocity_fade: Fade,
    pub root_key: u8,
    pub sample_start: u32,
    pub sample_end: u32,
    pub volume: f32,
    pub pan: f32,
    pub tune: f32,
    pub loops: Vec<Loop>,
}
