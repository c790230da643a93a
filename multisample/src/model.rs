//! Neutral instrument data structures

use std::path::PathBuf;

use serde::Serialize;

/// Format-neutral multisample instrument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultisampleInstrument {
    pub name: String,
    pub metadata: InstrumentMetadata,
    /// Samples are embedded in the source container
    pub monolith: bool,
    pub groups: Vec<MultisampleGroup>,
}

impl MultisampleInstrument {
    /// All zones in group order
    pub fn zones(&self) -> impl Iterator<Item = &MultisampleZone> {
        self.groups.iter().flat_map(|g| g.zones.iter())
    }
}

/// Descriptive fields carried over from the container's metadata record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstrumentMetadata {
    pub author: String,
    pub vendor: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultisampleGroup {
    pub name: String,
    pub zones: Vec<MultisampleZone>,
}

/// Inclusive MIDI range with crossfade widths at both edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoteRange {
    pub low: u8,
    pub high: u8,
    pub fade_low: u8,
    pub fade_high: u8,
}

/// One key/velocity mapped sample region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultisampleZone {
    pub sample: SampleReference,
    pub key_range: NoteRange,
    pub velocity_range: NoteRange,
    pub root_key: u8,
    /// Playback region in sample frames
    pub sample_start: u32,
    pub sample_end: u32,
    pub reversed: bool,

    // =========================================================================
    // Levels
    // =========================================================================
    /// Composed gain in dB
    pub gain_db: f64,
    /// Composed pan (-1.0 left to 1.0 right)
    pub pan: f64,
    /// Composed tuning in semitones
    pub tune: f64,

    // =========================================================================
    // Modulation
    // =========================================================================
    /// Pitch bend range upwards in cents
    pub bend_up: i32,
    /// Pitch bend range downwards in cents (negative)
    pub bend_down: i32,
    /// Velocity to amplitude depth
    pub amp_velocity_depth: f64,
    pub amp_envelope: Envelope,
    pub pitch_envelope: Envelope,
    pub filter_envelope: Envelope,

    pub loops: Vec<SampleLoop>,
}

/// Where a zone's audio comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleReference {
    /// Path as stored in the preset's file table
    pub path: String,
    /// Location on disk; `None` when the sample is embedded
    pub resolved: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum EnvelopeShape {
    #[default]
    Ahdsr,
    Dbd,
    Flex,
}

/// Envelope with modulation depth; times in seconds, sustain as a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Envelope {
    pub shape: EnvelopeShape,
    pub depth: f64,
    pub attack: f64,
    pub hold: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            shape: EnvelopeShape::Ahdsr,
            depth: 0.0,
            attack: 0.0,
            hold: 0.0,
            decay: 0.0,
            sustain: 1.0,
            release: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoopType {
    Forward,
    Alternating,
}

/// Sustain loop; `end` is exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleLoop {
    pub loop_type: LoopType,
    pub start: u32,
    pub end: u32,
    pub crossfade: u32,
}

impl SampleLoop {
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
