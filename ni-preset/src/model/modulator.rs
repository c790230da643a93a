//! External and internal modulators

use serde::Serialize;

/// External modulation source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModSource {
    PitchBend,
    Velocity,
    ReleaseVelocity,
    ModWheel,
    Aftertouch,
    Lfo,
    Other(u16),
}

impl ModSource {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => ModSource::PitchBend,
            1 => ModSource::Velocity,
            2 => ModSource::ReleaseVelocity,
            3 => ModSource::ModWheel,
            4 => ModSource::Aftertouch,
            5 => ModSource::Lfo,
            other => ModSource::Other(other),
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            ModSource::PitchBend => 0,
            ModSource::Velocity => 1,
            ModSource::ReleaseVelocity => 2,
            ModSource::ModWheel => 3,
            ModSource::Aftertouch => 4,
            ModSource::Lfo => 5,
            ModSource::Other(value) => value,
        }
    }

    pub fn is_velocity(self) -> bool {
        matches!(self, ModSource::Velocity | ModSource::ReleaseVelocity)
    }
}

/// External modulation destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModDestination {
    Volume,
    AmpVolume,
    SourceVolume,
    Pitch,
    SourceTune,
    Pan,
    Cutoff,
    Other(u16),
}

impl ModDestination {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => ModDestination::Volume,
            1 => ModDestination::AmpVolume,
            2 => ModDestination::SourceVolume,
            3 => ModDestination::Pitch,
            4 => ModDestination::SourceTune,
            5 => ModDestination::Pan,
            6 => ModDestination::Cutoff,
            other => ModDestination::Other(other),
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            ModDestination::Volume => 0,
            ModDestination::AmpVolume => 1,
            ModDestination::SourceVolume => 2,
            ModDestination::Pitch => 3,
            ModDestination::SourceTune => 4,
            ModDestination::Pan => 5,
            ModDestination::Cutoff => 6,
            ModDestination::Other(value) => value,
        }
    }

    pub fn is_pitch(self) -> bool {
        matches!(self, ModDestination::Pitch | ModDestination::SourceTune)
    }

    pub fn is_volume(self) -> bool {
        matches!(
            self,
            ModDestination::Volume | ModDestination::AmpVolume | ModDestination::SourceVolume
        )
    }
}

/// Controller routing with an intensity scalar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExternalModulator {
    pub source: ModSource,
    pub destination: ModDestination,
    /// For pitch destinations, in octaves
    pub intensity: f32,
}

/// Envelope a group-internal modulator drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnvelopeTarget {
    Volume,
    Pitch,
    Cutoff,
    Other(u16),
}

impl EnvelopeTarget {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => EnvelopeTarget::Volume,
            1 => EnvelopeTarget::Pitch,
            2 => EnvelopeTarget::Cutoff,
            other => EnvelopeTarget::Other(other),
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            EnvelopeTarget::Volume => 0,
            EnvelopeTarget::Pitch => 1,
            EnvelopeTarget::Cutoff => 2,
            EnvelopeTarget::Other(value) => value,
        }
    }
}

/// Envelope shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnvelopeSource {
    Ahdsr,
    Dbd,
    Flex,
    Other(u16),
}

impl EnvelopeSource {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => EnvelopeSource::Ahdsr,
            1 => EnvelopeSource::Dbd,
            2 => EnvelopeSource::Flex,
            other => EnvelopeSource::Other(other),
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            EnvelopeSource::Ahdsr => 0,
            EnvelopeSource::Dbd => 1,
            EnvelopeSource::Flex => 2,
            EnvelopeSource::Other(value) => value,
        }
    }
}

/// Group-internal envelope modulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InternalModulator {
    pub target: EnvelopeTarget,
    pub source: EnvelopeSource,
    pub depth: f32,
    /// Seconds
    pub attack: f32,
    /// Seconds
    pub hold: f32,
    /// Seconds
    pub decay: f32,
    /// 0.0 to 1.0
    pub sustain: f32,
    /// Seconds
    pub release: f32,
}
