//! Multisample: format-neutral multisample instrument model
//!
//! Source presets are converted into this model so that writers for other
//! sampler formats only have to understand one representation.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐
//! │  Kontakt preset    │   ni_preset::Program
//! │  (program/groups/  │
//! │   zones/modulators)│
//! └─────────┬──────────┘
//!           │
//!    convert_kontakt()  ── SampleResolver (locates sample files on disk)
//!           │
//!           ▼
//! ┌──────────────────────────────────────────┐
//! │      MultisampleInstrument (neutral)     │
//! │  - groups: Vec<MultisampleGroup>         │
//! │  - zones:  gain dB, pan, tune, loops,    │
//! │            envelopes, sample reference   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Level values are composed linearly across program, group and zone and only
//! converted to decibels and semitones once, when the zone is built.

mod convert;
mod error;
mod model;
mod resolve;

pub use convert::convert_kontakt;
pub use error::MappingError;
pub use model::{
    Envelope, EnvelopeShape, InstrumentMetadata, LoopType, MultisampleGroup,
    MultisampleInstrument, MultisampleZone, NoteRange, SampleLoop, SampleReference,
};
pub use resolve::SampleResolver;

/// Gain reported for a silent (non-positive) linear level
pub const SILENCE_DB: f64 = -144.0;

/// Decimal places kept for zone tuning in semitones
pub const TUNE_DECIMALS: i32 = 5;
