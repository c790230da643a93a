//! Source file loading
//!
//! Each loader reads one file completely and runs it through the matching
//! decoder chain. Nothing partial is returned: a file either yields its model
//! or a [`LoadError`] naming the file.

use std::path::Path;

use multisample::{InstrumentMetadata, MultisampleInstrument, convert_kontakt};
use ni_container::parse_chain;
use ni_ncw::{NcwAudio, decode_ncw};
use ni_preset::parse_preset;
use sample_shared::fs::{MAX_SOURCE_BYTES, extension_lowercase, read_file_with_limit};

use crate::error::{LoadError, SourceError};

/// Kind of source file, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Instrument,
    Sample,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match extension_lowercase(path).as_str() {
            "nki" => Some(SourceKind::Instrument),
            "ncw" => Some(SourceKind::Sample),
            _ => None,
        }
    }
}

fn read_source(path: &Path) -> Result<Vec<u8>, LoadError> {
    read_file_with_limit(path, MAX_SOURCE_BYTES)
        .map_err(|e| LoadError::new(path, SourceError::Read(format!("{e:#}"))))
}

/// Load an NI instrument container and map its preset to the neutral model
pub fn load_instrument(path: &Path) -> Result<MultisampleInstrument, LoadError> {
    let data = read_source(path)?;
    instrument_from_bytes(&data, path).map_err(|e| LoadError::new(path, e))
}

fn instrument_from_bytes(data: &[u8], path: &Path) -> Result<MultisampleInstrument, SourceError> {
    let chain = parse_chain(data)?;
    let blob = chain.preset()?.ok_or(SourceError::NoPreset)?;
    let program = parse_preset(blob.as_bytes())?;
    let mut instrument = convert_kontakt(&program, path)?;

    if let Some(info) = chain.sound_info() {
        if !info.name.is_empty() {
            instrument.name = info.name.clone();
        }
        instrument.metadata = InstrumentMetadata {
            author: info.author.clone(),
            vendor: info.vendor.clone(),
            description: info.description.clone(),
            tags: info.tags.clone(),
        };
    }
    Ok(instrument)
}

/// Load and decode an NCW sample
pub fn load_ncw(path: &Path) -> Result<NcwAudio, LoadError> {
    let data = read_source(path)?;
    decode_ncw(&data).map_err(|e| LoadError::new(path, e))
}
