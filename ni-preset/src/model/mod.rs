//! Preset object model

mod modulator;
mod zone;

pub use modulator::{
    EnvelopeSource, EnvelopeTarget, ExternalModulator, InternalModulator, ModDestination,
    ModSource,
};
pub use zone::{Fade, Loop, LoopMode, Range, Zone};

use serde::Serialize;

/// Top-level instrument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub name: String,
    /// Linear gain ratio
    pub volume: f32,
    /// -1.0 (left) to 1.0 (right)
    pub pan: f32,
    /// Linear pitch ratio
    pub tune: f32,
    /// Sample data is embedded in the container
    pub monolith: bool,
    pub groups: Vec<Group>,
    pub files: FileTable,
}

impl Program {
    /// All zones in group order
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.groups.iter().flat_map(|g| g.zones.iter())
    }

    pub fn zone_count(&self) -> usize {
        self.groups.iter().map(|g| g.zones.len()).sum()
    }
}

/// A set of zones sharing volume, modulators and playback direction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub name: String,
    pub volume: f32,
    pub pan: f32,
    pub tune: f32,
    /// Zones of this group play backwards
    pub reverse: bool,
    pub has_filter: bool,
    pub external_mods: Vec<ExternalModulator>,
    pub internal_mods: Vec<InternalModulator>,
    pub zones: Vec<Zone>,
}

impl Group {
    /// First internal modulator driving the given envelope target
    pub fn envelope(&self, target: EnvelopeTarget) -> Option<&InternalModulator> {
        self.internal_mods.iter().find(|m| m.target == target)
    }
}

/// Sample paths shared by all zones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileTable {
    paths: Vec<String>,
}

impl FileTable {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.paths.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}
