//! Builders for the preset object model
//!
//! Fields are collected in any order; `build()` yields a finished value or
//! reports the first missing required field.

use crate::model::{
    ExternalModulator, Fade, FileTable, Group, InternalModulator, Loop, Program, Range, Zone,
};
use crate::PresetError;

#[derive(Debug, Clone, Default)]
pub struct ZoneBuilder {
    pub(crate) group_index: Option<i32>,
    pub(crate) file_index: Option<i32>,
    key_range: Option<Range>,
    velocity_range: Option<Range>,
    key_fade: Fade,
    velocity_fade: Fade,
    root_key: Option<u8>,
    sample_start: u32,
    sample_end: u32,
    volume: Option<f32>,
    pan: f32,
    tune: Option<f32>,
    loops: Vec<Loop>,
}

impl ZoneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group_index(mut self, index: i32) -> Self {
        self.group_index = Some(index);
        self
    }

    pub fn file_index(mut self, index: i32) -> Self {
        self.file_index = Some(index);
        self
    }

    pub fn key_range(mut self, low: u8, high: u8) -> Self {
        self.key_range = Some(Range::new(low, high));
        self
    }

    pub fn velocity_range(mut self, low: u8, high: u8) -> Self {
        self.velocity_range = Some(Range::new(low, high));
        self
    }

    pub fn key_fade(mut self, low: u8, high: u8) -> Self {
        self.key_fade = Fade { low, high };
        self
    }

    pub fn velocity_fade(mut self, low: u8, high: u8) -> Self {
        self.velocity_fade = Fade { low, high };
        self
    }

    /// Defaults to the low key of the key range
    pub fn root_key(mut self, key: u8) -> Self {
        self.root_key = Some(key);
        self
    }

    pub fn sample_range(mut self, start: u32, end: u32) -> Self {
        self.sample_start = start;
        self.sample_end = end;
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn pan(mut self, pan: f32) -> Self {
        self.pan = pan;
        self
    }

    pub fn tune(mut self, tune: f32) -> Self {
        self.tune = Some(tune);
        self
    }

    pub fn add_loop(mut self, sample_loop: Loop) -> Self {
        self.loops.push(sample_loop);
        self
    }

    pub fn build(self) -> Result<Zone, PresetError> {
        let group_index = non_negative(self.group_index, "group_index")?;
        let file_index = non_negative(self.file_index, "file_index")?;
        let key_range = self.key_range.ok_or_else(|| missing("key_range"))?;
        let velocity_range = self.velocity_range.ok_or_else(|| missing("velocity_range"))?;

        Ok(Zone {
            group_index,
            file_index,
            key_range,
            velocity_range,
            key_fade: self.key_fade,
            velocity_fade: self.velocity_fade,
            root_key: self.root_key.unwrap_or(key_range.low),
            sample_start: self.sample_start,
            sample_end: self.sample_end,
            volume: self.volume.unwrap_or(1.0),
            pan: self.pan,
            tune: self.tune.unwrap_or(1.0),
            loops: self.loops,
        })
    }
}

fn missing(field: &'static str) -> PresetError {
    PresetError::MissingField {
        record: "Zone",
        field,
    }
}

fn non_negative(value: Option<i32>, field: &'static str) -> Result<usize, PresetError> {
    let value = value.ok_or_else(|| missing(field))?;
    usize::try_from(value).map_err(|_| PresetError::NegativeIndex { field, value })
}

#[derive(Debug, Clone, Default)]
pub struct GroupBuilder {
    name: Option<String>,
    volume: Option<f32>,
    pan: f32,
    tune: Option<f32>,
    reverse: bool,
    has_filter: bool,
    external_mods: Vec<ExternalModulator>,
    internal_mods: Vec<InternalModulator>,
}

impl GroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn pan(mut self, pan: f32) -> Self {
        self.pan = pan;
        self
    }

    pub fn tune(mut self, tune: f32) -> Self {
        self.tune = Some(tune);
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn has_filter(mut self, has_filter: bool) -> Self {
        self.has_filter = has_filter;
        self
    }

    pub fn external_mod(mut self, modulator: ExternalModulator) -> Self {
        self.external_mods.push(modulator);
        self
    }

    pub fn internal_mod(mut self, modulator: InternalModulator) -> Self {
        self.internal_mods.push(modulator);
        self
    }

    /// Build a group without zones
    pub fn build(self) -> Result<Group, PresetError> {
        Ok(Group {
            name: self.name.ok_or(PresetError::MissingField {
                record: "Group",
                field: "name",
            })?,
            volume: self.volume.unwrap_or(1.0),
            pan: self.pan,
            tune: self.tune.unwrap_or(1.0),
            reverse: self.reverse,
            has_filter: self.has_filter,
            external_mods: self.external_mods,
            internal_mods: self.internal_mods,
            zones: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProgramBuilder {
    name: Option<String>,
    volume: Option<f32>,
    pan: f32,
    tune: Option<f32>,
    monolith: bool,
    groups: Vec<GroupBuilder>,
    zones: Vec<ZoneBuilder>,
    files: Vec<String>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn pan(mut self, pan: f32) -> Self {
        self.pan = pan;
        self
    }

    pub fn tune(mut self, tune: f32) -> Self {
        self.tune = Some(tune);
        self
    }

    pub fn monolith(mut self, monolith: bool) -> Self {
        self.monolith = monolith;
        self
    }

    pub fn group(mut self, group: GroupBuilder) -> Self {
        self.groups.push(group);
        self
    }

    pub fn zone(mut self, zone: ZoneBuilder) -> Self {
        self.zones.push(zone);
        self
    }

    pub fn files(mut self, files: Vec<String>) -> Self {
        self.files = files;
        self
    }

    /// Build the program, placing each zone into its group.
    ///
    /// Every zone's group index must name a built group and its file index
    /// must fall inside the file table.
    pub fn build(self) -> Result<Program, PresetError> {
        let name = self.name.ok_or(PresetError::MissingField {
            record: "Program",
            field: "name",
        })?;
        let mut groups = self
            .groups
            .into_iter()
            .map(GroupBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;

        for (index, zone) in self.zones.into_iter().enumerate() {
            if let Some(group) = zone.group_index
                && (group < 0 || group as usize >= groups.len())
            {
                return Err(PresetError::GroupIndex {
                    zone: index,
                    group,
                    groups: groups.len(),
                });
            }
            if let Some(file) = zone.file_index
                && (file < 0 || file as usize >= self.files.len())
            {
                return Err(PresetError::FileIndex {
                    zone: index,
                    file,
                    files: self.files.len(),
                });
            }
            let zone = zone.build()?;
            groups[zone.group_index].zones.push(zone);
        }

        Ok(Program {
            name,
            volume: self.volume.unwrap_or(1.0),
            pan: self.pan,
            tune: self.tune.unwrap_or(1.0),
            monolith: self.monolith,
            groups,
            files: FileTable::new(self.files),
        })
    }
}
