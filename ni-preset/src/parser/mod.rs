//! Preset blob parser

mod records;

#[cfg(test)]
mod tests;

use sample_shared::ByteReader;

use crate::builder::{GroupBuilder, ProgramBuilder, ZoneBuilder};
use crate::model::{
    EnvelopeSource, EnvelopeTarget, ExternalModulator, InternalModulator, Loop, LoopMode,
    ModDestination, ModSource, Program,
};
use crate::{
    PresetError, RECORD_EXTERNAL_MOD, RECORD_EXTERNAL_MOD_LIST, RECORD_FILE_LIST, RECORD_GROUP,
    RECORD_GROUP_LIST, RECORD_INTERNAL_MOD, RECORD_INTERNAL_MOD_LIST, RECORD_PROGRAM,
    RECORD_ZONE, RECORD_ZONE_LIST,
};
use records::{Record, children};

/// Parse a preset blob into a validated [`Program`]
pub fn parse_preset(blob: &[u8]) -> Result<Program, PresetError> {
    let mut reader = ByteReader::new(blob);
    let root = Record::read(&mut reader, "Program")?;
    if root.id != RECORD_PROGRAM {
        return Err(PresetError::UnexpectedRecord {
            expected: "Program",
            found: root.id,
        });
    }
    if !reader.is_empty() {
        tracing::debug!(unread = reader.remaining(), "ignoring bytes after program record");
    }

    let object = root.object("Program")?;
    let mut fields = object.fields();
    let eof = PresetError::truncated("Program");
    let mut program = ProgramBuilder::new()
        .name(fields.utf16_string().map_err(&eof)?)
        .volume(fields.f32().map_err(&eof)?)
        .pan(fields.f32().map_err(&eof)?)
        .tune(fields.f32().map_err(&eof)?)
        .monolith(fields.u8().map_err(&eof)? != 0);

    for child in children(object.children, "Program") {
        let child = child?;
        match child.id {
            RECORD_GROUP_LIST => {
                for group in children(child.object("GroupList")?.children, "GroupList") {
                    let group = group?;
                    if group.id == RECORD_GROUP {
                        program = program.group(parse_group(&group)?);
                    } else {
                        skip(&group, "GroupList");
                    }
                }
            }
            RECORD_ZONE_LIST => {
                for zone in children(child.object("ZoneList")?.children, "ZoneList") {
                    let zone = zone?;
                    if zone.id == RECORD_ZONE {
                        program = program.zone(parse_zone(&zone)?);
                    } else {
                        skip(&zone, "ZoneList");
                    }
                }
            }
            RECORD_FILE_LIST => program = program.files(parse_file_list(&child)?),
            _ => skip(&child, "Program"),
        }
    }

    let program = program.build()?;
    tracing::debug!(
        name = %program.name,
        version = object.version,
        groups = program.groups.len(),
        zones = program.zone_count(),
        files = program.files.len(),
        "parsed preset"
    );
    Ok(program)
}

fn skip(record: &Record<'_>, parent: &str) {
    tracing::debug!(
        id = record.id,
        bytes = record.body.len(),
        parent,
        "skipping unknown record"
    );
}

fn parse_group(record: &Record<'_>) -> Result<GroupBuilder, PresetError> {
    let object = record.object("Group")?;
    let mut fields = object.fields();
    let eof = PresetError::truncated("Group");

    let mut group = GroupBuilder::new()
        .name(fields.utf16_string().map_err(&eof)?)
        .volume(fields.f32().map_err(&eof)?)
        .pan(fields.f32().map_err(&eof)?)
        .tune(fields.f32().map_err(&eof)?)
        .reverse(fields.u8().map_err(&eof)? != 0)
        .has_filter(fields.u8().map_err(&eof)? != 0);

    for child in children(object.children, "Group") {
        let child = child?;
        match child.id {
            RECORD_EXTERNAL_MOD_LIST => {
                for m in children(child.object("ExternalModList")?.children, "ExternalModList") {
                    let m = m?;
                    if m.id == RECORD_EXTERNAL_MOD {
                        group = group.external_mod(parse_external_mod(&m)?);
                    } else {
                        skip(&m, "ExternalModList");
                    }
                }
            }
            RECORD_INTERNAL_MOD_LIST => {
                for m in children(child.object("InternalModList")?.children, "InternalModList") {
                    let m = m?;
                    if m.id == RECORD_INTERNAL_MOD {
                        group = group.internal_mod(parse_internal_mod(&m)?);
                    } else {
                        skip(&m, "InternalModList");
                    }
                }
            }
            _ => skip(&child, "Group"),
        }
    }
    Ok(group)
}

fn parse_zone(record: &Record<'_>) -> Result<ZoneBuilder, PresetError> {
    let object = record.object("Zone")?;
    let mut f = object.fields();
    let eof = PresetError::truncated("Zone");

    let group_index = f.i32().map_err(&eof)?;
    let file_index = f.i32().map_err(&eof)?;
    let (key_low, key_high) = (f.u8().map_err(&eof)?, f.u8().map_err(&eof)?);
    let (vel_low, vel_high) = (f.u8().map_err(&eof)?, f.u8().map_err(&eof)?);
    let (key_fade_low, key_fade_high) = (f.u8().map_err(&eof)?, f.u8().map_err(&eof)?);
    let (vel_fade_low, vel_fade_high) = (f.u8().map_err(&eof)?, f.u8().map_err(&eof)?);
    let root_key = f.u8().map_err(&eof)?;
    let (sample_start, sample_end) = (f.u32().map_err(&eof)?, f.u32().map_err(&eof)?);

    let mut zone = ZoneBuilder::new()
        .group_index(group_index)
        .file_index(file_index)
        .key_range(key_low, key_high)
        .velocity_range(vel_low, vel_high)
        .key_fade(key_fade_low, key_fade_high)
        .velocity_fade(vel_fade_low, vel_fade_high)
        .root_key(root_key)
        .sample_range(sample_start, sample_end)
        .volume(f.f32().map_err(&eof)?)
        .pan(f.f32().map_err(&eof)?)
        .tune(f.f32().map_err(&eof)?);

    let loop_count = f.u8().map_err(&eof)?;
    for _ in 0..loop_count {
        zone = zone.add_loop(parse_loop(&mut f)?);
    }
    Ok(zone)
}

fn parse_loop(f: &mut ByteReader<'_>) -> Result<Loop, PresetError> {
    let eof = PresetError::truncated("Loop");
    let raw_mode = f.u8().map_err(&eof)?;
    let mode = LoopMode::from_u8(raw_mode).ok_or(PresetError::LoopMode(raw_mode))?;
    Ok(Loop {
        mode,
        start: f.u32().map_err(&eof)?,
        length: f.u32().map_err(&eof)?,
        crossfade: f.u32().map_err(&eof)?,
        alternating: f.u8().map_err(&eof)? != 0,
    })
}

fn parse_external_mod(record: &Record<'_>) -> Result<ExternalModulator, PresetError> {
    let object = record.object("ExternalMod")?;
    let mut f = object.fields();
    let eof = PresetError::truncated("ExternalMod");
    Ok(ExternalModulator {
        source: ModSource::from_u16(f.u16().map_err(&eof)?),
        destination: ModDestination::from_u16(f.u16().map_err(&eof)?),
        intensity: f.f32().map_err(&eof)?,
    })
}

fn parse_internal_mod(record: &Record<'_>) -> Result<InternalModulator, PresetError> {
    let object = record.object("InternalMod")?;
    let mut f = object.fields();
    let eof = PresetError::truncated("InternalMod");
    Ok(InternalModulator {
        target: EnvelopeTarget::from_u16(f.u16().map_err(&eof)?),
        source: EnvelopeSource::from_u16(f.u16().map_err(&eof)?),
        depth: f.f32().map_err(&eof)?,
        attack: f.f32().map_err(&eof)?,
        hold: f.f32().map_err(&eof)?,
        decay: f.f32().map_err(&eof)?,
        sustain: f.f32().map_err(&eof)?,
        release: f.f32().map_err(&eof)?,
    })
}

fn parse_file_list(record: &Record<'_>) -> Result<Vec<String>, PresetError> {
    let object = record.object("FileList")?;
    let mut f = object.fields();
    let eof = PresetError::truncated("FileList");
    let count = f.u32().map_err(&eof)?;
    let mut paths = Vec::new();
    for _ in 0..count {
        paths.push(f.utf16_string().map_err(&eof)?);
    }
    Ok(paths)
}
