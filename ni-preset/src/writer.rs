//! Preset blob writer
//!
//! Emits the record tree [`parse_preset`](crate::parse_preset) reads. Zones
//! are written group by group.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::model::{ExternalModulator, Group, InternalModulator, Program, Zone};
use crate::{
    OBJECT_VERSION, RECORD_EXTERNAL_MOD, RECORD_EXTERNAL_MOD_LIST, RECORD_FILE_LIST, RECORD_GROUP,
    RECORD_GROUP_LIST, RECORD_INTERNAL_MOD, RECORD_INTERNAL_MOD_LIST, RECORD_PROGRAM,
    RECORD_ZONE, RECORD_ZONE_LIST,
};

/// Serialize a program into a preset blob
pub fn write_preset(program: &Program) -> Vec<u8> {
    let mut fields = Vec::new();
    put_string(&mut fields, &program.name);
    put_f32(&mut fields, program.volume);
    put_f32(&mut fields, program.pan);
    put_f32(&mut fields, program.tune);
    fields.push(program.monolith as u8);

    let groups: Vec<u8> = program.groups.iter().flat_map(group_record).collect();
    let zones: Vec<u8> = program.zones().flat_map(zone_record).collect();

    let mut files = Vec::new();
    put_u32(&mut files, program.files.len() as u32);
    for path in program.files.iter() {
        put_string(&mut files, path);
    }

    let mut children = Vec::new();
    children.extend(object_record(RECORD_GROUP_LIST, &[], &groups));
    children.extend(object_record(RECORD_ZONE_LIST, &[], &zones));
    children.extend(object_record(RECORD_FILE_LIST, &files, &[]));

    object_record(RECORD_PROGRAM, &fields, &children)
}

fn group_record(group: &Group) -> Vec<u8> {
    let mut fields = Vec::new();
    put_string(&mut fields, &group.name);
    put_f32(&mut fields, group.volume);
    put_f32(&mut fields, group.pan);
    put_f32(&mut fields, group.tune);
    fields.push(group.reverse as u8);
    fields.push(group.has_filter as u8);

    let external: Vec<u8> = group.external_mods.iter().flat_map(external_record).collect();
    let internal: Vec<u8> = group.internal_mods.iter().flat_map(internal_record).collect();

    let mut children = Vec::new();
    children.extend(object_record(RECORD_EXTERNAL_MOD_LIST, &[], &external));
    children.extend(object_record(RECORD_INTERNAL_MOD_LIST, &[], &internal));
    object_record(RECORD_GROUP, &fields, &children)
}

fn zone_record(zone: &Zone) -> Vec<u8> {
    let mut f = Vec::new();
    put_i32(&mut f, zone.group_index as i32);
    put_i32(&mut f, zone.file_index as i32);
    f.extend_from_slice(&[
        zone.key_range.low,
        zone.key_range.high,
        zone.velocity_range.low,
        zone.velocity_range.high,
        zone.key_fade.low,
        zone.key_fade.high,
        zone.velocity_fade.low,
        zone.velocity_fade.high,
        zone.root_key,
    ]);
    put_u32(&mut f, zone.sample_start);
    put_u32(&mut f, zone.sample_end);
    put_f32(&mut f, zone.volume);
    put_f32(&mut f, zone.pan);
    put_f32(&mut f, zone.tune);

    f.push(zone.loops.len() as u8);
    for l in &zone.loops {
        f.push(l.mode.to_u8());
        put_u32(&mut f, l.start);
        put_u32(&mut f, l.length);
        put_u32(&mut f, l.crossfade);
        f.push(l.alternating as u8);
    }
    object_record(RECORD_ZONE, &f, &[])
}

fn external_record(m: &ExternalModulator) -> Vec<u8> {
    let mut f = Vec::new();
    put_u16(&mut f, m.source.to_u16());
    put_u16(&mut f, m.destination.to_u16());
    put_f32(&mut f, m.intensity);
    object_record(RECORD_EXTERNAL_MOD, &f, &[])
}

fn internal_record(m: &InternalModulator) -> Vec<u8> {
    let mut f = Vec::new();
    put_u16(&mut f, m.target.to_u16());
    put_u16(&mut f, m.source.to_u16());
    for value in [m.depth, m.attack, m.hold, m.decay, m.sustain, m.release] {
        put_f32(&mut f, value);
    }
    object_record(RECORD_INTERNAL_MOD, &f, &[])
}

/// Record whose body is an object with the given fields and children
pub(crate) fn object_record(id: u16, fields: &[u8], children: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(10 + fields.len() + children.len());
    put_u16(&mut body, OBJECT_VERSION);
    put_u32(&mut body, fields.len() as u32);
    body.extend_from_slice(fields);
    put_u32(&mut body, children.len() as u32);
    body.extend_from_slice(children);

    let mut out = Vec::with_capacity(6 + body.len());
    put_u16(&mut out, id);
    put_u32(&mut out, body.len() as u32);
    out.extend_from_slice(&body);
    out
}

// Writes into a Vec cannot fail
fn put_u16(out: &mut Vec<u8>, value: u16) {
    let _ = out.write_u16::<LittleEndian>(value);
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    let _ = out.write_u32::<LittleEndian>(value);
}

fn put_i32(out: &mut Vec<u8>, value: i32) {
    let _ = out.write_i32::<LittleEndian>(value);
}

fn put_f32(out: &mut Vec<u8>, value: f32) {
    let _ = out.write_f32::<LittleEndian>(value);
}

pub(crate) fn put_string(out: &mut Vec<u8>, s: &str) {
    let units: Vec<u16> = s.encode_utf16().collect();
    put_u32(out, units.len() as u32);
    for unit in units {
        put_u16(out, unit);
    }
}
