use super::*;
use crate::model::{EnvelopeSource, EnvelopeTarget, Loop, LoopMode};
use crate::writer::{object_record, put_string};
use crate::write_preset;

fn sample_program() -> Program {
    ProgramBuilder::new()
        .name("Grand Piano")
        .volume(2.0)
        .pan(0.1)
        .tune(1.0)
        .group(
            GroupBuilder::new()
                .name("Sustain")
                .volume(0.5)
                .reverse(true)
                .has_filter(true)
                .external_mod(ExternalModulator {
                    source: ModSource::PitchBend,
                    destination: ModDestination::Pitch,
                    intensity: 2.0 / 12.0,
                })
                .internal_mod(InternalModulator {
                    target: EnvelopeTarget::Volume,
                    source: EnvelopeSource::Ahdsr,
                    depth: 1.0,
                    attack: 0.01,
                    hold: 0.0,
                    decay: 0.5,
                    sustain: 0.8,
                    release: 1.2,
                }),
        )
        .group(GroupBuilder::new().name("Release"))
        .zone(
            ZoneBuilder::new()
                .group_index(0)
                .file_index(1)
                .key_range(60, 64)
                .velocity_range(1, 100)
                .key_fade(2, 3)
                .root_key(62)
                .sample_range(0, 44100)
                .tune(1.5)
                .add_loop(Loop {
                    mode: LoopMode::UntilRelease,
                    start: 1000,
                    length: 2000,
                    crossfade: 64,
                    alternating: true,
                }),
        )
        .zone(
            ZoneBuilder::new()
                .group_index(1)
                .file_index(0)
                .key_range(0, 127)
                .velocity_range(0, 127),
        )
        .files(vec!["Samples/a.ncw".into(), "Samples/b.ncw".into()])
        .build()
        .unwrap()
}

#[test]
fn test_written_program_parses_back() {
    let program = sample_program();
    let parsed = parse_preset(&write_preset(&program)).unwrap();

    assert_eq!(parsed, program);
    assert_eq!(parsed.groups[0].zones[0].loops[0].mode, LoopMode::UntilRelease);
    assert_eq!(parsed.files.get(1), Some("Samples/b.ncw"));
    assert!(parsed.groups[0].envelope(EnvelopeTarget::Volume).is_some());
    assert!(parsed.groups[0].envelope(EnvelopeTarget::Pitch).is_none());
}

#[test]
fn test_wrong_root_record() {
    let blob = object_record(RECORD_GROUP, &[], &[]);
    assert!(matches!(
        parse_preset(&blob),
        Err(PresetError::UnexpectedRecord {
            expected: "Program",
            found: RECORD_GROUP
        })
    ));
}

#[test]
fn test_empty_blob_is_truncated() {
    assert!(matches!(
        parse_preset(&[]),
        Err(PresetError::Truncated {
            record: "Program",
            ..
        })
    ));
}

fn program_fields(name: &str) -> Vec<u8> {
    let mut fields = Vec::new();
    put_string(&mut fields, name);
    for v in [1.0f32, 0.0, 1.0] {
        fields.extend_from_slice(&v.to_le_bytes());
    }
    fields.push(0);
    fields
}

#[test]
fn test_unknown_children_are_skipped() {
    let mut files = 1u32.to_le_bytes().to_vec();
    put_string(&mut files, "x.wav");

    let mut children = object_record(0x99, &[1, 2, 3], &[]);
    children.extend(object_record(RECORD_FILE_LIST, &files, &[]));
    children.extend(object_record(
        RECORD_GROUP_LIST,
        &[],
        &object_record(0x77, &[], &[]),
    ));
    let blob = object_record(RECORD_PROGRAM, &program_fields("Odd"), &children);

    let program = parse_preset(&blob).unwrap();
    assert_eq!(program.name, "Odd");
    assert!(program.groups.is_empty());
    assert_eq!(program.files.len(), 1);
}

#[test]
fn test_extra_fields_are_ignored() {
    let mut fields = program_fields("Future");
    fields.extend_from_slice(&[0xEE; 12]);
    let blob = object_record(RECORD_PROGRAM, &fields, &[]);
    assert_eq!(parse_preset(&blob).unwrap().name, "Future");
}

#[test]
fn test_truncated_group_fields() {
    let group = object_record(RECORD_GROUP, &[1, 0, 0, 0], &[]);
    let list = object_record(RECORD_GROUP_LIST, &[], &group);
    let blob = object_record(RECORD_PROGRAM, &program_fields("P"), &list);
    assert!(matches!(
        parse_preset(&blob),
        Err(PresetError::Truncated { record: "Group", .. })
    ));
}

#[test]
fn test_zone_with_missing_group() {
    let mut program = sample_program();
    program.groups[0].zones[0].group_index = 5;
    assert!(matches!(
        parse_preset(&write_preset(&program)),
        Err(PresetError::GroupIndex { group: 5, .. })
    ));
}

#[test]
fn test_zone_with_bad_file_index() {
    let mut program = sample_program();
    program.groups[1].zones[0].file_index = 2;
    assert!(matches!(
        parse_preset(&write_preset(&program)),
        Err(PresetError::FileIndex {
            file: 2,
            files: 2,
            ..
        })
    ));
}

fn zone_fields(loop_mode: u8) -> Vec<u8> {
    let mut fields = Vec::new();
    fields.extend_from_slice(&0i32.to_le_bytes());
    fields.extend_from_slice(&0i32.to_le_bytes());
    fields.extend_from_slice(&[0, 127, 0, 127, 0, 0, 0, 0, 60]);
    fields.extend_from_slice(&0u32.to_le_bytes());
    fields.extend_from_slice(&100u32.to_le_bytes());
    for v in [1.0f32, 0.0, 1.0] {
        fields.extend_from_slice(&v.to_le_bytes());
    }
    fields.push(1);
    fields.push(loop_mode);
    for v in [10u32, 20, 0] {
        fields.extend_from_slice(&v.to_le_bytes());
    }
    fields.push(0);
    fields
}

fn single_zone_blob(loop_mode: u8) -> Vec<u8> {
    let mut group_fields = Vec::new();
    put_string(&mut group_fields, "g");
    for v in [1.0f32, 0.0, 1.0] {
        group_fields.extend_from_slice(&v.to_le_bytes());
    }
    group_fields.extend_from_slice(&[0, 0]);

    let mut files = 1u32.to_le_bytes().to_vec();
    put_string(&mut files, "a.ncw");

    let mut children = object_record(
        RECORD_GROUP_LIST,
        &[],
        &object_record(RECORD_GROUP, &group_fields, &[]),
    );
    children.extend(object_record(
        RECORD_ZONE_LIST,
        &[],
        &object_record(RECORD_ZONE, &zone_fields(loop_mode), &[]),
    ));
    children.extend(object_record(RECORD_FILE_LIST, &files, &[]));
    object_record(RECORD_PROGRAM, &program_fields("P"), &children)
}

#[test]
fn test_hand_built_zone() {
    let program = parse_preset(&single_zone_blob(LoopMode::UntilEnd.to_u8())).unwrap();
    let zone = &program.groups[0].zones[0];
    assert_eq!(zone.root_key, 60);
    assert_eq!(zone.sample_end, 100);
    assert_eq!(zone.loops[0].start, 10);
    assert_eq!(zone.loops[0].length, 20);
    assert!(!zone.loops[0].alternating);
}

#[test]
fn test_unknown_loop_mode() {
    assert!(matches!(
        parse_preset(&single_zone_blob(9)),
        Err(PresetError::LoopMode(9))
    ));
}
