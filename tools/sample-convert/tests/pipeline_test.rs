//! Integration tests for sample-convert
//!
//! Builds instrument containers and NCW samples on disk, runs the batch driver
//! over them and checks the written JSON and WAV files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use ni_container::{
    Chunk, ChunkChain, ChunkData, ChunkWriter, DOMAIN_KONTAKT, DOMAIN_NI_SOUND, PresetBlob,
    SoundInfo, SubTree,
};
use ni_ncw::{BLOCK_MAGIC, NCW_MAGIC, NCW_VERSION};
use ni_preset::{GroupBuilder, ProgramBuilder, ZoneBuilder, write_preset};
use sample_convert::{
    BatchOptions, Converted, collect_sources, load_instrument, load_ncw, run_batch,
};
use sample_shared::{ErrorCategory, Reportable};
use tempfile::tempdir;

const SAMPLE_RATE: u32 = 44100;

/// Mono 16-bit NCW with one uncompressed block holding `samples`
fn ncw_bytes(samples: &[i16], declared: u32) -> Vec<u8> {
    assert!(samples.len() <= 512);

    let mut block = Vec::new();
    block.extend_from_slice(&BLOCK_MAGIC.to_le_bytes());
    block.extend_from_slice(&0i32.to_le_bytes()); // base
    block.extend_from_slice(&0i16.to_le_bytes()); // bits: native
    block.extend_from_slice(&0u16.to_le_bytes()); // flags
    block.extend_from_slice(&[0; 4]);
    for i in 0..512 {
        let value = samples.get(i).copied().unwrap_or(0);
        block.extend_from_slice(&value.to_le_bytes());
    }

    let address = 120u32;
    let data_start = address + 8;
    let mut out = Vec::new();
    out.extend_from_slice(&NCW_MAGIC.to_le_bytes());
    out.extend_from_slice(&NCW_VERSION.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&declared.to_le_bytes());
    out.extend_from_slice(&address.to_le_bytes());
    out.extend_from_slice(&data_start.to_le_bytes());
    out.extend_from_slice(&(block.len() as u32).to_le_bytes());
    out.resize(address as usize, 0);
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(block.len() as u32).to_le_bytes());
    out.extend_from_slice(&block);
    out
}

fn preset(files: Vec<String>, monolith: bool) -> Vec<u8> {
    let mut program = ProgramBuilder::new()
        .name("Program Name")
        .monolith(monolith)
        .volume(2.0)
        .group(GroupBuilder::new().name("Main").volume(0.5));
    for (i, _) in files.iter().enumerate() {
        let key = 60 + i as u8;
        program = program.zone(
            ZoneBuilder::new()
                .group_index(0)
                .file_index(i as i32)
                .key_range(key, key)
                .velocity_range(1, 127),
        );
    }
    write_preset(&program.files(files).build().unwrap())
}

/// Kontakt-style container: metadata up front, preset inside a sub-tree
fn nki_bytes(blob: Vec<u8>) -> Vec<u8> {
    let info = SoundInfo {
        record_version: 1,
        name: "Grand".into(),
        author: "Someone".into(),
        tags: vec!["Piano".into()],
        ..SoundInfo::default()
    };
    let inner = ChunkChain::from_chunks(
        vec![Chunk::new(DOMAIN_KONTAKT, ChunkData::Preset(PresetBlob(blob)))],
        DOMAIN_KONTAKT,
    );
    let chain = ChunkChain::from_chunks(
        vec![
            Chunk::new(DOMAIN_NI_SOUND, ChunkData::SoundInfo(info)),
            Chunk::new(DOMAIN_NI_SOUND, ChunkData::SubTree(SubTree::Clear(inner))),
        ],
        DOMAIN_NI_SOUND,
    );
    ChunkWriter::new().write_chain(&chain)
}

fn write(path: &Path, bytes: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

#[test]
fn test_library_conversion() {
    let dir = tempdir().expect("Failed to create temp dir");
    let lib = dir.path().join("Library");
    let out = dir.path().join("out");

    let pcm: Vec<i16> = (0..300).map(|i| (i * 97 % 2000 - 1000) as i16).collect();
    write(&lib.join("Samples/C3.ncw"), &ncw_bytes(&pcm, 300));
    write(
        &lib.join("Instruments/Piano.nki"),
        &nki_bytes(preset(vec!["..\\Samples\\C3.ncw".into()], false)),
    );

    let sources = collect_sources(&[lib.clone()]);
    assert_eq!(sources.len(), 2);

    let mut outputs: Vec<PathBuf> = Vec::new();
    let summary = run_batch(
        sources,
        BatchOptions {
            output_dir: Some(out.clone()),
            ..BatchOptions::default()
        },
        Arc::new(AtomicBool::new(false)),
        |result| match &result.outcome {
            Ok(Converted::Instrument { output, .. }) | Ok(Converted::Sample { output, .. }) => {
                outputs.extend(output.clone())
            }
            Err(e) => panic!("unexpected failure: {e}"),
        },
    )
    .unwrap();
    assert_eq!(summary.converted, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(outputs.len(), 2);

    // Instrument JSON
    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(out.join("Piano.json")).unwrap()).unwrap();
    assert_eq!(json["name"], "Grand");
    assert_eq!(json["metadata"]["author"], "Someone");
    assert_eq!(json["monolith"], false);
    let zone = &json["groups"][0]["zones"][0];
    assert_eq!(zone["gain_db"], 0.0);
    assert_eq!(zone["key_range"]["low"], 60);
    let resolved = PathBuf::from(zone["sample"]["resolved"].as_str().unwrap());
    assert!(resolved.ends_with("Samples/C3.ncw"));
    assert!(resolved.is_file());

    // Decoded WAV
    let reader = hound::WavReader::open(out.join("C3.wav")).expect("Failed to open WAV");
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, SAMPLE_RATE);
    assert_eq!(spec.bits_per_sample, 16);
    let decoded: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded, pcm);
}

#[test]
fn test_load_ncw_truncates_to_declared_length() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.ncw");
    write(&path, &ncw_bytes(&[5, -5, 7], 2));

    let audio = load_ncw(&path).unwrap();
    assert_eq!(audio.frames(), 2);
    assert_eq!(audio.channel(0), Some(&[5, -5][..]));
}

#[test]
fn test_trailing_ncw_byte_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trailing.ncw");
    let mut bytes = ncw_bytes(&[1, 2, 3], 3);
    bytes.push(0);
    write(&path, &bytes);

    let err = load_ncw(&path).unwrap_err();
    assert_eq!(err.path, path);
    assert_eq!(err.category(), ErrorCategory::Format);
}

#[test]
fn test_monolith_instrument_without_samples() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Mono.nki");
    write(
        &path,
        &nki_bytes(preset(vec!["a.ncw".into(), "b.ncw".into()], false)),
    );

    let instrument = load_instrument(&path).unwrap();
    assert!(instrument.monolith);
    assert_eq!(instrument.zones().count(), 2);
    assert!(instrument.zones().all(|z| z.sample.resolved.is_none()));
}

#[test]
fn test_missing_sample_fails_only_that_file() {
    let dir = tempdir().unwrap();
    let lib = dir.path().join("lib");
    write(&lib.join("present.ncw"), &ncw_bytes(&[1], 1));
    write(
        &lib.join("Broken.nki"),
        &nki_bytes(preset(vec!["present.ncw".into(), "gone.ncw".into()], false)),
    );

    let mut failures = Vec::new();
    let summary = run_batch(
        collect_sources(&[lib.clone()]),
        BatchOptions {
            output_dir: Some(dir.path().join("out")),
            ..BatchOptions::default()
        },
        Arc::new(AtomicBool::new(false)),
        |result| {
            if let Err(e) = &result.outcome {
                failures.push((e.message_key(), e.category()));
            }
        },
    )
    .unwrap();

    assert_eq!(summary.converted, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(
        failures,
        vec![("mapping.sample.not_found", ErrorCategory::Io)]
    );
    assert!(dir.path().join("out/present.wav").is_file());
    assert!(!dir.path().join("out/Broken.json").exists());
}

#[test]
fn test_encrypted_preset_is_unsupported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Locked.nki");
    let chain = ChunkChain::from_chunks(
        vec![Chunk::new(
            DOMAIN_NI_SOUND,
            ChunkData::SubTree(SubTree::Encrypted(vec![0xAB; 32])),
        )],
        DOMAIN_NI_SOUND,
    );
    write(&path, &ChunkWriter::new().write_chain(&chain));

    let err = load_instrument(&path).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Unsupported);
    assert_eq!(err.message_key(), "container.subtree.encrypted");
}
