//! Kontakt preset → MultisampleInstrument conversion

use std::path::Path;

use ni_preset::{
    EnvelopeSource, EnvelopeTarget, Group, InternalModulator, Loop, ModSource, Program, Zone,
};

use crate::{
    Envelope, EnvelopeShape, InstrumentMetadata, LoopType, MappingError, MultisampleGroup,
    MultisampleInstrument, MultisampleZone, NoteRange, SILENCE_DB, SampleLoop, SampleReference,
    SampleResolver, TUNE_DECIMALS,
};

/// Convert a parsed Kontakt program to the neutral model.
///
/// `instrument_path` is the location of the source file; sample paths are
/// resolved relative to its directory. Either every zone converts or the
/// whole instrument fails.
pub fn convert_kontakt(
    program: &Program,
    instrument_path: &Path,
) -> Result<MultisampleInstrument, MappingError> {
    // Pair every zone with its file path before touching the disk
    let mut placed = Vec::with_capacity(program.groups.len());
    let mut index = 0;
    for group in &program.groups {
        let mut zones = Vec::with_capacity(group.zones.len());
        for zone in &group.zones {
            let path = program
                .files
                .get(zone.file_index)
                .ok_or(MappingError::FileIndex {
                    zone: index,
                    file: zone.file_index,
                    files: program.files.len(),
                })?;
            zones.push((zone, path));
            index += 1;
        }
        placed.push((group, zones));
    }

    let referenced: Vec<&str> = placed
        .iter()
        .flat_map(|(_, zones)| zones.iter().map(|&(_, path)| path))
        .collect();
    let instrument_dir = instrument_path.parent().unwrap_or(Path::new(""));
    let mut resolver = SampleResolver::new(instrument_dir, program.monolith, &referenced);

    let mut groups = Vec::with_capacity(placed.len());
    for (group, zones) in placed {
        let zones = zones
            .into_iter()
            .map(|(zone, path)| {
                let sample = SampleReference {
                    path: path.to_string(),
                    resolved: resolver.resolve(path)?,
                };
                Ok(convert_zone(program, group, zone, sample))
            })
            .collect::<Result<Vec<_>, MappingError>>()?;
        groups.push(MultisampleGroup {
            name: group.name.clone(),
            zones,
        });
    }

    let instrument = MultisampleInstrument {
        name: program.name.clone(),
        metadata: InstrumentMetadata::default(),
        monolith: resolver.is_monolith(),
        groups,
    };
    tracing::debug!(
        name = %instrument.name,
        groups = instrument.groups.len(),
        zones = instrument.zones().count(),
        monolith = instrument.monolith,
        "converted preset"
    );
    Ok(instrument)
}

fn convert_zone(
    program: &Program,
    group: &Group,
    zone: &Zone,
    sample: SampleReference,
) -> MultisampleZone {
    let gain = f64::from(program.volume) * f64::from(group.volume) * f64::from(zone.volume);
    let pan = f64::from(program.pan) + f64::from(group.pan) + f64::from(zone.pan);
    let tune = f64::from(program.tune) * f64::from(group.tune) * f64::from(zone.tune);

    let bend = pitch_bend_cents(group);
    let filter_envelope = if group.has_filter {
        envelope(group, EnvelopeTarget::Cutoff)
    } else {
        Envelope::default()
    };

    MultisampleZone {
        sample,
        key_range: NoteRange {
            low: zone.key_range.low,
            high: zone.key_range.high,
            fade_low: zone.key_fade.low,
            fade_high: zone.key_fade.high,
        },
        velocity_range: NoteRange {
            low: zone.velocity_range.low,
            high: zone.velocity_range.high,
            fade_low: zone.velocity_fade.low,
            fade_high: zone.velocity_fade.high,
        },
        root_key: zone.root_key,
        sample_start: zone.sample_start,
        sample_end: zone.sample_end,
        reversed: group.reverse,
        gain_db: linear_to_db(gain),
        pan: pan.clamp(-1.0, 1.0),
        tune: ratio_to_semitones(tune),
        bend_up: bend,
        bend_down: -bend,
        amp_velocity_depth: velocity_depth(group),
        amp_envelope: envelope(group, EnvelopeTarget::Volume),
        pitch_envelope: envelope(group, EnvelopeTarget::Pitch),
        filter_envelope,
        loops: zone.loops.iter().filter_map(convert_loop).collect(),
    }
}

/// Only sustaining loops survive; the end is exclusive
fn convert_loop(l: &Loop) -> Option<SampleLoop> {
    if !l.mode.is_sustaining() {
        return None;
    }
    Some(SampleLoop {
        loop_type: if l.alternating {
            LoopType::Alternating
        } else {
            LoopType::Forward
        },
        start: l.start,
        end: l.start.saturating_add(l.length),
        crossfade: l.crossfade,
    })
}

/// Linear gain to dB
pub(crate) fn linear_to_db(gain: f64) -> f64 {
    if gain > 0.0 {
        20.0 * gain.log10()
    } else {
        SILENCE_DB
    }
}

/// Frequency ratio to semitones, rounded to [`TUNE_DECIMALS`] places.
///
/// A non-positive ratio has no pitch meaning and maps to no detune.
pub(crate) fn ratio_to_semitones(ratio: f64) -> f64 {
    if ratio <= 0.0 {
        return 0.0;
    }
    let scale = 10f64.powi(TUNE_DECIMALS);
    round_half_up(12.0 * ratio.log2() * scale) / scale
}

/// Nearest integer, halves towards positive infinity (-1.5 gives -1)
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Bend range in cents from the pitch-bend modulator; intensity is in octaves
fn pitch_bend_cents(group: &Group) -> i32 {
    group
        .external_mods
        .iter()
        .find(|m| m.source == ModSource::PitchBend && m.destination.is_pitch())
        .map(|m| round_half_up(f64::from(m.intensity) * 12.0) as i32 * 100)
        .unwrap_or(0)
}

/// Zero when no velocity modulator drives the volume
fn velocity_depth(group: &Group) -> f64 {
    group
        .external_mods
        .iter()
        .find(|m| m.source.is_velocity() && m.destination.is_volume())
        .map(|m| f64::from(m.intensity))
        .unwrap_or(0.0)
}

fn envelope(group: &Group, target: EnvelopeTarget) -> Envelope {
    group
        .envelope(target)
        .map(convert_envelope)
        .unwrap_or_default()
}

fn convert_envelope(m: &InternalModulator) -> Envelope {
    let shape = match m.source {
        EnvelopeSource::Dbd => EnvelopeShape::Dbd,
        EnvelopeSource::Flex => EnvelopeShape::Flex,
        EnvelopeSource::Ahdsr | EnvelopeSource::Other(_) => EnvelopeShape::Ahdsr,
    };
    Envelope {
        shape,
        depth: f64::from(m.depth),
        attack: f64::from(m.attack),
        hold: f64::from(m.hold),
        decay: f64::from(m.decay),
        sustain: f64::from(m.sustain),
        release: f64::from(m.release),
    }
}
