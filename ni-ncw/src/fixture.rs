//! Test-only NCW stream builder

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{BLOCK_MAGIC, BLOCK_SAMPLES, HEADER_SIZE, NCW_MAGIC, NCW_VERSION};

/// Pack signed values at `bits` width into a little-endian bit stream
pub(crate) fn pack_bits(values: &[i32], bits: u32) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buffer: u64 = 0;
    let mut buffered = 0u32;
    let mask = if bits == 32 { u32::MAX } else { (1u32 << bits) - 1 };
    for &v in values {
        buffer |= ((v as u32 & mask) as u64) << buffered;
        buffered += bits;
        while buffered >= 8 {
            out.push(buffer as u8);
            buffer >>= 8;
            buffered -= 8;
        }
    }
    if buffered > 0 {
        out.push(buffer as u8);
    }
    out
}

/// One channel block
#[derive(Debug, Clone)]
pub(crate) struct FixtureBlock {
    pub base: i32,
    pub bits: i16,
    pub flags: u16,
    /// Deltas, truncated values or native samples depending on `bits`
    pub values: Vec<i32>,
    /// Raw payload used instead of packing `values`
    pub payload: Option<Vec<u8>>,
}

impl FixtureBlock {
    pub fn delta(bits: i16, base: i32, deltas: Vec<i32>) -> Self {
        Self {
            base,
            bits,
            flags: 0,
            values: deltas,
            payload: None,
        }
    }

    pub fn truncated(bits: i16, values: Vec<i32>) -> Self {
        Self {
            base: 0,
            bits: -bits,
            flags: 0,
            values,
            payload: None,
        }
    }

    pub fn raw(samples: Vec<i32>) -> Self {
        Self {
            base: 0,
            bits: 0,
            flags: 0,
            values: samples,
            payload: None,
        }
    }

    /// Delta-code up to 512 samples at the narrowest width that holds them
    pub fn encode(samples: &[i32]) -> Self {
        let mut padded = samples.to_vec();
        padded.resize(BLOCK_SAMPLES, samples.last().copied().unwrap_or(0));

        let mut deltas: Vec<i32> = padded.windows(2).map(|w| w[1].wrapping_sub(w[0])).collect();
        deltas.push(0);
        let bits = deltas.iter().map(|&d| signed_width(d)).max().unwrap_or(1);
        Self::delta(bits as i16, padded[0], deltas)
    }

    pub fn with_flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn to_bytes(&self, bits_per_sample: u16) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_u32::<LittleEndian>(BLOCK_MAGIC).unwrap();
        out.write_i32::<LittleEndian>(self.base).unwrap();
        out.write_i16::<LittleEndian>(self.bits).unwrap();
        out.write_u16::<LittleEndian>(self.flags).unwrap();
        out.write_u32::<LittleEndian>(0).unwrap();

        if let Some(payload) = &self.payload {
            out.extend_from_slice(payload);
        } else if self.bits == 0 {
            for &s in &self.values {
                match bits_per_sample {
                    16 => out.write_i16::<LittleEndian>(s as i16).unwrap(),
                    24 => out.write_i24::<LittleEndian>(s).unwrap(),
                    _ => out.write_i32::<LittleEndian>(s).unwrap(),
                }
            }
        } else {
            out.extend(pack_bits(&self.values, self.bits.unsigned_abs() as u32));
        }
        out
    }
}

fn signed_width(v: i32) -> u32 {
    let v = v as i64;
    (1..=32)
        .find(|&w| {
            let half = 1i64 << (w - 1);
            -half <= v && v < half
        })
        .unwrap_or(32)
}

/// Whole NCW stream
#[derive(Debug, Clone)]
pub(crate) struct NcwFixture {
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_rate: u32,
    pub number_of_samples: u32,
    /// Per block, one entry per channel
    pub blocks: Vec<Vec<FixtureBlock>>,
    /// Appended after the last block
    pub trailing: Vec<u8>,
}

impl NcwFixture {
    pub fn new(channels: u16, bits_per_sample: u16, sample_rate: u32, samples: u32) -> Self {
        Self {
            channels,
            bits_per_sample,
            sample_rate,
            number_of_samples: samples,
            blocks: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// Split per-channel PCM into delta-coded blocks
    pub fn from_pcm(bits_per_sample: u16, sample_rate: u32, channels: &[Vec<i32>]) -> Self {
        let frames = channels.first().map(Vec::len).unwrap_or(0);
        let mut fixture = Self::new(
            channels.len() as u16,
            bits_per_sample,
            sample_rate,
            frames as u32,
        );
        for start in (0..frames).step_by(BLOCK_SAMPLES) {
            let end = (start + BLOCK_SAMPLES).min(frames);
            fixture.push_block(
                channels
                    .iter()
                    .map(|ch| FixtureBlock::encode(&ch[start..end]))
                    .collect(),
            );
        }
        fixture
    }

    pub fn push_block(&mut self, channels: Vec<FixtureBlock>) {
        self.blocks.push(channels);
    }

    pub fn build(&self) -> Vec<u8> {
        let encoded: Vec<Vec<u8>> = self
            .blocks
            .iter()
            .map(|channels| {
                channels
                    .iter()
                    .flat_map(|b| b.to_bytes(self.bits_per_sample))
                    .collect()
            })
            .collect();

        let table_len = 4 * (encoded.len() + 1);
        let address = HEADER_SIZE as u32;
        let data = address + table_len as u32;

        let mut out = Vec::new();
        out.write_u32::<LittleEndian>(NCW_MAGIC).unwrap();
        out.write_u32::<LittleEndian>(NCW_VERSION).unwrap();
        out.write_u16::<LittleEndian>(self.channels).unwrap();
        out.write_u16::<LittleEndian>(self.bits_per_sample).unwrap();
        out.write_u32::<LittleEndian>(self.sample_rate).unwrap();
        out.write_u32::<LittleEndian>(self.number_of_samples).unwrap();
        out.write_u32::<LittleEndian>(address).unwrap();
        out.write_u32::<LittleEndian>(data).unwrap();
        let total: usize = encoded.iter().map(Vec::len).sum();
        out.write_u32::<LittleEndian>(total as u32).unwrap();
        out.resize(HEADER_SIZE, 0);

        let mut offset = 0u32;
        out.write_u32::<LittleEndian>(0).unwrap();
        for block in &encoded {
            offset += block.len() as u32;
            out.write_u32::<LittleEndian>(offset).unwrap();
        }
        for block in &encoded {
            out.extend_from_slice(block);
        }
        out.extend_from_slice(&self.trailing);
        out
    }
}
