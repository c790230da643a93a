//! Stream decoder
//!
//! Decodes a complete in-memory NCW stream into per-channel PCM.

use byteorder::{ByteOrder, LittleEndian};
use sample_shared::ByteReader;

use crate::block::{read_channel_block, reconstruct_mid_side};
use crate::{NcwError, NcwHeader};

/// Decoded PCM, one integer array per channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NcwAudio {
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_rate: u32,
    samples: Vec<Vec<i32>>,
}

impl NcwAudio {
    /// Samples per channel
    pub fn frames(&self) -> usize {
        self.samples.first().map(Vec::len).unwrap_or(0)
    }

    pub fn channel(&self, index: usize) -> Option<&[i32]> {
        self.samples.get(index).map(Vec::as_slice)
    }

    /// Samples interleaved frame by frame
    pub fn interleaved(&self) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.frames() * self.samples.len());
        for frame in 0..self.frames() {
            for channel in &self.samples {
                out.push(channel[frame]);
            }
        }
        out
    }

    /// Interleaved little-endian PCM at the original bit depth.
    ///
    /// Every sample fits the bit depth; `decode_ncw` rejects streams where
    /// one does not.
    pub fn to_pcm_bytes(&self) -> Vec<u8> {
        let width = self.bits_per_sample as usize / 8;
        let mut out = Vec::with_capacity(self.frames() * self.samples.len() * width);
        let mut buf = [0u8; 4];
        for sample in self.interleaved() {
            match self.bits_per_sample {
                16 => LittleEndian::write_i16(&mut buf, sample as i16),
                24 => LittleEndian::write_i24(&mut buf, sample),
                _ => LittleEndian::write_i32(&mut buf, sample),
            }
            out.extend_from_slice(&buf[..width]);
        }
        out
    }
}

/// Decode a complete NCW stream.
///
/// Fails without partial output on any structural problem, including bytes
/// left over after the last block.
pub fn decode_ncw(data: &[u8]) -> Result<NcwAudio, NcwError> {
    let header = NcwHeader::parse(data)?;
    let offsets = header.read_offsets(data)?;
    let channels = header.channels as usize;
    let block_count = offsets.len() - 1;
    let base = header.offset_block_data as usize;

    let mut reader = ByteReader::new(data);
    reader.skip(base).map_err(NcwError::truncated(None))?;

    let mut samples: Vec<Vec<i32>> =
        vec![Vec::with_capacity(block_count * crate::BLOCK_SAMPLES); channels];

    for block in 0..block_count {
        let expected = base + offsets[block] as usize;
        if reader.position() != expected {
            return Err(NcwError::BlockOffsetMismatch {
                block,
                expected,
                actual: reader.position(),
            });
        }

        let mut decoded = Vec::with_capacity(channels);
        let mut mid_side = false;
        for channel in 0..channels {
            let (block_header, values) = read_channel_block(&mut reader, &header, block, channel)?;
            if channel == 0 {
                mid_side = block_header.is_mid_side();
            }
            decoded.push(values);
        }

        if mid_side {
            if channels != 2 {
                return Err(NcwError::MidSideChannels(header.channels));
            }
            let (mid, side) = decoded.split_at_mut(1);
            reconstruct_mid_side(&mut mid[0], &mut side[0]);
        }

        for (out, values) in samples.iter_mut().zip(decoded) {
            out.extend(values);
        }
    }

    let end = base + offsets[block_count] as usize;
    if reader.position() != end {
        return Err(NcwError::BlockOffsetMismatch {
            block: block_count,
            expected: end,
            actual: reader.position(),
        });
    }
    if !reader.is_empty() {
        return Err(NcwError::UnreadBytes(reader.remaining()));
    }

    let declared = header.number_of_samples as usize;
    let decoded = samples.first().map(Vec::len).unwrap_or(0);
    if declared > decoded {
        return Err(NcwError::SampleCountMismatch {
            declared: header.number_of_samples,
            decoded,
        });
    }
    for channel in &mut samples {
        channel.truncate(declared);
    }
    check_range(&samples, header.bits_per_sample)?;

    tracing::debug!(
        channels,
        bits = header.bits_per_sample,
        blocks = block_count,
        samples = declared,
        "decoded NCW stream"
    );

    Ok(NcwAudio {
        channels: header.channels,
        bits_per_sample: header.bits_per_sample,
        sample_rate: header.sample_rate,
        samples,
    })
}

/// Decoded values must fit the stream's bit depth
fn check_range(samples: &[Vec<i32>], bits_per_sample: u16) -> Result<(), NcwError> {
    if bits_per_sample >= 32 {
        return Ok(());
    }
    let max = (1i32 << (bits_per_sample - 1)) - 1;
    let min = -max - 1;
    for (channel, values) in samples.iter().enumerate() {
        if let Some(index) = values.iter().position(|v| !(min..=max).contains(v)) {
            return Err(NcwError::SampleOutOfRange {
                block: index / crate::BLOCK_SAMPLES,
                channel,
                value: values[index],
            });
        }
    }
    Ok(())
}
