//! Channel block decoding

use byteorder::{ByteOrder, LittleEndian};
use sample_shared::ByteReader;

use crate::bits::BitReader;
use crate::{BLOCK_MAGIC, BLOCK_SAMPLES, NcwError, NcwHeader};

/// Flag value marking a mid/side coded block pair
pub const FLAG_MID_SIDE: u16 = 1;

/// Coding of one channel block, from the sign of its `bits` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coding {
    /// Running base plus a signed delta per sample, at this many bits
    Delta(u32),
    /// Each sample stored directly at this many bits
    Truncated(u32),
    /// Little-endian samples at the stream's bit depth
    Native,
}

/// Sub-header in front of every channel block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub base: i32,
    pub bits: i16,
    pub flags: u16,
}

impl BlockHeader {
    pub fn coding(&self) -> Coding {
        match self.bits {
            0 => Coding::Native,
            b if b > 0 => Coding::Delta(b as u32),
            b => Coding::Truncated(b.unsigned_abs() as u32),
        }
    }

    pub fn is_mid_side(&self) -> bool {
        self.flags == FLAG_MID_SIDE
    }

    /// Packed payload size in bytes
    fn payload_len(&self, bits_per_sample: u16) -> usize {
        let width = match self.coding() {
            Coding::Delta(bits) | Coding::Truncated(bits) => bits as usize,
            Coding::Native => bits_per_sample as usize,
        };
        width * BLOCK_SAMPLES / 8
    }
}

/// Read one channel block: sub-header plus 512 samples
pub(crate) fn read_channel_block(
    reader: &mut ByteReader<'_>,
    header: &NcwHeader,
    block: usize,
    channel: usize,
) -> Result<(BlockHeader, Vec<i32>), NcwError> {
    let eof = NcwError::truncated(Some(block));

    let magic = reader.u32().map_err(&eof)?;
    if magic != BLOCK_MAGIC {
        return Err(NcwError::InvalidBlockMagic {
            block,
            channel,
            found: magic,
        });
    }
    let block_header = BlockHeader {
        base: reader.i32().map_err(&eof)?,
        bits: reader.i16().map_err(&eof)?,
        flags: reader.u16().map_err(&eof)?,
    };
    reader.skip(4).map_err(&eof)?;

    if block_header.bits.unsigned_abs() > 32 {
        return Err(NcwError::InvalidBitWidth {
            block,
            channel,
            bits: block_header.bits,
        });
    }
    if block_header.flags > FLAG_MID_SIDE {
        return Err(NcwError::UnsupportedFlags {
            block,
            channel,
            flags: block_header.flags,
        });
    }

    let payload = reader
        .bytes(block_header.payload_len(header.bits_per_sample))
        .map_err(&eof)?;

    let samples = match block_header.coding() {
        Coding::Delta(bits) => decode_delta(payload, block_header.base, bits),
        Coding::Truncated(bits) => decode_truncated(payload, bits),
        Coding::Native => decode_native(payload, header.bytes_per_sample()),
    };
    Ok((block_header, samples))
}

/// Emit the running value, then apply the delta read at that position
fn decode_delta(payload: &[u8], base: i32, bits: u32) -> Vec<i32> {
    let mut reader = BitReader::new(payload);
    let mut output = Vec::with_capacity(BLOCK_SAMPLES);
    let mut value = base;
    for _ in 0..BLOCK_SAMPLES {
        output.push(value);
        // The payload length is fixed from `bits`, so it always holds 512 values
        let delta = reader.read_signed(bits).unwrap_or(0);
        value = value.wrapping_add(delta);
    }
    output
}

fn decode_truncated(payload: &[u8], bits: u32) -> Vec<i32> {
    let mut reader = BitReader::new(payload);
    (0..BLOCK_SAMPLES)
        .map(|_| reader.read_signed(bits).unwrap_or(0))
        .collect()
}

fn decode_native(payload: &[u8], bytes_per_sample: usize) -> Vec<i32> {
    payload
        .chunks_exact(bytes_per_sample)
        .map(|raw| match bytes_per_sample {
            2 => LittleEndian::read_i16(raw) as i32,
            3 => LittleEndian::read_i24(raw),
            _ => LittleEndian::read_i32(raw),
        })
        .collect()
}

/// Rebuild left/right in place from mid/side.
///
/// `left = (mid + side) / 2`, `right = (mid - side) / 2`, truncating.
pub(crate) fn reconstruct_mid_side(mid: &mut [i32], side: &mut [i32]) {
    for (m, s) in mid.iter_mut().zip(side.iter_mut()) {
        let (mv, sv) = (*m as i64, *s as i64);
        *m = ((mv + sv) / 2) as i32;
        *s = ((mv - sv) / 2) as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{FixtureBlock, pack_bits};

    fn header(bits_per_sample: u16) -> NcwHeader {
        NcwHeader {
            channels: 1,
            bits_per_sample,
            sample_rate: 44100,
            number_of_samples: 512,
            offset_block_address: 120,
            offset_block_data: 128,
            total_block_size: 0,
        }
    }

    fn decode(block: &FixtureBlock, bits_per_sample: u16) -> Result<Vec<i32>, NcwError> {
        let bytes = block.to_bytes(bits_per_sample);
        let mut reader = ByteReader::new(&bytes);
        let (_, samples) = read_channel_block(&mut reader, &header(bits_per_sample), 0, 0)?;
        assert!(reader.is_empty());
        Ok(samples)
    }

    #[test]
    fn test_delta_alternating() {
        let deltas: Vec<i32> = (0..512).map(|i| if i % 2 == 0 { 1 } else { -1 }).collect();
        let samples = decode(&FixtureBlock::delta(8, 0, deltas), 16).unwrap();

        assert_eq!(samples.len(), 512);
        for (i, s) in samples.iter().enumerate() {
            assert_eq!(*s, (i % 2) as i32, "sample {i}");
        }
    }

    #[test]
    fn test_delta_from_base() {
        let samples = decode(&FixtureBlock::delta(4, -100, vec![3; 512]), 16).unwrap();
        assert_eq!(samples[0], -100);
        assert_eq!(samples[1], -97);
        assert_eq!(samples[511], -100 + 3 * 511);
    }

    #[test]
    fn test_truncated_sign_extends() {
        let mut block = FixtureBlock::truncated(8, vec![0; 512]);
        block.payload = Some(vec![0xFF; 512]);
        let samples = decode(&block, 16).unwrap();
        assert!(samples.iter().all(|&s| s == -1));
    }

    #[test]
    fn test_truncated_odd_width() {
        let values: Vec<i32> = (0..512).map(|i| (i % 32) - 16).collect();
        let samples = decode(&FixtureBlock::truncated(5, values.clone()), 24).unwrap();
        assert_eq!(samples, values);
    }

    #[test]
    fn test_native_24_bit() {
        let values: Vec<i32> = (0..512).map(|i| (i - 256) * 30_000).collect();
        let samples = decode(&FixtureBlock::raw(values.clone()), 24).unwrap();
        assert_eq!(samples, values);
    }

    #[test]
    fn test_coding_from_bits() {
        let mk = |bits| BlockHeader {
            base: 0,
            bits,
            flags: 0,
        };
        assert_eq!(mk(8).coding(), Coding::Delta(8));
        assert_eq!(mk(-12).coding(), Coding::Truncated(12));
        assert_eq!(mk(0).coding(), Coding::Native);
        assert_eq!(mk(-12).payload_len(16), 12 * 64);
        assert_eq!(mk(0).payload_len(24), 24 * 64);
    }

    #[test]
    fn test_bad_block_magic() {
        let mut bytes = FixtureBlock::raw(vec![0; 512]).to_bytes(16);
        bytes[0] ^= 0xFF;
        let err = read_channel_block(&mut ByteReader::new(&bytes), &header(16), 4, 1).unwrap_err();
        assert!(matches!(
            err,
            NcwError::InvalidBlockMagic {
                block: 4,
                channel: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_unsupported_flags() {
        let block = FixtureBlock::raw(vec![0; 512]).with_flags(2);
        assert!(matches!(
            decode(&block, 16),
            Err(NcwError::UnsupportedFlags { flags: 2, .. })
        ));
    }

    #[test]
    fn test_bit_width_over_32() {
        let mut block = FixtureBlock::delta(8, 0, vec![0; 512]);
        block.bits = 40;
        assert!(matches!(
            decode(&block, 16),
            Err(NcwError::InvalidBitWidth { bits: 40, .. })
        ));
    }

    #[test]
    fn test_short_payload_is_truncated() {
        let mut bytes = FixtureBlock::delta(8, 0, vec![1; 512]).to_bytes(16);
        bytes.truncate(bytes.len() - 1);
        let err = read_channel_block(&mut ByteReader::new(&bytes), &header(16), 7, 0).unwrap_err();
        assert!(matches!(err, NcwError::Truncated { block: Some(7), .. }));
    }

    #[test]
    fn test_mid_side_round_trip() {
        let pairs = [(10, 4), (-6, 2), (0, 0), (-7, -3), (100_000, -99_998)];
        for (mid, side) in pairs {
            let (mut m, mut s) = ([mid], [side]);
            reconstruct_mid_side(&mut m, &mut s);
            let (left, right) = (m[0], s[0]);
            assert_eq!((left, right), ((mid + side) / 2, (mid - side) / 2));
            assert_eq!(left + right, mid);
            assert_eq!(left - right, side);
        }
    }

    #[test]
    fn test_mid_side_truncates_toward_zero() {
        let (mut m, mut s) = ([-3], [0]);
        reconstruct_mid_side(&mut m, &mut s);
        assert_eq!((m[0], s[0]), (-1, -1));
    }

    #[test]
    fn test_pack_bits_matches_reader() {
        let packed = pack_bits(&[1, -1, 3], 3);
        let mut reader = BitReader::new(&packed);
        assert_eq!(reader.read_signed(3), Some(1));
        assert_eq!(reader.read_signed(3), Some(-1));
        assert_eq!(reader.read_signed(3), Some(3));
    }
}
