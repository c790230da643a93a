//! Stream header and block offset table

use sample_shared::ByteReader;

use crate::{HEADER_SIZE, MAX_CHANNELS, NCW_MAGIC, NCW_VERSION, NcwError};

/// Parsed NCW stream header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NcwHeader {
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_rate: u32,
    /// Samples per channel
    pub number_of_samples: u32,
    /// Byte offset of the block offset table
    pub offset_block_address: u32,
    /// Byte offset of the first block; table entries are relative to it
    pub offset_block_data: u32,
    /// Stored but not used by the decoder
    pub total_block_size: u32,
}

impl NcwHeader {
    /// Parse and validate the fixed header at the start of `data`
    pub fn parse(data: &[u8]) -> Result<Self, NcwError> {
        let mut reader = ByteReader::new(data);
        let eof = NcwError::truncated(None);

        let magic = reader.u32().map_err(&eof)?;
        if magic != NCW_MAGIC {
            return Err(NcwError::InvalidMagic(magic));
        }
        let version = reader.u32().map_err(&eof)?;
        if version != NCW_VERSION {
            return Err(NcwError::UnsupportedVersion(version));
        }

        let header = Self {
            channels: reader.u16().map_err(&eof)?,
            bits_per_sample: reader.u16().map_err(&eof)?,
            sample_rate: reader.u32().map_err(&eof)?,
            number_of_samples: reader.u32().map_err(&eof)?,
            offset_block_address: reader.u32().map_err(&eof)?,
            offset_block_data: reader.u32().map_err(&eof)?,
            total_block_size: reader.u32().map_err(&eof)?,
        };
        reader
            .skip(HEADER_SIZE - reader.position())
            .map_err(&eof)?;

        if header.channels == 0 {
            return Err(NcwError::InvalidChannelCount(header.channels));
        }
        if header.channels > MAX_CHANNELS {
            return Err(NcwError::TooManyChannels(header.channels));
        }
        if !matches!(header.bits_per_sample, 16 | 24 | 32) {
            return Err(NcwError::UnsupportedBitDepth(header.bits_per_sample));
        }
        Ok(header)
    }

    /// Bytes per native-width sample
    pub fn bytes_per_sample(&self) -> usize {
        self.bits_per_sample as usize / 8
    }

    /// Read the block offset table.
    ///
    /// The first entry must be zero and entries must not decrease. With `N`
    /// entries there are `N - 1` blocks; the last entry marks the end of block
    /// data.
    pub fn read_offsets(&self, data: &[u8]) -> Result<Vec<u32>, NcwError> {
        let address = self.offset_block_address;
        let block_data = self.offset_block_data;
        if block_data < address || (address as usize) < HEADER_SIZE {
            return Err(NcwError::InvalidOffsetTable {
                address,
                data: block_data,
            });
        }

        let count = ((block_data - address) / 4) as usize;
        if count == 0 {
            return Err(NcwError::InvalidOffsetTable {
                address,
                data: block_data,
            });
        }

        let mut reader = ByteReader::new(data);
        let eof = NcwError::truncated(None);
        reader.skip(address as usize).map_err(&eof)?;

        let mut offsets = Vec::with_capacity(count);
        for block in 0..count {
            let offset = reader.u32().map_err(&eof)?;
            if block == 0 && offset != 0 {
                return Err(NcwError::FirstOffsetNotZero(offset));
            }
            if offsets.last().is_some_and(|&prev| offset < prev) {
                return Err(NcwError::OffsetsNotIncreasing { block });
            }
            offsets.push(offset);
        }
        Ok(offsets)
    }
}
