//! WAV output for decoded audio

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::{NcwAudio, NcwError};

impl NcwAudio {
    /// WAV format matching the decoded stream
    pub fn wav_spec(&self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: SampleFormat::Int,
        }
    }

    /// Write an uncompressed PCM WAV stream
    pub fn write_wav<W: Write + Seek>(&self, writer: W) -> Result<(), NcwError> {
        let mut writer = WavWriter::new(writer, self.wav_spec())?;
        for sample in self.interleaved() {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }

    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, NcwError> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_wav(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Write a WAV file at `path`
    pub fn save_wav(&self, path: impl AsRef<Path>) -> Result<(), NcwError> {
        let mut writer = WavWriter::create(path, self.wav_spec())?;
        for sample in self.interleaved() {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }
}
