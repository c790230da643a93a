//! Little-endian bit unpacking

/// Reads fixed-width values from a little-endian bit stream.
///
/// Whole bytes are shifted into an accumulator; values are taken from its
/// low end.
pub(crate) struct BitReader<'a> {
    data: &'a [u8],
    byte_pos: usize,
    buffer: u64,
    buffered: u32,
}

impl<'a> BitReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            buffer: 0,
            buffered: 0,
        }
    }

    /// Read `count` bits (1..=32) as an unsigned value, `None` at end of data
    pub(crate) fn read_bits(&mut self, count: u32) -> Option<u32> {
        debug_assert!((1..=32).contains(&count));
        while self.buffered < count {
            let byte = *self.data.get(self.byte_pos)?;
            self.buffer |= (byte as u64) << self.buffered;
            self.buffered += 8;
            self.byte_pos += 1;
        }

        let value = (self.buffer & ((1u64 << count) - 1)) as u32;
        self.buffer >>= count;
        self.buffered -= count;
        Some(value)
    }

    /// Read `count` bits and sign-extend from the top bit of that width
    pub(crate) fn read_signed(&mut self, count: u32) -> Option<i32> {
        self.read_bits(count).map(|v| sign_extend(v, count))
    }
}

/// Two's-complement sign extension of the low `bits` bits
pub(crate) fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}
