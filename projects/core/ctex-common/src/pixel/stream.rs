//! Reading and writing packed values inside byte streams.

/// Byte order of multi-byte values, and nibble order of 4-bit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Most significant byte first; for 4-bit values the first pixel is the high nibble.
    Big,
    /// Least significant byte first; for 4-bit values the first pixel is the low nibble.
    Little,
}

/// Number of bytes needed to store `count` values of `bits_per_pixel` bits.
#[inline]
pub const fn stream_len(bits_per_pixel: u8, count: usize) -> usize {
    (count * bits_per_pixel as usize).div_ceil(8)
}

/// Reads the `index`-th packed value of a stream.
///
/// `bits_per_pixel` must be 4, 8, 16 or 32; the caller guarantees `data` holds at
/// least [`stream_len`] bytes for `index + 1` values.
///
/// # Panics
///
/// For any other `bits_per_pixel`. Every [`PixelCodec`](super::PixelCodec) uses one of
/// the four.
#[inline]
pub fn read_value(data: &[u8], bits_per_pixel: u8, index: usize, endian: Endian) -> u32 {
    match bits_per_pixel {
        4 => {
            let byte = data[index / 2];
            let first = index & 1 == 0;
            let high = first == (endian == Endian::Big);
            if high {
                (byte >> 4) as u32
            } else {
                (byte & 0x0F) as u32
            }
        }
        8 => data[index] as u32,
        16 => {
            let bytes = [data[index * 2], data[index * 2 + 1]];
            match endian {
                Endian::Big => u16::from_be_bytes(bytes) as u32,
                Endian::Little => u16::from_le_bytes(bytes) as u32,
            }
        }
        32 => {
            let offset = index * 4;
            let bytes = [
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ];
            match endian {
                Endian::Big => u32::from_be_bytes(bytes),
                Endian::Little => u32::from_le_bytes(bytes),
            }
        }
        _ => unreachable!("no codec packs {bits_per_pixel}-bit values"),
    }
}

/// Writes the `index`-th packed value of a stream. Counterpart of [`read_value`], with
/// the same panics.
#[inline]
pub fn write_value(data: &mut [u8], bits_per_pixel: u8, index: usize, value: u32, endian: Endian) {
    match bits_per_pixel {
        4 => {
            let byte = &mut data[index / 2];
            let first = index & 1 == 0;
            let high = first == (endian == Endian::Big);
            let nibble = (value & 0x0F) as u8;
            if high {
                *byte = (*byte & 0x0F) | (nibble << 4);
            } else {
                *byte = (*byte & 0xF0) | nibble;
            }
        }
        8 => data[index] = value as u8,
        16 => {
            let bytes = match endian {
                Endian::Big => (value as u16).to_be_bytes(),
                Endian::Little => (value as u16).to_le_bytes(),
            };
            data[index * 2..index * 2 + 2].copy_from_slice(&bytes);
        }
        32 => {
            let bytes = match endian {
                Endian::Big => value.to_be_bytes(),
                Endian::Little => value.to_le_bytes(),
            };
            data[index * 4..index * 4 + 4].copy_from_slice(&bytes);
        }
        _ => unreachable!("no codec packs {bits_per_pixel}-bit values"),
    }
}
