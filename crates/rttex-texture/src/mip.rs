//! Per-level mip descriptor.

use rttex_common::{BinaryReader, BinaryWriter};

use crate::Result;

/// Mip header, immediately followed by `data_size` bytes of pixels.
///
/// Layout (24 bytes, little-endian):
///
/// | offset | size | field     |
/// |--------|------|-----------|
/// | 0      | 4    | height    |
/// | 4      | 4    | width     |
/// | 8      | 4    | data size |
/// | 12     | 4    | mip level |
/// | 16     | 8    | reserved  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MipHeader {
    pub height: i32,
    pub width: i32,
    /// Read unsigned; a negative stored value can never fit the buffer.
    pub data_size: u32,
    pub mip_level: i32,
}

impl MipHeader {
    /// Encoded size in bytes.
    pub const SIZE: usize = 24;

    const RESERVED_LEN: usize = 8;

    /// Decode a mip header at `offset`, returning it with its payload offset.
    pub fn decode(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut reader = BinaryReader::new_at(data, offset);

        let height = reader.read_i32()?;
        let width = reader.read_i32()?;
        let data_size = reader.read_u32()?;
        let mip_level = reader.read_i32()?;
        reader.skip(Self::RESERVED_LEN)?;
        debug_assert_eq!(reader.position() - offset, Self::SIZE);

        Ok((
            Self {
                height,
                width,
                data_size,
                mip_level,
            },
            reader.position(),
        ))
    }

    /// Slice this mip's payload out of `data`.
    pub fn slice_data<'a>(&self, data: &'a [u8], payload_offset: usize) -> Result<&'a [u8]> {
        let mut reader = BinaryReader::new_at(data, payload_offset);
        Ok(reader.read_bytes(self.data_size as usize)?)
    }

    /// Encode the 24-byte header. Reserved bytes are zero.
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(Self::SIZE);
        self.write(&mut writer);
        writer.into_inner()
    }

    /// Append the encoded header to a writer.
    pub fn write(&self, writer: &mut BinaryWriter) {
        writer.write_i32(self.height);
        writer.write_i32(self.width);
        writer.write_u32(self.data_size);
        writer.write_i32(self.mip_level);
        writer.write_zeros(Self::RESERVED_LEN);
    }
}
