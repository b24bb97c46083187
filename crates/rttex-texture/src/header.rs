//! RTTXTR texture header.

use rttex_common::{BinaryReader, BinaryWriter};
use rttex_pack::{FileTagHeader, TEXTURE_TAG};

use crate::{Error, PixelFormat, Result};

/// Newest texture revision this codec understands.
///
/// A header is rejected when its version is strictly greater.
pub const TEXTURE_LATEST_VERSION: i8 = 0;

/// Texture header.
///
/// Layout (100 bytes, little-endian):
///
/// | offset | size | field              |
/// |--------|------|--------------------|
/// | 0      | 8    | file tag header    |
/// | 8      | 4    | height             |
/// | 12     | 4    | width              |
/// | 16     | 4    | format             |
/// | 20     | 4    | original height    |
/// | 24     | 4    | original width     |
/// | 28     | 1    | uses alpha         |
/// | 29     | 1    | already compressed |
/// | 30     | 2    | reserved flags     |
/// | 32     | 4    | mipmap count       |
/// | 36     | 64   | reserved           |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextureHeader {
    pub header: FileTagHeader,
    /// Stored (padded) height.
    pub height: i32,
    /// Stored (padded) width.
    pub width: i32,
    pub format: PixelFormat,
    /// Height of the source image before padding.
    pub original_height: i32,
    /// Width of the source image before padding.
    pub original_width: i32,
    /// Pixels are RGBA rather than RGB. Only a stored 1 means RGBA.
    pub uses_alpha: bool,
    /// Informational only.
    pub already_compressed: bool,
    pub mipmap_count: i32,
}

impl TextureHeader {
    /// Encoded size in bytes.
    pub const SIZE: usize = 100;

    const RESERVED_LEN: usize = 64;

    /// Decode a header at `offset`, returning it with the offset of the first mip.
    pub fn decode(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut reader = BinaryReader::new_at(data, offset);
        let header = Self::read(&mut reader)?;
        Ok((header, reader.position()))
    }

    /// Read a header from the cursor.
    ///
    /// The tag and version are checked before anything else is read.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let header = FileTagHeader::read(reader)?;
        if !header.has_tag(&TEXTURE_TAG) {
            return Err(Error::BadMagic(header.tag));
        }
        if header.version > TEXTURE_LATEST_VERSION {
            return Err(Error::UnsupportedVersion {
                version: header.version,
                latest: TEXTURE_LATEST_VERSION,
            });
        }

        let height = reader.read_i32()?;
        let width = reader.read_i32()?;
        let format = PixelFormat::from_raw(reader.read_i32()?);
        let original_height = reader.read_i32()?;
        let original_width = reader.read_i32()?;
        let uses_alpha = reader.read_i8()? == 1;
        let already_compressed = reader.read_i8()? != 0;
        let _reserved_flags = reader.read_i16()?;
        let mipmap_count = reader.read_i32()?;
        reader.skip(Self::RESERVED_LEN)?;

        Ok(Self {
            header,
            height,
            width,
            format,
            original_height,
            original_width,
            uses_alpha,
            already_compressed,
            mipmap_count,
        })
    }

    /// Encode the 100-byte header. Reserved bytes are zero.
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(Self::SIZE);
        self.write(&mut writer);
        writer.into_inner()
    }

    /// Append the encoded header to a writer.
    pub fn write(&self, writer: &mut BinaryWriter) {
        self.header.write(writer);
        writer.write_i32(self.height);
        writer.write_i32(self.width);
        writer.write_i32(self.format.to_raw());
        writer.write_i32(self.original_height);
        writer.write_i32(self.original_width);
        writer.write_i8(self.uses_alpha as i8);
        writer.write_i8(self.already_compressed as i8);
        writer.write_i16(0);
        writer.write_i32(self.mipmap_count);
        writer.write_zeros(Self::RESERVED_LEN);
    }

    /// Bytes per pixel: 4 with alpha, 3 without.
    pub fn channels(&self) -> usize {
        if self.uses_alpha {
            4
        } else {
            3
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rttex_common::ErrorKind;

    fn sample() -> TextureHeader {
        TextureHeader {
            header: FileTagHeader::new(TEXTURE_TAG, 0),
            height: 8,
            width: 16,
            format: PixelFormat::Raw8,
            original_height: 6,
            original_width: 10,
            uses_alpha: true,
            already_compressed: false,
            mipmap_count: 1,
        }
    }

    #[test]
    fn test_field_offsets() {
        let bytes = sample().encode();

        assert_eq!(bytes.len(), TextureHeader::SIZE);
        assert_eq!(&bytes[..6], b"RTTXTR");
        assert_eq!(&bytes[8..12], &8i32.to_le_bytes());
        assert_eq!(&bytes[12..16], &16i32.to_le_bytes());
        assert_eq!(&bytes[16..20], &5121i32.to_le_bytes());
        assert_eq!(&bytes[20..24], &6i32.to_le_bytes());
        assert_eq!(&bytes[24..28], &10i32.to_le_bytes());
        assert_eq!(bytes[28], 1);
        assert_eq!(bytes[29], 0);
        assert_eq!(&bytes[32..36], &1i32.to_le_bytes());
        assert!(bytes[36..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_decode_ignores_reserved_contents() {
        let mut bytes = sample().encode();
        bytes[7] = 0xAA;
        bytes[30] = 0x55;
        for b in &mut bytes[36..] {
            *b = 0xCC;
        }

        let (header, next) = TextureHeader::decode(&bytes, 0).unwrap();
        assert_eq!(header, sample());
        assert_eq!(next, TextureHeader::SIZE);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = sample().encode();
        bytes[..6].copy_from_slice(b"RTFONT");

        let err = TextureHeader::decode(&bytes, 0).unwrap_err();
        assert!(matches!(err, Error::BadMagic(tag) if &tag == b"RTFONT"));
    }

    #[test]
    fn test_version_gate() {
        let mut header = sample();
        header.header.version = TEXTURE_LATEST_VERSION;
        assert!(TextureHeader::decode(&header.encode(), 0).is_ok());

        header.header.version = TEXTURE_LATEST_VERSION + 1;
        let err = TextureHeader::decode(&header.encode(), 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);
    }

    #[test]
    fn test_truncated() {
        let bytes = sample().encode();
        let err = TextureHeader::decode(&bytes[..99], 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn test_uses_alpha_only_when_one() {
        let mut bytes = sample().encode();
        bytes[28] = 2;
        let (header, _) = TextureHeader::decode(&bytes, 0).unwrap();
        assert!(!header.uses_alpha);
        assert_eq!(header.channels(), 3);

        bytes[28] = 1;
        let (header, _) = TextureHeader::decode(&bytes, 0).unwrap();
        assert!(header.uses_alpha);
    }

    #[test]
    fn test_rgb_channels() {
        let mut header = sample();
        header.uses_alpha = false;
        assert_eq!(header.channels(), 3);
    }
}
