//! The RTPACK compression envelope.

use std::borrow::Cow;

use rttex_common::{BinaryReader, BinaryWriter};

use crate::compress::{compress_zlib, decompress_zlib_sized};
use crate::tag::{FileTagHeader, PACK_TAG};
use crate::{Error, Result};

/// Newest envelope revision this crate writes.
pub const PACK_LATEST_VERSION: i8 = 0;

/// Compression method of an envelope payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(i8)]
pub enum CompressionType {
    /// Payload is stored as-is.
    None = 0,
    /// Payload is a zlib stream.
    Zlib = 1,
}

impl CompressionType {
    /// Map a raw field value to a known method.
    pub fn from_raw(value: i8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Zlib),
            _ => None,
        }
    }
}

/// Decoded RTPACK envelope header.
///
/// Layout (32 bytes, little-endian):
///
/// | offset | size | field             |
/// |--------|------|-------------------|
/// | 0      | 8    | file tag header   |
/// | 8      | 4    | compressed size   |
/// | 12     | 4    | decompressed size |
/// | 16     | 1    | compression type  |
/// | 17     | 15   | reserved          |
///
/// The payload follows immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PackEnvelope {
    pub header: FileTagHeader,
    pub compressed_size: u32,
    pub decompressed_size: u32,
    pub compression: CompressionType,
}

impl PackEnvelope {
    /// Encoded header size in bytes.
    pub const SIZE: usize = 32;

    const RESERVED_LEN: usize = 15;

    /// Check if data starts with the pack tag.
    pub fn detect(data: &[u8]) -> bool {
        data.len() >= PACK_TAG.len() && data[..PACK_TAG.len()] == PACK_TAG
    }

    /// Decode an envelope header at `offset`.
    ///
    /// Returns the envelope and the offset of its payload. Sizes are read
    /// unsigned, so a negative field surfaces as an out-of-range size later
    /// instead of wrapping.
    pub fn decode(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut reader = BinaryReader::new_at(data, offset);

        let header = FileTagHeader::read(&mut reader)?;
        if !header.has_tag(&PACK_TAG) {
            return Err(Error::BadMagic(header.tag));
        }

        let compressed_size = reader.read_u32()?;
        let decompressed_size = reader.read_u32()?;
        let raw_compression = reader.read_i8()?;
        reader.skip(Self::RESERVED_LEN)?;

        let compression = CompressionType::from_raw(raw_compression)
            .ok_or(Error::UnsupportedCompression(raw_compression))?;

        tracing::debug!(
            version = header.version,
            compressed_size,
            decompressed_size,
            ?compression,
            "decoded pack envelope"
        );

        Ok((
            Self {
                header,
                compressed_size,
                decompressed_size,
                compression,
            },
            reader.position(),
        ))
    }

    /// Extract the payload this envelope describes.
    ///
    /// Stored payloads are copied out unchanged; zlib payloads are inflated
    /// and must expand to exactly `decompressed_size` bytes.
    pub fn unwrap_payload(&self, data: &[u8], payload_offset: usize) -> Result<Vec<u8>> {
        let mut reader = BinaryReader::new_at(data, payload_offset);
        let payload = reader.read_bytes(self.compressed_size as usize)?;

        match self.compression {
            CompressionType::None => Ok(payload.to_vec()),
            CompressionType::Zlib => {
                decompress_zlib_sized(payload, self.decompressed_size as usize)
            }
        }
    }

    /// Compress `payload` and prepend an envelope header with the measured sizes.
    pub fn wrap(payload: &[u8], compression: CompressionType, level: u32) -> Result<Vec<u8>> {
        let body: Cow<'_, [u8]> = match compression {
            CompressionType::None => Cow::Borrowed(payload),
            CompressionType::Zlib => Cow::Owned(compress_zlib(payload, level)?),
        };

        let envelope = Self {
            header: FileTagHeader::new(PACK_TAG, PACK_LATEST_VERSION),
            compressed_size: size_field(body.len())?,
            decompressed_size: size_field(payload.len())?,
            compression,
        };

        tracing::debug!(
            compressed_size = envelope.compressed_size,
            decompressed_size = envelope.decompressed_size,
            ?compression,
            "wrapped payload"
        );

        let mut writer = BinaryWriter::with_capacity(Self::SIZE + body.len());
        envelope.write(&mut writer);
        writer.write_bytes(&body);
        Ok(writer.into_inner())
    }

    /// Encode the 32-byte header. Reserved bytes are zero.
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::with_capacity(Self::SIZE);
        self.write(&mut writer);
        writer.into_inner()
    }

    fn write(&self, writer: &mut BinaryWriter) {
        self.header.write(writer);
        writer.write_u32(self.compressed_size);
        writer.write_u32(self.decompressed_size);
        writer.write_i8(self.compression as i8);
        writer.write_zeros(Self::RESERVED_LEN);
    }
}

/// Strip an envelope if present.
///
/// Data without the pack tag is borrowed back unchanged.
pub fn unpack(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    if !PackEnvelope::detect(data) {
        return Ok(Cow::Borrowed(data));
    }

    let (envelope, payload_offset) = PackEnvelope::decode(data, 0)?;
    envelope.unwrap_payload(data, payload_offset).map(Cow::Owned)
}

fn size_field(len: usize) -> Result<u32> {
    i32::try_from(len)
        .map(|v| v as u32)
        .map_err(|_| Error::PayloadTooLarge(len))
}
