//! The 8-byte file tag header shared by every container kind.

use std::borrow::Cow;

use rttex_common::{BinaryReader, BinaryWriter};

use crate::Result;

/// Type tag of the compression envelope.
pub const PACK_TAG: [u8; 6] = *b"RTPACK";

/// Type tag of a texture.
pub const TEXTURE_TAG: [u8; 6] = *b"RTTXTR";

/// Common header at the start of every container.
///
/// | offset | size | field    |
/// |--------|------|----------|
/// | 0      | 6    | tag      |
/// | 6      | 1    | version  |
/// | 7      | 1    | reserved |
///
/// The tag is stored as raw bytes; no charset validation happens here.
/// Callers compare it against [`PACK_TAG`] or [`TEXTURE_TAG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileTagHeader {
    /// Six ASCII bytes, not null-terminated.
    pub tag: [u8; 6],
    /// Format revision.
    pub version: i8,
}

impl FileTagHeader {
    /// Encoded size in bytes.
    pub const SIZE: usize = 8;

    pub const fn new(tag: [u8; 6], version: i8) -> Self {
        Self { tag, version }
    }

    /// Decode a header at `offset`, returning it with the offset just past it.
    pub fn decode(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut reader = BinaryReader::new_at(data, offset);
        let header = Self::read(&mut reader)?;
        Ok((header, reader.position()))
    }

    /// Read a header from the cursor.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        // Check the full length up front so a short buffer never yields a
        // half-read header.
        reader.peek_bytes(Self::SIZE)?;

        let tag = reader.read_fixed::<6>()?;
        let version = reader.read_i8()?;
        reader.skip(1)?;

        Ok(Self { tag, version })
    }

    /// Encode to the fixed 8-byte layout. The reserved byte is zero.
    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..6].copy_from_slice(&self.tag);
        out[6] = self.version as u8;
        out
    }

    /// Append the encoded header to a writer.
    pub fn write(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(&self.encode());
    }

    /// Check whether the tag equals `expected`.
    pub fn has_tag(&self, expected: &[u8; 6]) -> bool {
        &self.tag == expected
    }

    /// The tag as text, with invalid UTF-8 replaced.
    pub fn tag_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.tag)
    }
}
