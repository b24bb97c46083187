//! Texture container layout: header plus the first mip level.

use rttex_common::crc;
use rttex_pack::{unpack, PackEnvelope};

use crate::{Error, MipHeader, Result, TextureHeader};

/// A texture header with its level-0 mip.
///
/// Only one mip level is ever read. Trailing levels declared by
/// `mipmap_count` are left untouched, so an undersized tail never errors.
#[derive(Debug, Clone)]
pub struct TextureFile<'a> {
    pub header: TextureHeader,
    pub mip: MipHeader,
    /// Level-0 payload, borrowed from the unpacked texture bytes.
    pub pixels: &'a [u8],
}

impl<'a> TextureFile<'a> {
    /// Number of mip levels this codec reads.
    pub const SUPPORTED_MIP_LEVELS: usize = 1;

    /// Parse a bare (already unpacked) texture.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let (header, mip_offset) = TextureHeader::decode(data, 0)?;
        Self::with_header(data, header, mip_offset)
    }

    /// Read the level-0 mip that follows an already decoded header.
    pub fn with_header(data: &'a [u8], header: TextureHeader, mip_offset: usize) -> Result<Self> {
        if header.mipmap_count < 1 {
            return Err(Error::InvalidData(format!(
                "texture declares {} mip levels",
                header.mipmap_count
            )));
        }

        let (mip, payload_offset) = MipHeader::decode(data, mip_offset)?;
        let pixels = mip.slice_data(data, payload_offset)?;

        tracing::trace!(mip_offset, payload_offset, data_size = mip.data_size, "read mip 0");
        if header.mipmap_count as usize > Self::SUPPORTED_MIP_LEVELS {
            tracing::warn!(
                mipmap_count = header.mipmap_count,
                "only mip level 0 is read, ignoring the rest"
            );
        }

        Ok(Self {
            header,
            mip,
            pixels,
        })
    }

    /// Mip levels declared by the header but never read.
    pub fn ignored_mip_levels(&self) -> usize {
        (self.header.mipmap_count.max(0) as usize).saturating_sub(Self::SUPPORTED_MIP_LEVELS)
    }
}

/// Summary of a container, for display.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContainerInfo {
    /// Envelope header, if the texture was packed.
    pub envelope: Option<PackEnvelope>,
    pub texture: TextureHeader,
    pub mip: MipHeader,
    pub ignored_mip_levels: usize,
    /// Size of the input, envelope included.
    pub container_size: usize,
    /// Size of the bare texture after unpacking.
    pub texture_size: usize,
    /// Advisory CRC32C of the input bytes.
    pub checksum: u32,
}

/// Describe a container without converting its pixels.
///
/// Any pixel format is accepted here.
pub fn inspect(data: &[u8]) -> Result<ContainerInfo> {
    let envelope = if PackEnvelope::detect(data) {
        Some(PackEnvelope::decode(data, 0)?.0)
    } else {
        None
    };

    let texture = unpack(data)?;
    let file = TextureFile::parse(&texture)?;

    Ok(ContainerInfo {
        envelope,
        texture: file.header,
        mip: file.mip,
        ignored_mip_levels: file.ignored_mip_levels(),
        container_size: data.len(),
        texture_size: texture.len(),
        checksum: crc::hash_bytes(data),
    })
}
