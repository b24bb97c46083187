//! Container bytes to raw pixels.

use std::fs;
use std::path::Path;

use rttex_pack::unpack;

use crate::raster::{buffer_len, crop, RasterCodec, RasterLayout};
use crate::{Error, PixelFormat, Result, TextureFile, TextureHeader};

/// Options for [`decode_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Crop the power-of-two padding back to the original size.
    pub crop: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { crop: true }
    }
}

/// Level-0 pixels of a decoded texture.
///
/// Rows are bottom-up, exactly as stored. Callers flip them before writing a
/// conventional image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTexture {
    pub pixels: Vec<u8>,
    /// Stored (padded) width.
    pub width: u32,
    /// Stored (padded) height.
    pub height: u32,
    pub has_alpha: bool,
    pub original_width: u32,
    pub original_height: u32,
}

impl DecodedTexture {
    /// Bytes per pixel.
    pub fn channels(&self) -> usize {
        if self.has_alpha {
            4
        } else {
            3
        }
    }

    /// Pixels cropped to the original size, still bottom-up.
    pub fn cropped(&self) -> Result<Vec<u8>> {
        crop(
            &self.pixels,
            self.width,
            self.height,
            self.channels(),
            self.original_width,
            self.original_height,
        )
    }
}

/// Decode a container (packed or bare) into its level-0 pixels.
pub fn decode(data: &[u8]) -> Result<DecodedTexture> {
    let texture = unpack(data)?;
    let (header, mip_offset) = TextureHeader::decode(&texture, 0)?;

    if header.format != PixelFormat::Raw8 {
        return Err(Error::UnsupportedFormat(header.format));
    }

    tracing::debug!(
        width = header.width,
        height = header.height,
        original_width = header.original_width,
        original_height = header.original_height,
        uses_alpha = header.uses_alpha,
        mipmap_count = header.mipmap_count,
        "decoded texture header"
    );

    let file = TextureFile::with_header(&texture, header, mip_offset)?;

    let width = dimension("width", header.width)?;
    let height = dimension("height", header.height)?;
    let expected = buffer_len(width, height, header.channels())
        .ok_or_else(|| Error::InvalidData(format!("{width}x{height} texture is too large")))?;
    if file.pixels.len() != expected {
        return Err(Error::PayloadSizeMismatch {
            expected,
            actual: file.pixels.len(),
        });
    }

    if file.mip.width != header.width || file.mip.height != header.height {
        tracing::warn!(
            mip_width = file.mip.width,
            mip_height = file.mip.height,
            "mip 0 dimensions differ from texture header"
        );
    }

    Ok(DecodedTexture {
        pixels: file.pixels.to_vec(),
        width,
        height,
        has_alpha: header.uses_alpha,
        original_width: original_dimension("original width", header.original_width, width),
        original_height: original_dimension("original height", header.original_height, height),
    })
}

/// Decode a container file and write it as an image through `codec`.
pub fn decode_file<C: RasterCodec + ?Sized>(
    codec: &C,
    input: &Path,
    output: &Path,
    options: &DecodeOptions,
) -> Result<DecodedTexture> {
    let data = fs::read(input)?;
    let texture = decode(&data)?;

    let (pixels, width, height) = if options.crop {
        (
            texture.cropped()?,
            texture.original_width,
            texture.original_height,
        )
    } else {
        (texture.pixels.clone(), texture.width, texture.height)
    };

    let layout = RasterLayout {
        width,
        height,
        channels: texture.channels() as u8,
    };
    codec.write_raw(&pixels, layout, true, output)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        width,
        height,
        "decoded texture"
    );

    Ok(texture)
}

fn dimension(name: &str, value: i32) -> Result<u32> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(Error::InvalidData(format!("texture {name} is {value}"))),
    }
}

/// Unset or out-of-range original sizes fall back to the stored size.
fn original_dimension(name: &str, value: i32, stored: u32) -> u32 {
    match u32::try_from(value) {
        Ok(v) if v > 0 && v <= stored => v,
        _ => {
            tracing::warn!(value, stored, "{name} out of range, using stored size");
            stored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MipHeader, TEXTURE_LATEST_VERSION};
    use rttex_common::{BinaryWriter, ErrorKind};
    use rttex_pack::{CompressionType, FileTagHeader, PackEnvelope, TEXTURE_TAG};

    fn bare_texture(width: i32, height: i32, uses_alpha: bool, payload: &[u8]) -> Vec<u8> {
        let header = TextureHeader {
            header: FileTagHeader::new(TEXTURE_TAG, TEXTURE_LATEST_VERSION),
            height,
            width,
            format: PixelFormat::Raw8,
            original_height: height,
            original_width: width,
            uses_alpha,
            already_compressed: false,
            mipmap_count: 1,
        };
        let mip = MipHeader {
            height,
            width,
            data_size: payload.len() as u32,
            mip_level: 0,
        };

        let mut writer = BinaryWriter::new();
        header.write(&mut writer);
        mip.write(&mut writer);
        writer.write_bytes(payload);
        writer.into_inner()
    }

    #[test]
    fn test_decode_literal_layout() {
        let mut data = Vec::new();
        data.extend_from_slice(b"RTTXTR\x00\x00");
        for field in [1i32, 2, 5121, 1, 2] {
            data.extend_from_slice(&field.to_le_bytes());
        }
        data.extend_from_slice(&[0, 0, 0, 0]); // RGB, flags
        data.extend_from_slice(&1i32.to_le_bytes());
        data.extend_from_slice(&[0; 64]);
        assert_eq!(data.len(), 100);

        // mip 0: height, width, data size, level, 8 reserved bytes
        for field in [1i32, 2, 6, 0] {
            data.extend_from_slice(&field.to_le_bytes());
        }
        data.extend_from_slice(&[0; 8]);
        assert_eq!(data.len(), 124);
        data.extend_from_slice(&[10, 11, 12, 13, 14, 15]);

        let texture = decode(&data).unwrap();
        assert_eq!(texture.pixels, vec![10, 11, 12, 13, 14, 15]);
        assert_eq!((texture.width, texture.height), (2, 1));
        assert!(!texture.has_alpha);
    }

    #[test]
    fn test_decode_bare_rgb() {
        let payload: Vec<u8> = (0..2 * 2 * 3).collect();
        let data = bare_texture(2, 2, false, &payload);

        let texture = decode(&data).unwrap();
        assert_eq!(texture.pixels, payload);
        assert!(!texture.has_alpha);
        assert_eq!(texture.channels(), 3);
        assert_eq!((texture.width, texture.height), (2, 2));
    }

    #[test]
    fn test_decode_packed() {
        let payload = vec![0xAB; 4 * 4 * 4];
        let bare = bare_texture(4, 4, true, &payload);
        let packed = PackEnvelope::wrap(&bare, CompressionType::Zlib, 9).unwrap();

        let texture = decode(&packed).unwrap();
        assert_eq!(texture.pixels, payload);
        assert!(texture.has_alpha);
    }

    #[test]
    fn test_decode_does_not_alias_input() {
        let payload = vec![1u8; 4];
        let data = bare_texture(1, 1, true, &payload);

        let mut texture = decode(&data).unwrap();
        texture.pixels[0] = 99;
        assert_eq!(&data[data.len() - 4..], &[1, 1, 1, 1]);
    }

    #[test]
    fn test_empty_input() {
        let err = decode(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn test_unknown_tag() {
        let err = decode(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadMagic);
    }

    #[test]
    fn test_unsupported_compression() {
        let mut packed =
            PackEnvelope::wrap(&bare_texture(1, 1, true, &[0; 4]), CompressionType::Zlib, 9)
                .unwrap();
        packed[16] = 99;

        let err = decode(&packed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedCompression);
    }

    #[test]
    fn test_unsupported_format() {
        let mut data = bare_texture(1, 1, true, &[0; 4]);
        data[16..20].copy_from_slice(&PixelFormat::RGB565.to_le_bytes());

        let err = decode(&data).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(PixelFormat::Rgb565)));
    }

    #[test]
    fn test_format_checked_before_mip() {
        // Embedded-file texture with no mip at all.
        let mut data = bare_texture(1, 1, true, &[0; 4]);
        data[16..20].copy_from_slice(&PixelFormat::EMBEDDED_FILE.to_le_bytes());
        data.truncate(TextureHeader::SIZE);

        let err = decode(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_unsupported_version() {
        let mut data = bare_texture(1, 1, true, &[0; 4]);
        data[6] = (TEXTURE_LATEST_VERSION + 1) as u8;

        let err = decode(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);
    }

    #[test]
    fn test_payload_truncated() {
        let mut data = bare_texture(2, 2, true, &[0; 16]);
        data.truncate(data.len() - 1);

        let err = decode(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn test_payload_size_disagrees_with_dimensions() {
        let data = bare_texture(2, 2, true, &[0; 12]);

        let err = decode(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::PayloadSizeMismatch {
                expected: 16,
                actual: 12
            }
        ));
    }

    #[test]
    fn test_declared_trailing_mips_ignored() {
        let mut data = bare_texture(1, 1, true, &[9; 4]);
        data[32..36].copy_from_slice(&3i32.to_le_bytes());

        let texture = decode(&data).unwrap();
        assert_eq!(texture.pixels, vec![9; 4]);
    }

    #[test]
    fn test_invalid_original_size_falls_back() {
        let mut data = bare_texture(2, 2, true, &[0; 16]);
        // original height 0, original width larger than stored
        data[20..24].copy_from_slice(&0i32.to_le_bytes());
        data[24..28].copy_from_slice(&64i32.to_le_bytes());

        let texture = decode(&data).unwrap();
        assert_eq!((texture.original_width, texture.original_height), (2, 2));
    }

    #[test]
    fn test_negative_dimensions() {
        let mut data = bare_texture(1, 1, true, &[0; 4]);
        data[8..12].copy_from_slice(&(-1i32).to_le_bytes());

        let err = decode(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
