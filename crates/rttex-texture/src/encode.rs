//! Raw pixels to container bytes.

use std::fs;
use std::path::Path;

use rttex_common::BinaryWriter;
use rttex_pack::{CompressionType, FileTagHeader, PackEnvelope, DEFAULT_LEVEL, TEXTURE_TAG};

use crate::raster::{buffer_len, pad_bottom_up, NormalizedRaster, RasterCodec, RasterSize};
use crate::{Error, MipHeader, PixelFormat, Result, TextureHeader, TEXTURE_LATEST_VERSION};

/// Largest source dimension accepted by the encoder.
pub const MAX_DIMENSION: u32 = 1 << 14;

/// Options for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub compression: CompressionType,
    /// zlib level, 0-9.
    pub level: u32,
    /// Composite onto this opaque RGB color before encoding.
    pub flatten: Option<[u8; 3]>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Zlib,
            level: DEFAULT_LEVEL,
            flatten: None,
        }
    }
}

/// Smallest power of two that is at least `n`. Zero maps to 1.
///
/// Returns `None` if the result does not fit in a `u32` (`n > 2^31`).
pub fn next_power_of_two_at_least(n: u32) -> Option<u32> {
    n.max(1).checked_next_power_of_two()
}

/// Padded canvas size for a source image.
pub fn padded_size(original: RasterSize) -> Result<RasterSize> {
    for (name, value) in [("width", original.width), ("height", original.height)] {
        if value == 0 || value > MAX_DIMENSION {
            return Err(Error::InvalidData(format!(
                "image {name} {value} is outside 1..={MAX_DIMENSION}"
            )));
        }
    }

    let pad = |value: u32| {
        next_power_of_two_at_least(value)
            .ok_or_else(|| Error::InvalidData(format!("dimension {value} is too large")))
    };
    Ok(RasterSize::new(pad(original.width)?, pad(original.height)?))
}

/// Build a container from a normalized (bottom-up, padded RGBA) raster.
pub fn encode_raster(
    raster: &NormalizedRaster,
    original: RasterSize,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    let expected = buffer_len(raster.width, raster.height, 4).ok_or_else(|| {
        Error::InvalidData(format!("{}x{} raster is too large", raster.width, raster.height))
    })?;
    if raster.data.len() != expected {
        return Err(Error::PayloadSizeMismatch {
            expected,
            actual: raster.data.len(),
        });
    }

    let width = header_dimension(raster.width)?;
    let height = header_dimension(raster.height)?;
    let data_size = u32::try_from(raster.data.len())
        .ok()
        .filter(|&size| size <= i32::MAX as u32)
        .ok_or_else(|| Error::InvalidData("pixel payload too large".into()))?;

    let header = TextureHeader {
        header: FileTagHeader::new(TEXTURE_TAG, TEXTURE_LATEST_VERSION),
        height,
        width,
        format: PixelFormat::Raw8,
        original_height: header_dimension(original.height)?,
        original_width: header_dimension(original.width)?,
        uses_alpha: true,
        already_compressed: false,
        mipmap_count: 1,
    };
    let mip = MipHeader {
        height,
        width,
        data_size,
        mip_level: 0,
    };

    let mut writer =
        BinaryWriter::with_capacity(TextureHeader::SIZE + MipHeader::SIZE + raster.data.len());
    header.write(&mut writer);
    mip.write(&mut writer);
    writer.write_bytes(&raster.data);

    tracing::debug!(
        width,
        height,
        original_width = original.width,
        original_height = original.height,
        texture_size = writer.len(),
        "built texture"
    );

    Ok(PackEnvelope::wrap(
        writer.as_bytes(),
        options.compression,
        options.level,
    )?)
}

/// Build a container from a top-down RGBA bitmap.
pub fn encode_rgba(rgba: &[u8], width: u32, height: u32, options: &EncodeOptions) -> Result<Vec<u8>> {
    let original = RasterSize::new(width, height);
    let padded = padded_size(original)?;
    let data = pad_bottom_up(rgba, width, height, padded)?;

    let raster = NormalizedRaster {
        data,
        width: padded.width,
        height: padded.height,
    };
    encode_raster(&raster, original, options)
}

/// Load an image through `codec` and write it as a container file.
pub fn encode_file<C: RasterCodec + ?Sized>(
    codec: &C,
    input: &Path,
    output: &Path,
    options: &EncodeOptions,
) -> Result<usize> {
    let original = codec.load_metadata(input)?;
    let padded = padded_size(original)?;

    let raster = codec.load_normalized_raw(input, padded, options.flatten)?;
    if raster.width != padded.width || raster.height != padded.height {
        return Err(Error::Raster(format!(
            "codec returned {}x{}, expected {}x{}",
            raster.width, raster.height, padded.width, padded.height
        )));
    }

    let bytes = encode_raster(&raster, original, options)?;
    fs::write(output, &bytes)?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        width = padded.width,
        height = padded.height,
        size = bytes.len(),
        "encoded texture"
    );

    Ok(bytes.len())
}

fn header_dimension(value: u32) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::InvalidData(format!("dimension {value} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::raster::flip_vertical;
    use rttex_common::ErrorKind;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8, 255]);
            }
        }
        rgba
    }

    #[test]
    fn test_next_power_of_two_at_least() {
        assert_eq!(next_power_of_two_at_least(1), Some(1));
        assert_eq!(next_power_of_two_at_least(2), Some(2));
        assert_eq!(next_power_of_two_at_least(3), Some(4));
        assert_eq!(next_power_of_two_at_least(10), Some(16));
        assert_eq!(next_power_of_two_at_least(64), Some(64));
        assert_eq!(next_power_of_two_at_least(65), Some(128));
        assert_eq!(next_power_of_two_at_least(0), Some(1));
    }

    #[test]
    fn test_next_power_of_two_overflow() {
        assert_eq!(next_power_of_two_at_least(1 << 31), Some(1 << 31));
        assert_eq!(next_power_of_two_at_least((1 << 31) + 1), None);
        assert_eq!(next_power_of_two_at_least(u32::MAX), None);
    }

    #[test]
    fn test_encode_10x6() {
        let bytes = encode_rgba(&gradient(10, 6), 10, 6, &EncodeOptions::default()).unwrap();

        let (envelope, offset) = PackEnvelope::decode(&bytes, 0).unwrap();
        assert_eq!(envelope.compression, CompressionType::Zlib);
        assert_eq!(
            envelope.decompressed_size as usize,
            TextureHeader::SIZE + MipHeader::SIZE + 16 * 8 * 4
        );
        // 100-byte texture header, 24-byte mip header, 16x8 RGBA
        assert_eq!(envelope.decompressed_size, 636);

        let texture = envelope.unwrap_payload(&bytes, offset).unwrap();
        let (header, mip_offset) = TextureHeader::decode(&texture, 0).unwrap();
        assert_eq!((header.width, header.height), (16, 8));
        assert_eq!((header.original_width, header.original_height), (10, 6));
        assert_eq!(header.format, PixelFormat::Raw8);
        assert!(header.uses_alpha);
        assert_eq!(header.mipmap_count, 1);

        let (mip, _) = MipHeader::decode(&texture, mip_offset).unwrap();
        assert_eq!(mip.data_size, 16 * 8 * 4);
        assert_eq!(mip.mip_level, 0);
    }

    #[test]
    fn test_roundtrip_restores_pixels() {
        for (width, height) in [(1, 1), (10, 6), (16, 16), (5, 33)] {
            let original = gradient(width, height);
            let bytes = encode_rgba(&original, width, height, &EncodeOptions::default()).unwrap();

            let texture = decode(&bytes).unwrap();
            assert_eq!(texture.original_width, width);
            assert_eq!(texture.original_height, height);

            let cropped = texture.cropped().unwrap();
            let top_down = flip_vertical(&cropped, width, height, 4).unwrap();
            assert_eq!(top_down, original, "{width}x{height}");
        }
    }

    #[test]
    fn test_padding_is_transparent() {
        let rgba = vec![255u8; 3 * 3 * 4];
        let bytes = encode_rgba(&rgba, 3, 3, &EncodeOptions::default()).unwrap();
        let texture = decode(&bytes).unwrap();

        // 4x4 canvas, source in rows 0..3, columns 0..3
        let row = 4 * 4;
        for y in 0..4 {
            let line = &texture.pixels[y * row..(y + 1) * row];
            if y < 3 {
                assert!(line[..12].iter().all(|&b| b == 255));
                assert!(line[12..].iter().all(|&b| b == 0));
            } else {
                assert!(line.iter().all(|&b| b == 0));
            }
        }
    }

    #[test]
    fn test_stored_envelope() {
        let options = EncodeOptions {
            compression: CompressionType::None,
            ..EncodeOptions::default()
        };
        let bytes = encode_rgba(&gradient(2, 2), 2, 2, &options).unwrap();

        assert_eq!(bytes.len(), PackEnvelope::SIZE + 100 + 24 + 16);
        assert_eq!(&bytes[PackEnvelope::SIZE..PackEnvelope::SIZE + 6], b"RTTXTR");
        assert!(decode(&bytes).is_ok());
    }

    #[test]
    fn test_rejects_empty_image() {
        let err = encode_rgba(&[], 0, 4, &EncodeOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_rejects_short_bitmap() {
        let err = encode_rgba(&[0; 15], 2, 2, &EncodeOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_raster_size_checked() {
        let raster = NormalizedRaster {
            data: vec![0; 10],
            width: 2,
            height: 2,
        };
        let err =
            encode_raster(&raster, RasterSize::new(2, 2), &EncodeOptions::default()).unwrap_err();
        assert!(matches!(err, Error::PayloadSizeMismatch { expected: 16, actual: 10 }));
    }
}
