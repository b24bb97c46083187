//! The raster image collaborator and row-orientation helpers.
//!
//! Containers store rows bottom-up with the source image anchored at row 0,
//! column 0 of a power-of-two canvas. Standard image files are top-down.
//! Every helper here returns a fresh buffer and never touches its input.

use std::path::Path;

use crate::{Error, Result};

/// Dimensions of a raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl RasterSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Shape of a raw pixel buffer handed to [`RasterCodec::write_raw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterLayout {
    pub width: u32,
    pub height: u32,
    /// 3 (RGB) or 4 (RGBA).
    pub channels: u8,
}

/// RGBA pixels prepared for a container: bottom-up rows on a padded canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRaster {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Loads and writes encoded image files on behalf of the container codec.
///
/// The codec itself never touches pixel encodings; implementors bridge to an
/// image library.
pub trait RasterCodec {
    /// Read the dimensions of an image file.
    fn load_metadata(&self, path: &Path) -> Result<RasterSize>;

    /// Load an image as RGBA, flip it bottom-up and extend the canvas to
    /// `pad_to` with transparent black, keeping the image at row 0, column 0.
    ///
    /// With `flatten`, the image is first composited onto that opaque color.
    fn load_normalized_raw(
        &self,
        path: &Path,
        pad_to: RasterSize,
        flatten: Option<[u8; 3]>,
    ) -> Result<NormalizedRaster>;

    /// Encode a raw pixel buffer to an image file, flipping rows first if asked.
    fn write_raw(
        &self,
        data: &[u8],
        layout: RasterLayout,
        flip_vertical: bool,
        path: &Path,
    ) -> Result<()>;
}

/// Byte length of a `width x height` buffer, or `None` on overflow.
pub fn buffer_len(width: u32, height: u32, channels: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(channels)
}

fn check_len(data: &[u8], width: u32, height: u32, channels: usize) -> Result<usize> {
    let expected = buffer_len(width, height, channels)
        .ok_or_else(|| Error::InvalidData(format!("{width}x{height} image is too large")))?;
    if data.len() != expected {
        return Err(Error::PayloadSizeMismatch {
            expected,
            actual: data.len(),
        });
    }
    Ok(expected)
}

/// Reverse the row order of a pixel buffer.
pub fn flip_vertical(data: &[u8], width: u32, height: u32, channels: usize) -> Result<Vec<u8>> {
    let len = check_len(data, width, height, channels)?;
    let row = width as usize * channels;
    if row == 0 {
        return Ok(Vec::new());
    }

    let mut out = Vec::with_capacity(len);
    for line in data.chunks_exact(row).rev() {
        out.extend_from_slice(line);
    }
    Ok(out)
}

/// Keep the first `crop_width` columns of the first `crop_height` rows.
pub fn crop(
    data: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    crop_width: u32,
    crop_height: u32,
) -> Result<Vec<u8>> {
    check_len(data, width, height, channels)?;
    if crop_width > width || crop_height > height {
        return Err(Error::InvalidData(format!(
            "cannot crop {width}x{height} to {crop_width}x{crop_height}"
        )));
    }

    let row = width as usize * channels;
    let keep = crop_width as usize * channels;
    let mut out = Vec::with_capacity(keep * crop_height as usize);
    if row == 0 {
        return Ok(out);
    }
    for line in data.chunks_exact(row).take(crop_height as usize) {
        out.extend_from_slice(&line[..keep]);
    }
    Ok(out)
}

/// Turn a top-down RGBA bitmap into a bottom-up padded canvas.
///
/// Row `y` of the output holds source row `height - 1 - y`; everything
/// outside the source rectangle is transparent black.
pub fn pad_bottom_up(rgba: &[u8], width: u32, height: u32, pad_to: RasterSize) -> Result<Vec<u8>> {
    check_len(rgba, width, height, 4)?;
    if pad_to.width < width || pad_to.height < height {
        return Err(Error::InvalidData(format!(
            "cannot pad {width}x{height} to {}x{}",
            pad_to.width, pad_to.height
        )));
    }

    let len = buffer_len(pad_to.width, pad_to.height, 4).ok_or_else(|| {
        Error::InvalidData(format!("{}x{} canvas is too large", pad_to.width, pad_to.height))
    })?;
    let mut out = vec![0u8; len];

    let src_row = width as usize * 4;
    let dst_row = pad_to.width as usize * 4;
    if src_row == 0 {
        return Ok(out);
    }
    for (y, line) in rgba.chunks_exact(src_row).rev().enumerate() {
        let start = y * dst_row;
        out[start..start + src_row].copy_from_slice(line);
    }
    Ok(out)
}
