//! Raster image codec for RTTEX conversions.
//!
//! [`ImageRasterCodec`] implements [`RasterCodec`] on top of the `image`
//! crate, so the container codec can read and write PNG, JPEG and BMP files.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use rttex_image::ImageRasterCodec;
//! use rttex_texture::{decode_file, encode_file, DecodeOptions, EncodeOptions};
//!
//! let codec = ImageRasterCodec::new();
//! encode_file(&codec, Path::new("icon.png"), Path::new("icon.rttex"), &EncodeOptions::default())?;
//! decode_file(&codec, Path::new("icon.rttex"), Path::new("back.png"), &DecodeOptions::default())?;
//! # Ok::<(), rttex_texture::Error>(())
//! ```

use std::path::Path;

use image::{imageops, DynamicImage, ImageFormat, RgbImage, RgbaImage};
use rttex_texture::{
    Error, NormalizedRaster, RasterCodec, RasterLayout, RasterSize, Result,
};

/// [`RasterCodec`] backed by the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageRasterCodec;

impl ImageRasterCodec {
    pub fn new() -> Self {
        Self
    }
}

fn image_error(path: &Path, err: image::ImageError) -> Error {
    Error::Raster(format!("{}: {}", path.display(), err))
}

/// Composite RGBA pixels onto an opaque background color.
fn flatten(image: &mut RgbaImage, background: [u8; 3]) {
    for pixel in image.pixels_mut() {
        let alpha = pixel[3] as u32;
        for c in 0..3 {
            let blended = pixel[c] as u32 * alpha + background[c] as u32 * (255 - alpha);
            pixel[c] = ((blended + 127) / 255) as u8;
        }
        pixel[3] = 255;
    }
}

impl RasterCodec for ImageRasterCodec {
    fn load_metadata(&self, path: &Path) -> Result<RasterSize> {
        let (width, height) = image::image_dimensions(path).map_err(|e| image_error(path, e))?;
        Ok(RasterSize::new(width, height))
    }

    fn load_normalized_raw(
        &self,
        path: &Path,
        pad_to: RasterSize,
        background: Option<[u8; 3]>,
    ) -> Result<NormalizedRaster> {
        let mut rgba = image::open(path)
            .map_err(|e| image_error(path, e))?
            .to_rgba8();

        let (width, height) = rgba.dimensions();
        if width > pad_to.width || height > pad_to.height {
            return Err(Error::Raster(format!(
                "{width}x{height} image does not fit a {}x{} canvas",
                pad_to.width, pad_to.height
            )));
        }

        if let Some(color) = background {
            flatten(&mut rgba, color);
        }

        let flipped = imageops::flip_vertical(&rgba);
        let mut canvas = RgbaImage::new(pad_to.width, pad_to.height);
        imageops::replace(&mut canvas, &flipped, 0, 0);

        tracing::debug!(
            path = %path.display(),
            width,
            height,
            padded_width = pad_to.width,
            padded_height = pad_to.height,
            "normalized image"
        );

        Ok(NormalizedRaster {
            data: canvas.into_raw(),
            width: pad_to.width,
            height: pad_to.height,
        })
    }

    fn write_raw(
        &self,
        data: &[u8],
        layout: RasterLayout,
        flip_vertical: bool,
        path: &Path,
    ) -> Result<()> {
        let RasterLayout {
            width,
            height,
            channels,
        } = layout;

        let image = match channels {
            3 => RgbImage::from_raw(width, height, data.to_vec()).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(width, height, data.to_vec()).map(DynamicImage::ImageRgba8),
            other => {
                return Err(Error::Raster(format!("unsupported channel count {other}")));
            }
        }
        .ok_or_else(|| {
            Error::Raster(format!(
                "{} bytes is too short for a {width}x{height}x{channels} image",
                data.len()
            ))
        })?;

        let image = if flip_vertical { image.flipv() } else { image };

        // JPEG has no alpha channel.
        let image = match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) if channels == 4 => DynamicImage::ImageRgb8(image.to_rgb8()),
            _ => image,
        };

        image.save(path).map_err(|e| image_error(path, e))
    }
}
