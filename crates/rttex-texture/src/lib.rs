//! RTTXTR texture container handling.
//!
//! A texture is a fixed 100-byte [`TextureHeader`] followed by one
//! [`MipHeader`] and its pixel payload per mip level, optionally wrapped in
//! an `RTPACK` envelope. Pixels are stored bottom-up on a power-of-two
//! canvas with the source image anchored at row 0, column 0.
//!
//! Only mip level 0 is read or written, and only the raw 8-bit-per-channel
//! pixel format is decoded.
//!
//! # Example
//!
//! ```
//! use rttex_texture::{decode, encode_rgba, EncodeOptions};
//!
//! // 3x2 opaque white image
//! let rgba = vec![255u8; 3 * 2 * 4];
//! let container = encode_rgba(&rgba, 3, 2, &EncodeOptions::default())?;
//!
//! let texture = decode(&container)?;
//! assert_eq!((texture.width, texture.height), (4, 2));
//! assert_eq!((texture.original_width, texture.original_height), (3, 2));
//! # Ok::<(), rttex_texture::Error>(())
//! ```

mod decode;
mod encode;
mod error;
mod file;
mod format;
mod header;
mod mip;
pub mod raster;

pub use decode::{decode, decode_file, DecodeOptions, DecodedTexture};
pub use encode::{
    encode_file, encode_raster, encode_rgba, next_power_of_two_at_least, padded_size,
    EncodeOptions, MAX_DIMENSION,
};
pub use error::{Error, Result};
pub use file::{inspect, ContainerInfo, TextureFile};
pub use format::PixelFormat;
pub use header::{TextureHeader, TEXTURE_LATEST_VERSION};
pub use mip::MipHeader;
pub use raster::{NormalizedRaster, RasterCodec, RasterLayout, RasterSize};
