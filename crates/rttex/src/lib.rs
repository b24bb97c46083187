//! RTTEX - game texture container library.
//!
//! This crate provides a unified interface to the RTTEX library ecosystem
//! for converting between packed game textures and standard images.
//!
//! # Crates
//!
//! - [`rttex_common`] - Common utilities (binary reading/writing, error kinds, CRC32C)
//! - [`rttex_pack`] - `RTPACK` envelope and file tag header (zlib)
//! - [`rttex_texture`] - `RTTXTR` texture headers, decoder and encoder
//! - `rttex_image` - Raster image codec backed by the `image` crate (`image` feature)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use rttex::prelude::*;
//!
//! let codec = ImageRasterCodec::new();
//!
//! // Texture to PNG
//! let texture = decode_file(
//!     &codec,
//!     Path::new("tiles_page1.rttex"),
//!     Path::new("tiles_page1.png"),
//!     &DecodeOptions::default(),
//! )?;
//! println!("{}x{}", texture.original_width, texture.original_height);
//!
//! // PNG back to texture
//! encode_file(
//!     &codec,
//!     Path::new("tiles_page1.png"),
//!     Path::new("tiles_page1.rttex"),
//!     &EncodeOptions::default(),
//! )?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use rttex_common as common;
#[cfg(feature = "image")]
pub use rttex_image as image;
pub use rttex_pack as pack;
pub use rttex_texture as texture;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use rttex_common::{crc, ErrorKind};
    #[cfg(feature = "image")]
    pub use rttex_image::ImageRasterCodec;
    pub use rttex_pack::{CompressionType, PackEnvelope};
    pub use rttex_texture::{
        decode, decode_file, encode_file, encode_rgba, inspect, ContainerInfo, DecodeOptions,
        DecodedTexture, EncodeOptions, PixelFormat, RasterCodec, TextureHeader,
    };
}

// Re-export commonly used types at the crate root
pub use rttex_texture::{Error, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
