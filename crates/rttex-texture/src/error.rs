//! Error types for texture handling.

use rttex_common::ErrorKind;
use thiserror::Error;

use crate::PixelFormat;

/// Errors that can occur when decoding or encoding textures.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] rttex_common::Error),

    /// Envelope error.
    #[error("{0}")]
    Pack(#[from] rttex_pack::Error),

    /// Type tag is neither a texture nor a pack.
    #[error("invalid texture magic: expected \"RTTXTR\", got {0:?}")]
    BadMagic([u8; 6]),

    /// Texture revision newer than this codec understands.
    #[error("unsupported texture version {version} (latest supported is {latest})")]
    UnsupportedVersion { version: i8, latest: i8 },

    /// Pixel format other than raw 8-bit-per-channel.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(PixelFormat),

    /// Mip payload length disagrees with the texture dimensions.
    #[error("pixel payload size mismatch: expected {expected}, got {actual}")]
    PayloadSizeMismatch { expected: usize, actual: usize },

    /// Field values that cannot describe a texture.
    #[error("invalid texture: {0}")]
    InvalidData(String),

    /// Raster image collaborator failure.
    #[error("raster codec error: {0}")]
    Raster(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Common(e) => e.kind(),
            Self::Pack(e) => e.kind(),
            Self::BadMagic(_) => ErrorKind::BadMagic,
            Self::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::PayloadSizeMismatch { .. } | Self::InvalidData(_) => ErrorKind::InvalidData,
            Self::Raster(_) => ErrorKind::Image,
        }
    }
}

/// Result type for texture operations.
pub type Result<T> = std::result::Result<T, Error>;
