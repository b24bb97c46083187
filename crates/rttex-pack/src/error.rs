//! Error types for the pack crate.

use rttex_common::ErrorKind;
use thiserror::Error;

/// Errors that can occur when working with RTPACK envelopes.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] rttex_common::Error),

    /// Type tag at the start of the envelope is not `RTPACK`.
    #[error("invalid pack magic: expected \"RTPACK\", got {0:?}")]
    BadMagic([u8; 6]),

    /// Unknown compression method.
    #[error("unsupported compression type: {0}")]
    UnsupportedCompression(i8),

    /// Malformed deflate stream.
    #[error("decompression error: {0}")]
    Decompression(String),

    /// Inflated length disagrees with the declared decompressed size.
    #[error("decompressed size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Compression error.
    #[error("compression error: {0}")]
    Compression(String),

    /// Payload does not fit the signed 32-bit size fields.
    #[error("payload of {0} bytes is too large for an envelope")]
    PayloadTooLarge(usize),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Common(e) => e.kind(),
            Self::BadMagic(_) => ErrorKind::BadMagic,
            Self::UnsupportedCompression(_) => ErrorKind::UnsupportedCompression,
            Self::Decompression(_) | Self::SizeMismatch { .. } => ErrorKind::Decompression,
            Self::Compression(_) => ErrorKind::Io,
            Self::PayloadTooLarge(_) => ErrorKind::InvalidData,
        }
    }
}

/// Result type for pack operations.
pub type Result<T> = std::result::Result<T, Error>;
