//! Failure categories.

use std::fmt;

/// Category of a codec failure.
///
/// Every crate-level error maps onto one of these through its `kind()`
/// method, so callers can branch on the failure class without matching
/// through nested `#[from]` wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorKind {
    /// A type tag did not match the constant expected at its offset.
    BadMagic,
    /// The container version is newer than this codec understands.
    UnsupportedVersion,
    /// Unknown compression method in the pack envelope.
    UnsupportedCompression,
    /// Corrupt deflate stream or inflated size mismatch.
    Decompression,
    /// Pixel format other than raw 8-bit-per-channel.
    UnsupportedFormat,
    /// A declared size exceeds the bytes remaining.
    TruncatedInput,
    /// Field values that cannot describe a valid texture.
    InvalidData,
    /// Raster image collaborator failure.
    Image,
    /// Filesystem failure.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadMagic => "bad magic",
            Self::UnsupportedVersion => "unsupported version",
            Self::UnsupportedCompression => "unsupported compression",
            Self::Decompression => "decompression error",
            Self::UnsupportedFormat => "unsupported format",
            Self::TruncatedInput => "truncated input",
            Self::InvalidData => "invalid data",
            Self::Image => "image error",
            Self::Io => "I/O error",
        };
        f.write_str(name)
    }
}
