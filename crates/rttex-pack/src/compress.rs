//! zlib compression helpers for pack envelopes.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::{Error, Result};

/// Upper bound on the buffer reserved from an untrusted size field.
const MAX_PREALLOCATION: usize = 64 * 1024 * 1024;

/// Default compression level (best).
pub const DEFAULT_LEVEL: u32 = 9;

/// Inflate a zlib stream that must expand to exactly `expected_size` bytes.
///
/// Reading stops one byte past `expected_size`, so an oversized stream is
/// detected without inflating all of it.
pub fn decompress_zlib_sized(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(expected_size.min(MAX_PREALLOCATION));
    let limit = (expected_size as u64).saturating_add(1);

    ZlibDecoder::new(data)
        .take(limit)
        .read_to_end(&mut output)
        .map_err(|e| Error::Decompression(e.to_string()))?;

    if output.len() != expected_size {
        return Err(Error::SizeMismatch {
            expected: expected_size,
            actual: output.len(),
        });
    }

    Ok(output)
}

/// Deflate `data` into a zlib stream at the given level (0-9).
pub fn compress_zlib(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(data.len() / 2),
        Compression::new(level.min(9)),
    );
    encoder
        .write_all(data)
        .map_err(|e| Error::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| Error::Compression(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rttex_common::ErrorKind;

    #[test]
    fn test_zlib_roundtrip() {
        let original = b"Hello, World! This is a test of zlib compression.";

        let compressed = compress_zlib(original, DEFAULT_LEVEL).unwrap();
        // zlib header, not raw deflate
        assert_eq!(compressed[0], 0x78);

        let decompressed = decompress_zlib_sized(&compressed, original.len()).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_size_mismatch() {
        let compressed = compress_zlib(&[0u8; 100], 6).unwrap();

        let err = decompress_zlib_sized(&compressed, 99).unwrap_err();
        assert!(matches!(err, Error::SizeMismatch { expected: 99, actual: 100 }));

        let err = decompress_zlib_sized(&compressed, 101).unwrap_err();
        assert!(matches!(err, Error::SizeMismatch { expected: 101, actual: 100 }));
    }

    #[test]
    fn test_corrupt_stream() {
        let err = decompress_zlib_sized(b"definitely not zlib", 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decompression);
    }

    #[test]
    fn test_huge_declared_size_does_not_preallocate() {
        let compressed = compress_zlib(b"tiny", 1).unwrap();
        let err = decompress_zlib_sized(&compressed, u32::MAX as usize).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decompression);
    }
}
