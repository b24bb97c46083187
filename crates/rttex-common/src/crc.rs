//! Advisory CRC32C checksums.
//!
//! Containers carry no checksum of their own. These helpers exist so tools
//! can print a fingerprint of a file or payload for out-of-band comparison;
//! nothing in the codec reads them back.

/// Compute CRC32C hash of a byte slice.
///
/// Uses hardware acceleration when available (SSE4.2 on x86).
#[inline]
pub fn hash_bytes(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}
