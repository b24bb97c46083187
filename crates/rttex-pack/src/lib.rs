//! RTPACK envelope handling for RTTEX containers.
//!
//! Every container starts with an 8-byte [`FileTagHeader`]. A texture may be
//! stored bare (`RTTXTR`) or wrapped in an `RTPACK` envelope that compresses
//! the whole texture with zlib:
//!
//! - 6 bytes: Type tag (`RTPACK`)
//! - 1 byte: Version
//! - 1 byte: Reserved
//! - 4 bytes: Compressed size
//! - 4 bytes: Decompressed size
//! - 1 byte: Compression type (0 = none, 1 = zlib)
//! - 15 bytes: Reserved
//! - N bytes: Payload
//!
//! # Example
//!
//! ```
//! use rttex_pack::{unpack, CompressionType, PackEnvelope};
//!
//! let packed = PackEnvelope::wrap(b"RTTXTR...", CompressionType::Zlib, 9)?;
//! assert!(PackEnvelope::detect(&packed));
//! assert_eq!(&*unpack(&packed)?, b"RTTXTR...");
//! # Ok::<(), rttex_pack::Error>(())
//! ```

mod compress;
mod envelope;
mod error;
mod tag;

pub use compress::{compress_zlib, decompress_zlib_sized, DEFAULT_LEVEL};
pub use envelope::{unpack, CompressionType, PackEnvelope, PACK_LATEST_VERSION};
pub use error::{Error, Result};
pub use tag::{FileTagHeader, PACK_TAG, TEXTURE_TAG};
