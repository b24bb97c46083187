//! Common utilities for RTTEX.
//!
//! This crate provides foundational types and utilities used across all RTTEX crates:
//!
//! - [`BinaryReader`] - Bounds-checked cursor over an immutable byte slice
//! - [`BinaryWriter`] - Little-endian writer for fixed-layout headers
//! - [`ErrorKind`] - Failure categories shared by every codec crate
//! - [`crc`] - Advisory CRC32C checksums (never part of the container)

mod error;
mod kind;
mod reader;
mod writer;

pub mod crc;

pub use error::{Error, Result};
pub use kind::ErrorKind;
pub use reader::BinaryReader;
pub use writer::BinaryWriter;
