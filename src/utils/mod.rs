//! Common utilities shared by the PSI writers.

/// CRC calculation for PSI tables.
pub mod crc;

pub use crc::crc32_mpeg2;
