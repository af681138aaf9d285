//! Error types for PMT packet generation.

use thiserror::Error;

/// Errors produced while assembling PMT transport stream packets.
#[derive(Error, Debug)]
pub enum TsPmtError {
    /// The PSI section is too large to be carried in a single 188-byte
    /// TS packet. PMT sections in this crate are a few dozen bytes, so
    /// hitting this means the caller supplied an oversized AAC audio
    /// specific configuration. The section is never truncated or split.
    #[error("psi section of {len} bytes exceeds single-packet capacity of {max} bytes")]
    SectionOverflow {
        /// Byte length of the section, pointer field through CRC.
        len: usize,
        /// Maximum section length that fits one packet.
        max: usize,
    },
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TsPmtError>;
