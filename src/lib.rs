#![doc(html_root_url = "https://docs.rs/tspmt/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

//! # tspmt - MPEG-2 TS Program Map Table writer
//!
//! `tspmt` generates the Program Map Table (PMT) packets a segmented
//! media packager emits into an MPEG-2 Transport Stream. Beyond the plain
//! table that maps an elementary stream PID to its stream type, it
//! produces the encryption-signaling variants protected streaming needs:
//! a "clear lead" announcement pair at the transition into encrypted
//! content, and the steady-state encrypted table with per-codec
//! descriptors.
//!
//! The output is byte-exact: fixed 188-byte packet framing with
//! adaptation-field stuffing, CRC-32/MPEG-2 checksums, and a per-writer
//! continuity counter shared across all table variants.
//!
//! ## Features
//!
//! - Clear, clear-lead and encrypted PMT emission for H.264 and AAC
//! - Encryption signaling via private stream types (`0xDB`/`0xCF`),
//!   private_data_indicator descriptors and, for AAC, a registration
//!   descriptor embedding the audio specific configuration
//! - Caller-owned output buffers (`bytes::BytesMut`); the writer never
//!   allocates the transport buffer
//!
//! Writing a TS stream is the only concern: there is no parsing, PES
//! packetization or key management here.
//!
//! ## Quick start
//!
//! ```
//! use bytes::BytesMut;
//! use tspmt::{ProgramMapTableWriter, TS_PACKET_SIZE};
//!
//! # fn main() -> tspmt::Result<()> {
//! // Audio: the raw AAC audio specific config is captured at
//! // construction and echoed into encrypted-segment tables.
//! let mut writer = ProgramMapTableWriter::aac(vec![0x12, 0x10]);
//!
//! let mut buf = BytesMut::new();
//! writer.clear_lead_segment_pmt(&mut buf)?; // two packets
//! writer.encrypted_segment_pmt(&mut buf)?; // one packet
//! assert_eq!(buf.len(), 3 * TS_PACKET_SIZE);
//! # Ok(())
//! # }
//! ```

/// Error types and the crate result alias.
pub mod error;

/// PSI-section framing into 188-byte TS packets.
pub mod packet;

/// PMT section building and the writer façade.
pub mod pmt;

/// Core TS/PSI types and wire constants.
pub mod types;

/// Common utilities (CRC).
pub mod utils;

pub use error::{Result, TsPmtError};
pub use packet::MAX_SECTION_SIZE;
pub use pmt::{PmtCodec, ProgramMapTableWriter};
pub use types::{ContinuityCounter, Descriptor, TsHeader, PID_ELEMENTARY, PID_PMT, TS_PACKET_SIZE};
pub use utils::crc::crc32_mpeg2;
