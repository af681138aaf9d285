//! Core TS/PSI types and wire constants.

use bytes::{BufMut, BytesMut};

/// Size of every MPEG-2 transport stream packet in bytes.
pub const TS_PACKET_SIZE: usize = 188;
/// Size of the fixed TS packet header in bytes.
pub const TS_HEADER_SIZE: usize = 4;

/// PID on which PMT sections are emitted.
pub const PID_PMT: u16 = 0x0020;
/// PID of the single elementary stream; also used as the PCR PID.
pub const PID_ELEMENTARY: u16 = 0x0050;

/// Table id of a program map section.
pub const TABLE_ID_PMT: u8 = 0x02;
/// Program number carried in every emitted PMT.
pub const PROGRAM_NUMBER: u16 = 0x0001;

// Elementary stream types, clear segments.
/// AVC video stream (ITU-T Rec. H.264 | ISO/IEC 14496-10).
pub const STREAM_TYPE_H264: u8 = 0x1B;
/// ADTS AAC audio stream.
pub const STREAM_TYPE_AAC: u8 = 0x0F;

// Elementary stream types, encrypted segments. The packaging ecosystem
// signals sample encryption by moving the stream type into a private
// range: 0xD_ for video, 0xC_ for audio, low nibble from the clear type.
/// Sample-encrypted H.264 video stream.
pub const STREAM_TYPE_ENCRYPTED_H264: u8 = 0xDB;
/// Sample-encrypted ADTS AAC audio stream.
pub const STREAM_TYPE_ENCRYPTED_AAC: u8 = 0xCF;

/// private_data_indicator descriptor tag.
pub const DESCRIPTOR_TAG_PRIVATE_DATA_INDICATOR: u8 = 0x0F;
/// registration descriptor tag.
pub const DESCRIPTOR_TAG_REGISTRATION: u8 = 0x05;

// Four-character format identifiers used by the encryption signaling.
// These are private to the packaging ecosystem, not part of ISO 13818-1.
/// Identifies sample-encrypted H.264 in the private_data_indicator.
pub const FORMAT_ID_ENCRYPTED_H264: [u8; 4] = *b"zavc";
/// Identifies sample-encrypted AAC in the private_data_indicator.
pub const FORMAT_ID_ENCRYPTED_AAC: [u8; 4] = *b"aacd";
/// Registration descriptor owner for audio setup information.
pub const FORMAT_ID_AUDIO_PRIMING: [u8; 4] = *b"apad";
/// Registration descriptor tag for the embedded AAC configuration.
pub const FORMAT_ID_AAC_SETUP: [u8; 4] = *b"zaac";

/// Fixed header of a transport stream packet.
///
/// Only the fields this crate varies are carried; everything else is
/// written as the constant bit patterns of ISO 13818-1 §2.4.3.2.
#[derive(Debug, Clone)]
pub struct TsHeader {
    /// Set when a new PSI section or PES packet starts in this packet.
    pub payload_unit_start: bool,
    /// 13-bit packet identifier.
    pub pid: u16,
    /// Adaptation field present before the payload.
    pub adaptation_field_exists: bool,
    /// Payload present.
    pub contains_payload: bool,
    /// 4-bit continuity counter value to stamp.
    pub continuity_counter: u8,
}

impl TsHeader {
    /// Serializes the 4-byte header into `buf`.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.put_u8(0x47); // sync byte

        let mut b1 = 0u8;
        if self.payload_unit_start {
            b1 |= 0x40;
        }
        b1 |= ((self.pid >> 8) & 0x1F) as u8;
        buf.put_u8(b1);
        buf.put_u8((self.pid & 0xFF) as u8);

        let mut b3 = 0u8;
        if self.adaptation_field_exists {
            b3 |= 0x20;
        }
        if self.contains_payload {
            b3 |= 0x10;
        }
        b3 |= self.continuity_counter & 0x0F;
        buf.put_u8(b3);
    }
}

/// Per-PID 4-bit continuity counter.
///
/// The value returned by [`current`](Self::current) stamps a packet; the
/// framer then calls [`advance`](Self::advance) once per packet written.
/// Wrap-around at 16 is silent, which is what TS requires.
#[derive(Debug, Default)]
pub struct ContinuityCounter {
    counter: u8,
}

impl ContinuityCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value to stamp into the next packet, without mutating.
    pub fn current(&self) -> u8 {
        self.counter
    }

    /// Advances to the next value, wrapping modulo 16.
    pub fn advance(&mut self) {
        self.counter = (self.counter + 1) & 0x0F;
    }
}

/// A single MPEG-2 descriptor: tag byte, length byte, payload.
#[derive(Debug, Clone)]
pub struct Descriptor {
    /// Descriptor tag.
    pub tag: u8,
    /// Descriptor payload, at most 255 bytes.
    pub data: Vec<u8>,
}

impl Descriptor {
    /// Encoded size in bytes, tag and length byte included.
    pub fn encoded_len(&self) -> usize {
        2 + self.data.len()
    }

    /// Serializes the descriptor into `buf`.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.put_u8(self.tag);
        buf.put_u8(self.data.len() as u8);
        buf.put_slice(&self.data);
    }
}
