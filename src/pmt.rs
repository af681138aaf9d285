//! Program map table generation.
//!
//! A [`ProgramMapTableWriter`] emits the PMT variants a segmented,
//! possibly-encrypted stream needs: a plain table for clear segments, a
//! back-to-back pair announcing the switch from a clear lead into
//! encrypted content, and a steady-state encrypted table. All variants
//! share one continuity counter so the PMT PID stays gap-free across
//! segment boundaries.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::Result;
use crate::packet::write_psi_packet;
use crate::types::{
    ContinuityCounter, Descriptor, DESCRIPTOR_TAG_PRIVATE_DATA_INDICATOR,
    DESCRIPTOR_TAG_REGISTRATION, FORMAT_ID_AAC_SETUP, FORMAT_ID_AUDIO_PRIMING,
    FORMAT_ID_ENCRYPTED_AAC, FORMAT_ID_ENCRYPTED_H264, PID_ELEMENTARY, PID_PMT,
    PROGRAM_NUMBER, STREAM_TYPE_AAC, STREAM_TYPE_ENCRYPTED_AAC,
    STREAM_TYPE_ENCRYPTED_H264, STREAM_TYPE_H264, TABLE_ID_PMT,
};
use crate::utils::crc::crc32_mpeg2;

/// The elementary stream codec a PMT describes.
///
/// A closed set: each variant knows its clear and encrypted stream types
/// and the ES descriptors that signal sample encryption for its family.
#[derive(Debug, Clone)]
pub enum PmtCodec {
    /// H.264/AVC video.
    H264,
    /// AAC audio.
    Aac {
        /// Raw audio specific configuration, echoed verbatim into the
        /// registration descriptor of encrypted tables. Opaque here;
        /// never validated.
        audio_specific_config: Bytes,
    },
}

impl PmtCodec {
    fn clear_stream_type(&self) -> u8 {
        match self {
            PmtCodec::H264 => STREAM_TYPE_H264,
            PmtCodec::Aac { .. } => STREAM_TYPE_AAC,
        }
    }

    fn encrypted_stream_type(&self) -> u8 {
        match self {
            PmtCodec::H264 => STREAM_TYPE_ENCRYPTED_H264,
            PmtCodec::Aac { .. } => STREAM_TYPE_ENCRYPTED_AAC,
        }
    }

    /// ES descriptors carried by encrypted tables.
    ///
    /// Every codec gets a private_data_indicator naming its family. AAC
    /// additionally carries a registration descriptor with the audio
    /// setup information a decryptor needs before the first sample.
    fn encryption_descriptors(&self) -> Vec<Descriptor> {
        match self {
            PmtCodec::H264 => vec![Descriptor {
                tag: DESCRIPTOR_TAG_PRIVATE_DATA_INDICATOR,
                data: FORMAT_ID_ENCRYPTED_H264.to_vec(),
            }],
            PmtCodec::Aac {
                audio_specific_config,
            } => {
                let mut setup = Vec::with_capacity(12 + audio_specific_config.len());
                setup.extend_from_slice(&FORMAT_ID_AUDIO_PRIMING);
                setup.extend_from_slice(&FORMAT_ID_AAC_SETUP);
                setup.extend_from_slice(&[0x00, 0x00]); // priming
                setup.push(0x01); // version
                setup.push(audio_specific_config.len() as u8);
                setup.extend_from_slice(audio_specific_config);
                vec![
                    Descriptor {
                        tag: DESCRIPTOR_TAG_PRIVATE_DATA_INDICATOR,
                        data: FORMAT_ID_ENCRYPTED_AAC.to_vec(),
                    },
                    Descriptor {
                        tag: DESCRIPTOR_TAG_REGISTRATION,
                        data: setup,
                    },
                ]
            }
        }
    }
}

/// One PMT table variant: version/current_next bits plus whether the
/// elementary stream is marked encrypted.
#[derive(Debug, Clone, Copy)]
struct TableVariant {
    version: u8,
    current_next: bool,
    encrypted: bool,
}

/// Active table for clear segments.
const CLEAR: TableVariant = TableVariant {
    version: 0,
    current_next: true,
    encrypted: false,
};

/// Announced-but-not-yet-active table for the encrypted segments that
/// follow a clear lead.
const UPCOMING_ENCRYPTED: TableVariant = TableVariant {
    version: 1,
    current_next: false,
    encrypted: true,
};

/// Active table for encrypted segments, independent of what was emitted
/// before it.
const ENCRYPTED: TableVariant = TableVariant {
    version: 0,
    current_next: true,
    encrypted: true,
};

/// Writer for the program map table of a single elementary stream.
///
/// The writer exclusively owns its continuity counter and codec variant;
/// output is appended to a caller-owned [`BytesMut`]. It is not internally
/// synchronized — table versioning and continuity sequencing are stream
/// order dependent, so all calls for one program must go through one
/// exclusively-borrowed writer.
///
/// # Examples
///
/// ```
/// use bytes::BytesMut;
/// use tspmt::ProgramMapTableWriter;
///
/// # fn main() -> tspmt::Result<()> {
/// let mut writer = ProgramMapTableWriter::h264();
/// let mut buf = BytesMut::new();
/// writer.clear_segment_pmt(&mut buf)?;
/// assert_eq!(buf.len(), 188);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ProgramMapTableWriter {
    codec: PmtCodec,
    continuity_counter: ContinuityCounter,
}

impl ProgramMapTableWriter {
    /// Creates a writer for the given codec with a fresh counter.
    pub fn new(codec: PmtCodec) -> Self {
        Self {
            codec,
            continuity_counter: ContinuityCounter::new(),
        }
    }

    /// Creates a writer for an H.264 video stream.
    pub fn h264() -> Self {
        Self::new(PmtCodec::H264)
    }

    /// Creates a writer for an AAC audio stream carrying the given raw
    /// audio specific configuration.
    pub fn aac(audio_specific_config: impl Into<Bytes>) -> Self {
        Self::new(PmtCodec::Aac {
            audio_specific_config: audio_specific_config.into(),
        })
    }

    /// Appends one PMT packet describing a clear (unencrypted) segment.
    pub fn clear_segment_pmt(&mut self, buf: &mut BytesMut) -> Result<()> {
        log::debug!("writing clear segment pmt, cc={}", self.continuity_counter.current());
        self.write_table(CLEAR, buf)
    }

    /// Appends the two consecutive PMT packets of a clear lead: the
    /// active clear table followed by the announced encrypted table that
    /// becomes current once the lead ends. The counter advances twice.
    pub fn clear_lead_segment_pmt(&mut self, buf: &mut BytesMut) -> Result<()> {
        log::debug!(
            "writing clear lead pmt pair, cc={}",
            self.continuity_counter.current()
        );
        self.write_table(CLEAR, buf)?;
        self.write_table(UPCOMING_ENCRYPTED, buf)
    }

    /// Appends one PMT packet describing an encrypted segment.
    ///
    /// The table bits are a pure function of this mode: version 0,
    /// current_next 1, as if it were the first table ever emitted for the
    /// stream. Only the continuity counter carries history across calls.
    pub fn encrypted_segment_pmt(&mut self, buf: &mut BytesMut) -> Result<()> {
        log::debug!(
            "writing encrypted segment pmt, cc={}",
            self.continuity_counter.current()
        );
        self.write_table(ENCRYPTED, buf)
    }

    fn write_table(&mut self, variant: TableVariant, buf: &mut BytesMut) -> Result<()> {
        let section = build_section(&self.codec, variant);
        write_psi_packet(PID_PMT, &section, &mut self.continuity_counter, buf)
    }
}

/// Encodes the unframed PSI section, pointer field through CRC.
///
/// Section length, ES info length and the CRC are computed from the bytes
/// actually written, never hand-coded, so descriptor changes cannot drift
/// out of sync with the framing fields.
fn build_section(codec: &PmtCodec, variant: TableVariant) -> BytesMut {
    let (stream_type, descriptors) = if variant.encrypted {
        (codec.encrypted_stream_type(), codec.encryption_descriptors())
    } else {
        (codec.clear_stream_type(), Vec::new())
    };
    let es_info_length: usize = descriptors.iter().map(Descriptor::encoded_len).sum();

    // Everything between the section length field and the CRC.
    let mut body = BytesMut::new();
    body.put_u16(PROGRAM_NUMBER);
    body.put_u8(0xC0 | (variant.version << 1) | variant.current_next as u8);
    body.put_u8(0x00); // section number
    body.put_u8(0x00); // last section number
    body.put_u16(0xE000 | PID_ELEMENTARY); // PCR PID is the elementary PID
    body.put_u16(0xF000); // program_info_length = 0
    body.put_u8(stream_type);
    body.put_u16(0xE000 | PID_ELEMENTARY);
    body.put_u16(0xF000 | es_info_length as u16);
    for descriptor in &descriptors {
        descriptor.write_to(&mut body);
    }

    let section_length = body.len() + 4; // body plus CRC
    let mut section = BytesMut::with_capacity(4 + section_length);
    section.put_u8(0x00); // pointer field
    section.put_u8(TABLE_ID_PMT);
    // Section syntax indicator set, high nibble 0xB; lengths beyond a
    // single packet are caught by the framer.
    section.put_u16(0xB000 | section_length as u16);
    section.extend_from_slice(&body);

    // CRC covers table id through the last descriptor byte; the pointer
    // field stays outside.
    let crc = crc32_mpeg2(&section[1..]);
    section.put_u32(crc);
    section
}
