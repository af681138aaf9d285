//! Framing of PSI sections into fixed-size transport stream packets.

use bytes::{BufMut, BytesMut};

use crate::error::{Result, TsPmtError};
use crate::types::{ContinuityCounter, TsHeader, TS_HEADER_SIZE, TS_PACKET_SIZE};

/// Largest PSI section (pointer field through CRC) that fits a single
/// packet alongside the header, adaptation field length byte and
/// adaptation field flags byte.
pub const MAX_SECTION_SIZE: usize = TS_PACKET_SIZE - TS_HEADER_SIZE - 2;

/// Wraps one PSI section into exactly one 188-byte TS packet on `pid`.
///
/// The packet carries both an adaptation field and a payload. The
/// adaptation field holds no flags; it exists purely to stuff the packet
/// with `0xFF` so the section ends flush with the packet boundary. The
/// continuity counter stamps the header and is advanced once.
///
/// Sections larger than [`MAX_SECTION_SIZE`] are rejected with
/// [`TsPmtError::SectionOverflow`]; splitting a section across packets is
/// not supported and silently truncating would corrupt the stream.
pub fn write_psi_packet(
    pid: u16,
    section: &[u8],
    continuity_counter: &mut ContinuityCounter,
    buf: &mut BytesMut,
) -> Result<()> {
    if section.len() > MAX_SECTION_SIZE {
        return Err(TsPmtError::SectionOverflow {
            len: section.len(),
            max: MAX_SECTION_SIZE,
        });
    }

    let header = TsHeader {
        payload_unit_start: true,
        pid,
        adaptation_field_exists: true,
        contains_payload: true,
        continuity_counter: continuity_counter.current(),
    };
    header.write_to(buf);

    // Adaptation field length counts the flags byte plus all stuffing.
    let adaptation_field_length = TS_PACKET_SIZE - TS_HEADER_SIZE - 1 - section.len();
    buf.put_u8(adaptation_field_length as u8);
    buf.put_u8(0x00); // no adaptation field flags
    for _ in 0..adaptation_field_length - 1 {
        buf.put_u8(0xFF);
    }

    buf.put_slice(section);
    continuity_counter.advance();

    log::trace!(
        "framed {}-byte psi section on pid {:#06x}, cc={}",
        section.len(),
        pid,
        header.continuity_counter
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PID_PMT;

    #[test]
    fn packet_is_exactly_188_bytes() {
        let section = [0x00, 0x02, 0xB0, 0x00];
        let mut counter = ContinuityCounter::new();
        let mut buf = BytesMut::new();
        write_psi_packet(PID_PMT, &section, &mut counter, &mut buf).unwrap();
        assert_eq!(buf.len(), TS_PACKET_SIZE);
        assert_eq!(counter.current(), 1);
    }

    #[test]
    fn stuffing_is_all_ff() {
        let section = [0xAB; 20];
        let mut counter = ContinuityCounter::new();
        let mut buf = BytesMut::new();
        write_psi_packet(PID_PMT, &section, &mut counter, &mut buf).unwrap();
        // Bytes between the adaptation field flags byte and the section.
        for (i, &byte) in buf[6..TS_PACKET_SIZE - section.len()].iter().enumerate() {
            assert_eq!(byte, 0xFF, "at index {}", i + 6);
        }
        assert_eq!(&buf[TS_PACKET_SIZE - section.len()..], &section[..]);
    }

    #[test]
    fn largest_section_still_fits() {
        let section = [0x00; MAX_SECTION_SIZE];
        let mut counter = ContinuityCounter::new();
        let mut buf = BytesMut::new();
        write_psi_packet(PID_PMT, &section, &mut counter, &mut buf).unwrap();
        assert_eq!(buf.len(), TS_PACKET_SIZE);
        // Adaptation field shrank to the flags byte alone.
        assert_eq!(buf[4], 1);
        assert_eq!(buf[5], 0);
    }

    #[test]
    fn oversized_section_is_rejected() {
        let section = [0x00; MAX_SECTION_SIZE + 1];
        let mut counter = ContinuityCounter::new();
        let mut buf = BytesMut::new();
        let err = write_psi_packet(PID_PMT, &section, &mut counter, &mut buf).unwrap_err();
        assert!(matches!(
            err,
            TsPmtError::SectionOverflow { len, max }
                if len == MAX_SECTION_SIZE + 1 && max == MAX_SECTION_SIZE
        ));
        // Nothing written, counter untouched.
        assert!(buf.is_empty());
        assert_eq!(counter.current(), 0);
    }

    #[test]
    fn counter_stamps_then_advances() {
        let section = [0x00; 10];
        let mut counter = ContinuityCounter::new();
        let mut buf = BytesMut::new();
        for i in 0..20u8 {
            write_psi_packet(PID_PMT, &section, &mut counter, &mut buf).unwrap();
            let packet = &buf[i as usize * TS_PACKET_SIZE..];
            assert_eq!(packet[3] & 0x0F, i & 0x0F);
        }
    }
}
