//! CRC32 for MPEG-2 TS PSI tables, per ITU-T H.222.0 / ISO/IEC 13818-1.
//!
//! This is the unreflected CRC-32 variant: polynomial 0x04C11DB7, initial
//! register 0xFFFFFFFF, no input/output bit reversal and no final XOR. It
//! is *not* the common zlib CRC-32; the two disagree on every input.

const POLYNOMIAL: u32 = 0x04C11DB7;

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u32) << 24;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000_0000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

static TABLE: [u32; 256] = build_table();

/// Computes the CRC-32/MPEG-2 checksum of `data`.
///
/// For PSI sections the input runs from the table-id byte through the last
/// byte before the CRC field; the result is appended big-endian.
pub fn crc32_mpeg2(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        let index = ((crc >> 24) ^ byte as u32) & 0xFF;
        crc = (crc << 8) ^ TABLE[index as usize];
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        // Reference value for the MPEG-2 (unreflected) variant.
        assert_eq!(crc32_mpeg2(&[0x01, 0x01]), 0xD66FB816);
    }

    #[test]
    fn clear_h264_pmt_section() {
        // A complete clear-segment PMT body, table id through the last
        // byte before the CRC field.
        let section = [
            0x02, 0xB0, 0x12, 0x00, 0x01, 0xC1, 0x00, 0x00, 0xE0, 0x50,
            0xF0, 0x00, 0x1B, 0xE0, 0x50, 0xF0, 0x00,
        ];
        assert_eq!(crc32_mpeg2(&section), 0x434997BE);
    }

    #[test]
    fn differs_from_reflected_crc32() {
        // zlib's reflected CRC-32 of "123456789" is 0xCBF43926; the MPEG-2
        // variant of the same input must not match it.
        let data = b"123456789";
        assert_eq!(crc32_mpeg2(data), 0x0376E6E7);
        assert_ne!(crc32_mpeg2(data), 0xCBF43926);
    }

    #[test]
    fn empty_input_yields_initial_register() {
        assert_eq!(crc32_mpeg2(&[]), 0xFFFF_FFFF);
    }
}
