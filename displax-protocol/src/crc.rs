//! CRC32 used by touch report frames
//!
//! The sensor computes its checksum the way the STM32 CRC peripheral does:
//! polynomial 0x04C11DB7, seed 0xFFFFFFFF, input consumed as little-endian
//! 32-bit words shifted MSB first, and no final inversion. This is not the
//! zlib/Ethernet convention, so a general-purpose CRC32 crate will not
//! produce matching values.

/// Ethernet / IEEE 802.3 polynomial
pub const CRC32_POLY: u32 = 0x04C1_1DB7;

/// Initial register value
pub const CRC32_SEED: u32 = 0xFFFF_FFFF;

/// Nibble lookup table (16 entries, one per 4-bit value)
pub const CRC32_TABLE: [u32; 16] = build_table();

const fn build_table() -> [u32; 16] {
    let mut table = [0u32; 16];
    let mut nibble = 0;
    while nibble < 16 {
        let mut crc = (nibble as u32) << 28;
        let mut bit = 0;
        while bit < 4 {
            crc = if crc & 0x8000_0000 != 0 {
                (crc << 1) ^ CRC32_POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[nibble] = crc;
        nibble += 1;
    }
    table
}

/// Compute the CRC32 of `data`.
///
/// `data` is processed four bytes at a time. Callers must pass a length that
/// is a multiple of four; trailing bytes beyond the last full word are
/// ignored.
pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = CRC32_SEED;

    for chunk in data.chunks_exact(4) {
        crc ^= u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);

        // 8 nibbles per word
        for _ in 0..8 {
            crc = (crc << 4) ^ CRC32_TABLE[(crc >> 28) as usize];
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_table_matches_reference() {
        let reference = [
            0x0000_0000, 0x04C1_1DB7, 0x0982_3B6E, 0x0D43_26D9, 0x1304_76DC, 0x17C5_6B6B,
            0x1A86_4DB2, 0x1E47_5005, 0x2608_EDB8, 0x22C9_F00F, 0x2F8A_D6D6, 0x2B4B_CB61,
            0x350C_9B64, 0x31CD_86D3, 0x3C8E_A00A, 0x384F_BDBD,
        ];
        assert_eq!(CRC32_TABLE, reference);
    }

    #[test]
    fn test_empty_input_returns_seed() {
        assert_eq!(crc32(&[]), CRC32_SEED);
    }

    #[test]
    fn test_known_values() {
        // Same values as the STM32 hardware CRC unit
        assert_eq!(crc32(&[0x00, 0x00, 0x00, 0x00]), 0xC704_DD7B);
        assert_eq!(crc32(&[0x01, 0x02, 0x03, 0x04]), 0x1DAB_E74F);
        assert_eq!(crc32(b"123456789012"), 0x19A3_8AFE);
    }

    #[test]
    fn test_empty_touch_frame() {
        let mut frame = [0u8; 68];
        frame[..4].copy_from_slice(&[0x04, 0x00, 0x40, 0x00]);
        assert_eq!(crc32(&frame), 0x9F9A_5797);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        assert_eq!(crc32(&[1, 2, 3, 4, 0xAA]), crc32(&[1, 2, 3, 4]));
        assert_eq!(crc32(&[0xAA, 0xBB, 0xCC]), CRC32_SEED);
    }

    proptest! {
        #[test]
        fn prop_crc_is_deterministic(words in proptest::collection::vec(any::<[u8; 4]>(), 0..32)) {
            let data: std::vec::Vec<u8> = words.concat();
            prop_assert_eq!(crc32(&data), crc32(&data));
        }

        #[test]
        fn prop_single_bit_flip_changes_crc(
            words in proptest::collection::vec(any::<[u8; 4]>(), 1..32),
            bit in any::<prop::sample::Index>(),
        ) {
            let data: std::vec::Vec<u8> = words.concat();
            let bit = bit.index(data.len() * 8);
            let mut corrupted = data.clone();
            corrupted[bit / 8] ^= 1 << (bit % 8);
            prop_assert_ne!(crc32(&data), crc32(&corrupted));
        }
    }
}
