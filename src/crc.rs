//! CRC-8 used by the AHT20 measurement frame.
//!
//! Polynomial x^8 + x^5 + x^4 + 1 (0x31), initial value 0xFF, no reflection
//! and no final XOR. These are the CRC-8/NRSC-5 catalogue parameters.

/// Generator polynomial without the implicit x^8 term.
pub const CRC8_POLYNOMIAL: u8 = 0x31;
/// Register value before the first byte.
pub const CRC8_INIT: u8 = 0xFF;

/// Compute the checksum over `data`, MSB first.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = CRC8_INIT;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC8_POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// True when `expected` matches the checksum of `data`.
pub fn crc8_matches(data: &[u8], expected: u8) -> bool {
    crc8(data) == expected
}
