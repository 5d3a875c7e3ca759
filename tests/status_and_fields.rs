use aht20_rs::crc::{CRC8_INIT, CRC8_POLYNOMIAL, crc8, crc8_matches};
use aht20_rs::registers::{
    Command, DEFAULT_I2C_ADDRESS, INIT_ARGS, MEASUREMENT_ARGS, MEASUREMENT_FRAME_CRC_LEN,
    MEASUREMENT_FRAME_LEN, StatusBits,
};

const CAPTURED_FRAME: [u8; 6] = [0x1C, 0x65, 0xB4, 0x25, 0xCD, 0x26];

#[test]
fn status_bits() {
    let idle = StatusBits::from_bits_truncate(0x18);
    assert!(idle.is_calibrated());
    assert!(!idle.is_busy());

    let busy = StatusBits::from_bits_truncate(0x98);
    assert!(busy.is_calibrated());
    assert!(busy.is_busy());

    // Reserved bits are dropped.
    let raw = StatusBits::from_bits_truncate(0x77);
    assert_eq!(raw, StatusBits::empty());
    assert!(!raw.is_calibrated());

    assert_eq!(StatusBits::BUSY.bits(), 0x80);
    assert_eq!(StatusBits::CALIBRATED.bits(), 0x08);
}

#[test]
fn command_set() {
    assert_eq!(DEFAULT_I2C_ADDRESS, 0x38);
    assert_eq!(Command::Initialize.opcode(), 0xBE);
    assert_eq!(Command::TriggerMeasurement.opcode(), 0xAC);
    assert_eq!(Command::SoftReset.opcode(), 0xBA);
    assert_eq!(Command::Status.opcode(), 0x71);
    assert_eq!(INIT_ARGS, [0x08, 0x00]);
    assert_eq!(MEASUREMENT_ARGS, [0x33, 0x00]);
    assert_eq!(MEASUREMENT_FRAME_LEN, 6);
    assert_eq!(MEASUREMENT_FRAME_CRC_LEN, 7);
}

#[test]
fn crc_parameters() {
    assert_eq!(CRC8_POLYNOMIAL, 0x31);
    assert_eq!(CRC8_INIT, 0xFF);
}

#[test]
fn crc_golden_vector() {
    assert_eq!(crc8(&CAPTURED_FRAME), 0xC6);
    assert_eq!(crc8(&[0x1C, 0x19, 0x9A, 0x53, 0x6A, 0x1B]), 0x95);
    assert_eq!(crc8(&[0x18, 0x00, 0x00, 0x00, 0x00, 0x00]), 0x35);
    assert_eq!(crc8(&[0x18, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]), 0x17);
}

#[test]
fn crc_detects_every_single_bit_flip() {
    let good = crc8(&CAPTURED_FRAME);
    for byte in 0..CAPTURED_FRAME.len() {
        for bit in 0..8 {
            let mut corrupted = CAPTURED_FRAME;
            corrupted[byte] ^= 1 << bit;
            assert_ne!(crc8(&corrupted), good, "flip byte {byte} bit {bit}");
            assert!(!crc8_matches(&corrupted, good));
        }
    }
}

#[test]
fn crc_matches_catalogue_implementation() {
    let reference = crc::Crc::<u8>::new(&crc::CRC_8_NRSC_5);
    let inputs: [&[u8]; 5] = [
        b"123456789",
        &CAPTURED_FRAME,
        &[0x00; 6],
        &[0xFF; 6],
        &[0x98, 0x19, 0x9A, 0x53, 0x6A, 0x1B],
    ];
    for data in inputs {
        assert_eq!(crc8(data), reference.checksum(data));
    }
}
