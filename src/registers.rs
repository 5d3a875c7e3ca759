//! Command set, status bits and conversion constants for the AHT20.
//! Values are taken from the AHT20 datasheet (v1.1, section 5 and 6).

/// Fixed 7-bit I2C address of the AHT20.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x38;

/// Command opcodes. Each is sent as the first byte of an I2C write.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Command {
    /// Initialize and calibrate. Takes two argument bytes.
    Initialize = 0xBE,
    /// Start a conversion. Takes two argument bytes.
    TriggerMeasurement = 0xAC,
    /// Soft reset, no arguments.
    SoftReset = 0xBA,
    /// Read one byte of status word.
    Status = 0x71,
}

impl Command {
    /// Raw opcode byte.
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

/// Argument bytes following [`Command::Initialize`].
pub const INIT_ARGS: [u8; 2] = [0x08, 0x00];
/// Argument bytes following [`Command::TriggerMeasurement`].
pub const MEASUREMENT_ARGS: [u8; 2] = [0x33, 0x00];
/// Register the measurement frame is read back from.
pub const DATA_REG: u8 = 0x00;

/// Status byte + 5 data bytes.
pub const MEASUREMENT_FRAME_LEN: usize = 6;
/// Status byte + 5 data bytes + CRC byte.
pub const MEASUREMENT_FRAME_CRC_LEN: usize = 7;

/// Settle time after the initialize command.
pub const INIT_DELAY_MS: u32 = 10;
/// Conversion time after a measurement trigger.
pub const MEASUREMENT_DELAY_MS: u32 = 80;
/// Guaranteed upper bound for a soft reset.
pub const SOFT_RESET_DELAY_MS: u32 = 20;

/// Full scale of the 20-bit raw codes (2^20).
pub const RAW_FULL_SCALE: u32 = 1 << 20;
/// Mask selecting the 20 valid bits of a raw code.
pub const RAW_MASK: u32 = RAW_FULL_SCALE - 1;

bitflags::bitflags! {
    /// Status byte, returned by [`Command::Status`] and as byte 0 of every measurement frame.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct StatusBits: u8 {
        /// Bit 7: conversion in progress.
        const BUSY       = 1 << 7;
        // Bits 6-4 reserved.
        /// Bit 3: calibration data loaded.
        const CALIBRATED = 1 << 3;
        // Bits 2-0 reserved.
    }
}

impl StatusBits {
    /// Sensor is still converting; frame data is not valid yet.
    pub fn is_busy(&self) -> bool {
        self.contains(StatusBits::BUSY)
    }

    /// Sensor has completed calibration and can measure.
    pub fn is_calibrated(&self) -> bool {
        self.contains(StatusBits::CALIBRATED)
    }
}

/// Convert a 20-bit humidity code to %RH (datasheet section 6.1).
pub fn raw_to_humidity(raw: u32) -> f32 {
    (raw & RAW_MASK) as f32 / RAW_FULL_SCALE as f32 * 100.0
}

/// Convert a 20-bit temperature code to degrees Celsius (datasheet section 6.2).
pub fn raw_to_celsius(raw: u32) -> f32 {
    (raw & RAW_MASK) as f32 / RAW_FULL_SCALE as f32 * 200.0 - 50.0
}

/// Celsius to Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32.0
}

/// Extract the 20-bit humidity code from data bytes 1..=3 of a frame.
pub fn decode_raw_humidity(data: &[u8; 5]) -> u32 {
    (u32::from(data[0]) << 12) | (u32::from(data[1]) << 4) | (u32::from(data[2]) >> 4)
}

/// Extract the 20-bit temperature code from data bytes 3..=5 of a frame.
/// The high nibble of the shared byte belongs to humidity.
pub fn decode_raw_temperature(data: &[u8; 5]) -> u32 {
    (u32::from(data[2] & 0x0F) << 16) | (u32::from(data[3]) << 8) | u32::from(data[4])
}
