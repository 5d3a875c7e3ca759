//! Error definitions for the AHT20 driver.

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum Error<I2cError> {
    /// Underlying I2C transaction failed.
    I2c(I2cError),
    /// Status word reports the calibration bit clear.
    NotCalibrated,
    /// Measurement frame still has the busy bit set.
    Busy,
    /// Trailing CRC byte does not match the frame contents.
    Crc { expected: u8, computed: u8 },
}

impl<I2cError: core::fmt::Debug> core::fmt::Display for Error<I2cError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Error::NotCalibrated => write!(f, "sensor not calibrated"),
            Error::Busy => write!(f, "sensor busy"),
            Error::Crc { expected, computed } => {
                write!(f, "crc check failed (frame {:#04x}, computed {:#04x})", expected, computed)
            }
        }
    }
}
