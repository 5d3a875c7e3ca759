//! Measurement data types for the AHT20 driver.

use crate::registers::{
    celsius_to_fahrenheit, decode_raw_humidity, decode_raw_temperature, raw_to_celsius,
    raw_to_humidity,
};

/// Raw 20-bit codes as transmitted by the sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RawMeasurement {
    pub humidity: u32,
    pub temperature: u32,
}

impl RawMeasurement {
    /// Split the five data bytes of a frame (status byte excluded).
    pub fn from_bytes(data: &[u8; 5]) -> Self {
        Self {
            humidity: decode_raw_humidity(data),
            temperature: decode_raw_temperature(data),
        }
    }

    /// Convert to physical units.
    pub fn to_measurement(self) -> Measurement {
        Measurement {
            humidity: raw_to_humidity(self.humidity),
            temperature: raw_to_celsius(self.temperature),
        }
    }
}

/// Decoded reading.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Measurement {
    /// Relative humidity in percent.
    pub humidity: f32,
    /// Temperature in degrees Celsius.
    pub temperature: f32,
}

impl Measurement {
    /// Temperature in degrees Fahrenheit.
    pub fn fahrenheit(&self) -> f32 {
        celsius_to_fahrenheit(self.temperature)
    }
}

impl From<RawMeasurement> for Measurement {
    fn from(raw: RawMeasurement) -> Self {
        raw.to_measurement()
    }
}
