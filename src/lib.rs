//! AHT20 Rust Driver
//!
//! Platform-agnostic driver for the Aosong AHT20 temperature and humidity sensor,
//! built on the [`embedded-hal`] 1.0 I2C and delay traits.
//!
//! - Blocking API, with an async mirror behind the `async` feature
//! - `no_std`
//! - Optional logging through `defmt` or `log` (mutually exclusive features)
//!
//! ```ignore
//! let mut sensor = Aht20::new(i2c, delay);
//! while !sensor.initialize() {
//!     // wiring problem or sensor still powering up; retry later
//! }
//! sensor.reset();
//! loop {
//!     if sensor.trigger_and_read(true) {
//!         let (c, f, rh) = (sensor.temperature_c(), sensor.temperature_f(), sensor.humidity_rh());
//!     }
//! }
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to the other modules.
mod fmt;

pub mod crc;
pub mod data_types;
pub mod driver;
pub mod error;
pub mod registers;

pub use data_types::{Measurement, RawMeasurement};
pub use driver::Aht20;
pub use error::Error;
pub use registers::{DEFAULT_I2C_ADDRESS, StatusBits};
