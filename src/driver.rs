//! AHT20 driver.
//!
//! Blocking I2C implementation; the async version mirrors this API behind the `async` feature.
//!
//! Every bus operation comes in two flavours. The `Result` methods ([`Aht20::init`],
//! [`Aht20::soft_reset`], [`Aht20::measure`]) report why a cycle failed. The
//! `bool` methods ([`Aht20::initialize`], [`Aht20::reset`], [`Aht20::trigger_and_read`])
//! log the failure and degrade to `false`, which is what a polling loop usually wants.
//!
//! ```text
//!  Status (0x71) ──► calibrated? ──No──► Initialize (0xBE 0x08 0x00), wait 10 ms, Status again
//!        │
//!       Yes
//!        ▼
//!  TriggerMeasurement (0xAC 0x33 0x00), wait 80 ms
//!        ▼
//!  read 6 (or 7 with CRC) bytes from 0x00 ──► busy? / crc bad? ──► fail, cache untouched
//!        ▼
//!  decode, update cache
//! ```

use crate::crc::{crc8, crc8_matches};
use crate::data_types::{Measurement, RawMeasurement};
use crate::error::Error;
use crate::registers::{
    Command, DATA_REG, DEFAULT_I2C_ADDRESS, INIT_ARGS, INIT_DELAY_MS, MEASUREMENT_ARGS, MEASUREMENT_DELAY_MS,
    MEASUREMENT_FRAME_CRC_LEN, MEASUREMENT_FRAME_LEN, SOFT_RESET_DELAY_MS, StatusBits,
};

/// AHT20 temperature and humidity sensor.
///
/// Owns the I2C bus handle and a delay provider for the fixed settle times.
/// Keeps the last successfully decoded measurement; failed cycles never touch it.
pub struct Aht20<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    last: Measurement,
}

impl<I2C, D> Aht20<I2C, D> {
    /// Create a new driver instance with the default I2C address (0x38).
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, DEFAULT_I2C_ADDRESS)
    }

    /// Create a new driver instance with a custom I2C address (e.g. behind an address translator).
    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            last: Measurement::default(),
        }
    }

    /// Return the 7-bit I2C address configured for this instance.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Last successful measurement, zeroed until the first one.
    pub fn measurement(&self) -> Measurement {
        self.last
    }

    /// Temperature in degrees Celsius from the last successful measurement.
    pub fn temperature_c(&self) -> f32 {
        self.last.temperature
    }

    /// Temperature in degrees Fahrenheit, derived from [`Self::temperature_c`].
    pub fn temperature_f(&self) -> f32 {
        self.last.fahrenheit()
    }

    /// Relative humidity in percent from the last successful measurement.
    pub fn humidity_rh(&self) -> f32 {
        self.last.humidity
    }

    /// Release the bus and delay handles.
    pub fn free(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> Aht20<I2C, D>
where
    I2C: embedded_hal::i2c::I2c,
    D: embedded_hal::delay::DelayNs,
{
    /// Bring the sensor into calibrated state. Returns `true` once the calibration bit is set.
    ///
    /// No retries are done here; call again after a delay if it returns `false`.
    pub fn initialize(&mut self) -> bool {
        match self.init() {
            Ok(()) => true,
            Err(e) => {
                log_failure("initialize", &e);
                false
            }
        }
    }

    /// Check calibration and send the initialize command if needed.
    /// Issues no write when the sensor already reports calibrated.
    ///
    /// A failed status read counts as "not calibrated" and a failed init write does
    /// not stop the sequence: the 10 ms wait and the second status read always happen.
    /// If the sensor still is not calibrated, the first bus error seen is returned.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        let first = self.read_status();
        if matches!(&first, Ok(status) if status.is_calibrated()) {
            return Ok(());
        }
        let written = self.write_block(Command::Initialize, INIT_ARGS);
        let failure = first.err().or(written.err());
        self.delay.delay_ms(INIT_DELAY_MS);
        settle_init(self.read_status(), failure)
    }

    /// Soft reset, ignoring bus errors (they are logged).
    pub fn reset(&mut self) {
        if let Err(e) = self.soft_reset() {
            log_failure("reset", &e);
        }
    }

    /// Send the soft reset command and wait 20 ms. The wait happens even if the write failed.
    pub fn soft_reset(&mut self) -> Result<(), Error<I2C::Error>> {
        let result = self.write_command(Command::SoftReset);
        self.delay.delay_ms(SOFT_RESET_DELAY_MS);
        result
    }

    /// Run one measurement cycle. Returns `true` and updates the cached values on success.
    pub fn trigger_and_read(&mut self, crc_enabled: bool) -> bool {
        match self.measure(crc_enabled) {
            Ok(_) => true,
            Err(e) => {
                log_failure("measurement", &e);
                false
            }
        }
    }

    /// Trigger a conversion, wait 80 ms and read back the frame.
    ///
    /// With `crc_enabled` a seventh byte is read and checked against the first six.
    pub fn measure(&mut self, crc_enabled: bool) -> Result<Measurement, Error<I2C::Error>> {
        if !self.read_status()?.is_calibrated() {
            return Err(Error::NotCalibrated);
        }
        let len = frame_len(crc_enabled);
        self.write_block(Command::TriggerMeasurement, MEASUREMENT_ARGS)?;
        self.delay.delay_ms(MEASUREMENT_DELAY_MS);

        let mut frame = [0u8; MEASUREMENT_FRAME_CRC_LEN];
        self.read_block(DATA_REG, &mut frame[..len])?;
        let measurement = decode_frame(&frame, crc_enabled)?;
        self.last = measurement;
        debug!(
            "aht20: {} %RH, {} C",
            measurement.humidity,
            measurement.temperature
        );
        Ok(measurement)
    }

    /// Read the status byte.
    pub fn read_status(&mut self) -> Result<StatusBits, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.read_block(Command::Status.opcode(), &mut buf)?;
        Ok(StatusBits::from_bits_truncate(buf[0]))
    }

    /// Single-byte command without arguments.
    fn write_command(&mut self, cmd: Command) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[cmd.opcode()])
            .map_err(Error::I2c)
    }

    /// Command followed by its two argument bytes.
    fn write_block(&mut self, cmd: Command, args: [u8; 2]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[cmd.opcode(), args[0], args[1]])
            .map_err(Error::I2c)
    }

    /// Send `reg` then read `data.len()` bytes with a repeated start.
    fn read_block(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[reg], data)
            .map_err(Error::I2c)
    }
}

#[cfg(feature = "async")]
impl<I2C, D> Aht20<I2C, D>
where
    I2C: embedded_hal_async::i2c::I2c,
    D: embedded_hal_async::delay::DelayNs,
{
    /// Async version of [`Self::initialize`].
    pub async fn initialize_async(&mut self) -> bool {
        match self.init_async().await {
            Ok(()) => true,
            Err(e) => {
                log_failure("initialize", &e);
                false
            }
        }
    }

    /// Async version of [`Self::init`].
    pub async fn init_async(&mut self) -> Result<(), Error<I2C::Error>> {
        let first = self.read_status_async().await;
        if matches!(&first, Ok(status) if status.is_calibrated()) {
            return Ok(());
        }
        let written = self.write_block_async(Command::Initialize, INIT_ARGS).await;
        let failure = first.err().or(written.err());
        self.delay.delay_ms(INIT_DELAY_MS).await;
        settle_init(self.read_status_async().await, failure)
    }

    pub async fn reset_async(&mut self) {
        if let Err(e) = self.soft_reset_async().await {
            log_failure("reset", &e);
        }
    }

    pub async fn soft_reset_async(&mut self) -> Result<(), Error<I2C::Error>> {
        let result = self
            .i2c
            .write(self.address, &[Command::SoftReset.opcode()])
            .await
            .map_err(Error::I2c);
        self.delay.delay_ms(SOFT_RESET_DELAY_MS).await;
        result
    }

    pub async fn trigger_and_read_async(&mut self, crc_enabled: bool) -> bool {
        match self.measure_async(crc_enabled).await {
            Ok(_) => true,
            Err(e) => {
                log_failure("measurement", &e);
                false
            }
        }
    }

    pub async fn measure_async(&mut self, crc_enabled: bool) -> Result<Measurement, Error<I2C::Error>> {
        if !self.read_status_async().await?.is_calibrated() {
            return Err(Error::NotCalibrated);
        }
        let len = frame_len(crc_enabled);
        self.write_block_async(Command::TriggerMeasurement, MEASUREMENT_ARGS)
            .await?;
        self.delay.delay_ms(MEASUREMENT_DELAY_MS).await;

        let mut frame = [0u8; MEASUREMENT_FRAME_CRC_LEN];
        self.read_block_async(DATA_REG, &mut frame[..len]).await?;
        let measurement = decode_frame(&frame, crc_enabled)?;
        self.last = measurement;
        debug!(
            "aht20: {} %RH, {} C",
            measurement.humidity,
            measurement.temperature
        );
        Ok(measurement)
    }

    pub async fn read_status_async(&mut self) -> Result<StatusBits, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.read_block_async(Command::Status.opcode(), &mut buf)
            .await?;
        Ok(StatusBits::from_bits_truncate(buf[0]))
    }

    async fn write_block_async(&mut self, cmd: Command, args: [u8; 2]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[cmd.opcode(), args[0], args[1]])
            .await
            .map_err(Error::I2c)
    }

    async fn read_block_async(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[reg], data)
            .await
            .map_err(Error::I2c)
    }
}

/// Outcome of the status read after the init command. `failure` is the first bus
/// error from the earlier steps.
fn settle_init<E>(status: Result<StatusBits, Error<E>>, failure: Option<Error<E>>) -> Result<(), Error<E>> {
    match status {
        Ok(status) if status.is_calibrated() => Ok(()),
        Ok(_) => Err(failure.unwrap_or(Error::NotCalibrated)),
        Err(e) => Err(failure.unwrap_or(e)),
    }
}

fn frame_len(crc_enabled: bool) -> usize {
    if crc_enabled {
        MEASUREMENT_FRAME_CRC_LEN
    } else {
        MEASUREMENT_FRAME_LEN
    }
}

/// Validate a measurement frame and convert it.
///
/// Byte 0 is the status byte, bytes 1..=5 carry the two 20-bit codes and byte 6
/// is the CRC (only inspected when `crc_enabled`).
fn decode_frame<E>(
    frame: &[u8; MEASUREMENT_FRAME_CRC_LEN],
    crc_enabled: bool,
) -> Result<Measurement, Error<E>> {
    if StatusBits::from_bits_truncate(frame[0]).is_busy() {
        return Err(Error::Busy);
    }
    if crc_enabled {
        let data = &frame[..MEASUREMENT_FRAME_LEN];
        let expected = frame[MEASUREMENT_FRAME_LEN];
        if !crc8_matches(data, expected) {
            return Err(Error::Crc {
                expected,
                computed: crc8(data),
            });
        }
    }
    let data = [frame[1], frame[2], frame[3], frame[4], frame[5]];
    Ok(RawMeasurement::from_bytes(&data).to_measurement())
}

fn log_failure<E>(op: &str, err: &Error<E>) {
    match err {
        Error::I2c(_) => warn!("aht20 {}: i2c transfer failed", op),
        Error::NotCalibrated => warn!("aht20 {}: not calibrated", op),
        Error::Busy => warn!("aht20 {}: busy", op),
        Error::Crc { expected, computed } => warn!(
            "aht20 {}: crc failed (frame {:#x}, computed {:#x})",
            op,
            expected,
            computed
        ),
    }
}
