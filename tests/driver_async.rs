#![cfg(feature = "async")]

use aht20_rs::driver::Aht20;
use aht20_rs::error::Error;
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use futures::executor::block_on;

const ADDR: u8 = 0x38;
const FRAME: [u8; 7] = [0x1C, 0x65, 0xB4, 0x25, 0xCD, 0x26, 0xC6];

#[test]
fn async_cycle_matches_blocking_behaviour() {
    let mut busy = FRAME;
    busy[0] |= 0x80;
    let expectations = [
        // init: not calibrated, send init, calibrated
        I2cTrans::write_read(ADDR, vec![0x71], vec![0x00]),
        I2cTrans::write(ADDR, vec![0xBE, 0x08, 0x00]),
        I2cTrans::write_read(ADDR, vec![0x71], vec![0x18]),
        // reset
        I2cTrans::write(ADDR, vec![0xBA]),
        // good measurement
        I2cTrans::write_read(ADDR, vec![0x71], vec![0x18]),
        I2cTrans::write(ADDR, vec![0xAC, 0x33, 0x00]),
        I2cTrans::write_read(ADDR, vec![0x00], FRAME.to_vec()),
        // busy measurement
        I2cTrans::write_read(ADDR, vec![0x71], vec![0x18]),
        I2cTrans::write(ADDR, vec![0xAC, 0x33, 0x00]),
        I2cTrans::write_read(ADDR, vec![0x00], busy.to_vec()),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Aht20::new(mock, NoopDelay);

    block_on(async {
        assert!(driver.initialize_async().await);
        driver.reset_async().await;
        assert!(driver.trigger_and_read_async(true).await);
        let before = driver.measurement();
        assert_eq!(driver.measure_async(true).await, Err(Error::Busy));
        assert_eq!(driver.measurement(), before);
    });

    assert!((driver.humidity_rh() - 39.727_974).abs() < 1e-4);
    assert!((driver.temperature_c() - 22.517_014).abs() < 1e-4);

    let (mut i2c, _) = driver.free();
    i2c.done();
}

#[test]
fn async_not_calibrated() {
    let expectations = [I2cTrans::write_read(ADDR, vec![0x71], vec![0x80])];
    let mock = I2cMock::new(&expectations);
    let mut driver = Aht20::new(mock, NoopDelay);

    assert!(!block_on(driver.trigger_and_read_async(false)));
    assert_eq!(driver.temperature_c(), 0.0);

    let (mut i2c, _) = driver.free();
    i2c.done();
}

#[test]
fn async_init_continues_after_bus_errors() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0x71], vec![0x18]).with_error(ErrorKind::Other),
        I2cTrans::write(ADDR, vec![0xBE, 0x08, 0x00]).with_error(ErrorKind::Other),
        I2cTrans::write_read(ADDR, vec![0x71], vec![0x18]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Aht20::new(mock, NoopDelay);

    assert_eq!(block_on(driver.init_async()), Ok(()));

    let (mut i2c, _) = driver.free();
    i2c.done();
}
