//! Integration tests for the AS5600 driver using mocked I2C.

use as5600::params::{Hysteresis, PowerMode};
use as5600::registers::{FTH, HYST, RAW_ANGLE};
use as5600::{As5600, As5600Interface, Config, Error, AS5600L_ADDRESS, DEFAULT_ADDRESS};
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

const ADDR: u8 = DEFAULT_ADDRESS;

fn read(register: u8, response: &[u8]) -> I2cTransaction {
    I2cTransaction::write_read(ADDR, vec![register], response.to_vec())
}

fn write(frame: &[u8]) -> I2cTransaction {
    I2cTransaction::write(ADDR, frame.to_vec())
}

fn sensor(expectations: &[I2cTransaction]) -> As5600<as5600::I2cInterface<I2cMock>> {
    As5600::new_i2c(I2cMock::new(expectations), ADDR, Config::default())
}

fn finish(sensor: As5600<as5600::I2cInterface<I2cMock>>) {
    let (mut i2c, _) = sensor.release_i2c();
    i2c.done();
}

#[test]
fn angle_degrees_converts_half_turn() {
    let expectations = [read(0x0B, &[0b0010_0000]), read(0x0E, &[0x08, 0x00])];
    let mut sensor = sensor(&expectations);

    assert_eq!(sensor.angle_degrees().unwrap(), Some(180.0));

    finish(sensor);
}

#[test]
fn angle_degrees_withheld_when_magnet_too_weak() {
    let expectations = [read(0x0B, &[0b0011_0000])];
    let mut sensor = sensor(&expectations);

    assert_eq!(sensor.angle_degrees().unwrap(), None);

    finish(sensor);
}

#[test]
fn zero_position_write_is_big_endian_and_cached() {
    let expectations = [read(0x01, &[0x00, 0x00]), write(&[0x01, 0x0F, 0xFF])];
    let mut sensor = sensor(&expectations);

    sensor.set_zero_position(4095).unwrap();
    assert_eq!(sensor.zero_position().unwrap(), 4095);

    finish(sensor);
}

#[test]
fn zero_position_overflow_issues_no_transfer() {
    let mut sensor = sensor(&[]);

    assert_eq!(sensor.set_zero_position(4096), Err(Error::InvalidFieldValue));

    finish(sensor);
}

#[test]
fn read_only_field_issues_no_transfer() {
    let mut sensor = sensor(&[]);

    assert_eq!(sensor.write_field(RAW_ANGLE, 10), Err(Error::ReadOnlyField));

    finish(sensor);
}

#[test]
fn failed_write_forces_reread() {
    let expectations = [
        read(0x07, &[0x1C, 0x00]),
        write(&[0x07, 0x1C, 0x04]).with_error(ErrorKind::Other),
        read(0x07, &[0x1C, 0x00]),
    ];
    let mut sensor = sensor(&expectations);

    assert_eq!(
        sensor.write_field(HYST, Hysteresis::Lsb1 as u16),
        Err(Error::Interface(ErrorKind::Other))
    );
    assert_eq!(sensor.read_field(FTH).unwrap(), 0b111);

    finish(sensor);
}

#[test]
fn conf_field_write_keeps_neighbours() {
    let expectations = [read(0x07, &[0x1C, 0x00]), write(&[0x07, 0x1C, 0x03])];
    let mut sensor = sensor(&expectations);

    sensor.set_power_mode(PowerMode::Lpm3).unwrap();
    assert_eq!(sensor.read_field(FTH).unwrap(), 0b111);

    finish(sensor);
}

#[test]
fn burn_position_refused_at_limit() {
    let expectations = [read(0x00, &[0x03])];
    let mut sensor = sensor(&expectations);

    assert_eq!(sensor.burn_position(), Err(Error::BurnLimitExceeded { zmco: 3 }));

    finish(sensor);
}

#[test]
fn burn_position_sends_command() {
    let expectations = [
        read(0x00, &[0x01]),
        read(0x0B, &[0b0010_0000]),
        write(&[0xFF, 0x80]),
    ];
    let mut sensor = sensor(&expectations);

    sensor.burn_position().unwrap();

    finish(sensor);
}

#[test]
fn burn_setting_sends_command_once() {
    let expectations = [read(0x00, &[0x00]), write(&[0xFF, 0x40]), read(0x00, &[0x00])];
    let mut sensor = sensor(&expectations);

    sensor.burn_setting().unwrap();
    assert_eq!(sensor.burn_setting(), Err(Error::BurnAlreadyDone { zmco: 0 }));

    finish(sensor);
}

#[test]
fn init_applies_configuration() {
    let expectations = [read(0x07, &[0x00, 0x00]), write(&[0x07, 0x00, 0x01])];
    let config = Config::new().power_mode(PowerMode::Lpm1).build();
    let mut sensor = As5600::new_i2c(I2cMock::new(&expectations), ADDR, config);

    sensor.init(&mut NoopDelay::new()).unwrap();
    assert_eq!(sensor.configuration().unwrap(), config);

    finish(sensor);
}

#[test]
fn alternate_address_is_used() {
    let expectations = [I2cTransaction::write_read(AS5600L_ADDRESS, vec![0x1A], vec![0x42])];
    let mut sensor = As5600::new_i2c(I2cMock::new(&expectations), AS5600L_ADDRESS, Config::default());

    assert_eq!(sensor.agc().unwrap(), 0x42);

    finish(sensor);
}

#[test]
fn burn_setting_routine_refuses_second_burn() {
    let expectations = [read(0x00, &[0x00]), write(&[0xFF, 0x40]), read(0x00, &[0x00])];
    let mut sensor = sensor(&expectations);

    as5600::burn::burn_setting(&mut sensor).unwrap();
    assert!(sensor.setting_burned());
    assert_eq!(
        as5600::burn::burn_setting(&mut sensor),
        Err(Error::BurnAlreadyDone { zmco: 0 })
    );

    finish(sensor);
}

#[test]
fn long_payload_is_written_in_full() {
    let expectations = [
        I2cTransaction::transaction_start(ADDR),
        I2cTransaction::write(ADDR, vec![0x01]),
        I2cTransaction::write(ADDR, vec![0xAA, 0xBB, 0xCC]),
        I2cTransaction::transaction_end(ADDR),
    ];
    let mut interface = as5600::I2cInterface::new(I2cMock::new(&expectations), ADDR);

    interface.write_many(0x01, &[0xAA, 0xBB, 0xCC]).unwrap();

    interface.release().done();
}
