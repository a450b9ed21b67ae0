//! I²C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::{I2c, Operation};

use super::As5600Interface;

/// Factory-programmed 7-bit address of the AS5600.
pub const DEFAULT_ADDRESS: u8 = 0x36;
/// Default 7-bit address of the AS5600L variant.
pub const AS5600L_ADDRESS: u8 = 0x40;

// Registers are at most two bytes wide; longer payloads use a transaction.
const MAX_PAYLOAD: usize = 2;

/// I²C-based interface implementation for the AS5600 driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface talking to the device at `address`.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Creates a new interface at the factory default address `0x36`.
    pub const fn with_default_address(i2c: I2C) -> Self {
        Self::new(i2c, DEFAULT_ADDRESS)
    }

    /// Returns the 7-bit device address in use.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped I²C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I²C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> As5600Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.write_many(register, core::slice::from_ref(&value))
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        self.i2c.write_read(self.address, &[register], buf)
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }

        if data.len() > MAX_PAYLOAD {
            // Adjacent writes go out as one frame with no repeated start.
            return self.i2c.transaction(
                self.address,
                &mut [Operation::Write(&[register]), Operation::Write(data)],
            );
        }

        let len = data.len();
        let mut frame = [0u8; MAX_PAYLOAD + 1];
        frame[0] = register;
        frame[1..=len].copy_from_slice(data);
        self.i2c.write(self.address, &frame[..=len])
    }
}
