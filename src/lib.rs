#![no_std]
//! `#![no_std]` driver for the ams AS5600 magnetic rotary position sensor.
//!
//! Registers are described by [`Field`] descriptors in [`registers`]; the
//! [`As5600`] driver reads and writes them over any [`As5600Interface`],
//! caching the configuration registers that only change when written.
//!
//! ```no_run
//! # fn demo<I2C: embedded_hal::i2c::I2c>(i2c: I2C) -> Result<(), as5600::Error<I2C::Error>> {
//! use as5600::{As5600, Config, DEFAULT_ADDRESS};
//!
//! let mut sensor = As5600::new_i2c(i2c, DEFAULT_ADDRESS, Config::default());
//! if let Some(degrees) = sensor.angle_degrees()? {
//!     let _ = degrees;
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod log;

pub mod burn;
pub mod cache;
pub mod config;
pub mod device;
pub mod field;
pub mod interface;
pub mod params;
pub mod registers;

pub use crate::config::Config;
pub use crate::device::{As5600, StatusSnapshot};
pub use crate::error::{Error, Result};
pub use crate::field::{Field, FieldError};
pub use crate::interface::i2c::{I2cInterface, AS5600L_ADDRESS, DEFAULT_ADDRESS};
pub use crate::interface::As5600Interface;
