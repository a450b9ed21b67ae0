//! High-level AS5600 device driver implementation.
//!
//! Every operation takes `&mut self`, so each read-modify-write of a register
//! runs with exclusive access to the driver. The sequence is not atomic on the
//! bus: a second master writing the same register between the read and the
//! write would be overwritten. Callers sharing one sensor between execution
//! contexts must put the driver behind their own mutex.

use crate::burn;
use crate::cache::RegisterCache;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::field::Field;
use crate::interface::i2c::I2cInterface;
use crate::interface::As5600Interface;
use crate::log::{debug, trace, warning};
use crate::params::{Hysteresis, PowerMode, Watchdog};
use crate::registers::{
    register_width,
    Conf,
    Register,
    Status,
    AGC,
    ANGLE,
    HYST,
    MAGNITUDE,
    MANG,
    MPOS,
    PM,
    RAW_ANGLE,
    REG_BURN,
    WD,
    ZMCO,
    ZPOS,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

// AS5600 datasheet power-up time (milliseconds).
const POWER_UP_DELAY_MS: u32 = 10;
// Full-scale count of the 12-bit angle registers.
const ANGLE_COUNTS: f32 = 4096.0;

/// High-level synchronous driver for the AS5600 position sensor.
pub struct As5600<IFACE> {
    interface: IFACE,
    config: Config,
    cache: RegisterCache,
    setting_burned: bool,
}

/// Decoded view of the `STATUS` register together with the `AGC` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// STATUS[5] MD.
    pub magnet_detected: bool,
    /// STATUS[4] ML.
    pub magnet_too_weak: bool,
    /// STATUS[3] MH.
    pub magnet_too_strong: bool,
    /// AGC[7:0].
    pub agc: u8,
}

impl StatusSnapshot {
    /// Builds a snapshot from the raw STATUS bitfield and AGC value.
    pub fn from_registers(status: Status, agc: u8) -> Self {
        Self {
            magnet_detected: status.magnet_detected(),
            magnet_too_weak: status.magnet_too_weak(),
            magnet_too_strong: status.magnet_too_strong(),
            agc,
        }
    }

    /// Rebuilds the `STATUS` bitfield from the decoded flags.
    pub fn status_register(&self) -> Status {
        Status::new()
            .with_magnet_detected(self.magnet_detected)
            .with_magnet_too_weak(self.magnet_too_weak)
            .with_magnet_too_strong(self.magnet_too_strong)
    }

    /// True when a magnet is present and its field strength is in range.
    pub fn is_reliable(&self) -> bool {
        self.status_register().is_reliable()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusSnapshot {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "StatusSnapshot {{\n    MD: {},\n    ML: {},\n    MH: {},\n    AGC: {}\n}}",
            self.magnet_detected,
            self.magnet_too_weak,
            self.magnet_too_strong,
            self.agc
        );
    }
}

/// Converts a 12-bit angle count to degrees.
pub fn counts_to_degrees(counts: u16) -> f32 {
    (f32::from(counts) / ANGLE_COUNTS) * 360.0
}

impl<IFACE> As5600<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self {
            interface,
            config,
            cache: RegisterCache::new(),
            setting_burned: false,
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    ///
    /// Register writes issued directly through the interface are not seen by
    /// the cache; call [`clear_cache`](Self::clear_cache) afterwards.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns the register cache.
    pub fn cache(&self) -> &RegisterCache {
        &self.cache
    }

    /// Forgets every cached register value.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub(crate) fn cache_mut(&mut self) -> &mut RegisterCache {
        &mut self.cache
    }

    /// Returns whether a settings burn is known to have happened on this chip.
    pub fn setting_burned(&self) -> bool {
        self.setting_burned
    }

    /// Records that the settings burn was already performed on this chip.
    ///
    /// The AS5600 has no readable counter for the settings burn, so knowledge
    /// of a burn done in an earlier session has to come from the caller.
    pub fn mark_setting_burned(&mut self) {
        self.setting_burned = true;
    }
}

impl<I2C> As5600<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I²C transports.
    pub fn new_i2c(i2c: I2C, address: u8, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c, address), config)
    }

    /// Releases the driver, returning the I²C bus and configuration.
    pub fn release_i2c(self) -> (I2C, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> As5600<IFACE>
where
    IFACE: As5600Interface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Configuration ================================
    // ==================================================================
    /// Initializes the sensor using the current configuration.
    ///
    /// Waits out the datasheet power-up time before touching the bus so
    /// callers do not need their own delay after power is applied.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        delay.delay_ms(POWER_UP_DELAY_MS);
        self.configure(self.config)
    }

    /// Applies a new configuration to the `CONF` register.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        self.update_conf(|conf| config.apply_to(conf))?;
        self.config = config;
        Ok(())
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads `CONF` and decodes it into a [`Config`].
    pub fn configuration(&mut self) -> Result<Config, CommE> {
        let conf = Conf::from(self.read_raw(Conf::ADDRESS)?);
        Config::from_conf(conf).map_err(|_| Error::ReservedValue)
    }

    /// Sets the power mode.
    pub fn set_power_mode(&mut self, mode: PowerMode) -> Result<(), CommE> {
        self.write_field(PM, mode as u16)?;
        self.config.power_mode = mode;
        Ok(())
    }

    /// Sets the output hysteresis.
    pub fn set_hysteresis(&mut self, hysteresis: Hysteresis) -> Result<(), CommE> {
        self.write_field(HYST, hysteresis as u16)?;
        self.config.hysteresis = hysteresis;
        Ok(())
    }

    /// Enables or disables the watchdog.
    pub fn set_watchdog(&mut self, watchdog: Watchdog) -> Result<(), CommE> {
        self.write_field(WD, watchdog as u16)?;
        self.config.watchdog = watchdog;
        Ok(())
    }

    // ==================================================================
    // == Generic Field Access ==========================================
    // ==================================================================
    /// Reads one field, serving configuration registers from the cache when possible.
    pub fn read_field(&mut self, field: Field) -> Result<u16, CommE> {
        if field.register() == REG_BURN {
            return Err(Error::RegisterLocked);
        }

        let raw = self.read_raw(field.register())?;
        Ok(field.decode(raw))
    }

    /// Writes one field, preserving every other bit of its register.
    ///
    /// Permission and range checks happen before any bus traffic. On a bus
    /// failure the register's cache entry is dropped so the next access
    /// re-reads the device.
    pub fn write_field(&mut self, field: Field, value: u16) -> Result<(), CommE> {
        if field.register() == REG_BURN {
            return Err(Error::RegisterLocked);
        }
        field.validate(value)?;

        let raw = self.read_raw(field.register())?;
        let updated = field.encode(raw, value)?;
        debug!("{=str} <- {=u16:#x}", field.name(), value);
        self.write_raw(field.register(), updated)
    }

    // ==================================================================
    // == Position Registers ============================================
    // ==================================================================
    /// Number of zero/max position burns already performed (0 to 3).
    pub fn zmco(&mut self) -> Result<u8, CommE> {
        Ok(self.read_field(ZMCO)? as u8)
    }

    /// Zero (start) position.
    pub fn zero_position(&mut self) -> Result<u16, CommE> {
        self.read_field(ZPOS)
    }

    /// Sets the zero (start) position.
    pub fn set_zero_position(&mut self, position: u16) -> Result<(), CommE> {
        self.write_field(ZPOS, position)
    }

    /// Maximum (stop) position.
    pub fn max_position(&mut self) -> Result<u16, CommE> {
        self.read_field(MPOS)
    }

    /// Sets the maximum (stop) position.
    pub fn set_max_position(&mut self, position: u16) -> Result<(), CommE> {
        self.write_field(MPOS, position)
    }

    /// Maximum angular range.
    pub fn max_angle(&mut self) -> Result<u16, CommE> {
        self.read_field(MANG)
    }

    /// Sets the maximum angular range.
    pub fn set_max_angle(&mut self, angle: u16) -> Result<(), CommE> {
        self.write_field(MANG, angle)
    }

    // ==================================================================
    // == Measurements & Status =========================================
    // ==================================================================
    /// Unscaled and unmodified 12-bit angle.
    pub fn raw_angle(&mut self) -> Result<u16, CommE> {
        self.read_field(RAW_ANGLE)
    }

    /// Scaled and filtered 12-bit angle.
    pub fn angle(&mut self) -> Result<u16, CommE> {
        self.read_field(ANGLE)
    }

    /// CORDIC magnitude.
    pub fn magnitude(&mut self) -> Result<u16, CommE> {
        self.read_field(MAGNITUDE)
    }

    /// Automatic gain control value.
    pub fn agc(&mut self) -> Result<u8, CommE> {
        Ok(self.read_field(AGC)? as u8)
    }

    fn read_status_register(&mut self) -> Result<Status, CommE> {
        let raw = self.read_raw(Status::ADDRESS)?;
        Ok(Status::from(raw as u8))
    }

    /// Returns the magnet status flags together with the AGC value.
    pub fn status(&mut self) -> Result<StatusSnapshot, CommE> {
        let status = self.read_status_register()?;
        let agc = self.agc()?;
        Ok(StatusSnapshot::from_registers(status, agc))
    }

    /// True when a magnet is detected and neither too weak nor too strong.
    pub fn is_reliable(&mut self) -> Result<bool, CommE> {
        Ok(self.read_status_register()?.is_reliable())
    }

    /// Filtered angle in degrees, or `None` when the magnet reading is unreliable.
    pub fn angle_degrees(&mut self) -> Result<Option<f32>, CommE> {
        if !self.is_reliable()? {
            warning!("magnet status unreliable, angle withheld");
            return Ok(None);
        }

        self.angle_degrees_fast().map(Some)
    }

    /// Filtered angle in degrees without checking the magnet status.
    ///
    /// The caller accepts that the value may be meaningless when no usable
    /// magnet is present.
    pub fn angle_degrees_fast(&mut self) -> Result<f32, CommE> {
        Ok(counts_to_degrees(self.angle()?))
    }

    // ==================================================================
    // == OTP Programming ===============================================
    // ==================================================================
    /// Permanently programs `ZPOS` and `MPOS` (at most three times per chip).
    pub fn burn_position(&mut self) -> Result<(), CommE> {
        burn::burn_position(self)
    }

    /// Permanently programs `MANG` and `CONF` (once per chip).
    pub fn burn_setting(&mut self) -> Result<(), CommE> {
        burn::burn_setting(self)
    }

    /// Reloads the OTP content into the registers, for verifying a burn.
    pub fn load_otp(&mut self) -> Result<(), CommE> {
        burn::load_otp(self)
    }

    // ==================================================================
    // == Internal Register Helpers =====================================
    // ==================================================================

    fn read_raw(&mut self, register: u8) -> Result<u16, CommE> {
        if let Some(raw) = self.cache.get(register) {
            trace!("cache hit {=u8:#x}", register);
            return Ok(raw);
        }

        let width = register_width(register);
        let mut buf = [0u8; 2];
        self
            .interface
            .read_many(register, &mut buf[..width.bytes()])
            .map_err(Error::Interface)?;

        let raw = width.from_be_slice(&buf);
        self.cache.put(register, raw);
        Ok(raw)
    }

    fn write_raw(&mut self, register: u8, raw: u16) -> Result<(), CommE> {
        let (bytes, len) = register_width(register).to_be_bytes(raw);
        match self.interface.write_many(register, &bytes[..len]) {
            Ok(()) => {
                self.cache.put(register, raw);
                Ok(())
            }
            Err(err) => {
                warning!("write to {=u8:#x} failed, cache entry dropped", register);
                self.cache.invalidate(register);
                Err(Error::Interface(err))
            }
        }
    }

    /// Writes a raw command byte to the `BURN` register.
    pub(crate) fn write_command(&mut self, command: u8) -> Result<(), CommE> {
        debug!("BURN <- {=u8:#x}", command);
        self
            .interface
            .write_register(REG_BURN, command)
            .map_err(Error::Interface)
    }

    fn update_conf<F>(&mut self, mut mutate: F) -> Result<(), CommE>
    where
        F: FnMut(&mut Conf),
    {
        let current = self.read_raw(Conf::ADDRESS)?;

        let mut conf = Conf::from(current);
        mutate(&mut conf);

        let updated = u16::from(conf);
        if updated != current {
            self.write_raw(Conf::ADDRESS, updated)?;
        }

        Ok(())
    }
}
