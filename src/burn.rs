//! One-time programmable (OTP) burn sequences for the AS5600.
//!
//! Burns are irreversible. Every policy check runs before the command byte is
//! written, so a refused burn leaves the chip untouched.

use crate::device::As5600;
use crate::error::{Error, Result};
use crate::interface::As5600Interface;
use crate::log::{debug, warning};
use crate::registers::{MD, REG_CONF, REG_MANG, REG_MPOS, REG_ZPOS, ZMCO};

/// Command bytes accepted by the `BURN` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BurnCommand {
    /// `BURN_ANGLE`: programs `ZPOS` and `MPOS`.
    Angle = 0x80,
    /// `BURN_SETTING`: programs `MANG` and `CONF`.
    Setting = 0x40,
}

/// Hardware limit on `BURN_ANGLE` commands per chip.
pub const MAX_POSITION_BURNS: u8 = 3;

/// Command bytes that reload the OTP content into the registers.
pub const OTP_LOAD_SEQUENCE: [u8; 3] = [0x01, 0x11, 0x10];

/// Burns `ZPOS`/`MPOS` after checking the burn counter and magnet presence.
pub fn burn_position<IFACE, CommE>(device: &mut As5600<IFACE>) -> Result<(), CommE>
where
    IFACE: As5600Interface<Error = CommE>,
{
    let zmco = device.read_field(ZMCO)? as u8;
    if zmco >= MAX_POSITION_BURNS {
        warning!("position burn refused, ZMCO = {=u8}", zmco);
        return Err(Error::BurnLimitExceeded { zmco });
    }

    if device.read_field(MD)? == 0 {
        warning!("position burn refused, no magnet detected");
        return Err(Error::MagnetNotDetected);
    }

    debug!("burning position, ZMCO = {=u8}", zmco);
    let result = device.write_command(BurnCommand::Angle as u8);

    // The burned values can no longer be trusted as "last written".
    let cache = device.cache_mut();
    cache.invalidate(REG_ZPOS);
    cache.invalidate(REG_MPOS);
    result
}

/// Burns `MANG`/`CONF` unless the chip shows any sign of a previous burn.
///
/// A nonzero `ZMCO` means the position was already burned, which the
/// datasheet forbids before a settings burn. A settings burn itself leaves no
/// readable trace, so the driver also honours
/// [`As5600::mark_setting_burned`] and its own record of earlier calls.
pub fn burn_setting<IFACE, CommE>(device: &mut As5600<IFACE>) -> Result<(), CommE>
where
    IFACE: As5600Interface<Error = CommE>,
{
    let zmco = device.read_field(ZMCO)? as u8;
    if zmco != 0 || device.setting_burned() {
        warning!("settings burn refused, ZMCO = {=u8}", zmco);
        return Err(Error::BurnAlreadyDone { zmco });
    }

    debug!("burning settings");
    let result = device.write_command(BurnCommand::Setting as u8);
    if result.is_ok() {
        device.mark_setting_burned();
    }

    let cache = device.cache_mut();
    cache.invalidate(REG_MANG);
    cache.invalidate(REG_CONF);
    result
}

/// Writes the OTP reload sequence and forgets every cached register.
pub fn load_otp<IFACE, CommE>(device: &mut As5600<IFACE>) -> Result<(), CommE>
where
    IFACE: As5600Interface<Error = CommE>,
{
    let result = OTP_LOAD_SEQUENCE
        .iter()
        .try_for_each(|&command| device.write_command(command));
    device.cache_mut().clear();
    result
}
