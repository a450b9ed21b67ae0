//! Strongly typed parameter enumerations for the AS5600 driver.
//!
//! These enums map directly to the datasheet encodings of the `CONF` register
//! sub-fields and are used across [`Config`](crate::config::Config) and the
//! high-level driver APIs. Prefer these types over raw integers to keep
//! configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use as5600::params::{Hysteresis, PowerMode, SlowFilter};
//!
//! let mode = PowerMode::Lpm1;
//! let hyst = Hysteresis::Lsb2;
//! let filter = SlowFilter::X4;
//! assert_eq!(mode.polling_time_ms(), Some(5));
//! let _ = (hyst, filter);
//! ```

use modular_bitfield::prelude::Specifier;

/// Power mode selection (`CONF.PM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum PowerMode {
    /// Always on, continuous sampling.
    Nom = 0b00,
    /// Low power mode 1, 5 ms polling.
    Lpm1 = 0b01,
    /// Low power mode 2, 20 ms polling.
    Lpm2 = 0b10,
    /// Low power mode 3, 100 ms polling.
    Lpm3 = 0b11,
}

impl PowerMode {
    /// Returns the sensor polling period, `None` for continuous sampling.
    pub const fn polling_time_ms(self) -> Option<u32> {
        match self {
            Self::Nom => None,
            Self::Lpm1 => Some(5),
            Self::Lpm2 => Some(20),
            Self::Lpm3 => Some(100),
        }
    }
}

/// Output hysteresis in LSBs (`CONF.HYST`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Hysteresis {
    /// Hysteresis disabled.
    Off = 0b00,
    /// One LSB of hysteresis.
    Lsb1 = 0b01,
    /// Two LSBs of hysteresis.
    Lsb2 = 0b10,
    /// Three LSBs of hysteresis.
    Lsb3 = 0b11,
}

/// Output stage selection (`CONF.OUTS`).
///
/// The encoding `0b11` is reserved, so this type is not a bitfield specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OutputStage {
    /// Analog output, 0% to 100% of VDD.
    AnalogFullRange = 0b00,
    /// Analog output, 10% to 90% of VDD.
    AnalogReducedRange = 0b01,
    /// Digital PWM output.
    DigitalPwm = 0b10,
}

impl OutputStage {
    /// Returns the two-bit register encoding.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decodes the two-bit register encoding, `None` for the reserved pattern.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(Self::AnalogFullRange),
            0b01 => Some(Self::AnalogReducedRange),
            0b10 => Some(Self::DigitalPwm),
            _ => None,
        }
    }
}

/// PWM output frequency (`CONF.PWMF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum PwmFrequency {
    /// 115 Hz.
    Hz115 = 0b00,
    /// 230 Hz.
    Hz230 = 0b01,
    /// 460 Hz.
    Hz460 = 0b10,
    /// 920 Hz.
    Hz920 = 0b11,
}

impl PwmFrequency {
    /// Returns the PWM frequency in hertz.
    pub const fn hz(self) -> u32 {
        match self {
            Self::Hz115 => 115,
            Self::Hz230 => 230,
            Self::Hz460 => 460,
            Self::Hz920 => 920,
        }
    }
}

/// Slow filter step response (`CONF.SF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum SlowFilter {
    /// 16x, lowest noise.
    X16 = 0b00,
    /// 8x.
    X8 = 0b01,
    /// 4x.
    X4 = 0b10,
    /// 2x, fastest settling.
    X2 = 0b11,
}

/// Fast filter threshold (`CONF.FTH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum FastFilterThreshold {
    /// Slow filter only.
    SlowOnly = 0b000,
    /// 6 LSBs.
    Lsb6 = 0b001,
    /// 7 LSBs.
    Lsb7 = 0b010,
    /// 9 LSBs.
    Lsb9 = 0b011,
    /// 18 LSBs.
    Lsb18 = 0b100,
    /// 21 LSBs.
    Lsb21 = 0b101,
    /// 24 LSBs.
    Lsb24 = 0b110,
    /// 10 LSBs.
    Lsb10 = 0b111,
}

/// Watchdog enable (`CONF.WD`).
///
/// When enabled the sensor drops into LPM3 after a minute without a position
/// change larger than 4 LSBs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Watchdog {
    /// Watchdog off.
    Disabled = 0,
    /// Watchdog on.
    Enabled = 1,
}
