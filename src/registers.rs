//! Register map definitions for the AS5600 magnetic rotary position sensor.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::field::Field;
use crate::params::{FastFilterThreshold, Hysteresis, PowerMode, PwmFrequency, SlowFilter, Watchdog};

/// Register address of `ZMCO`.
pub const REG_ZMCO: u8 = 0x00;
/// Register address of `ZPOS` (high byte, low byte at `0x02`).
pub const REG_ZPOS: u8 = 0x01;
/// Register address of `MPOS` (high byte, low byte at `0x04`).
pub const REG_MPOS: u8 = 0x03;
/// Register address of `MANG` (high byte, low byte at `0x06`).
pub const REG_MANG: u8 = 0x05;
/// Register address of `CONF` (high byte, low byte at `0x08`).
pub const REG_CONF: u8 = 0x07;
/// Register address of `STATUS`.
pub const REG_STATUS: u8 = 0x0B;
/// Register address of `RAW ANGLE` (high byte, low byte at `0x0D`).
pub const REG_RAW_ANGLE: u8 = 0x0C;
/// Register address of `ANGLE` (high byte, low byte at `0x0F`).
pub const REG_ANGLE: u8 = 0x0E;
/// Register address of `AGC`.
pub const REG_AGC: u8 = 0x1A;
/// Register address of `MAGNITUDE` (high byte, low byte at `0x1C`).
pub const REG_MAGNITUDE: u8 = 0x1B;
/// Register address of `BURN`.
pub const REG_BURN: u8 = 0xFF;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Write-only register.
    WriteOnly,
    /// Read/write register.
    ReadWrite,
}

/// Number of bytes a register occupies on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterWidth {
    /// Single byte register.
    One,
    /// Two byte register, most significant byte first.
    Two,
}

impl RegisterWidth {
    /// Returns the width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Returns the width in bits.
    pub const fn bits(self) -> u8 {
        match self {
            Self::One => 8,
            Self::Two => 16,
        }
    }

    /// Parses a big-endian register value from the first `bytes()` bytes of `buf`.
    pub fn from_be_slice(self, buf: &[u8]) -> u16 {
        match self {
            Self::One => u16::from(buf[0]),
            Self::Two => u16::from_be_bytes([buf[0], buf[1]]),
        }
    }

    /// Serializes `raw` big-endian, returning a buffer and the number of bytes used.
    pub fn to_be_bytes(self, raw: u16) -> ([u8; 2], usize) {
        match self {
            Self::One => ([raw as u8, 0], 1),
            Self::Two => (raw.to_be_bytes(), 2),
        }
    }
}

/// Returns the bus width of the register at `address`.
pub const fn register_width(address: u8) -> RegisterWidth {
    match address {
        REG_ZMCO | REG_STATUS | REG_AGC | REG_BURN => RegisterWidth::One,
        _ => RegisterWidth::Two,
    }
}

/// `ZMCO[1:0]`: number of zero/max position burns performed.
pub const ZMCO: Field = Field::new("ZMCO", REG_ZMCO, 0, 2, RegisterAccess::ReadOnly);
/// `ZPOS[11:0]`: zero (start) position.
pub const ZPOS: Field = Field::new("ZPOS", REG_ZPOS, 0, 12, RegisterAccess::ReadWrite);
/// `MPOS[11:0]`: maximum (stop) position.
pub const MPOS: Field = Field::new("MPOS", REG_MPOS, 0, 12, RegisterAccess::ReadWrite);
/// `MANG[11:0]`: maximum angular range.
pub const MANG: Field = Field::new("MANG", REG_MANG, 0, 12, RegisterAccess::ReadWrite);
/// `CONF.PM`: power mode.
pub const PM: Field = Field::new("PM", REG_CONF, 0, 2, RegisterAccess::ReadWrite);
/// `CONF.HYST`: output hysteresis.
pub const HYST: Field = Field::new("HYST", REG_CONF, 2, 2, RegisterAccess::ReadWrite);
/// `CONF.OUTS`: output stage.
pub const OUTS: Field = Field::new("OUTS", REG_CONF, 4, 2, RegisterAccess::ReadWrite);
/// `CONF.PWMF`: PWM frequency.
pub const PWMF: Field = Field::new("PWMF", REG_CONF, 6, 2, RegisterAccess::ReadWrite);
/// `CONF.SF`: slow filter.
pub const SF: Field = Field::new("SF", REG_CONF, 8, 2, RegisterAccess::ReadWrite);
/// `CONF.FTH`: fast filter threshold.
pub const FTH: Field = Field::new("FTH", REG_CONF, 10, 3, RegisterAccess::ReadWrite);
/// `CONF.WD`: watchdog.
pub const WD: Field = Field::new("WD", REG_CONF, 13, 1, RegisterAccess::ReadWrite);
/// `RAW ANGLE[11:0]`: unscaled, unfiltered angle.
pub const RAW_ANGLE: Field = Field::new("RAW_ANGLE", REG_RAW_ANGLE, 0, 12, RegisterAccess::ReadOnly);
/// `ANGLE[11:0]`: scaled, filtered angle.
pub const ANGLE: Field = Field::new("ANGLE", REG_ANGLE, 0, 12, RegisterAccess::ReadOnly);
/// `STATUS.MH`: magnet too strong.
pub const MH: Field = Field::new("MH", REG_STATUS, 3, 1, RegisterAccess::ReadOnly);
/// `STATUS.ML`: magnet too weak.
pub const ML: Field = Field::new("ML", REG_STATUS, 4, 1, RegisterAccess::ReadOnly);
/// `STATUS.MD`: magnet detected.
pub const MD: Field = Field::new("MD", REG_STATUS, 5, 1, RegisterAccess::ReadOnly);
/// `AGC[7:0]`: automatic gain control.
pub const AGC: Field = Field::new("AGC", REG_AGC, 0, 8, RegisterAccess::ReadOnly);
/// `MAGNITUDE[11:0]`: CORDIC magnitude.
pub const MAGNITUDE: Field = Field::new("MAGNITUDE", REG_MAGNITUDE, 0, 12, RegisterAccess::ReadOnly);
/// `BURN[7:0]`: OTP burn command register.
pub const BURN: Field = Field::new("BURN", REG_BURN, 0, 8, RegisterAccess::WriteOnly);

/// Every field of the register map.
pub const FIELDS: [Field; 19] = [
    ZMCO, ZPOS, MPOS, MANG, PM, HYST, OUTS, PWMF, SF, FTH, WD, RAW_ANGLE, ANGLE, MH, ML, MD, AGC,
    MAGNITUDE, BURN,
];

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `STATUS` register (address `0x0B`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    #[skip]
    __: B3,
    // AGC minimum gain overflow, magnet too strong (bit 3).
    pub magnet_too_strong: bool,
    // AGC maximum gain overflow, magnet too weak (bit 4).
    pub magnet_too_weak: bool,
    // Magnet was detected (bit 5).
    pub magnet_detected: bool,
    #[skip]
    __: B2,
}

impl Status {
    /// True when a magnet is detected and neither too weak nor too strong.
    pub fn is_reliable(&self) -> bool {
        self.magnet_detected() && !self.magnet_too_weak() && !self.magnet_too_strong()
    }
}

impl From<u8> for Status {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Status> for u8 {
    fn from(value: Status) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CONF` register (address `0x07`).
///
/// `OUTS` is kept as raw bits because `0b11` is reserved; use
/// [`OutputStage`](crate::params::OutputStage) to interpret it.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conf {
    // Power mode (bits 1:0).
    pub power_mode: PowerMode,
    // Hysteresis (bits 3:2).
    pub hysteresis: Hysteresis,
    // Output stage (bits 5:4).
    pub output_stage: B2,
    // PWM frequency (bits 7:6).
    pub pwm_frequency: PwmFrequency,
    // Slow filter (bits 9:8).
    pub slow_filter: SlowFilter,
    // Fast filter threshold (bits 12:10).
    pub fast_filter_threshold: FastFilterThreshold,
    // Watchdog (bit 13).
    pub watchdog: Watchdog,
    #[skip]
    __: B2,
}

impl From<u16> for Conf {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<Conf> for u16 {
    fn from(value: Conf) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

impl Register for Status {
    type Raw = u8;
    const ADDRESS: u8 = REG_STATUS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for Conf {
    type Raw = u16;
    const ADDRESS: u8 = REG_CONF;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x0000);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates that Status bitfields match the datasheet layout.
    #[test]
    fn status_layout_matches_datasheet() {
        let status = Status::from(0b0010_0000);
        assert!(status.magnet_detected());
        assert!(!status.magnet_too_weak());
        assert!(!status.magnet_too_strong());

        let status = Status::from(0b0001_1000);
        assert!(!status.magnet_detected());
        assert!(status.magnet_too_weak());
        assert!(status.magnet_too_strong());
    }

    /// The CONF bitfield and the CONF field descriptors must describe the same bits.
    #[test]
    fn conf_bitfield_matches_descriptors() {
        let conf = Conf::new()
            .with_power_mode(PowerMode::Lpm2)
            .with_hysteresis(Hysteresis::Lsb1)
            .with_output_stage(0b10)
            .with_pwm_frequency(PwmFrequency::Hz920)
            .with_slow_filter(SlowFilter::X8)
            .with_fast_filter_threshold(FastFilterThreshold::Lsb24)
            .with_watchdog(Watchdog::Enabled);
        let raw = u16::from(conf);

        assert_eq!(PM.decode(raw), 0b10);
        assert_eq!(HYST.decode(raw), 0b01);
        assert_eq!(OUTS.decode(raw), 0b10);
        assert_eq!(PWMF.decode(raw), 0b11);
        assert_eq!(SF.decode(raw), 0b01);
        assert_eq!(FTH.decode(raw), 0b110);
        assert_eq!(WD.decode(raw), 1);
        assert_eq!(raw & 0xC000, 0);
    }

    #[test]
    fn conf_roundtrip_keeps_unused_top_bits() {
        let raw = 0xC000 | 0x0123;
        assert_eq!(u16::from(Conf::from(raw)), raw);
    }

    #[test]
    fn fields_sharing_a_register_do_not_overlap() {
        for (i, a) in FIELDS.iter().enumerate() {
            for b in &FIELDS[i + 1..] {
                if a.register() != b.register() {
                    continue;
                }
                assert_eq!(a.width(), b.width());
                let overlap = (a.mask() << a.offset()) & (b.mask() << b.offset());
                assert_eq!(overlap, 0, "{} overlaps {}", a.name(), b.name());
            }
        }
    }

    #[test]
    fn register_widths_match_datasheet() {
        assert_eq!(register_width(REG_ZMCO), RegisterWidth::One);
        assert_eq!(register_width(REG_STATUS), RegisterWidth::One);
        assert_eq!(register_width(REG_AGC), RegisterWidth::One);
        assert_eq!(register_width(REG_BURN), RegisterWidth::One);
        assert_eq!(register_width(REG_CONF), RegisterWidth::Two);
        assert_eq!(register_width(REG_MAGNITUDE), RegisterWidth::Two);
    }

    #[test]
    fn two_byte_registers_are_big_endian() {
        assert_eq!(RegisterWidth::Two.from_be_slice(&[0x0F, 0xFF]), 0x0FFF);
        assert_eq!(RegisterWidth::Two.to_be_bytes(0x0800), ([0x08, 0x00], 2));
        assert_eq!(RegisterWidth::One.to_be_bytes(0x0080), ([0x80, 0x00], 1));
    }
}
