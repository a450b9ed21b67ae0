//! Bit-field descriptors over the AS5600 register file.
//!
//! A [`Field`] names one contiguous run of bits inside one register. All
//! register values are handled as `u16` regardless of the register width; the
//! width only matters when framing bytes on the bus.

use crate::registers::{register_width, RegisterAccess, RegisterWidth};

/// Reasons a descriptor rejects a value without touching the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldError {
    /// The field cannot be written.
    ReadOnly,
    /// The value needs more bits than the field provides.
    InvalidValue,
}

/// Immutable description of a bit-field within a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    register: u8,
    width: RegisterWidth,
    offset: u8,
    bits: u8,
    access: RegisterAccess,
}

impl Field {
    /// Defines a field of `bits` bits starting `offset` bits above the LSB of
    /// `register`.
    ///
    /// The register width is looked up from the address. Panics (at compile
    /// time when used in a `const`) if the field does not fit the register.
    pub const fn new(
        name: &'static str,
        register: u8,
        offset: u8,
        bits: u8,
        access: RegisterAccess,
    ) -> Self {
        let width = register_width(register);
        assert!(bits > 0, "field must be at least one bit wide");
        assert!(
            offset as u16 + bits as u16 <= width.bits() as u16,
            "field does not fit its register"
        );

        Self {
            name,
            register,
            width,
            offset,
            bits,
            access,
        }
    }

    /// Datasheet mnemonic of the field.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Address of the containing register.
    pub const fn register(&self) -> u8 {
        self.register
    }

    /// Width of the containing register.
    pub const fn width(&self) -> RegisterWidth {
        self.width
    }

    /// Position of the field's least significant bit.
    pub const fn offset(&self) -> u8 {
        self.offset
    }

    /// Number of bits in the field.
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Access permission of the field.
    pub const fn access(&self) -> RegisterAccess {
        self.access
    }

    /// Right-aligned mask covering the field's bits.
    pub const fn mask(&self) -> u16 {
        ((1u32 << self.bits) - 1) as u16
    }

    /// Extracts the field from a raw register value.
    pub const fn decode(&self, raw: u16) -> u16 {
        (raw >> self.offset) & self.mask()
    }

    /// Checks that `value` may be written into this field.
    pub const fn validate(&self, value: u16) -> Result<(), FieldError> {
        if matches!(self.access, RegisterAccess::ReadOnly) {
            return Err(FieldError::ReadOnly);
        }

        if value > self.mask() {
            return Err(FieldError::InvalidValue);
        }

        Ok(())
    }

    /// Inserts `value` into `raw`, leaving every other bit untouched.
    pub const fn encode(&self, raw: u16, value: u16) -> Result<u16, FieldError> {
        if let Err(err) = self.validate(value) {
            return Err(err);
        }

        let hole = !(self.mask() << self.offset);
        Ok((raw & hole) | ((value & self.mask()) << self.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{FIELDS, FTH, MD, PM, RAW_ANGLE, WD, ZMCO, ZPOS};

    #[test]
    fn decode_extracts_shifted_bits() {
        assert_eq!(FTH.decode(0b01_1100_0000_0000), 0b111);
        assert_eq!(WD.decode(0x2000), 1);
        assert_eq!(MD.decode(0b0010_0000), 1);
        assert_eq!(ZPOS.decode(0xFFFF), 0x0FFF);
    }

    #[test]
    fn decode_never_exceeds_mask() {
        for field in FIELDS {
            for raw in [0x0000, 0x5555, 0xAAAA, 0xFFFF] {
                assert!(field.decode(raw) <= field.mask(), "{}", field.name());
            }
        }
    }

    #[test]
    fn encode_of_decoded_value_is_identity() {
        for field in FIELDS.iter().filter(|f| f.access() != RegisterAccess::ReadOnly) {
            let max = if field.width() == RegisterWidth::One { 0xFF } else { 0xFFFF };
            for raw in [0x0000, 0x1234, 0x3FFF, 0xA5A5 & max, max] {
                assert_eq!(field.encode(raw, field.decode(raw)), Ok(raw), "{}", field.name());
            }
        }
    }

    #[test]
    fn encode_preserves_neighbouring_bits() {
        let raw = 0b11_1111_1111_1111;
        let updated = PM.encode(raw, 0b01).unwrap();
        assert_eq!(updated, 0b11_1111_1111_1101);
        assert_eq!(FTH.decode(updated), FTH.decode(raw));
    }

    #[test]
    fn encode_rejects_values_wider_than_field() {
        assert_eq!(ZPOS.encode(0, 4095), Ok(4095));
        assert_eq!(ZPOS.encode(0, 4096), Err(FieldError::InvalidValue));
        assert_eq!(WD.encode(0, 2), Err(FieldError::InvalidValue));
    }

    #[test]
    fn encode_rejects_read_only_fields() {
        assert_eq!(RAW_ANGLE.encode(0, 1), Err(FieldError::ReadOnly));
        assert_eq!(ZMCO.validate(0), Err(FieldError::ReadOnly));
    }

    #[test]
    fn width_follows_register() {
        assert_eq!(PM.width(), RegisterWidth::Two);
        assert_eq!(ZMCO.width(), RegisterWidth::One);
        assert_eq!(ZPOS.mask(), 0x0FFF);
    }
}
