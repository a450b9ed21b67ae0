//! Error handling primitives for the AS5600 driver.

use crate::field::FieldError;

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The target field is read-only.
    ReadOnlyField,
    /// The value does not fit in the bit width of the target field.
    InvalidFieldValue,
    /// The `BURN` command register can only be driven by the burn operations.
    RegisterLocked,
    /// `ZMCO` reports that all three zero/max position burns are used up.
    BurnLimitExceeded {
        /// Burn counter read back from `ZMCO`.
        zmco: u8,
    },
    /// The angle/config settings burn has already been performed.
    BurnAlreadyDone {
        /// Burn counter read back from `ZMCO`.
        zmco: u8,
    },
    /// A position burn requires a detected magnet (`STATUS.MD`).
    MagnetNotDetected,
    /// A register holds a bit pattern the datasheet marks as reserved.
    ReservedValue,
}

impl<E> From<FieldError> for Error<E> {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::ReadOnly => Self::ReadOnlyField,
            FieldError::InvalidValue => Self::InvalidFieldValue,
        }
    }
}
