//! Error handling for the token core
//!
//! Decoding returns [`FormatError`] (the text is not a canonical wire
//! encoding), encoding returns [`RangeError`] (the value itself is not
//! representable). Both are always surfaced; nothing is coerced.

use thiserror::Error;

/// A textual value is not a canonical wire encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("hex string must start with 0x")]
    MissingPrefix,

    #[error("data must encode each byte as two hex digits")]
    OddDigitCount,

    #[error("data length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid hex digit: {0:?}")]
    InvalidDigit(char),

    #[error("quantity must contain at least one hex digit")]
    MissingDigits,

    #[error("quantity cannot have leading zeroes")]
    LeadingZeroes,

    #[error("quantity does not fit in 256 bits")]
    Overflow,
}

/// A value is semantically outside the encodable range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("quantity cannot be a negative integer")]
    NegativeQuantity,
}
