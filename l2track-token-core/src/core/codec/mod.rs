//! Canonical hex wire encodings
//!
//! Two textual forms are used on the wire: `data` (a byte string, two
//! hex digits per byte) and `quantity` (a non-negative integer with no
//! leading zero digits). Validation is strict so that every value has
//! exactly one accepted textual representation. Callers that compare or
//! hash the strings instead of the decoded values depend on this.

use ethers::types::{I256, U256};

use crate::shared::error::{FormatError, RangeError};

const PREFIX: &str = "0x";

/// Decodes a `data` string into bytes.
///
/// When `expected_len` is given the input must encode exactly that many
/// bytes.
pub fn decode_data(text: &str, expected_len: Option<usize>) -> Result<Vec<u8>, FormatError> {
    let digits = text.strip_prefix(PREFIX).ok_or(FormatError::MissingPrefix)?;
    if digits.len() % 2 != 0 {
        return Err(FormatError::OddDigitCount);
    }
    if let Some(expected) = expected_len {
        if digits.len() != expected * 2 {
            return Err(FormatError::LengthMismatch {
                expected,
                actual: digits.len() / 2,
            });
        }
    }
    hex::decode(digits).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, .. } => FormatError::InvalidDigit(c),
        _ => FormatError::OddDigitCount,
    })
}

/// Encodes bytes as a `data` string. Total; every byte sequence has a
/// canonical form.
pub fn encode_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decodes a `quantity` string into an unsigned 256-bit integer.
pub fn decode_quantity(text: &str) -> Result<U256, FormatError> {
    let digits = text.strip_prefix(PREFIX).ok_or(FormatError::MissingPrefix)?;
    if digits.is_empty() {
        return Err(FormatError::MissingDigits);
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(FormatError::LeadingZeroes);
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidDigit(bad));
    }
    if digits.len() > 64 {
        return Err(FormatError::Overflow);
    }

    // hex::decode needs an even digit count; quantities are minimal and
    // may well have an odd one
    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_owned()
    };
    let bytes = hex::decode(&padded).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, .. } => FormatError::InvalidDigit(c),
        _ => FormatError::OddDigitCount,
    })?;
    Ok(U256::from_big_endian(&bytes))
}

/// Encodes an integer as a `quantity` string: minimal hex digits, `0x0`
/// for zero, never padded. Negative values are rejected.
pub fn encode_quantity(value: I256) -> Result<String, RangeError> {
    if value.is_negative() {
        return Err(RangeError::NegativeQuantity);
    }
    Ok(format!("0x{:x}", value.into_raw()))
}
