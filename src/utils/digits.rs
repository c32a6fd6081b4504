use log::{debug, trace};

use crate::utils::errors::UtilsError;

/// Parses `text[start..end]` as a decimal number literal.
///
/// # Errors
///
/// Returns an error if the provided indices are out of bounds or invalid,
/// if the slice contains anything but ASCII digits, or if it is a
/// multi-digit literal starting with `0`.
pub fn parse_literal(text: &str, start: usize, end: usize) -> Result<f64, UtilsError> {
    trace!("Parsing literal text[{}..{}] from '{}'", start, end, text);

    if start >= text.len() || end > text.len() || start >= end {
        debug!(
            "Invalid range: start={}, end={}, length={}",
            start,
            end,
            text.len()
        );
        return Err(UtilsError::InvalidRange {
            start,
            end,
            length: text.len(),
        });
    }

    let slice = text.get(start..end).ok_or(UtilsError::InvalidRange {
        start,
        end,
        length: text.len(),
    })?;

    if !slice.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UtilsError::InvalidLiteral(slice.to_string()));
    }

    if slice.len() > 1 && slice.starts_with('0') {
        debug!("Rejecting number with leading zero: '{}'", slice);
        return Err(UtilsError::InvalidLiteral(slice.to_string()));
    }

    slice
        .parse::<f64>()
        .map_err(|_| UtilsError::InvalidLiteral(slice.to_string()))
}

/// Whether `literal` may stand as an operand of a generated left-hand side:
/// digits only, and never starting with `0` (which also rules out a bare `0`).
pub fn is_operand_literal(literal: &str) -> bool {
    match literal.as_bytes().first() {
        None | Some(b'0') => false,
        Some(_) => literal.bytes().all(|b| b.is_ascii_digit()),
    }
}
