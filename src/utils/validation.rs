use log::{debug, warn};

use crate::expression::{Operator, OperatorSet};
use crate::utils::errors::UtilsError;

/// Shortest equation the game accepts.
pub const MIN_EQUATION_LENGTH: usize = 5;

/// Operator every round must allow.
pub const REQUIRED_OPERATOR: Operator = Operator::Add;

/// Strips every whitespace character from a raw input line.
pub fn normalize_line(line: &str) -> String {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Normalises a feedback line and checks it against the equation length.
///
/// # Errors
///
/// Returns an error if the normalised line has the wrong length or contains
/// anything other than `g`, `y` and `r` (case-insensitive).
pub fn validate_feedback(feedback: &str, length: usize) -> Result<String, UtilsError> {
    let normalized = normalize_line(feedback).to_ascii_lowercase();
    debug!("Validating feedback: '{}'", normalized);

    if normalized.chars().count() != length {
        warn!(
            "Feedback '{}' has length {}, expected {}",
            normalized,
            normalized.chars().count(),
            length
        );
        return Err(UtilsError::FeedbackLengthMismatch {
            expected: length,
            actual: normalized.chars().count(),
        });
    }

    if !normalized.chars().all(|c| matches!(c, 'g' | 'y' | 'r')) {
        warn!("Feedback contains invalid colors: '{}'", normalized);
        return Err(UtilsError::InvalidFeedback(normalized));
    }

    Ok(normalized)
}

/// Parses an operator specification such as `"+-*/"` or `"+ - *"`.
///
/// # Errors
///
/// Returns an error on any character that is not an operator, or when the
/// mandatory `+` is missing.
pub fn parse_operator_spec(spec: &str) -> Result<OperatorSet, UtilsError> {
    let mut operators = OperatorSet::new();
    for c in normalize_line(spec).chars() {
        match Operator::from_char(c) {
            Some(op) => operators.insert(op),
            None => {
                warn!("Invalid operator '{}' in spec '{}'", c, spec);
                return Err(UtilsError::InvalidOperator(c));
            }
        }
    }

    if !operators.contains(REQUIRED_OPERATOR) {
        return Err(UtilsError::MissingRequiredOperator(
            REQUIRED_OPERATOR.symbol(),
        ));
    }

    debug!("Parsed operator set: {}", operators);
    Ok(operators)
}

/// # Errors
///
/// Returns an error if the length is below [`MIN_EQUATION_LENGTH`] or the
/// operator set lacks [`REQUIRED_OPERATOR`].
pub fn validate_round_spec(length: usize, operators: &OperatorSet) -> Result<(), UtilsError> {
    if length < MIN_EQUATION_LENGTH {
        return Err(UtilsError::LengthTooShort {
            length,
            min: MIN_EQUATION_LENGTH,
        });
    }

    if !operators.contains(REQUIRED_OPERATOR) {
        return Err(UtilsError::MissingRequiredOperator(
            REQUIRED_OPERATOR.symbol(),
        ));
    }

    Ok(())
}
