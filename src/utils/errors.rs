use thiserror::Error;

/// Errors that can occur in utility functions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    #[error("Number literal cannot be empty")]
    EmptyLiteral,
    #[error("Invalid number literal: {0}")]
    InvalidLiteral(String),
    #[error("Invalid range: start={start}, end={end}, length={length}")]
    InvalidRange {
        start: usize,
        end: usize,
        length: usize,
    },
    #[error("Feedback length mismatch: expected {expected}, got {actual}")]
    FeedbackLengthMismatch { expected: usize, actual: usize },
    #[error("Feedback must contain only 'g', 'y' or 'r': {0}")]
    InvalidFeedback(String),
    #[error("Equation length must be at least {min}, got {length}")]
    LengthTooShort { length: usize, min: usize },
    #[error("Invalid operator: '{0}'")]
    InvalidOperator(char),
    #[error("Operator set must include '{0}'")]
    MissingRequiredOperator(char),
}
