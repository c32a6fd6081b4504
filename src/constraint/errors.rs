use thiserror::Error;

use crate::constraint::symbol::Symbol;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstraintError {
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Invalid feedback color '{found}' at position {position}")]
    InvalidColor { position: usize, found: char },
    #[error("Unknown symbol '{found}' at position {position}")]
    UnknownSymbol { position: usize, found: char },
    #[error("Data error: missing '{0}' constraint")]
    MissingSymbol(Symbol),
}
