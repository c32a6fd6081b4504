use thiserror::Error;

use crate::constraint::ConstraintError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Constraint error: {0}")]
    ConstraintError(#[from] ConstraintError),
    #[error("Operator set is empty")]
    NoOperators,
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
