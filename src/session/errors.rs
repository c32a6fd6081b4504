use thiserror::Error;

use crate::constraint::ConstraintError;
use crate::solver::SolverError;
use crate::utils::UtilsError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Input error: {0}")]
    UtilsError(#[from] UtilsError),
    #[error("Not a valid equation of the round's length: '{0}'")]
    InvalidEquation(String),
    #[error("Constraint error: {0}")]
    ConstraintError(#[from] ConstraintError),
    #[error("Solver error: {0}")]
    SolverError(#[from] SolverError),
}
