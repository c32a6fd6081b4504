//! Equordle - A solver for Wordle-style arithmetic equation puzzles
//!
//! Given the length of the hidden equation, the operators it may use and the
//! green/yellow/red feedback on earlier guesses, this library lists every
//! equation that is still possible.

pub mod constraint;
pub mod expression;
pub mod search;
pub mod session;
pub mod solver;
pub mod utils;

// Re-export the main public API
pub use constraint::{
    Color, ConstraintError, ConstraintMap, Feedback, GuessRecord, Symbol, SymbolConstraint,
    compute_feedback, matches_feedback,
};
pub use expression::{
    ExpressionError, ExpressionValidator, Operator, OperatorSet, evaluate, safe_evaluate,
};
pub use search::SearchLimits;
pub use session::{RoundSession, SessionError};
pub use solver::{CandidateGenerator, GenerationReport, SolverError, filter_expressions};
pub use utils::UtilsError;

/// List every equation of `length` characters consistent with `history`.
///
/// This is a convenience function that derives the constraints from scratch
/// and runs a search with the default node budget.
///
/// # Errors
///
/// This function will return an error if:
/// * A guess does not have `length` characters or holds an unknown symbol
/// * The operator set is empty
///
/// # Examples
///
/// ```
/// use equordle::{GuessRecord, OperatorSet, Operator, solve};
///
/// let operators: OperatorSet = [Operator::Add].into_iter().collect();
/// let history = [GuessRecord::parse("1+2=3", "ggggg").unwrap()];
/// let candidates = solve(5, &operators, &history).unwrap();
/// assert_eq!(candidates, vec!["1+2=3".to_string()]);
/// ```
pub fn solve(
    length: usize,
    operators: &OperatorSet,
    history: &[GuessRecord],
) -> Result<Vec<String>, SolverError> {
    let map = ConstraintMap::derive(history, length, operators)?;
    let report = CandidateGenerator::new().generate(length, operators, history, &map)?;
    Ok(report.candidates)
}
