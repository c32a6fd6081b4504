//! Per-symbol constraints derived from guess feedback.

mod derive;
mod errors;
mod feedback;
mod map;
mod model;
mod symbol;

pub use errors::ConstraintError;
pub use feedback::{Color, Feedback, GuessRecord, compute_feedback, matches_feedback};
pub use map::ConstraintMap;
pub use model::SymbolConstraint;
pub use symbol::Symbol;

#[cfg(test)]
mod tests;
