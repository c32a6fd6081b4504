pub mod constants;
mod core;
mod errors;
mod feasibility;
mod filter;

pub use core::{CandidateGenerator, GenerationReport};
pub use errors::SolverError;
pub use feasibility::FeasibilityEstimator;
pub use filter::{CandidateFilter, EqualsPlacement, filter_expressions};
