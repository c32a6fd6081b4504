pub mod constants;
pub mod core;
pub mod state;
pub mod types;

pub use core::LhsSearch;
pub use state::{SearchState, is_sequence_valid};
pub use types::{SearchLimits, SearchOutcome, SearchStats, Step};
