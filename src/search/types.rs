use crate::expression::Token;

use super::constants::DEFAULT_MAX_NODES;

/// Bounds on a single search pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop after visiting this many nodes. `None` searches exhaustively.
    pub max_nodes: Option<u64>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self { max_nodes: None }
    }

    pub fn with_max_nodes(max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::with_max_nodes(DEFAULT_MAX_NODES)
    }
}

/// Counters reported by a search pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub emitted: u64,
    /// The node budget ran out before the space was exhausted.
    pub truncated: bool,
}

/// Collected left-hand sides of one pass.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub sequences: Vec<Vec<Token>>,
    pub stats: SearchStats,
}

/// How the last character was placed, so it can be taken back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Appended to the trailing number.
    Merged,
    /// Started a new token.
    Appended,
}
