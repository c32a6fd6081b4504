// Configuration constants for the search module
pub const DEFAULT_MAX_NODES: u64 = 20_000_000;
pub const MIN_LHS_TOKENS: usize = 3;
