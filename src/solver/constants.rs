// Configuration constants for the solver module
pub const LARGE_LOG_THRESHOLD: f64 = 1e18;
pub const LOG_EPSILON: f64 = 1e-12;
/// Shortest left-hand side: `a op b`.
pub const MIN_LHS_LEN: usize = 3;
pub const MIN_RHS_LEN: usize = 1;
/// Fewest numeric blocks on a left-hand side.
pub const MIN_BLOCKS: usize = 2;
