// Numeric guards for the evaluator
pub const EPSILON: f64 = 1e-9;
pub const MAX_POW_BASE: f64 = 1e6;
pub const MAX_EXPONENT: f64 = 10.0;
/// 2^53: beyond this an `f64` no longer represents every integer.
pub const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;
