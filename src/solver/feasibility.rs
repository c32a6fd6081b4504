use log::trace;

use crate::expression::constants::{MAX_EXPONENT, MAX_POW_BASE};
use crate::expression::{Operator, OperatorSet};
use crate::utils::compositions;

use super::constants::{LARGE_LOG_THRESHOLD, LOG_EPSILON, MIN_BLOCKS, MIN_LHS_LEN};

/// Cheap upper bound on how many digits a left-hand side of a given length
/// can evaluate to. Used to skip `=` positions before searching them.
///
/// The bound may accept a length no expression reaches, but it never
/// rejects one that some expression does reach.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeasibilityEstimator;

impl FeasibilityEstimator {
    pub fn is_feasible(lhs_len: usize, rhs_len: usize, operators: &OperatorSet) -> bool {
        if lhs_len < MIN_LHS_LEN || rhs_len == 0 || operators.is_empty() {
            return false;
        }

        let best_log = Self::max_log10(lhs_len, operators);
        if best_log > LARGE_LOG_THRESHOLD {
            return true;
        }
        if !best_log.is_finite() {
            return false;
        }

        let max_digits = (best_log + LOG_EPSILON).floor() as usize + 1;
        trace!(
            "Feasibility: lhs {} with {} allows up to {} digits (rhs {})",
            lhs_len, operators, max_digits, rhs_len
        );
        max_digits >= rhs_len
    }

    /// Largest `log10` bound over every block count and every way of
    /// splitting the digits between the blocks.
    pub fn max_log10(lhs_len: usize, operators: &OperatorSet) -> f64 {
        let max_blocks = lhs_len.div_ceil(2);
        let mut best = f64::NEG_INFINITY;

        for blocks in MIN_BLOCKS..=max_blocks {
            let digits = lhs_len - (blocks - 1);
            for lengths in compositions(digits, blocks) {
                best = best.max(composition_bound(&lengths, operators));
            }
        }
        best
    }
}

/// `log10(10^len - 1)`, the log of the largest `len`-digit number.
fn all_nines_log10(len: usize) -> f64 {
    if len == 0 {
        return f64::NEG_INFINITY;
    }
    let len_f = len as f64;
    len_f + (1.0 - 10f64.powf(-len_f)).log10()
}

fn composition_bound(lengths: &[usize], operators: &OperatorSet) -> f64 {
    let blocks = lengths.len();
    let logs: Vec<f64> = lengths.iter().map(|&len| all_nines_log10(len)).collect();
    let max_len = lengths.iter().copied().max().unwrap_or(0);
    let mut best = f64::NEG_INFINITY;

    if operators.contains(Operator::Mul) {
        best = best.max(logs.iter().sum());
    }
    if operators.contains(Operator::Add) || operators.contains(Operator::Sub) {
        best = best.max(all_nines_log10(max_len) + (blocks as f64).log10());
    }
    if operators.contains(Operator::Div) {
        best = best.max(all_nines_log10(max_len));
    }
    if operators.contains(Operator::Pow) {
        best = best.max(power_bound(lengths, &logs));
    }
    best
}

/// Bound for one `a ^ b` built from the two longest blocks, combined with
/// the remaining blocks.
fn power_bound(lengths: &[usize], logs: &[f64]) -> f64 {
    let mut order: Vec<usize> = (0..lengths.len()).collect();
    order.sort_by(|&a, &b| lengths[b].cmp(&lengths[a]));

    let (Some(&base_idx), Some(&exp_idx)) = (order.first(), order.get(1)) else {
        return f64::NEG_INFINITY;
    };

    // The evaluator refuses larger bases and exponents
    let base_log = logs[base_idx].min(MAX_POW_BASE.log10());
    let exponent_max = 10f64.powf(logs[exp_idx]).round().min(MAX_EXPONENT);
    let mut bound = exponent_max * base_log;

    bound += order.iter().skip(2).map(|&i| logs[i]).sum::<f64>();
    if lengths.len() > 2 {
        bound += (lengths.len() as f64).log10();
    }
    bound
}
