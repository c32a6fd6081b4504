use log::{debug, trace};
use rayon::prelude::*;

use crate::constraint::ConstraintMap;
use crate::expression::{Token, evaluate_with, is_integer, tokens_to_string};

use super::constants::{MIN_LHS_LEN, MIN_RHS_LEN};

/// Where `=` sits in an equation of a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualsPlacement {
    pub eq_pos: usize,
    pub lhs_len: usize,
    pub rhs_len: usize,
}

impl EqualsPlacement {
    /// `None` when either side would be too short.
    pub fn new(length: usize, eq_pos: usize) -> Option<Self> {
        let rhs_len = length.checked_sub(eq_pos + 1)?;
        if eq_pos < MIN_LHS_LEN || rhs_len < MIN_RHS_LEN {
            return None;
        }
        Some(Self {
            eq_pos,
            lhs_len: eq_pos,
            rhs_len,
        })
    }
}

/// Turns left-hand sides into full equations and checks them against the
/// constraint map.
#[derive(Debug, Clone, Copy)]
pub struct CandidateFilter<'a> {
    map: &'a ConstraintMap,
}

impl<'a> CandidateFilter<'a> {
    pub fn new(map: &'a ConstraintMap) -> Self {
        Self { map }
    }

    /// Evaluates the left-hand side and, when it yields a non-negative
    /// integer of the right width, returns `lhs=rhs` if the map accepts it.
    pub fn accept(&self, lhs_tokens: &[Token], placement: &EqualsPlacement) -> Option<String> {
        let lhs = tokens_to_string(lhs_tokens);

        let value = match evaluate_with(&lhs, self.map.operators()) {
            Ok(value) => value,
            Err(e) => {
                trace!("'{}' skipped: {}", lhs, e);
                return None;
            }
        };
        if !is_integer(value) || value.round() < 0.0 {
            trace!("'{}' skipped: {} is not a non-negative integer", lhs, value);
            return None;
        }

        // Bounded by the evaluator's exact-integer guard
        let rhs = (value.round() as u64).to_string();
        if rhs.len() != placement.rhs_len {
            trace!(
                "'{}={}' skipped: right side has {} digits, need {}",
                lhs,
                rhs,
                rhs.len(),
                placement.rhs_len
            );
            return None;
        }

        let candidate = format!("{lhs}={rhs}");
        self.map.is_candidate_valid(&candidate).then_some(candidate)
    }

    /// Keeps the candidates the map still admits, in input order.
    pub fn filter_expressions(&self, candidates: &[String]) -> Vec<String> {
        let kept: Vec<String> = candidates
            .par_iter()
            .filter(|candidate| self.map.is_candidate_valid(candidate))
            .cloned()
            .collect();
        debug!("Filter kept {} of {} candidates", kept.len(), candidates.len());
        kept
    }
}

/// Re-validates an existing candidate list against an updated map.
pub fn filter_expressions(candidates: &[String], map: &ConstraintMap) -> Vec<String> {
    CandidateFilter::new(map).filter_expressions(candidates)
}
