use log::{debug, info, warn};
use rayon::prelude::*;

use crate::constraint::{ConstraintMap, GuessRecord, Symbol, matches_feedback};
use crate::expression::OperatorSet;
use crate::search::{LhsSearch, SearchLimits};

use super::errors::SolverError;
use super::feasibility::FeasibilityEstimator;
use super::filter::{CandidateFilter, EqualsPlacement};

/// Result of a full candidate search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub candidates: Vec<String>,
    /// `=` positions whose search ran out of node budget.
    pub truncated_positions: Vec<usize>,
    pub nodes: u64,
}

impl GenerationReport {
    pub fn is_truncated(&self) -> bool {
        !self.truncated_positions.is_empty()
    }
}

#[derive(Debug, Default)]
struct PositionResult {
    eq_pos: usize,
    candidates: Vec<String>,
    nodes: u64,
    truncated: bool,
}

/// Builds every equation consistent with a constraint map by searching each
/// possible `=` position independently.
#[derive(Debug, Clone, Default)]
pub struct CandidateGenerator {
    limits: SearchLimits,
}

impl CandidateGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Positions worth trying for `=`, right-most first. A single green `=`
    /// pins the position.
    pub fn equals_positions(map: &ConstraintMap) -> Result<Vec<usize>, SolverError> {
        let equals = map.equals()?;
        let length = map.length();

        let pinned = equals.green_positions();
        if pinned.len() == 1 {
            return Ok(pinned
                .iter()
                .copied()
                .filter(|&p| EqualsPlacement::new(length, p).is_some())
                .collect());
        }

        Ok((0..length)
            .rev()
            .filter(|&p| EqualsPlacement::new(length, p).is_some())
            .filter(|&p| !equals.is_banned_at(p))
            .filter(|&p| map.green_owners(p).all(|owner| owner == Symbol::Equals))
            .collect())
    }

    /// # Errors
    ///
    /// Fails on an empty operator set, on a map or guess whose length differs
    /// from `length`, or on a map without its `=` entry. Running out of node
    /// budget is not an error; it is listed in the report.
    pub fn generate(
        &self,
        length: usize,
        operators: &OperatorSet,
        history: &[GuessRecord],
        map: &ConstraintMap,
    ) -> Result<GenerationReport, SolverError> {
        if operators.is_empty() {
            return Err(SolverError::NoOperators);
        }
        if map.length() != length {
            return Err(SolverError::LengthMismatch {
                expected: length,
                actual: map.length(),
            });
        }
        if let Some(record) = history.iter().find(|r| r.len() != length) {
            return Err(SolverError::LengthMismatch {
                expected: length,
                actual: record.len(),
            });
        }

        let positions = Self::equals_positions(map)?;
        info!(
            "Generating length-{} candidates over {} for '=' positions {:?}",
            length, operators, positions
        );

        let results: Vec<PositionResult> = positions
            .par_iter()
            .filter_map(|&eq_pos| EqualsPlacement::new(length, eq_pos))
            .map(|placement| self.search_position(&placement, operators, map))
            .collect();

        let mut report = GenerationReport::default();
        for result in results {
            report.nodes += result.nodes;
            if result.truncated {
                warn!(
                    "Search for '=' at {} stopped after {} nodes; results may be incomplete",
                    result.eq_pos, result.nodes
                );
                report.truncated_positions.push(result.eq_pos);
            }
            report.candidates.extend(result.candidates);
        }

        // Contradictory history cannot be replayed faithfully
        if !map.has_conflict() && !history.is_empty() {
            let before = report.candidates.len();
            report
                .candidates
                .retain(|c| history.iter().all(|record| matches_feedback(c, record)));
            if report.candidates.len() != before {
                debug!(
                    "Feedback replay dropped {} candidates",
                    before - report.candidates.len()
                );
            }
        }

        info!(
            "Found {} candidates ({} nodes)",
            report.candidates.len(),
            report.nodes
        );
        Ok(report)
    }

    fn search_position(
        &self,
        placement: &EqualsPlacement,
        operators: &OperatorSet,
        map: &ConstraintMap,
    ) -> PositionResult {
        let mut result = PositionResult {
            eq_pos: placement.eq_pos,
            ..PositionResult::default()
        };

        if !FeasibilityEstimator::is_feasible(placement.lhs_len, placement.rhs_len, operators) {
            debug!(
                "Skipping '=' at {}: no {}-character left side reaches {} digits",
                placement.eq_pos, placement.lhs_len, placement.rhs_len
            );
            return result;
        }

        let filter = CandidateFilter::new(map);
        let search = LhsSearch::new(
            placement.lhs_len,
            placement.rhs_len,
            operators,
            map,
            self.limits,
        );
        let stats = search.for_each(|tokens| {
            if let Some(candidate) = filter.accept(tokens, placement) {
                result.candidates.push(candidate);
            }
        });

        result.nodes = stats.nodes;
        result.truncated = stats.truncated;
        debug!(
            "'=' at {}: {} candidates from {} left sides",
            placement.eq_pos,
            result.candidates.len(),
            stats.emitted
        );
        result
    }
}
