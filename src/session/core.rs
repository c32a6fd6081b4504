use log::{debug, info, warn};

use crate::constraint::{ConstraintMap, GuessRecord};
use crate::expression::{ExpressionValidator, OperatorSet};
use crate::search::SearchLimits;
use crate::solver::{CandidateGenerator, filter_expressions};
use crate::utils::{normalize_line, validate_feedback, validate_round_spec};

use super::errors::SessionError;

/// One round of play: the guesses so far, the constraints they imply, and
/// the equations still possible.
///
/// The first guess pays for a full search; later guesses only re-filter the
/// surviving candidates.
#[derive(Debug, Clone)]
pub struct RoundSession {
    length: usize,
    operators: OperatorSet,
    validator: ExpressionValidator,
    generator: CandidateGenerator,
    history: Vec<GuessRecord>,
    constraints: ConstraintMap,
    initial_candidates: Vec<String>,
    candidates: Vec<String>,
    truncated: bool,
}

impl RoundSession {
    /// # Errors
    ///
    /// Rejects lengths below the playable minimum and operator sets without `+`.
    pub fn new(length: usize, operators: OperatorSet) -> Result<Self, SessionError> {
        Self::with_limits(length, operators, SearchLimits::default())
    }

    pub fn with_limits(
        length: usize,
        operators: OperatorSet,
        limits: SearchLimits,
    ) -> Result<Self, SessionError> {
        validate_round_spec(length, &operators)?;
        info!("New round: length {}, operators {}", length, operators);

        Ok(Self {
            length,
            operators,
            validator: ExpressionValidator::new(operators),
            generator: CandidateGenerator::with_limits(limits),
            history: Vec::new(),
            constraints: ConstraintMap::initialize(length, &operators),
            initial_candidates: Vec::new(),
            candidates: Vec::new(),
            truncated: false,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    pub fn constraints(&self) -> &ConstraintMap {
        &self.constraints
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn initial_candidates(&self) -> &[String] {
        &self.initial_candidates
    }

    /// The first search hit its node budget, so the lists may be incomplete.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// 1-based number of the next guess.
    pub fn round(&self) -> usize {
        self.history.len() + 1
    }

    /// Records a guess and its feedback and returns the surviving candidates.
    ///
    /// Whitespace in either input is ignored and feedback is case-insensitive.
    ///
    /// # Errors
    ///
    /// The guess must be a true equation of the round's length using only the
    /// round's operators, and the feedback must be `g`/`y`/`r` of the same
    /// length. A rejected guess leaves the session unchanged.
    pub fn submit(&mut self, equation: &str, feedback: &str) -> Result<&[String], SessionError> {
        let equation = normalize_line(equation);
        if !self.validator.is_valid_expression(&equation, self.length) {
            return Err(SessionError::InvalidEquation(equation));
        }
        let feedback = validate_feedback(feedback, self.length)?;
        let record = GuessRecord::parse(&equation, &feedback)?;

        let changed = self.constraints.update(&record)?;
        debug!(
            "Guess {} '{}' -> '{}' (constraints changed: {})",
            self.round(),
            equation,
            feedback,
            changed
        );
        self.history.push(record);

        if self.history.len() == 1 {
            let report = self.generator.generate(
                self.length,
                &self.operators,
                &self.history,
                &self.constraints,
            )?;
            self.truncated = report.is_truncated();
            self.initial_candidates = report.candidates;
            self.candidates = self.initial_candidates.clone();
        } else {
            self.candidates = filter_expressions(&self.candidates, &self.constraints);
        }

        if self.constraints.has_conflict() {
            warn!("Feedback so far is contradictory; constraints were widened");
        }
        info!(
            "Round {}: {} candidates remain",
            self.history.len(),
            self.candidates.len()
        );
        Ok(&self.candidates)
    }

    /// Drops the latest guess and rebuilds everything from the remaining
    /// history. Returns `false` when there was nothing to undo.
    ///
    /// # Errors
    ///
    /// Only if rebuilding the constraints fails, which the stored history
    /// already passed once.
    pub fn undo(&mut self) -> Result<bool, SessionError> {
        if self.history.pop().is_none() {
            debug!("Nothing to undo");
            return Ok(false);
        }

        self.constraints = ConstraintMap::derive(&self.history, self.length, &self.operators)?;
        if self.history.is_empty() {
            self.initial_candidates.clear();
            self.candidates.clear();
            self.truncated = false;
        } else {
            self.candidates = filter_expressions(&self.initial_candidates, &self.constraints);
        }

        info!("Undid one guess; {} remain", self.history.len());
        Ok(true)
    }

    /// Clears the round, keeping its length and operators.
    pub fn reset(&mut self) {
        self.history.clear();
        self.constraints = ConstraintMap::initialize(self.length, &self.operators);
        self.initial_candidates.clear();
        self.candidates.clear();
        self.truncated = false;
        info!("Round reset");
    }
}
