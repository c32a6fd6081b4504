use log::debug;

use crate::expression::constants::EPSILON;
use crate::expression::errors::ExpressionError;
use crate::expression::eval::evaluate_with;
use crate::expression::token::OperatorSet;

/// Evaluates and checks equations under a round's operator set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionValidator {
    operators: OperatorSet,
}

impl ExpressionValidator {
    pub fn new(operators: OperatorSet) -> Self {
        Self { operators }
    }

    pub fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    pub fn set_operators(&mut self, operators: OperatorSet) {
        self.operators = operators;
    }

    /// # Errors
    ///
    /// Same failure kinds as [`evaluate_with`]; operators outside this
    /// validator's set count as invalid characters.
    pub fn evaluate(&self, expr: &str) -> Result<f64, ExpressionError> {
        evaluate_with(expr, &self.operators)
    }

    /// Whether `s` is a true equation of exactly `length` characters:
    /// one `=`, non-empty sides, and both sides evaluating to the same value.
    pub fn is_valid_expression(&self, s: &str, length: usize) -> bool {
        if s.chars().count() != length {
            debug!("Length mismatch for '{}': expected {}", s, length);
            return false;
        }

        let Some((left, right)) = s.split_once('=') else {
            return false;
        };
        if left.is_empty() || right.is_empty() || right.contains('=') {
            return false;
        }

        match (self.evaluate(left), self.evaluate(right)) {
            (Ok(lv), Ok(rv)) => (lv - rv).abs() < EPSILON,
            _ => false,
        }
    }
}

impl Default for ExpressionValidator {
    fn default() -> Self {
        Self::new(OperatorSet::all())
    }
}
