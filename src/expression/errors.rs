use thiserror::Error;

/// Reasons an infix expression is rejected by the evaluator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Invalid character in expression: '{0}'")]
    InvalidCharacter(char),
    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),
    #[error("Malformed expression")]
    MalformedExpression,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Division does not produce an integer")]
    NonIntegerDivision,
    #[error("Negative exponent not supported")]
    NegativeExponent,
    #[error("Result too large to evaluate exactly")]
    Overflow,
}
