use log::{debug, trace};

use crate::expression::constants::{EPSILON, MAX_EXACT_INTEGER, MAX_EXPONENT, MAX_POW_BASE};
use crate::expression::errors::ExpressionError;
use crate::expression::token::{Operator, OperatorSet};
use crate::utils::parse_literal;

/// Item of the postfix (RPN) form produced by the shunting-yard pass.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Rpn {
    Value(f64),
    Op(Operator),
}

#[inline]
fn is_zero(value: f64) -> bool {
    value.abs() < f64::EPSILON
}

#[inline]
pub(crate) fn is_integer(value: f64) -> bool {
    (value - value.round()).abs() < EPSILON
}

#[inline]
fn check_magnitude(value: f64) -> Result<f64, ExpressionError> {
    if !value.is_finite() || value.abs() > MAX_EXACT_INTEGER {
        Err(ExpressionError::Overflow)
    } else {
        Ok(value)
    }
}

/// Applies a single binary operator under the game's integer rules.
///
/// # Errors
///
/// Returns an error for division by (near-)zero, a non-integer quotient, a
/// negative exponent, a base or exponent beyond the overflow guard, or any
/// result too large to stay exact.
pub(crate) fn apply_operator(op: Operator, left: f64, right: f64) -> Result<f64, ExpressionError> {
    let value = match op {
        Operator::Add => left + right,
        Operator::Sub => left - right,
        Operator::Mul => left * right,
        Operator::Div => {
            if is_zero(right) {
                return Err(ExpressionError::DivisionByZero);
            }
            let quotient = left / right;
            if !is_integer(quotient) {
                return Err(ExpressionError::NonIntegerDivision);
            }
            quotient.round()
        }
        Operator::Pow => {
            if right < 0.0 {
                return Err(ExpressionError::NegativeExponent);
            }
            if left.abs() > MAX_POW_BASE || right > MAX_EXPONENT {
                return Err(ExpressionError::Overflow);
            }
            left.powf(right)
        }
    };
    check_magnitude(value)
}

/// Splits `expr` into alternating numbers and operators, rejecting
/// characters outside digits and `operators`.
fn tokenize(expr: &str, operators: &OperatorSet) -> Result<Vec<Rpn>, ExpressionError> {
    let mut items = Vec::new();
    let mut number_start: Option<usize> = None;

    for (idx, c) in expr.char_indices() {
        if c.is_ascii_digit() {
            if number_start.is_none() {
                number_start = Some(idx);
            }
            continue;
        }

        let op = Operator::from_char(c)
            .filter(|op| operators.contains(*op))
            .ok_or(ExpressionError::InvalidCharacter(c))?;

        let start = number_start
            .take()
            .ok_or(ExpressionError::MalformedExpression)?;
        items.push(Rpn::Value(parse_number(expr, start, idx)?));
        items.push(Rpn::Op(op));
    }

    let start = number_start.ok_or(ExpressionError::MalformedExpression)?;
    items.push(Rpn::Value(parse_number(expr, start, expr.len())?));
    Ok(items)
}

fn parse_number(expr: &str, start: usize, end: usize) -> Result<f64, ExpressionError> {
    parse_literal(expr, start, end).map_err(|_| {
        ExpressionError::InvalidNumber(expr.get(start..end).unwrap_or_default().to_string())
    })
}

/// Shunting-yard: reorders the infix items into postfix, honouring
/// precedence and `^` right-associativity.
fn to_postfix(items: Vec<Rpn>) -> Vec<Rpn> {
    let mut output = Vec::with_capacity(items.len());
    let mut stack: Vec<Operator> = Vec::new();

    for item in items {
        match item {
            Rpn::Value(_) => output.push(item),
            Rpn::Op(op) => {
                while let Some(&top) = stack.last() {
                    let pops = if op.is_right_associative() {
                        op.precedence() < top.precedence()
                    } else {
                        op.precedence() <= top.precedence()
                    };
                    if !pops {
                        break;
                    }
                    output.push(Rpn::Op(top));
                    stack.pop();
                }
                stack.push(op);
            }
        }
    }

    output.extend(stack.into_iter().rev().map(Rpn::Op));
    output
}

fn evaluate_postfix(postfix: &[Rpn]) -> Result<f64, ExpressionError> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());

    for item in postfix {
        match *item {
            Rpn::Value(value) => stack.push(value),
            Rpn::Op(op) => {
                let right = stack.pop().ok_or(ExpressionError::MalformedExpression)?;
                let left = stack.pop().ok_or(ExpressionError::MalformedExpression)?;
                stack.push(apply_operator(op, left, right)?);
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(ExpressionError::MalformedExpression),
    }
}

/// Evaluates a flat infix expression (no parentheses, no unary operators)
/// using every operator.
///
/// # Errors
///
/// See [`evaluate_with`].
pub fn evaluate(expr: &str) -> Result<f64, ExpressionError> {
    evaluate_with(expr, &OperatorSet::all())
}

/// Evaluates a flat infix expression, accepting only the given operators.
///
/// # Errors
///
/// Returns an error when the expression:
/// - contains a character that is neither a digit nor an allowed operator
/// - is empty, starts or ends with an operator, or has adjacent operators
/// - contains a multi-digit number with a leading zero
/// - divides by zero or produces a non-integer quotient
/// - raises to a negative exponent, or risks overflow
pub fn evaluate_with(expr: &str, operators: &OperatorSet) -> Result<f64, ExpressionError> {
    trace!("Evaluating expression: {}", expr);

    let result = tokenize(expr, operators)
        .map(to_postfix)
        .and_then(|postfix| evaluate_postfix(&postfix));

    match &result {
        Ok(value) => trace!("Expression '{}' evaluated to: {}", expr, value),
        Err(e) => debug!("Expression '{}' evaluation failed: {}", expr, e),
    }

    result
}

/// Like [`evaluate`], but any failure simply means "no result".
pub fn safe_evaluate(expr: &str) -> Option<f64> {
    evaluate(expr).ok()
}
