use proptest::prelude::*;

use crate::expression::{
    ExpressionError, ExpressionValidator, Operator, OperatorSet, Token, evaluate, evaluate_with,
    safe_evaluate, tokens_to_string,
};

#[test]
fn test_precedence() {
    assert_eq!(evaluate("2+3*4"), Ok(14.0));
    assert_eq!(evaluate("2*3+4"), Ok(10.0));
    assert_eq!(evaluate("20-6/3"), Ok(18.0));
    assert_eq!(evaluate("2*3^2"), Ok(18.0));
}

#[test]
fn test_left_associativity() {
    assert_eq!(evaluate("10-4-3"), Ok(3.0));
    assert_eq!(evaluate("64/8/2"), Ok(4.0));
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(evaluate("2^3^2"), Ok(512.0));
}

#[test]
fn test_negative_intermediate_values() {
    assert_eq!(evaluate("1-5+9"), Ok(5.0));
    assert_eq!(evaluate("3-8"), Ok(-5.0));
}

#[test]
fn test_integer_division() {
    assert_eq!(evaluate("8/2"), Ok(4.0));
    assert_eq!(evaluate("7/2"), Err(ExpressionError::NonIntegerDivision));
    assert_eq!(safe_evaluate("7/2"), None);
}

#[test]
fn test_division_by_zero() {
    assert_eq!(evaluate("5/0"), Err(ExpressionError::DivisionByZero));
}

#[test]
fn test_overflow_guard() {
    assert_eq!(evaluate("2^11"), Err(ExpressionError::Overflow));
    assert_eq!(evaluate("2^10"), Ok(1024.0));
    assert_eq!(evaluate("9999999^2"), Err(ExpressionError::Overflow));
}

#[test]
fn test_invalid_character() {
    assert_eq!(evaluate("1+a"), Err(ExpressionError::InvalidCharacter('a')));
    assert_eq!(evaluate("1 + 2"), Err(ExpressionError::InvalidCharacter(' ')));
}

#[test]
fn test_operator_outside_set_is_invalid() {
    let ops: OperatorSet = [Operator::Add].into_iter().collect();
    assert_eq!(evaluate_with("1+2", &ops), Ok(3.0));
    assert_eq!(
        evaluate_with("2*3", &ops),
        Err(ExpressionError::InvalidCharacter('*'))
    );
}

#[test]
fn test_malformed_expressions() {
    assert_eq!(evaluate(""), Err(ExpressionError::MalformedExpression));
    assert_eq!(evaluate("+1"), Err(ExpressionError::MalformedExpression));
    assert_eq!(evaluate("1+"), Err(ExpressionError::MalformedExpression));
    assert_eq!(evaluate("1+*2"), Err(ExpressionError::MalformedExpression));
}

#[test]
fn test_leading_zero_literal() {
    assert_eq!(
        evaluate("05+1"),
        Err(ExpressionError::InvalidNumber("05".to_string()))
    );
    assert_eq!(evaluate("0+1"), Ok(1.0));
}

#[test]
fn test_validator_accepts_true_equation() {
    let validator = ExpressionValidator::default();
    assert!(validator.is_valid_expression("12+46=58", 8));
    assert!(validator.is_valid_expression("2*3=6", 5));
    assert!(validator.is_valid_expression("9-9=0", 5));
}

#[test]
fn test_validator_rejects_bad_equations() {
    let validator = ExpressionValidator::default();
    assert!(!validator.is_valid_expression("12+46=59", 8));
    assert!(!validator.is_valid_expression("12+46=58", 7));
    assert!(!validator.is_valid_expression("1+2=3=3", 7));
    assert!(!validator.is_valid_expression("12+4658", 7));
    assert!(!validator.is_valid_expression("=1+2", 4));
    assert!(!validator.is_valid_expression("7/2=3", 5));
}

#[test]
fn test_validator_respects_operator_set() {
    let ops: OperatorSet = [Operator::Add, Operator::Sub].into_iter().collect();
    let validator = ExpressionValidator::new(ops);
    assert!(validator.is_valid_expression("1+5=6", 5));
    assert!(!validator.is_valid_expression("2*3=6", 5));
}

#[test]
fn test_operator_set_iteration_order() {
    let ops: OperatorSet = [Operator::Pow, Operator::Add, Operator::Div]
        .into_iter()
        .collect();
    let symbols: String = ops.iter().map(Operator::symbol).collect();
    assert_eq!(symbols, "+/^");
    assert_eq!(ops.to_string(), "+/^");
    assert!(ops.contains_char('^'));
    assert!(!ops.contains_char('*'));
}

#[test]
fn test_tokens_to_string() {
    let tokens = vec![
        Token::Number("12".to_string()),
        Token::Operator(Operator::Mul),
        Token::Number("3".to_string()),
    ];
    assert_eq!(tokens_to_string(&tokens), "12*3");
    assert_eq!(tokens.iter().map(Token::len).sum::<usize>(), 4);
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(expr in "[0-9+*/^-]{1,9}") {
        let first = evaluate(&expr);
        let second = evaluate(&expr);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn successful_results_are_integers(expr in "[1-9][0-9]?([+*/-][1-9][0-9]?){1,3}") {
        if let Ok(value) = evaluate(&expr) {
            prop_assert!((value - value.round()).abs() < 1e-9);
        }
    }
}
