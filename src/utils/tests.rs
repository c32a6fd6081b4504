use crate::expression::{Operator, OperatorSet};
use crate::utils::{
    UtilsError, compositions, is_operand_literal, normalize_line, parse_literal,
    parse_operator_spec, validate_feedback, validate_round_spec,
};

#[test]
fn test_compositions_single_part() {
    assert_eq!(compositions(3, 1), vec![vec![3]]);
}

#[test]
fn test_compositions_two_parts() {
    assert_eq!(compositions(3, 2), vec![vec![1, 2], vec![2, 1]]);
}

#[test]
fn test_compositions_three_parts() {
    let expected = vec![vec![1, 1, 2], vec![1, 2, 1], vec![2, 1, 1]];
    assert_eq!(compositions(4, 3), expected);
}

#[test]
fn test_compositions_impossible() {
    assert_eq!(compositions(3, 4), Vec::<Vec<usize>>::new());
    assert_eq!(compositions(3, 0), Vec::<Vec<usize>>::new());
}

#[test]
fn test_compositions_large_total() {
    let parts = compositions(12, 4);
    // C(11, 3)
    assert_eq!(parts.len(), 165);
    for composition in &parts {
        assert_eq!(composition.len(), 4);
        assert_eq!(composition.iter().sum::<usize>(), 12);
        assert!(composition.iter().all(|&p| p >= 1));
    }
}

#[test]
fn test_parse_literal() {
    let result = parse_literal("12+345", 0, 2);
    assert_eq!(result, Ok(12.0));

    let result = parse_literal("12+345", 3, 6);
    assert_eq!(result, Ok(345.0));

    let result = parse_literal("0", 0, 1);
    assert_eq!(result, Ok(0.0));
}

#[test]
fn test_parse_literal_rejects_leading_zero() {
    assert_eq!(
        parse_literal("05+1", 0, 2),
        Err(UtilsError::InvalidLiteral("05".to_string()))
    );
}

#[test]
fn test_parse_literal_invalid_range() {
    assert!(matches!(
        parse_literal("12345", 0, 10),
        Err(UtilsError::InvalidRange { .. })
    ));
    assert!(matches!(
        parse_literal("12345", 5, 3),
        Err(UtilsError::InvalidRange { .. })
    ));
    assert!(matches!(
        parse_literal("1+2", 0, 2),
        Err(UtilsError::InvalidLiteral(_))
    ));
}

#[test]
fn test_is_operand_literal() {
    assert!(is_operand_literal("7"));
    assert!(is_operand_literal("105"));
    assert!(!is_operand_literal("0"));
    assert!(!is_operand_literal("07"));
    assert!(!is_operand_literal(""));
    assert!(!is_operand_literal("1a"));
}

#[test]
fn test_normalize_line() {
    assert_eq!(normalize_line(" 12 + 46 = 58 "), "12+46=58");
    assert_eq!(normalize_line("r y r\ty"), "ryry");
}

#[test]
fn test_validate_feedback() {
    assert_eq!(validate_feedback("G Y R g y", 5), Ok("gyrgy".to_string()));
    assert_eq!(
        validate_feedback("gyr", 5),
        Err(UtilsError::FeedbackLengthMismatch {
            expected: 5,
            actual: 3
        })
    );
    assert_eq!(
        validate_feedback("gyrxg", 5),
        Err(UtilsError::InvalidFeedback("gyrxg".to_string()))
    );
}

#[test]
fn test_parse_operator_spec() {
    let ops = parse_operator_spec("+ - * /");
    assert!(ops.is_ok());
    if let Ok(ops) = ops {
        assert!(ops.contains(Operator::Add));
        assert!(ops.contains(Operator::Div));
        assert!(!ops.contains(Operator::Pow));
        assert_eq!(ops.len(), 4);
    }

    assert_eq!(
        parse_operator_spec("+x"),
        Err(UtilsError::InvalidOperator('x'))
    );
    assert_eq!(
        parse_operator_spec("-*"),
        Err(UtilsError::MissingRequiredOperator('+'))
    );
}

#[test]
fn test_validate_round_spec() {
    let ops: OperatorSet = [Operator::Add, Operator::Mul].into_iter().collect();
    assert!(validate_round_spec(8, &ops).is_ok());
    assert_eq!(
        validate_round_spec(4, &ops),
        Err(UtilsError::LengthTooShort { length: 4, min: 5 })
    );

    let no_plus: OperatorSet = [Operator::Mul].into_iter().collect();
    assert_eq!(
        validate_round_spec(8, &no_plus),
        Err(UtilsError::MissingRequiredOperator('+'))
    );
}
