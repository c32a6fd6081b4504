use proptest::prelude::*;

use crate::constraint::{
    Color, ConstraintError, ConstraintMap, Feedback, GuessRecord, Symbol, compute_feedback,
    matches_feedback,
};
use crate::expression::{Operator, OperatorSet};

fn plus_only() -> OperatorSet {
    [Operator::Add].into_iter().collect()
}

fn record(equation: &str, feedback: &str) -> GuessRecord {
    match GuessRecord::parse(equation, feedback) {
        Ok(record) => record,
        Err(e) => panic!("bad test record {equation} / {feedback}: {e}"),
    }
}

fn derive(history: &[GuessRecord], length: usize, operators: &OperatorSet) -> ConstraintMap {
    match ConstraintMap::derive(history, length, operators) {
        Ok(map) => map,
        Err(e) => panic!("derivation failed: {e}"),
    }
}

fn bounds(map: &ConstraintMap, c: char) -> Option<(usize, usize)> {
    let symbol = Symbol::from_char(c)?;
    map.get(symbol).map(|s| (s.min_count(), s.max_count()))
}

fn conflicted(map: &ConstraintMap, c: char) -> bool {
    Symbol::from_char(c)
        .and_then(|s| map.get(s))
        .is_some_and(|s| s.has_conflict())
}

#[test]
fn test_symbol_round_trip() {
    for c in "0123456789+-*/^=".chars() {
        assert_eq!(Symbol::from_char(c).map(Symbol::to_char), Some(c));
    }
    assert_eq!(Symbol::from_char('x'), None);
    assert!(Symbol::Digit(3).is_digit());
    assert!(Symbol::Op(Operator::Mul).is_operator());
}

#[test]
fn test_initialize_baseline() {
    let map = ConstraintMap::initialize(8, &plus_only());
    assert_eq!(bounds(&map, '5'), Some((0, 8)));
    assert_eq!(bounds(&map, '+'), Some((0, 8)));
    assert_eq!(bounds(&map, '='), Some((1, 1)));
    // Operators outside the round are simply absent
    assert_eq!(bounds(&map, '*'), None);
    assert!(!map.has_conflict());
    assert!(map.equals().is_ok());
}

#[test]
fn test_derive_positions_and_counts() {
    let history = [record("1+2=3", "ggggg"), record("1+3=4", "ggygr")];
    let map = derive(&history, 5, &plus_only());

    let three = map.get(Symbol::Digit(3));
    assert!(three.is_some());
    if let Some(three) = three {
        assert_eq!(three.min_count(), 1);
        assert!(three.is_green_at(4));
        assert!(three.is_banned_at(2));
    }

    assert_eq!(bounds(&map, '4'), Some((0, 0)));
    assert_eq!(bounds(&map, '1'), Some((1, 5)));
    assert_eq!(map.required_at(3), Some(Symbol::Equals));
    assert_eq!(map.required_at(0), Some(Symbol::Digit(1)));
    assert!(!map.has_conflict());
}

#[test]
fn test_red_with_yellow_pins_exact_count() {
    let history = [record("13+24=37", "gygyggrr")];
    let map = derive(&history, 8, &plus_only());
    assert_eq!(bounds(&map, '3'), Some((1, 1)));
    assert_eq!(bounds(&map, '7'), Some((0, 0)));
    assert_eq!(bounds(&map, '2'), Some((1, 8)));
}

#[test]
fn test_exact_count_conflict_widens() {
    let history = [record("1+6=7", "ggrgr"), record("2+5=7", "rgrgg")];
    let map = derive(&history, 5, &plus_only());

    assert!(conflicted(&map, '7'));
    assert_eq!(bounds(&map, '7'), Some((0, 5)));
    // green overrides the earlier ban and keeps the sets disjoint
    if let Some(seven) = map.get(Symbol::Digit(7)) {
        assert!(seven.is_green_at(4));
        assert!(!seven.is_banned_at(4));
    }
    assert!(!conflicted(&map, '6'));
}

#[test]
fn test_empty_range_conflict_widens() {
    let history = [record("1+1=2", "yrygr"), record("3+1=4", "rrrgr")];
    let map = derive(&history, 5, &plus_only());
    assert!(conflicted(&map, '1'));
    assert_eq!(bounds(&map, '1'), Some((0, 5)));
}

#[test]
fn test_equals_green_disagreement() {
    let history = [record("12+3=15", "rrrrgrr"), record("1+2+3=6", "rrrrrgr")];
    let map = derive(&history, 7, &plus_only());

    let equals = map.equals();
    assert!(equals.is_ok());
    if let Ok(equals) = equals {
        assert!(equals.has_conflict());
        assert!(equals.green_positions().is_empty());
        assert_eq!((equals.min_count(), equals.max_count()), (1, 1));
    }
}

#[test]
fn test_adjacent_operator_greens_taint_operators() {
    let ops: OperatorSet = [Operator::Add, Operator::Sub].into_iter().collect();
    let history = [record("11+2=13", "rrgrgrr"), record("2+11=13", "rgrrgrr")];
    let map = derive(&history, 7, &ops);

    assert!(map.has_structural_conflict());
    assert!(conflicted(&map, '+'));
    assert!(conflicted(&map, '-'));
    assert!(!conflicted(&map, '1'));
}

#[test]
fn test_two_symbols_green_at_same_position() {
    let history = [record("1+2=3", "grrrr"), record("4+5=9", "grrrr")];
    let map = derive(&history, 5, &plus_only());
    assert!(conflicted(&map, '1'));
    assert!(conflicted(&map, '4'));
    assert_eq!(map.green_owners(0).count(), 2);
}

#[test]
fn test_update_reports_changes() {
    let mut map = ConstraintMap::initialize(5, &plus_only());
    let guess = record("1+2=3", "ggygr");
    assert_eq!(map.update(&guess), Ok(true));
    assert_eq!(map.update(&guess), Ok(false));
    assert_eq!(map.guesses_applied(), 2);
}

#[test]
fn test_incremental_update_matches_full_derivation() {
    let history = [record("13+24=37", "gygyggrr"), record("14+32=46", "gyggyggg")];
    let mut incremental = ConstraintMap::initialize(8, &plus_only());
    for r in &history {
        assert!(incremental.update(r).is_ok());
    }
    let rebuilt = derive(&history, 8, &plus_only());
    assert_eq!(incremental, rebuilt);
}

#[test]
fn test_update_rejects_bad_records() {
    let mut map = ConstraintMap::initialize(5, &plus_only());
    assert_eq!(
        map.update(&record("12+3=15", "rrrrrrr")),
        Err(ConstraintError::LengthMismatch {
            expected: 5,
            actual: 7
        })
    );
    assert_eq!(
        map.update(&record("1x2=3", "rrrrr")),
        Err(ConstraintError::UnknownSymbol {
            position: 1,
            found: 'x'
        })
    );
    assert_eq!(map.guesses_applied(), 0);
}

#[test]
fn test_feedback_parsing() {
    let parsed: Result<Feedback, _> = "GyR".parse();
    assert_eq!(
        parsed,
        Ok(Feedback::new(vec![Color::Green, Color::Yellow, Color::Red]))
    );
    assert_eq!(
        "gxr".parse::<Feedback>(),
        Err(ConstraintError::InvalidColor {
            position: 1,
            found: 'x'
        })
    );
    assert!(GuessRecord::parse("1+2=3", "ggg").is_err());
}

fn derived_sample() -> ConstraintMap {
    derive(&[record("13+24=37", "gygyggrr")], 8, &plus_only())
}

#[test]
fn test_candidate_valid_for_secret() {
    let map = derived_sample();
    assert!(map.is_candidate_valid("12+34=46"));
}

#[test]
fn test_candidate_below_min_count() {
    assert!(!derived_sample().is_candidate_valid("14+54=68"));
}

#[test]
fn test_candidate_above_max_count() {
    assert!(!derived_sample().is_candidate_valid("12+34=43"));
}

#[test]
fn test_candidate_misses_green_position() {
    assert!(!derived_sample().is_candidate_valid("21+34=46"));
}

#[test]
fn test_candidate_on_banned_position() {
    assert!(!derived_sample().is_candidate_valid("13+24=46"));
}

#[test]
fn test_candidate_wrong_length_or_symbol() {
    let map = derived_sample();
    assert!(!map.is_candidate_valid("12+34=4"));
    assert!(!map.is_candidate_valid("12*34=46"));
}

#[test]
fn test_compute_feedback() {
    let fb = compute_feedback("1+2=3", "1+3=4").map(|f| f.to_string());
    assert_eq!(fb, Ok("ggygr".to_string()));
}

#[test]
fn test_compute_feedback_duplicates() {
    let fb = compute_feedback("12+21=33", "11+11=22").map(|f| f.to_string());
    assert_eq!(fb, Ok("grgrggyy".to_string()));
    assert!(compute_feedback("1+2=3", "1+2=33").is_err());
}

#[test]
fn test_matches_feedback() {
    let guess = record("1+3=4", "ggygr");
    assert!(matches_feedback("1+2=3", &guess));
    assert!(!matches_feedback("1+3=4", &guess));
    assert!(!matches_feedback("12+3=15", &guess));
}

proptest! {
    #[test]
    fn secret_reproduces_its_own_feedback(
        secret in "[0-9+=]{6}",
        guess in "[0-9+=]{6}",
    ) {
        let feedback = compute_feedback(&secret, &guess);
        prop_assert!(feedback.is_ok());
        if let Ok(feedback) = feedback {
            let record = GuessRecord::new(guess.clone(), feedback);
            prop_assert!(record.is_ok());
            if let Ok(record) = record {
                prop_assert!(matches_feedback(&secret, &record));
            }
        }
    }
}
