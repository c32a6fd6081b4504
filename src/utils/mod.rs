//! Utils module split into submodules

mod digits;
mod errors;
mod partitions;
mod validation;

pub use digits::{is_operand_literal, parse_literal};
pub use errors::UtilsError;
pub use partitions::compositions;
pub use validation::{
    MIN_EQUATION_LENGTH, REQUIRED_OPERATOR, normalize_line, parse_operator_spec,
    validate_feedback, validate_round_spec,
};

#[cfg(test)]
mod tests;
