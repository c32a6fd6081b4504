//! Expression module split into submodules for clarity

pub mod constants;
mod display;
mod errors;
mod eval;
mod token;
mod validator;

pub use display::tokens_to_string;
pub use errors::ExpressionError;
pub use eval::{evaluate, evaluate_with, safe_evaluate};
pub(crate) use eval::is_integer;
pub use token::{Operator, OperatorSet, Token};
pub use validator::ExpressionValidator;

#[cfg(test)]
mod tests;
