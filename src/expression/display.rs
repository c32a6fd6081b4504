use std::fmt;

use crate::expression::token::{Operator, OperatorSet, Token};

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for OperatorSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for op in self.iter() {
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(digits) => write!(f, "{}", digits),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// Concatenates a token sequence back into equation text.
pub fn tokens_to_string(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.iter().map(Token::len).sum());
    for token in tokens {
        match token {
            Token::Number(digits) => out.push_str(digits),
            Token::Operator(op) => out.push(op.symbol()),
        }
    }
    out
}
