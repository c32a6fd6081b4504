use std::fmt;

use crate::expression::Operator;

/// Atomic subject of a constraint: a digit, an operator, or the `=` separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Digit(u8),
    Op(Operator),
    Equals,
}

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => c.to_digit(10).map(|d| Symbol::Digit(d as u8)),
            '=' => Some(Symbol::Equals),
            _ => Operator::from_char(c).map(Symbol::Op),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Symbol::Digit(d) => char::from(b'0' + d),
            Symbol::Op(op) => op.symbol(),
            Symbol::Equals => '=',
        }
    }

    pub fn is_digit(self) -> bool {
        matches!(self, Symbol::Digit(_))
    }

    pub fn is_operator(self) -> bool {
        matches!(self, Symbol::Op(_))
    }

    pub fn digits() -> impl Iterator<Item = Symbol> {
        (0..=9).map(Symbol::Digit)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
