use std::collections::HashMap;

use crate::constraint::Symbol;
use crate::expression::{Operator, Token};
use crate::utils::is_operand_literal;

use super::constants::MIN_LHS_TOKENS;
use super::types::{SearchLimits, SearchStats, Step};

/// Mutable state of one backtracking pass: the tokens placed so far and how
/// often each symbol has been used. Owned by a single pass, never shared.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub(crate) tokens: Vec<Token>,
    pub(crate) length: usize,
    used: HashMap<Symbol, usize>,
    pub(crate) stats: SearchStats,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Characters placed so far.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn usage(&self, symbol: Symbol) -> usize {
        self.used.get(&symbol).copied().unwrap_or(0)
    }

    /// Counts a visited node; returns `false` once the budget is spent.
    pub(crate) fn enter_node(&mut self, limits: &SearchLimits) -> bool {
        if let Some(max) = limits.max_nodes
            && self.stats.nodes >= max
        {
            self.stats.truncated = true;
            return false;
        }
        self.stats.nodes += 1;
        true
    }

    /// Places `c`, merging digits into the trailing number. The placement is
    /// undone again if it leaves the sequence invalid.
    pub(crate) fn place(&mut self, c: char) -> Option<Step> {
        let step = if let Some(op) = Operator::from_char(c) {
            self.tokens.push(Token::Operator(op));
            Step::Appended
        } else if c.is_ascii_digit() {
            match self.tokens.last_mut() {
                Some(Token::Number(digits)) => {
                    digits.push(c);
                    Step::Merged
                }
                _ => {
                    self.tokens.push(Token::Number(c.to_string()));
                    Step::Appended
                }
            }
        } else {
            return None;
        };
        self.length += 1;

        if is_sequence_valid(&self.tokens) {
            Some(step)
        } else {
            self.retract(step);
            None
        }
    }

    pub(crate) fn retract(&mut self, step: Step) {
        match step {
            Step::Merged => {
                if let Some(Token::Number(digits)) = self.tokens.last_mut() {
                    digits.pop();
                }
            }
            Step::Appended => {
                self.tokens.pop();
            }
        }
        self.length -= 1;
    }

    /// Places `c` as `symbol`, runs `body` one level deeper, then restores
    /// both the token list and the usage counter. Returns `false` without
    /// calling `body` when the placement is invalid.
    pub(crate) fn descend<F>(&mut self, c: char, symbol: Symbol, body: F) -> bool
    where
        F: FnOnce(&mut Self),
    {
        let Some(step) = self.place(c) else {
            return false;
        };
        *self.used.entry(symbol).or_insert(0) += 1;

        body(self);

        if let Some(count) = self.used.get_mut(&symbol) {
            *count -= 1;
        }
        self.retract(step);
        true
    }

    /// A finished left-hand side: at least `a op b` and ending on a number.
    pub fn is_complete(&self) -> bool {
        self.tokens.len() >= MIN_LHS_TOKENS
            && self.tokens.last().is_some_and(Token::is_number)
            && self.tokens.iter().all(|t| match t {
                Token::Number(digits) => is_operand_literal(digits),
                Token::Operator(_) => true,
            })
    }
}

/// Checks the sequence after its last token changed:
/// - no operator first, and no operator right after another
/// - no `a ^ b ^ c` towers
/// - no number starting with `0`, which also rules out a bare `0` operand
pub fn is_sequence_valid(tokens: &[Token]) -> bool {
    let Some(last) = tokens.last() else {
        return false;
    };
    let previous = tokens.len().checked_sub(2).and_then(|i| tokens.get(i));
    let before_previous = tokens.len().checked_sub(3).and_then(|i| tokens.get(i));

    match last {
        Token::Operator(op) => {
            if !previous.is_some_and(Token::is_number) {
                return false;
            }
            !(*op == Operator::Pow
                && matches!(before_previous, Some(Token::Operator(Operator::Pow))))
        }
        Token::Number(digits) => !digits.starts_with('0'),
    }
}
