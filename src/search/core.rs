use log::{debug, trace};

use crate::constraint::{ConstraintMap, Symbol};
use crate::expression::{OperatorSet, Token};

use super::state::SearchState;
use super::types::{SearchLimits, SearchOutcome, SearchStats};

/// Depth-first enumeration of every left-hand side of a fixed length that the
/// constraint map admits.
///
/// The map is only read, so one map can back several searches running in
/// parallel; all per-pass bookkeeping lives in [`SearchState`].
#[derive(Debug, Clone)]
pub struct LhsSearch<'a> {
    lhs_len: usize,
    rhs_len: usize,
    map: &'a ConstraintMap,
    limits: SearchLimits,
    alphabet: Vec<Symbol>,
    fixed: Vec<Option<Symbol>>,
}

impl<'a> LhsSearch<'a> {
    pub fn new(
        lhs_len: usize,
        rhs_len: usize,
        operators: &OperatorSet,
        map: &'a ConstraintMap,
        limits: SearchLimits,
    ) -> Self {
        // Operators are tried before digits
        let alphabet: Vec<Symbol> = operators
            .iter()
            .map(Symbol::Op)
            .chain(Symbol::digits())
            .filter(|symbol| map.is_symbol_allowed(*symbol))
            .collect();
        let fixed = (0..lhs_len).map(|p| map.required_at(p)).collect();

        Self {
            lhs_len,
            rhs_len,
            map,
            limits,
            alphabet,
            fixed,
        }
    }

    pub fn lhs_len(&self) -> usize {
        self.lhs_len
    }

    /// Collects every admitted left-hand side.
    pub fn generate(&self) -> SearchOutcome {
        let mut sequences = Vec::new();
        let stats = self.for_each(|tokens| sequences.push(tokens.to_vec()));
        SearchOutcome { sequences, stats }
    }

    /// Calls `visit` with each admitted left-hand side as it is found.
    pub fn for_each<F>(&self, mut visit: F) -> SearchStats
    where
        F: FnMut(&[Token]),
    {
        let mut state = SearchState::new();
        if self.lhs_len > 0 {
            self.walk(&mut state, &mut visit);
        }
        debug!(
            "LHS search ({} + {}): {} nodes, {} sequences{}",
            self.lhs_len,
            self.rhs_len,
            state.stats.nodes,
            state.stats.emitted,
            if state.stats.truncated {
                ", truncated"
            } else {
                ""
            }
        );
        state.stats
    }

    fn walk<F>(&self, state: &mut SearchState, visit: &mut F)
    where
        F: FnMut(&[Token]),
    {
        if !state.enter_node(&self.limits) || !self.minima_fit(state) {
            return;
        }

        let position = state.length();
        if position == self.lhs_len {
            if state.is_complete() {
                state.stats.emitted += 1;
                visit(state.tokens());
            }
            return;
        }

        let choices: &[Symbol] = match self.fixed.get(position) {
            Some(Some(required)) => std::slice::from_ref(required),
            _ => &self.alphabet,
        };

        for &symbol in choices {
            if state.stats.truncated {
                return;
            }
            if !self.admits(symbol, position, state) {
                continue;
            }
            state.descend(symbol.to_char(), symbol, |next| self.walk(next, &mut *visit));
        }
    }

    fn admits(&self, symbol: Symbol, position: usize, state: &SearchState) -> bool {
        if symbol == Symbol::Equals {
            return false;
        }
        let Some(constraint) = self.map.get(symbol) else {
            return false;
        };
        if constraint.is_forbidden() || state.usage(symbol) >= constraint.max_count() {
            return false;
        }
        let allowed = self.map.is_symbol_allowed_at(symbol, position);
        if !allowed {
            trace!("'{}' excluded at {}", symbol, position);
        }
        allowed
    }

    /// Unmet operator minima must fit in the rest of the left side; all unmet
    /// minima must fit in the rest of the equation.
    fn minima_fit(&self, state: &SearchState) -> bool {
        let remaining_lhs = self.lhs_len.saturating_sub(state.length());
        let mut unmet_operators = 0;
        let mut unmet_total = 0;

        for (symbol, constraint) in self.map.iter() {
            if symbol == Symbol::Equals {
                continue;
            }
            let unmet = constraint.min_count().saturating_sub(state.usage(symbol));
            if symbol.is_operator() {
                unmet_operators += unmet;
            }
            unmet_total += unmet;
        }

        unmet_operators <= remaining_lhs && unmet_total <= remaining_lhs + self.rhs_len
    }
}
