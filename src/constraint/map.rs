use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::{debug, trace};

use crate::constraint::errors::ConstraintError;
use crate::constraint::model::SymbolConstraint;
use crate::constraint::symbol::Symbol;
use crate::expression::OperatorSet;

/// Constraints for every symbol a round can use: the ten digits, the
/// round's operators and `=`. Symbols absent from the map may never appear.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintMap {
    pub(crate) length: usize,
    pub(crate) operators: OperatorSet,
    pub(crate) entries: BTreeMap<Symbol, SymbolConstraint>,
    /// Number of guesses folded in so far.
    pub(crate) guesses_applied: usize,
    /// `(guess index, position)` of every green operator seen.
    pub(crate) operator_greens: Vec<(usize, usize)>,
    /// Every distinct position `=` has been green at, across guesses.
    pub(crate) equals_greens: BTreeSet<usize>,
    pub(crate) structural_conflict: bool,
}

impl ConstraintMap {
    /// Baseline map with no information: every count from zero to `length`,
    /// except `=` which occurs exactly once.
    pub fn initialize(length: usize, operators: &OperatorSet) -> Self {
        let mut entries = BTreeMap::new();
        for symbol in Symbol::digits().chain(operators.iter().map(Symbol::Op)) {
            entries.insert(symbol, SymbolConstraint::new(length));
        }
        entries.insert(Symbol::Equals, SymbolConstraint::exactly_once());

        debug!(
            "Initialized constraints for length {} with operators '{}'",
            length, operators
        );

        Self {
            length,
            operators: *operators,
            entries,
            guesses_applied: 0,
            operator_greens: Vec::new(),
            equals_greens: BTreeSet::new(),
            structural_conflict: false,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    pub fn guesses_applied(&self) -> usize {
        self.guesses_applied
    }

    pub fn get(&self, symbol: Symbol) -> Option<&SymbolConstraint> {
        self.entries.get(&symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &SymbolConstraint)> {
        self.entries.iter().map(|(s, c)| (*s, c))
    }

    /// # Errors
    ///
    /// A missing `=` entry means the map was not built by [`Self::initialize`].
    pub fn equals(&self) -> Result<&SymbolConstraint, ConstraintError> {
        self.get(Symbol::Equals)
            .ok_or(ConstraintError::MissingSymbol(Symbol::Equals))
    }

    /// Two different guesses put green operators next to each other.
    pub fn has_structural_conflict(&self) -> bool {
        self.structural_conflict
    }

    pub fn has_conflict(&self) -> bool {
        self.structural_conflict || self.entries.values().any(SymbolConstraint::has_conflict)
    }

    /// Symbols confirmed green at `position`. More than one means the
    /// feedback contradicts itself.
    pub fn green_owners(&self, position: usize) -> impl Iterator<Item = Symbol> + '_ {
        self.entries
            .iter()
            .filter(move |(_, c)| c.is_green_at(position))
            .map(|(s, _)| *s)
    }

    /// The symbol fixed at `position` by green feedback, if any.
    pub fn required_at(&self, position: usize) -> Option<Symbol> {
        self.green_owners(position).next()
    }

    /// The symbol may appear at all.
    pub fn is_symbol_allowed(&self, symbol: Symbol) -> bool {
        self.get(symbol).is_some_and(|c| !c.is_forbidden())
    }

    /// The symbol is not banned at `position` and no other symbol is green there.
    pub fn is_symbol_allowed_at(&self, symbol: Symbol, position: usize) -> bool {
        let Some(constraint) = self.get(symbol) else {
            return false;
        };
        if constraint.is_banned_at(position) {
            return false;
        }
        self.green_owners(position).all(|owner| owner == symbol)
    }

    /// Full validity pass over a complete equation: every character allowed
    /// globally and at its position, every count within bounds.
    pub fn is_candidate_valid(&self, candidate: &str) -> bool {
        let mut counts: HashMap<Symbol, usize> = HashMap::new();
        let mut length = 0;

        for (position, c) in candidate.chars().enumerate() {
            let Some(symbol) = Symbol::from_char(c) else {
                return false;
            };
            if !self.is_symbol_allowed(symbol) || !self.is_symbol_allowed_at(symbol, position) {
                trace!("'{}' rejected: '{}' not allowed at {}", candidate, c, position);
                return false;
            }
            *counts.entry(symbol).or_insert(0) += 1;
            length += 1;
        }

        if length != self.length {
            return false;
        }

        self.entries.iter().all(|(symbol, constraint)| {
            let count = counts.get(symbol).copied().unwrap_or(0);
            let ok = constraint.allows_count(count);
            if !ok {
                trace!(
                    "'{}' rejected: '{}' appears {} times, allowed {}..={}",
                    candidate,
                    symbol,
                    count,
                    constraint.min_count(),
                    constraint.max_count()
                );
            }
            ok
        })
    }

    /// Dumps every symbol's constraint at debug level.
    pub fn log_summary(&self) {
        debug!("===== Derived Constraints =====");
        for (symbol, constraint) in &self.entries {
            debug!("  Symbol: {} | {}", symbol, constraint);
        }
    }
}
