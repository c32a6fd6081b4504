use std::collections::BTreeMap;

use log::{debug, warn};

use crate::constraint::errors::ConstraintError;
use crate::constraint::feedback::{Color, GuessRecord};
use crate::constraint::map::ConstraintMap;
use crate::constraint::symbol::Symbol;
use crate::expression::OperatorSet;

/// Color counts of one symbol within a single guess.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    green: usize,
    yellow: usize,
    red: usize,
}

impl Tally {
    fn record(&mut self, color: Color) {
        match color {
            Color::Green => self.green += 1,
            Color::Yellow => self.yellow += 1,
            Color::Red => self.red += 1,
        }
    }

    /// The symbol occurs at least this often.
    fn lower(&self) -> usize {
        self.green + self.yellow
    }

    /// A red copy pins the count to exactly the green and yellow copies.
    fn upper(&self) -> Option<usize> {
        (self.red > 0).then_some(self.green + self.yellow)
    }
}

impl ConstraintMap {
    /// Rebuilds the map from scratch by replaying the whole history.
    ///
    /// # Errors
    ///
    /// Returns an error if any record does not fit the equation length or
    /// contains an unknown symbol.
    pub fn derive(
        history: &[GuessRecord],
        length: usize,
        operators: &OperatorSet,
    ) -> Result<Self, ConstraintError> {
        let mut map = Self::initialize(length, operators);
        for record in history {
            map.update(record)?;
        }
        map.log_summary();
        Ok(map)
    }

    /// Folds one more guess into the map. Returns whether any symbol's
    /// constraint changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not fit the equation length or
    /// contains an unknown symbol; the map is left untouched in that case.
    pub fn update(&mut self, record: &GuessRecord) -> Result<bool, ConstraintError> {
        if record.len() != self.length {
            return Err(ConstraintError::LengthMismatch {
                expected: self.length,
                actual: record.len(),
            });
        }

        let mut symbols = Vec::with_capacity(record.len());
        for (position, found) in record.equation().chars().enumerate() {
            let symbol =
                Symbol::from_char(found).ok_or(ConstraintError::UnknownSymbol { position, found })?;
            symbols.push(symbol);
        }

        let before = self.entries.clone();
        let guess_index = self.guesses_applied;
        let mut tallies: BTreeMap<Symbol, Tally> = BTreeMap::new();

        for (position, (symbol, color)) in symbols
            .into_iter()
            .zip(record.feedback().colors().iter().copied())
            .enumerate()
        {
            if !self.entries.contains_key(&symbol) {
                debug!(
                    "Ignoring '{}' at {}: not part of this round's symbols",
                    symbol, position
                );
                continue;
            }

            tallies.entry(symbol).or_default().record(color);

            match color {
                Color::Green => {
                    self.mark_green(symbol, position);
                    if symbol.is_operator() {
                        self.operator_greens.push((guess_index, position));
                    }
                    if symbol == Symbol::Equals {
                        self.equals_greens.insert(position);
                    }
                }
                Color::Yellow | Color::Red => self.mark_banned(symbol, position),
            }
        }

        for (symbol, tally) in tallies {
            self.merge_bounds(symbol, tally);
        }

        self.guesses_applied += 1;
        self.check_operator_adjacency();
        self.settle_equals()?;

        Ok(self.entries != before)
    }

    fn mark_green(&mut self, symbol: Symbol, position: usize) {
        let rivals: Vec<Symbol> = self
            .green_owners(position)
            .filter(|owner| *owner != symbol)
            .collect();
        for rival in &rivals {
            warn!(
                "Conflict: '{}' and '{}' are both green at position {}",
                rival, symbol, position
            );
            if let Some(constraint) = self.entries.get_mut(rival) {
                constraint.mark_conflict();
            }
        }

        let Some(constraint) = self.entries.get_mut(&symbol) else {
            return;
        };
        if !rivals.is_empty() {
            constraint.mark_conflict();
        }
        if !constraint.add_green(position) {
            warn!(
                "Conflict: '{}' green at position {} where it was ruled out",
                symbol, position
            );
            constraint.mark_conflict();
        }
    }

    fn mark_banned(&mut self, symbol: Symbol, position: usize) {
        let Some(constraint) = self.entries.get_mut(&symbol) else {
            return;
        };
        if !constraint.add_banned(position) {
            warn!(
                "Conflict: '{}' ruled out at position {} where it was green",
                symbol, position
            );
            constraint.mark_conflict();
        }
    }

    /// Merges one guess's occurrence bounds for `symbol`.
    ///
    /// Bounds normally tighten (`max` of lower bounds, `min` of upper
    /// bounds). When the new evidence contradicts an exact count, or would
    /// leave no admissible count at all, the symbol is flagged and its bounds
    /// widen to the union of old and new instead.
    fn merge_bounds(&mut self, symbol: Symbol, tally: Tally) {
        let length = self.length;
        let Some(constraint) = self.entries.get_mut(&symbol) else {
            return;
        };

        let (old_min, old_max) = (constraint.min_count(), constraint.max_count());
        let lower = tally.lower();
        let upper = tally.upper();

        let contradicts_exact = constraint.is_exact()
            && (lower > old_max || upper.is_some_and(|u| u < old_min));
        let min = old_min.max(lower);
        let max = upper.map_or(old_max, |u| old_max.min(u));

        if contradicts_exact || min > max {
            let widened_min = old_min.min(lower);
            let widened_max = old_max.max(upper.unwrap_or(length));
            warn!(
                "Conflict on '{}': had {}..={}, guess says {}..={}; widening to {}..={}",
                symbol,
                old_min,
                old_max,
                lower,
                upper.unwrap_or(length),
                widened_min,
                widened_max
            );
            constraint.set_bounds(widened_min, widened_max);
            constraint.mark_conflict();
        } else {
            constraint.set_bounds(min, max);
        }
    }

    /// Operators can never be adjacent, so greens from different guesses at
    /// neighbouring positions taint every operator.
    fn check_operator_adjacency(&mut self) {
        if self.structural_conflict {
            return;
        }

        let adjacent = self.operator_greens.iter().any(|&(guess_a, pos_a)| {
            self.operator_greens
                .iter()
                .any(|&(guess_b, pos_b)| guess_a != guess_b && pos_a + 1 == pos_b)
        });
        if !adjacent {
            return;
        }

        warn!("Conflict: green operators from different guesses are adjacent");
        self.structural_conflict = true;
        for (symbol, constraint) in self.entries.iter_mut() {
            if symbol.is_operator() {
                constraint.mark_conflict();
            }
        }
    }

    /// `=` occurs exactly once; contradicting greens fall back to searching
    /// every position.
    fn settle_equals(&mut self) -> Result<(), ConstraintError> {
        let contradictory = self.equals_greens.len() > 1;
        let equals = self
            .entries
            .get_mut(&Symbol::Equals)
            .ok_or(ConstraintError::MissingSymbol(Symbol::Equals))?;

        equals.set_bounds(1, 1);
        if contradictory {
            if !equals.green_positions().is_empty() {
                warn!(
                    "Conflict: '=' green at {:?}; searching every position",
                    self.equals_greens
                );
            }
            equals.clear_greens();
            equals.mark_conflict();
        }
        Ok(())
    }
}
