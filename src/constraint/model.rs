use std::collections::BTreeSet;
use std::fmt;

/// Everything the feedback so far says about one symbol.
///
/// `green_positions` and `banned_positions` are kept disjoint. Occurrence
/// bounds are inclusive; a fresh constraint allows anything from zero up to
/// the equation length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolConstraint {
    min_count: usize,
    max_count: usize,
    green_positions: BTreeSet<usize>,
    banned_positions: BTreeSet<usize>,
    has_conflict: bool,
}

impl SymbolConstraint {
    pub fn new(length: usize) -> Self {
        Self {
            min_count: 0,
            max_count: length,
            green_positions: BTreeSet::new(),
            banned_positions: BTreeSet::new(),
            has_conflict: false,
        }
    }

    /// Constraint for a symbol that occurs exactly once (the `=` separator).
    pub fn exactly_once() -> Self {
        Self {
            min_count: 1,
            max_count: 1,
            ..Self::new(1)
        }
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn green_positions(&self) -> &BTreeSet<usize> {
        &self.green_positions
    }

    pub fn banned_positions(&self) -> &BTreeSet<usize> {
        &self.banned_positions
    }

    pub fn has_conflict(&self) -> bool {
        self.has_conflict
    }

    /// Red-only feedback: the symbol never appears.
    pub fn is_forbidden(&self) -> bool {
        self.min_count == 0 && self.max_count == 0
    }

    pub fn is_exact(&self) -> bool {
        self.min_count == self.max_count
    }

    pub fn allows_count(&self, count: usize) -> bool {
        (self.min_count..=self.max_count).contains(&count)
    }

    pub fn is_banned_at(&self, position: usize) -> bool {
        self.banned_positions.contains(&position)
    }

    pub fn is_green_at(&self, position: usize) -> bool {
        self.green_positions.contains(&position)
    }

    pub(crate) fn set_bounds(&mut self, min_count: usize, max_count: usize) {
        self.min_count = min_count;
        self.max_count = max_count;
    }

    /// Returns `false` when the position had been banned, which is a
    /// contradiction; the green wins.
    pub(crate) fn add_green(&mut self, position: usize) -> bool {
        let was_banned = self.banned_positions.remove(&position);
        self.green_positions.insert(position);
        !was_banned
    }

    /// Returns `false` (and keeps the green) when the position is green.
    pub(crate) fn add_banned(&mut self, position: usize) -> bool {
        if self.green_positions.contains(&position) {
            return false;
        }
        self.banned_positions.insert(position);
        true
    }

    pub(crate) fn clear_greens(&mut self) {
        self.green_positions.clear();
    }

    pub(crate) fn mark_conflict(&mut self) {
        self.has_conflict = true;
    }
}

fn write_positions(f: &mut fmt::Formatter, positions: &BTreeSet<usize>) -> fmt::Result {
    write!(f, "{{")?;
    for (i, pos) in positions.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", pos)?;
    }
    write!(f, "}}")
}

impl fmt::Display for SymbolConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "min={} max={} green=", self.min_count, self.max_count)?;
        write_positions(f, &self.green_positions)?;
        write!(f, " banned=")?;
        write_positions(f, &self.banned_positions)?;
        if self.has_conflict {
            write!(f, " CONFLICT")?;
        }
        Ok(())
    }
}
