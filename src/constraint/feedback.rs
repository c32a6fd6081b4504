use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::constraint::errors::ConstraintError;

/// Per-position signal returned for a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Green,
    Yellow,
    Red,
}

impl Color {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' => Some(Color::Green),
            'y' => Some(Color::Yellow),
            'r' => Some(Color::Red),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Color::Green => 'g',
            Color::Yellow => 'y',
            Color::Red => 'r',
        }
    }
}

/// The colors for one guess, one per equation position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feedback(Vec<Color>);

impl Feedback {
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|c| *c == Color::Green)
    }
}

impl FromStr for Feedback {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, found)| {
                Color::from_char(found).ok_or(ConstraintError::InvalidColor { position, found })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Feedback)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for color in &self.0 {
            write!(f, "{}", color.to_char())?;
        }
        Ok(())
    }
}

/// A guessed equation together with the feedback it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    equation: String,
    feedback: Feedback,
}

impl GuessRecord {
    /// # Errors
    ///
    /// Returns an error if the feedback does not cover every character.
    pub fn new(equation: impl Into<String>, feedback: Feedback) -> Result<Self, ConstraintError> {
        let equation = equation.into();
        let length = equation.chars().count();
        if length != feedback.len() {
            return Err(ConstraintError::LengthMismatch {
                expected: length,
                actual: feedback.len(),
            });
        }
        Ok(Self { equation, feedback })
    }

    /// # Errors
    ///
    /// Returns an error on an unknown color or a length mismatch.
    pub fn parse(equation: &str, feedback: &str) -> Result<Self, ConstraintError> {
        Self::new(equation, feedback.parse()?)
    }

    pub fn equation(&self) -> &str {
        &self.equation
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn len(&self) -> usize {
        self.feedback.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feedback.is_empty()
    }
}

/// Scores `guess` against `secret` the Wordle way: greens first, then
/// yellows consume the secret's unmatched occurrences left to right.
///
/// # Errors
///
/// Returns an error if the two strings differ in length.
pub fn compute_feedback(secret: &str, guess: &str) -> Result<Feedback, ConstraintError> {
    let secret: Vec<char> = secret.chars().collect();
    let guess: Vec<char> = guess.chars().collect();
    if secret.len() != guess.len() {
        return Err(ConstraintError::LengthMismatch {
            expected: secret.len(),
            actual: guess.len(),
        });
    }

    let mut colors: Vec<Color> = secret
        .iter()
        .zip(&guess)
        .map(|(s, g)| if s == g { Color::Green } else { Color::Red })
        .collect();

    let mut unmatched: HashMap<char, usize> = HashMap::new();
    for (s, color) in secret.iter().zip(&colors) {
        if *color != Color::Green {
            *unmatched.entry(*s).or_insert(0) += 1;
        }
    }

    for (g, color) in guess.iter().zip(colors.iter_mut()) {
        if *color == Color::Green {
            continue;
        }
        if let Some(left) = unmatched.get_mut(g)
            && *left > 0
        {
            *left -= 1;
            *color = Color::Yellow;
        }
    }

    Ok(Feedback(colors))
}

/// Whether `candidate`, had it been the secret, would have produced exactly
/// the feedback recorded for the guess.
pub fn matches_feedback(candidate: &str, record: &GuessRecord) -> bool {
    let matched = compute_feedback(candidate, record.equation())
        .is_ok_and(|feedback| feedback == *record.feedback());
    if !matched {
        trace!(
            "Candidate '{}' does not reproduce {} -> {}",
            candidate,
            record.equation(),
            record.feedback()
        );
    }
    matched
}
