//! Per-letter color feedback for a guess against the target word.

use crate::wordbank::{WORD_LENGTH, Word};

/// Color of one letter tile.
///
/// Variant order is the ranking used for key colors: `Gray < Yellow < Green`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LetterColor {
    Gray,
    Yellow,
    Green,
}

impl LetterColor {
    #[must_use]
    pub fn to_emoji(self) -> char {
        match self {
            Self::Green => '🟩',
            Self::Yellow => '🟨',
            Self::Gray => '⬛',
        }
    }
}

pub type Feedback = [LetterColor; WORD_LENGTH];

/// Compute the feedback for `guess` against `target`.
///
/// Exact matches are claimed first so that a repeated guess letter can only
/// turn yellow while unmatched copies remain in the target.
#[must_use]
pub fn compute_feedback(guess: &Word, target: &Word) -> Feedback {
    let guess = guess.as_bytes();
    let mut remaining: [Option<u8>; WORD_LENGTH] = [None; WORD_LENGTH];
    let mut feedback = [LetterColor::Gray; WORD_LENGTH];

    // First pass: greens
    for (i, (&g, &t)) in guess.iter().zip(target.as_bytes()).enumerate() {
        if g == t {
            feedback[i] = LetterColor::Green;
        } else {
            remaining[i] = Some(t);
        }
    }

    // Second pass: yellows, consuming the leftmost unmatched target letter
    for (i, &g) in guess.iter().enumerate() {
        if feedback[i] == LetterColor::Green {
            continue;
        }
        if let Some(slot) = remaining.iter_mut().find(|slot| **slot == Some(g)) {
            feedback[i] = LetterColor::Yellow;
            *slot = None;
        }
    }
    feedback
}

/// True when every slot is green.
#[must_use]
pub fn is_solved(feedback: &Feedback) -> bool {
    feedback.iter().all(|&c| c == LetterColor::Green)
}
