use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::model::card::{AnswerCheck, Card};
use crate::stats::percentage;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("deck name cannot be empty")]
    EmptyDeckName,

    #[error("remaining index {index} is out of range for {len} cards")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("remaining index {index} appears more than once")]
    DuplicateIndex { index: usize },
}

//
// ─── SESSION STATS ─────────────────────────────────────────────────────────────
//

/// Figures computed when a session ends, completed or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub elapsed: Duration,
    /// Answer attempts, wrong repeats included.
    pub studied: usize,
    /// Cards whose first check was correct, across every card of the session.
    pub remembered: usize,
    pub total_cards: usize,
}

impl SessionStats {
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let millis = self.elapsed.num_milliseconds() as f64;
        millis / 1000.0
    }

    #[must_use]
    pub fn remembered_percentage(&self) -> u64 {
        percentage(self.remembered as u64, self.total_cards as u64)
    }
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// In-progress state of a study session; this is what gets saved on cancel
/// and restored on resume.
///
/// `cards` keeps creation order and a card's position is its identity;
/// `remaining` lists the positions not yet answered correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    deck_name: String,
    cards: Vec<Card>,
    remaining: Vec<usize>,
    studied_count: usize,
    started_at: DateTime<Utc>,
}

impl SessionState {
    /// A new session where every card is still to be answered.
    #[must_use]
    pub fn fresh(deck_name: impl Into<String>, cards: Vec<Card>, started_at: DateTime<Utc>) -> Self {
        let remaining = (0..cards.len()).collect();
        Self {
            deck_name: deck_name.into(),
            cards,
            remaining,
            studied_count: 0,
            started_at,
        }
    }

    /// Rehydrate a saved session.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError` if the deck name is blank or `remaining`
    /// holds an index outside `cards` or the same index twice.
    pub fn from_persisted(
        deck_name: impl Into<String>,
        cards: Vec<Card>,
        remaining: Vec<usize>,
        studied_count: usize,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionStateError> {
        let deck_name = deck_name.into();
        if deck_name.trim().is_empty() {
            return Err(SessionStateError::EmptyDeckName);
        }

        let mut seen = vec![false; cards.len()];
        for &index in &remaining {
            match seen.get_mut(index) {
                None => {
                    return Err(SessionStateError::IndexOutOfRange {
                        index,
                        len: cards.len(),
                    });
                }
                Some(true) => return Err(SessionStateError::DuplicateIndex { index }),
                Some(slot) => *slot = true,
            }
        }

        Ok(Self {
            deck_name,
            cards,
            remaining,
            studied_count,
            started_at,
        })
    }

    #[must_use]
    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn remaining_indices(&self) -> &[usize] {
        &self.remaining
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.remaining.is_empty()
    }

    #[must_use]
    pub fn studied_count(&self) -> usize {
        self.studied_count
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Restart the session clock. Only meaningful before the first answer of
    /// a fresh session; a resumed session keeps its original start.
    pub fn mark_started(&mut self, at: DateTime<Utc>) {
        self.started_at = at;
    }

    /// Counts one attempt on the card at `index` and checks `input`.
    ///
    /// A correct answer removes the card from the remaining set for good.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::IndexOutOfRange` if `index` is not a card.
    pub fn record_answer(
        &mut self,
        index: usize,
        input: &str,
    ) -> Result<AnswerCheck, SessionStateError> {
        let len = self.cards.len();
        let card = self
            .cards
            .get_mut(index)
            .ok_or(SessionStateError::IndexOutOfRange { index, len })?;

        self.studied_count = self.studied_count.saturating_add(1);
        let check = card.check_answer(input);
        if check.correct {
            self.remaining.retain(|&i| i != index);
        }

        Ok(check)
    }

    /// Session figures after the session has run for `elapsed`.
    #[must_use]
    pub fn stats(&self, elapsed: Duration) -> SessionStats {
        SessionStats {
            elapsed,
            studied: self.studied_count,
            remembered: self
                .cards
                .iter()
                .filter(|card| card.first_attempt_correct() == Some(true))
                .count(),
            total_cards: self.cards.len(),
        }
    }
}
