use std::sync::Arc;

use thiserror::Error;

use crate::model::session::SessionStats;
use crate::model::word::Word;
use crate::stats::percentage;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck name cannot be empty")]
    EmptyName,

    #[error("total time must be a finite, non-negative number of seconds (got {0})")]
    InvalidTotalTime(f64),
}

//
// ─── STATS ─────────────────────────────────────────────────────────────────────
//

/// Cumulative study counters for a deck.
///
/// Counters only grow through [`DeckStats::record_session`]; the only way
/// back to zero is [`Deck::reset_stats`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckStats {
    total_time_secs: f64,
    total_sessions: u64,
    total_studied: u64,
    total_remembered: u64,
}

impl DeckStats {
    /// Rehydrate counters from a persisted deck.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::InvalidTotalTime` for negative or non-finite time.
    pub fn from_persisted(
        total_time_secs: f64,
        total_sessions: u64,
        total_studied: u64,
        total_remembered: u64,
    ) -> Result<Self, DeckError> {
        if !total_time_secs.is_finite() || total_time_secs < 0.0 {
            return Err(DeckError::InvalidTotalTime(total_time_secs));
        }

        Ok(Self {
            total_time_secs,
            total_sessions,
            total_studied,
            total_remembered,
        })
    }

    #[must_use]
    pub fn total_time_secs(&self) -> f64 {
        self.total_time_secs
    }

    #[must_use]
    pub fn total_sessions(&self) -> u64 {
        self.total_sessions
    }

    #[must_use]
    pub fn total_studied(&self) -> u64 {
        self.total_studied
    }

    #[must_use]
    pub fn total_remembered(&self) -> u64 {
        self.total_remembered
    }

    /// Mean session length in seconds; `0.0` before the first session.
    #[must_use]
    pub fn average_time_per_session(&self) -> f64 {
        if self.total_sessions == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let sessions = self.total_sessions as f64;
        self.total_time_secs / sessions
    }

    /// Share of attempts that were first-try recalls, floored.
    #[must_use]
    pub fn remembered_percentage(&self) -> u64 {
        percentage(self.total_remembered, self.total_studied)
    }

    /// Adds one finished or cancelled session to the counters.
    pub fn record_session(&mut self, session: &SessionStats) {
        self.total_time_secs += session.elapsed_secs();
        self.total_sessions = self.total_sessions.saturating_add(1);
        self.total_studied = self.total_studied.saturating_add(session.studied as u64);
        self.total_remembered = self
            .total_remembered
            .saturating_add(session.remembered as u64);
    }
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// A named collection of words plus cumulative study statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    name: String,
    words: Vec<Arc<Word>>,
    stats: DeckStats,
}

impl Deck {
    /// Creates an empty deck.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::EmptyName` if name is empty or whitespace-only.
    pub fn new(name: impl Into<String>) -> Result<Self, DeckError> {
        Self::from_persisted(name, Vec::new(), DeckStats::default())
    }

    /// Rehydrate a deck from storage.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::EmptyName` if name is empty or whitespace-only.
    pub fn from_persisted(
        name: impl Into<String>,
        words: impl IntoIterator<Item = Word>,
        stats: DeckStats,
    ) -> Result<Self, DeckError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DeckError::EmptyName);
        }

        Ok(Self {
            name: name.trim().to_owned(),
            words: words.into_iter().map(Arc::new).collect(),
            stats,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn words(&self) -> &[Arc<Word>] {
        &self.words
    }

    #[must_use]
    pub fn stats(&self) -> &DeckStats {
        &self.stats
    }

    pub fn add_word(&mut self, word: Word) {
        self.words.push(Arc::new(word));
    }

    pub fn reset_stats(&mut self) {
        self.stats = DeckStats::default();
    }

    pub fn record_session(&mut self, session: &SessionStats) {
        self.stats.record_session(session);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(secs: i64, studied: usize, remembered: usize) -> SessionStats {
        SessionStats {
            elapsed: Duration::seconds(secs),
            studied,
            remembered,
            total_cards: remembered,
        }
    }

    #[test]
    fn deck_requires_name() {
        assert_eq!(Deck::new("   ").unwrap_err(), DeckError::EmptyName);
        assert_eq!(Deck::new("  verbs ").unwrap().name(), "verbs");
    }

    #[test]
    fn record_session_accumulates() {
        let mut deck = Deck::new("fruits").unwrap();
        deck.record_session(&session(120, 10, 7));
        deck.record_session(&session(30, 3, 1));

        let stats = deck.stats();
        assert!((stats.total_time_secs() - 150.0).abs() < f64::EPSILON);
        assert_eq!(stats.total_sessions(), 2);
        assert_eq!(stats.total_studied(), 13);
        assert_eq!(stats.total_remembered(), 8);
    }

    #[test]
    fn reset_zeroes_counters_but_keeps_words() {
        let mut deck = Deck::new("fruits").unwrap();
        deck.add_word(Word::new("apple", ["ap", "ple"]).unwrap());
        deck.record_session(&session(60, 4, 2));

        deck.reset_stats();
        assert_eq!(deck.stats(), &DeckStats::default());
        assert_eq!(deck.words().len(), 1);
    }

    #[test]
    fn derived_stats_handle_empty_deck() {
        let stats = DeckStats::default();
        assert!(stats.average_time_per_session().abs() < f64::EPSILON);
        assert_eq!(stats.remembered_percentage(), 0);

        let stats = DeckStats::from_persisted(300.0, 4, 9, 3).unwrap();
        assert!((stats.average_time_per_session() - 75.0).abs() < f64::EPSILON);
        assert_eq!(stats.remembered_percentage(), 33);
    }

    #[test]
    fn persisted_stats_reject_negative_time() {
        assert_eq!(
            DeckStats::from_persisted(-1.0, 0, 0, 0).unwrap_err(),
            DeckError::InvalidTotalTime(-1.0)
        );
    }
}
