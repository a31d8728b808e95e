//! Persisted shapes for decks and sessions.
//!
//! These mirror the domain types so repositories can serialize/deserialize
//! without leaking serde into `recall-core`. Converting back into the domain
//! re-runs its validation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use recall_core::model::{Card, Deck, DeckStats, SessionState, Word};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    #[serde(alias = "word")]
    pub text: String,
    #[serde(default)]
    pub syllables: Vec<String>,
    #[serde(default)]
    pub ipa: String,
    #[serde(default, alias = "japanese")]
    pub translation: String,
}

impl WordRecord {
    #[must_use]
    pub fn from_word(word: &Word) -> Self {
        Self {
            text: word.text().to_owned(),
            syllables: word.syllables().to_vec(),
            ipa: word.ipa().to_owned(),
            translation: word.translation().to_owned(),
        }
    }

    /// # Errors
    ///
    /// Returns `recall_core::Error::Word` if the text is blank.
    pub fn into_word(self) -> Result<Word, recall_core::Error> {
        Ok(Word::new(self.text, self.syllables)?
            .with_ipa(self.ipa)
            .with_translation(self.translation))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckStatsRecord {
    #[serde(default)]
    pub total_time: f64,
    #[serde(default)]
    pub total_sessions: u64,
    #[serde(default)]
    pub total_studied: u64,
    #[serde(default)]
    pub total_remembered: u64,
}

impl DeckStatsRecord {
    #[must_use]
    pub fn from_stats(stats: &DeckStats) -> Self {
        Self {
            total_time: stats.total_time_secs(),
            total_sessions: stats.total_sessions(),
            total_studied: stats.total_studied(),
            total_remembered: stats.total_remembered(),
        }
    }

    /// # Errors
    ///
    /// Returns `recall_core::Error::Deck` for an invalid total time.
    pub fn into_stats(self) -> Result<DeckStats, recall_core::Error> {
        Ok(DeckStats::from_persisted(
            self.total_time,
            self.total_sessions,
            self.total_studied,
            self.total_remembered,
        )?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckRecord {
    pub name: String,
    #[serde(default)]
    pub words: Vec<WordRecord>,
    #[serde(default)]
    pub stats: DeckStatsRecord,
}

impl DeckRecord {
    #[must_use]
    pub fn from_deck(deck: &Deck) -> Self {
        Self {
            name: deck.name().to_owned(),
            words: deck
                .words()
                .iter()
                .map(|word| WordRecord::from_word(word))
                .collect(),
            stats: DeckStatsRecord::from_stats(deck.stats()),
        }
    }

    /// Convert the record back into a domain `Deck`.
    ///
    /// # Errors
    ///
    /// Returns `recall_core::Error` if the name, a word, or the stats fail validation.
    pub fn into_deck(self) -> Result<Deck, recall_core::Error> {
        let words = self
            .words
            .into_iter()
            .map(WordRecord::into_word)
            .collect::<Result<Vec<_>, _>>()?;
        let stats = self.stats.into_stats()?;
        Ok(Deck::from_persisted(self.name, words, stats)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub word: WordRecord,
    pub hidden_index: usize,
    #[serde(default)]
    pub first_attempt_correct: Option<bool>,
}

impl CardRecord {
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        Self {
            word: WordRecord::from_word(card.word()),
            hidden_index: card.hidden_index(),
            first_attempt_correct: card.first_attempt_correct(),
        }
    }

    /// # Errors
    ///
    /// Returns `recall_core::Error::Word` if the embedded word is invalid.
    pub fn into_card(self) -> Result<Card, recall_core::Error> {
        let word = Arc::new(self.word.into_word()?);
        Ok(Card::from_persisted(
            word,
            self.hidden_index,
            self.first_attempt_correct,
        ))
    }
}

/// On-disk session document. Every field is required; a document missing
/// one does not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub deck_name: String,
    pub cards: Vec<CardRecord>,
    pub remaining_indices: Vec<usize>,
    pub studied_count: usize,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_timestamp: DateTime<Utc>,
}

impl SessionRecord {
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            deck_name: state.deck_name().to_owned(),
            cards: state.cards().iter().map(CardRecord::from_card).collect(),
            remaining_indices: state.remaining_indices().to_vec(),
            studied_count: state.studied_count(),
            start_timestamp: state.started_at(),
        }
    }

    /// Convert the record back into a domain `SessionState`.
    ///
    /// # Errors
    ///
    /// Returns `recall_core::Error` if a card or the remaining set is invalid.
    pub fn into_state(self) -> Result<SessionState, recall_core::Error> {
        let cards = self
            .cards
            .into_iter()
            .map(CardRecord::into_card)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SessionState::from_persisted(
            self.deck_name,
            cards,
            self.remaining_indices,
            self.studied_count,
            self.start_timestamp,
        )?)
    }
}
