use std::sync::Arc;

use crate::model::word::Word;

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Per-character verdict of an answer compared with the hidden syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharStatus {
    /// Same character at the same position.
    Correct,
    /// Both strings have a character here, but they differ.
    Wrong,
    /// The answer is longer than the syllable.
    Extra,
    /// The answer is shorter than the syllable.
    Missing,
}

/// One position of the character diff.
///
/// `ch` is the typed character, except for `Missing` where it is the
/// character the answer lacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharFeedback {
    pub status: CharStatus,
    pub ch: char,
}

impl CharFeedback {
    #[must_use]
    pub fn new(status: CharStatus, ch: char) -> Self {
        Self { status, ch }
    }
}

/// Outcome of checking one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerCheck {
    pub correct: bool,
    pub feedback: Vec<CharFeedback>,
}

impl AnswerCheck {
    fn rejected() -> Self {
        Self {
            correct: false,
            feedback: Vec::new(),
        }
    }
}

/// Position-by-position comparison of `expected` and `input`.
///
/// Works on Unicode scalar values; callers normalize beforehand.
#[must_use]
pub fn diff_chars(expected: &str, input: &str) -> Vec<CharFeedback> {
    let expected: Vec<char> = expected.chars().collect();
    let input: Vec<char> = input.chars().collect();
    let len = expected.len().max(input.len());

    (0..len)
        .filter_map(|i| match (expected.get(i), input.get(i)) {
            (Some(e), Some(a)) if e == a => Some(CharFeedback::new(CharStatus::Correct, *a)),
            (Some(_), Some(a)) => Some(CharFeedback::new(CharStatus::Wrong, *a)),
            (None, Some(a)) => Some(CharFeedback::new(CharStatus::Extra, *a)),
            (Some(e), None) => Some(CharFeedback::new(CharStatus::Missing, *e)),
            (None, None) => None,
        })
        .collect()
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

/// One drill instance: a word with a single hidden syllable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    word: Arc<Word>,
    hidden_index: usize,
    first_attempt_correct: Option<bool>,
}

impl Card {
    #[must_use]
    pub fn new(word: Arc<Word>, hidden_index: usize) -> Self {
        Self {
            word,
            hidden_index,
            first_attempt_correct: None,
        }
    }

    /// Rehydrate a card from a saved session, keeping its first-attempt verdict.
    #[must_use]
    pub fn from_persisted(
        word: Arc<Word>,
        hidden_index: usize,
        first_attempt_correct: Option<bool>,
    ) -> Self {
        Self {
            word,
            hidden_index,
            first_attempt_correct,
        }
    }

    #[must_use]
    pub fn word(&self) -> &Word {
        &self.word
    }

    /// Shared handle to the word, for callers that need to keep it.
    #[must_use]
    pub fn word_handle(&self) -> Arc<Word> {
        Arc::clone(&self.word)
    }

    #[must_use]
    pub fn hidden_index(&self) -> usize {
        self.hidden_index
    }

    #[must_use]
    pub fn first_attempt_correct(&self) -> Option<bool> {
        self.first_attempt_correct
    }

    /// The hidden syllable, or `None` when the index does not point at one.
    #[must_use]
    pub fn expected(&self) -> Option<&str> {
        self.word.syllable(self.hidden_index)
    }

    #[must_use]
    pub fn prompt(&self) -> String {
        self.word.hidden(self.hidden_index)
    }

    /// Prompt followed by `[ipa]` and the translation when present.
    #[must_use]
    pub fn full_prompt(&self) -> String {
        let mut details = Vec::with_capacity(2);
        if !self.word.ipa().is_empty() {
            details.push(format!("[{}]", self.word.ipa()));
        }
        if !self.word.translation().is_empty() {
            details.push(self.word.translation().to_owned());
        }

        let prompt = self.prompt();
        if details.is_empty() {
            prompt
        } else {
            format!("{prompt} {}", details.join(" "))
        }
    }

    /// Compares `input` with the hidden syllable, ignoring surrounding
    /// whitespace and case.
    ///
    /// The first call locks `first_attempt_correct`; later calls leave it as is.
    /// A card whose hidden index is out of range always answers incorrect with
    /// no feedback and does not lock.
    pub fn check_answer(&mut self, input: &str) -> AnswerCheck {
        let Some(expected) = self.expected() else {
            return AnswerCheck::rejected();
        };

        let expected = normalize(expected);
        let input = normalize(input);
        let correct = expected == input;
        let feedback = diff_chars(&expected, &input);

        if self.first_attempt_correct.is_none() {
            self.first_attempt_correct = Some(correct);
        }

        AnswerCheck { correct, feedback }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
