use thiserror::Error;

/// Token shown in place of the hidden syllable.
pub const PLACEHOLDER: &str = "___";

/// Separator used when rendering a word syllable by syllable.
pub const SYLLABLE_SEPARATOR: &str = "-";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("word text cannot be empty")]
    EmptyText,
}

/// A word of a deck together with its syllable segmentation.
///
/// Words are immutable once loaded; decks and session cards share them
/// through `Arc<Word>` handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    syllables: Vec<String>,
    ipa: String,
    translation: String,
}

impl Word {
    /// Creates a word without pronunciation or translation.
    ///
    /// The syllables are kept as given; they are not checked against `text`.
    ///
    /// # Errors
    ///
    /// Returns `WordError::EmptyText` if `text` is empty or whitespace-only.
    pub fn new(
        text: impl Into<String>,
        syllables: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, WordError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(WordError::EmptyText);
        }

        Ok(Self {
            text,
            syllables: syllables.into_iter().map(Into::into).collect(),
            ipa: String::new(),
            translation: String::new(),
        })
    }

    #[must_use]
    pub fn with_ipa(mut self, ipa: impl Into<String>) -> Self {
        self.ipa = ipa.into();
        self
    }

    #[must_use]
    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = translation.into();
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn syllables(&self) -> &[String] {
        &self.syllables
    }

    #[must_use]
    pub fn syllable(&self, index: usize) -> Option<&str> {
        self.syllables.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn ipa(&self) -> &str {
        &self.ipa
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }

    /// A word without syllables cannot be drilled.
    #[must_use]
    pub fn is_drillable(&self) -> bool {
        !self.syllables.is_empty()
    }

    /// Renders the word with the syllable at `hidden_index` replaced by
    /// [`PLACEHOLDER`], e.g. `ap-___`.
    ///
    /// Falls back to `"{text}-___"` when the word has no syllables or the
    /// index is out of range.
    #[must_use]
    pub fn hidden(&self, hidden_index: usize) -> String {
        if hidden_index >= self.syllables.len() {
            return format!("{}{SYLLABLE_SEPARATOR}{PLACEHOLDER}", self.text);
        }

        self.syllables
            .iter()
            .enumerate()
            .map(|(i, syllable)| {
                if i == hidden_index {
                    PLACEHOLDER
                } else {
                    syllable.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join(SYLLABLE_SEPARATOR)
    }
}
