use std::sync::Arc;

use rand::Rng;
use rand::seq::index;

use recall_core::model::{Card, Deck, Word};

/// Cards drawn for a fresh session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub cards: Vec<Card>,
    /// Selected words left out because they have no syllables.
    pub skipped: usize,
}

impl SessionPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Picks the words of a fresh session and hides one syllable in each.
pub struct SessionBuilder<'a> {
    words: &'a [Arc<Word>],
    card_limit: Option<usize>,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(deck: &'a Deck) -> Self {
        Self::from_words(deck.words())
    }

    #[must_use]
    pub fn from_words(words: &'a [Arc<Word>]) -> Self {
        Self {
            words,
            card_limit: None,
        }
    }

    /// Cap the number of selected words. `None` and `Some(0)` select the
    /// whole deck.
    #[must_use]
    pub fn with_card_limit(mut self, limit: Option<usize>) -> Self {
        self.card_limit = limit;
        self
    }

    /// Number of words the plan will select.
    #[must_use]
    pub fn selection_size(&self) -> usize {
        match self.card_limit {
            None | Some(0) => self.words.len(),
            Some(limit) => limit.min(self.words.len()),
        }
    }

    /// Select words uniformly without replacement, then pick a uniform hidden
    /// syllable for each drillable one.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> SessionPlan {
        let amount = self.selection_size();
        let selected = index::sample(rng, self.words.len(), amount);

        let mut cards = Vec::with_capacity(amount);
        let mut skipped = 0;
        for i in selected {
            let Some(word) = self.words.get(i) else {
                continue;
            };
            if !word.is_drillable() {
                skipped += 1;
                continue;
            }
            let hidden_index = rng.random_range(0..word.syllables().len());
            cards.push(Card::new(Arc::clone(word), hidden_index));
        }

        if skipped > 0 {
            log::debug!("skipped {skipped} word(s) without syllables");
        }
        SessionPlan { cards, skipped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn build_deck(count: usize) -> Deck {
        let mut deck = Deck::new("Test").unwrap();
        for i in 0..count {
            let text = format!("w{i}");
            deck.add_word(Word::new(text.clone(), ["x", text.as_str(), "y"]).unwrap());
        }
        deck
    }

    #[test]
    fn selects_exactly_the_requested_number_of_distinct_words() {
        let deck = build_deck(10);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = SessionBuilder::new(&deck)
                .with_card_limit(Some(4))
                .build(&mut rng);

            assert_eq!(plan.total(), 4);
            let texts: HashSet<_> = plan.cards.iter().map(|c| c.word().text()).collect();
            assert_eq!(texts.len(), 4);
        }
    }

    #[test]
    fn hidden_index_is_always_in_range() {
        let deck = build_deck(5);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = SessionBuilder::new(&deck).build(&mut rng);
            assert_eq!(plan.total(), 5);
            assert!(plan.cards.iter().all(|c| c.hidden_index() < 3));
            assert!(plan.cards.iter().all(|c| c.first_attempt_correct().is_none()));
        }
    }

    #[test]
    fn every_syllable_position_gets_hidden_eventually() {
        let deck = build_deck(1);
        let mut seen = HashSet::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let plan = SessionBuilder::new(&deck).build(&mut rng);
            seen.insert(plan.cards[0].hidden_index());
        }
        assert_eq!(seen, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn zero_and_none_mean_whole_deck_and_limit_is_capped() {
        let deck = build_deck(3);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(SessionBuilder::new(&deck).with_card_limit(Some(0)).selection_size(), 3);
        assert_eq!(SessionBuilder::new(&deck).with_card_limit(None).selection_size(), 3);
        let plan = SessionBuilder::new(&deck)
            .with_card_limit(Some(99))
            .build(&mut rng);
        assert_eq!(plan.total(), 3);
    }

    #[test]
    fn words_without_syllables_are_skipped() {
        let mut deck = build_deck(2);
        deck.add_word(Word::new("bare", Vec::<String>::new()).unwrap());
        let mut rng = StdRng::seed_from_u64(3);

        let plan = SessionBuilder::new(&deck).build(&mut rng);

        assert_eq!(plan.total(), 2);
        assert_eq!(plan.skipped, 1);
        assert!(plan.cards.iter().all(|c| c.word().text() != "bare"));
    }

    #[test]
    fn empty_deck_builds_an_empty_plan() {
        let deck = build_deck(0);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(SessionBuilder::new(&deck).build(&mut rng).is_empty());
    }
}
