use std::sync::Arc;

use rand::Rng;
use rand::seq::IndexedRandom;

use recall_core::Clock;
use recall_core::model::{Deck, SessionState, SessionStateError, SessionStats};
use storage::SessionRepository;

use super::plan::SessionBuilder;
use super::progress::SessionProgress;
use crate::console::{Answer, SessionConsole, SessionEvent};
use crate::error::SessionError;

const EXIT_COMMAND: &str = "exit";

/// Lifecycle of a `SessionEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotPrepared,
    Active,
    Completed,
    Cancelled,
}

/// How a call to [`SessionEngine::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// No card could be drawn; the deck was left untouched.
    NothingToDo,
    /// Every card was answered correctly and the saved session was removed.
    Completed(SessionStats),
    /// The user stopped early; progress was saved for the next run.
    Cancelled(SessionStats),
}

impl SessionOutcome {
    #[must_use]
    pub fn stats(&self) -> Option<&SessionStats> {
        match self {
            Self::NothingToDo => None,
            Self::Completed(stats) | Self::Cancelled(stats) => Some(stats),
        }
    }
}

/// Runs one study session over a deck.
///
/// The engine reads the deck's words, resumes or generates the session, drives
/// the answer loop through a [`SessionConsole`] and finally rolls the session
/// figures into the deck's stats. Saving the deck is left to the caller.
pub struct SessionEngine<'d, R> {
    deck: &'d mut Deck,
    sessions: Arc<dyn SessionRepository>,
    rng: R,
    clock: Clock,
    card_limit: Option<usize>,
    state: Option<SessionState>,
    phase: SessionPhase,
    resumed: bool,
}

impl<'d, R: Rng> SessionEngine<'d, R> {
    #[must_use]
    pub fn new(
        deck: &'d mut Deck,
        sessions: Arc<dyn SessionRepository>,
        rng: R,
        clock: Clock,
    ) -> Self {
        Self {
            deck,
            sessions,
            rng,
            clock,
            card_limit: None,
            state: None,
            phase: SessionPhase::NotPrepared,
            resumed: false,
        }
    }

    /// Number of words for a fresh session; `None` or `Some(0)` means all.
    #[must_use]
    pub fn with_card_limit(mut self, limit: Option<usize>) -> Self {
        self.card_limit = limit;
        self
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    /// Whether the current state came from a saved session.
    #[must_use]
    pub fn is_resumed(&self) -> bool {
        self.resumed
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.state.as_ref().map(SessionProgress::from_state)
    }

    /// Restore the saved session for this deck, or generate fresh cards.
    ///
    /// A saved session that cannot be read, fails validation, or belongs to a
    /// different deck is ignored and left on disk. Calling this again after
    /// the session is prepared does nothing.
    pub fn prepare(&mut self) -> SessionProgress {
        if let Some(state) = &self.state {
            return SessionProgress::from_state(state);
        }

        let state = match self.load_resumable() {
            Some(state) => {
                self.resumed = true;
                log::info!(
                    "resuming session for {:?}: {} of {} card(s) remaining",
                    state.deck_name(),
                    state.remaining_indices().len(),
                    state.cards().len()
                );
                state
            }
            None => {
                let plan = SessionBuilder::new(self.deck)
                    .with_card_limit(self.card_limit)
                    .build(&mut self.rng);
                log::info!(
                    "new session for {:?} with {} card(s)",
                    self.deck.name(),
                    plan.total()
                );
                SessionState::fresh(self.deck.name(), plan.cards, self.clock.now())
            }
        };

        let progress = SessionProgress::from_state(&state);
        self.state = Some(state);
        self.phase = SessionPhase::Active;
        progress
    }

    fn load_resumable(&self) -> Option<SessionState> {
        let name = self.deck.name();
        match self.sessions.load_session(name) {
            Ok(Some(state)) if state.deck_name() == name => Some(state),
            Ok(Some(state)) => {
                log::warn!(
                    "saved session belongs to deck {:?}, not {name:?}; starting fresh",
                    state.deck_name()
                );
                None
            }
            Ok(None) => None,
            Err(err) => {
                log::warn!("ignoring unreadable session for {name:?}: {err}");
                None
            }
        }
    }

    /// Drive the session until every card is answered or the user stops.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` if the session already ended,
    /// `SessionError::Storage` if progress cannot be saved on exit, and
    /// `SessionError::Console` if input cannot be read, carrying the save
    /// error too when progress could not be kept.
    pub fn run(&mut self, console: &mut dyn SessionConsole) -> Result<SessionOutcome, SessionError> {
        match self.phase {
            SessionPhase::NotPrepared => {
                self.prepare();
            }
            SessionPhase::Active => {}
            SessionPhase::Completed | SessionPhase::Cancelled => {
                return Err(SessionError::Finished);
            }
        }

        let Some(mut state) = self.state.take() else {
            return Err(SessionError::Finished);
        };

        if state.is_finished() {
            log::info!("nothing to study in {:?}", state.deck_name());
            self.state = Some(state);
            return Ok(SessionOutcome::NothingToDo);
        }

        if self.resumed {
            console.notify(SessionEvent::Resumed {
                deck_name: state.deck_name(),
                remaining: state.remaining_indices().len(),
                total: state.cards().len(),
            });
        } else {
            state.mark_started(self.clock.now());
            console.notify(SessionEvent::Started {
                deck_name: state.deck_name(),
                total: state.cards().len(),
            });
        }

        let result = self.answer_loop(&mut state, console);
        let outcome = match result {
            Ok(cancelled) => self.finish(&state, cancelled, console),
            Err(err) => Err(err),
        };
        self.state = Some(state);
        outcome
    }

    /// Returns `true` when the user stopped before the remaining set emptied.
    fn answer_loop(
        &mut self,
        state: &mut SessionState,
        console: &mut dyn SessionConsole,
    ) -> Result<bool, SessionError> {
        loop {
            let Some(&index) = state.remaining_indices().choose(&mut self.rng) else {
                return Ok(false);
            };
            let prompt = state
                .card(index)
                .map(|card| card.full_prompt())
                .ok_or(SessionStateError::IndexOutOfRange {
                    index,
                    len: state.cards().len(),
                })?;

            let input = match console.ask(&prompt) {
                Ok(Answer::Text(text)) if is_exit(&text) => return Ok(true),
                Ok(Answer::Text(text)) => text,
                Ok(Answer::Interrupted) => {
                    log::info!("session interrupted");
                    return Ok(true);
                }
                Err(err) => {
                    log::error!("failed to read answer: {err}");
                    self.phase = SessionPhase::Cancelled;
                    let unsaved = self.sessions.save_session(state).err();
                    if let Some(save_err) = &unsaved {
                        log::error!("could not save session after read failure: {save_err}");
                    }
                    return Err(SessionError::Console { source: err, unsaved });
                }
            };

            let check = state.record_answer(index, &input)?;
            if check.correct {
                log::debug!("card {index} correct");
                console.notify(SessionEvent::Correct {
                    remaining: state.remaining_indices().len(),
                });
            } else {
                log::debug!("card {index} incorrect");
                console.notify(SessionEvent::Incorrect {
                    check: &check,
                    expected: state.card(index).and_then(|card| card.expected()),
                });
            }
        }
    }

    fn finish(
        &mut self,
        state: &SessionState,
        cancelled: bool,
        console: &mut dyn SessionConsole,
    ) -> Result<SessionOutcome, SessionError> {
        let stats = state.stats(self.clock.elapsed_since(state.started_at()));

        let outcome = if cancelled {
            self.phase = SessionPhase::Cancelled;
            if let Err(err) = self.sessions.save_session(state) {
                log::error!("failed to save session for {:?}: {err}", state.deck_name());
                return Err(err.into());
            }
            console.notify(SessionEvent::Saved);
            SessionOutcome::Cancelled(stats)
        } else {
            self.phase = SessionPhase::Completed;
            if let Err(err) = self.sessions.delete_session(state.deck_name()) {
                log::warn!("could not remove finished session for {:?}: {err}", state.deck_name());
            }
            console.notify(SessionEvent::Completed);
            SessionOutcome::Completed(stats)
        };

        self.deck.record_session(&stats);
        log::info!(
            "session for {:?} ended: {} attempt(s), {} of {} remembered",
            state.deck_name(),
            stats.studied,
            stats.remembered,
            stats.total_cards
        );
        Ok(outcome)
    }
}

fn is_exit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use recall_core::model::Word;
    use recall_core::time::fixed_clock;
    use storage::Storage;

    struct Always(&'static str);

    impl SessionConsole for Always {
        fn ask(&mut self, _prompt: &str) -> std::io::Result<Answer> {
            Ok(Answer::Text(self.0.to_owned()))
        }

        fn notify(&mut self, _event: SessionEvent<'_>) {}
    }

    fn one_word_deck() -> Deck {
        let mut deck = Deck::new("solo").unwrap();
        deck.add_word(Word::new("cat", ["cat"]).unwrap());
        deck
    }

    #[test]
    fn exit_is_trimmed_and_case_insensitive() {
        assert!(is_exit("exit"));
        assert!(is_exit("  EXIT \n"));
        assert!(is_exit("Exit"));
        assert!(!is_exit("exits"));
        assert!(!is_exit(""));
    }

    #[test]
    fn phases_follow_the_lifecycle() {
        let storage = Storage::in_memory();
        let mut deck = one_word_deck();
        let mut engine = SessionEngine::new(
            &mut deck,
            storage.sessions.clone(),
            StdRng::seed_from_u64(1),
            fixed_clock(),
        );
        assert_eq!(engine.phase(), SessionPhase::NotPrepared);
        assert!(engine.state().is_none());

        let progress = engine.prepare();
        assert_eq!(engine.phase(), SessionPhase::Active);
        assert_eq!(progress.total, 1);
        assert!(!engine.is_resumed());

        let outcome = engine.run(&mut Always("cat")).unwrap();
        assert!(matches!(outcome, SessionOutcome::Completed(_)));
        assert_eq!(engine.phase(), SessionPhase::Completed);
        assert!(engine.progress().unwrap().is_complete);

        assert!(matches!(
            engine.run(&mut Always("cat")),
            Err(SessionError::Finished)
        ));
    }

    #[test]
    fn exit_before_any_answer_counts_nothing_but_a_session() {
        let storage = Storage::in_memory();
        let mut deck = one_word_deck();
        let outcome = SessionEngine::new(
            &mut deck,
            storage.sessions.clone(),
            StdRng::seed_from_u64(1),
            fixed_clock(),
        )
        .run(&mut Always("exit"))
        .unwrap();

        let stats = outcome.stats().copied().unwrap();
        assert!(matches!(outcome, SessionOutcome::Cancelled(_)));
        assert_eq!(stats.studied, 0);
        assert_eq!(stats.remembered, 0);
        assert_eq!(deck.stats().total_sessions(), 1);
        assert!(storage.sessions.load_session("solo").unwrap().is_some());
    }
}
