//! The seam between the session engine and whoever answers the cards.

use std::io;

use recall_core::model::AnswerCheck;

/// One line of user input, or a request to stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    /// Ctrl-C or end of input.
    Interrupted,
}

/// What the engine reports back while a session runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent<'a> {
    Started {
        deck_name: &'a str,
        total: usize,
    },
    Resumed {
        deck_name: &'a str,
        remaining: usize,
        total: usize,
    },
    Correct {
        remaining: usize,
    },
    Incorrect {
        check: &'a AnswerCheck,
        expected: Option<&'a str>,
    },
    /// Progress was written and can be resumed later.
    Saved,
    Completed,
}

pub trait SessionConsole {
    /// Show `prompt` and wait for one answer.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if input cannot be read.
    fn ask(&mut self, prompt: &str) -> io::Result<Answer>;

    fn notify(&mut self, event: SessionEvent<'_>);
}
