//! Interactive console for study sessions.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use recall_core::model::{CharFeedback, CharStatus};
use services::{Answer, SessionConsole, SessionEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
}

fn paint(text: &str, code: &str, use_color: bool) -> String {
    if use_color {
        format!("{code}{text}{}", Color::RESET)
    } else {
        text.to_owned()
    }
}

/// Render the character diff of an answer.
///
/// With colors: green correct, red wrong, yellow extra, dim `_` for missing.
/// Without: wrong characters in `[]`, extra ones in `()`, missing as `_`.
#[must_use]
pub fn render_feedback(feedback: &[CharFeedback], use_color: bool) -> String {
    feedback
        .iter()
        .map(|item| {
            let ch = item.ch.to_string();
            match (item.status, use_color) {
                (CharStatus::Correct, _) => paint(&ch, Color::GREEN, use_color),
                (CharStatus::Wrong, true) => paint(&ch, Color::RED, true),
                (CharStatus::Extra, true) => paint(&ch, Color::YELLOW, true),
                (CharStatus::Missing, true) => paint("_", Color::DIM, true),
                (CharStatus::Wrong, false) => format!("[{ch}]"),
                (CharStatus::Extra, false) => format!("({ch})"),
                (CharStatus::Missing, false) => "_".to_owned(),
            }
        })
        .collect()
}

/// Reads answers from stdin on a background thread so a Ctrl-C flag can be
/// noticed while waiting for input.
pub struct TerminalConsole {
    use_color: bool,
    interrupted: Arc<AtomicBool>,
    lines: Receiver<io::Result<String>>,
}

impl TerminalConsole {
    #[must_use]
    pub fn new(use_color: bool, interrupted: Arc<AtomicBool>) -> Self {
        let (tx, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self {
            use_color,
            interrupted,
            lines,
        }
    }

    fn wait_for_line(&self) -> io::Result<Answer> {
        loop {
            if self.interrupted.load(Ordering::SeqCst) {
                println!();
                return Ok(Answer::Interrupted);
            }
            match self.lines.recv_timeout(POLL_INTERVAL) {
                Ok(line) => return line.map(Answer::Text),
                Err(RecvTimeoutError::Timeout) => {}
                // end of input
                Err(RecvTimeoutError::Disconnected) => {
                    println!();
                    return Ok(Answer::Interrupted);
                }
            }
        }
    }
}

impl SessionConsole for TerminalConsole {
    fn ask(&mut self, prompt: &str) -> io::Result<Answer> {
        let mut out = io::stdout().lock();
        writeln!(out, "\nCard: {prompt}")?;
        write!(out, "Your answer (or 'exit'): ")?;
        out.flush()?;
        drop(out);
        self.wait_for_line()
    }

    fn notify(&mut self, event: SessionEvent<'_>) {
        match event {
            SessionEvent::Started { deck_name, total } => {
                println!(
                    "\nStarting session with {total} card(s) from deck {}",
                    paint(deck_name, Color::BOLD, self.use_color)
                );
                println!("For each card, type the missing syllable (___)");
                println!("Type 'exit' to save and exit the session");
                println!("{}", "-".repeat(50));
            }
            SessionEvent::Resumed {
                deck_name,
                remaining,
                total,
            } => {
                println!(
                    "\nResuming session for deck {}: {remaining} of {total} card(s) left",
                    paint(deck_name, Color::BOLD, self.use_color)
                );
                println!("Type 'exit' to save and exit the session");
                println!("{}", "-".repeat(50));
            }
            SessionEvent::Correct { remaining } => {
                println!(
                    "{} {remaining} card(s) left",
                    paint("Correct!", Color::GREEN, self.use_color)
                );
            }
            SessionEvent::Incorrect { check, expected } => {
                println!(
                    "{} {}",
                    paint("Incorrect:", Color::RED, self.use_color),
                    render_feedback(&check.feedback, self.use_color)
                );
                if let Some(expected) = expected {
                    println!("The correct answer was: {expected}");
                }
            }
            SessionEvent::Saved => println!("\nSession saved. You can continue later."),
            SessionEvent::Completed => {
                println!("\nCongratulations! You've completed the session.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::model::diff_chars;

    #[test]
    fn plain_feedback_marks_each_status() {
        assert_eq!(render_feedback(&diff_chars("na", "no"), false), "n[o]");
        assert_eq!(render_feedback(&diff_chars("ap", "apple"), false), "ap(p)(l)(e)");
        assert_eq!(render_feedback(&diff_chars("ban", "b"), false), "b__");
        assert_eq!(render_feedback(&[], false), "");
    }

    #[test]
    fn colored_feedback_wraps_characters() {
        let rendered = render_feedback(&diff_chars("na", "nu"), true);
        assert_eq!(rendered, "\x1b[32mn\x1b[0m\x1b[31mu\x1b[0m");

        let missing = render_feedback(&diff_chars("ab", "a"), true);
        assert!(missing.ends_with("\x1b[2m_\x1b[0m"));
    }
}
