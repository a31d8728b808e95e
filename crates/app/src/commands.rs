use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use recall_core::Clock;
use recall_core::model::{DeckStats, SessionStats};
use recall_core::stats::format_elapsed;
use services::{DeckService, SessionEngine, SessionOutcome};
use storage::Storage;

use crate::terminal::TerminalConsole;

type CmdResult = Result<(), Box<dyn Error>>;

pub fn list(storage: &Storage) -> CmdResult {
    let items = DeckService::from(storage).list()?;
    if items.is_empty() {
        println!("No decks available. Create or import a deck first.");
        return Ok(());
    }

    println!("Available decks:");
    for (i, item) in items.iter().enumerate() {
        let saved = if item.has_saved_session {
            ", session in progress"
        } else {
            ""
        };
        match (item.words, item.sessions) {
            (Some(words), Some(sessions)) => println!(
                "{}. {} ({words} words, {sessions} sessions{saved})",
                i + 1,
                item.name
            ),
            _ => println!("{}. {} (could not be read)", i + 1, item.name),
        }
    }
    Ok(())
}

pub fn create(storage: &Storage, name: &str) -> CmdResult {
    let deck = DeckService::from(storage).create(name)?;
    println!("Deck '{}' created successfully.", deck.name());
    Ok(())
}

pub fn import(storage: &Storage, csv: &Path, name: &str) -> CmdResult {
    let deck = DeckService::from(storage).import_csv(csv, name)?;
    println!(
        "Deck '{}' imported successfully with {} words.",
        deck.name(),
        deck.words().len()
    );
    Ok(())
}

/// Runs the blocking session loop off the async runtime while a Ctrl-C
/// listener raises the flag the console polls.
pub async fn study(storage: &Storage, name: &str, cards: Option<usize>, use_color: bool) -> CmdResult {
    let service = DeckService::from(storage);
    let mut deck = service.load(name)?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    let listener = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::debug!("ctrl-c received");
            flag.store(true, Ordering::SeqCst);
        }
    });

    let sessions = Arc::clone(&storage.sessions);
    let (deck, outcome) = tokio::task::spawn_blocking(move || {
        let mut console = TerminalConsole::new(use_color, interrupted);
        let outcome = SessionEngine::new(&mut deck, sessions, rand::rng(), Clock::System)
            .with_card_limit(cards)
            .run(&mut console);
        (deck, outcome)
    })
    .await?;
    listener.abort();

    match outcome? {
        SessionOutcome::NothingToDo => {
            println!("No cards available for this session.");
        }
        SessionOutcome::Completed(stats) | SessionOutcome::Cancelled(stats) => {
            print_session_stats(&stats);
            service.save(&deck)?;
        }
    }
    Ok(())
}

fn print_session_stats(stats: &SessionStats) {
    println!("\nSession Statistics:");
    println!("Time spent: {}", format_elapsed(stats.elapsed_secs()));
    println!("Cards studied: {}", stats.studied);
    println!(
        "Cards remembered on first attempt: {} out of {} ({}%)",
        stats.remembered,
        stats.total_cards,
        stats.remembered_percentage()
    );
}

pub fn stats(storage: &Storage, name: &str) -> CmdResult {
    let deck = DeckService::from(storage).load(name)?;
    println!("Deck '{}' ({} words)", deck.name(), deck.words().len());
    print_deck_stats(deck.stats());
    Ok(())
}

fn print_deck_stats(stats: &DeckStats) {
    println!("Total time: {}", format_elapsed(stats.total_time_secs()));
    println!("Sessions: {}", stats.total_sessions());
    println!("Cards studied: {}", stats.total_studied());
    println!(
        "Remembered on first attempt: {} ({}%)",
        stats.total_remembered(),
        stats.remembered_percentage()
    );
    println!(
        "Average time per session: {}",
        format_elapsed(stats.average_time_per_session())
    );
}

pub fn reset(storage: &Storage, name: &str, yes: bool) -> CmdResult {
    let service = DeckService::from(storage);
    // fail early on a missing deck, before asking
    let deck = service.load(name)?;

    if !yes && !confirm(&format!(
        "Are you sure you want to reset all statistics for deck '{}'? (y/n): ",
        deck.name()
    ))? {
        println!("Reset cancelled.");
        return Ok(());
    }

    service.reset_stats(deck.name())?;
    println!("Deck '{}' has been reset.", deck.name());
    Ok(())
}

fn confirm(question: &str) -> io::Result<bool> {
    let mut out = io::stdout().lock();
    write!(out, "{question}")?;
    out.flush()?;
    drop(out);

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
