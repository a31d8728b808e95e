mod commands;
mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storage::Storage;

#[derive(Debug, Parser)]
#[command(name = "recall", about = "Syllable recall drills for vocabulary decks", version)]
struct Cli {
    /// Directory holding deck files and saved sessions
    #[arg(long, global = true, env = "RECALL_DECK_DIR", default_value = "decks")]
    deck_dir: PathBuf,

    /// Disable ANSI colors
    #[arg(long, global = true, env = "RECALL_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List decks with their word and session counts
    List,

    /// Create an empty deck
    Create {
        /// Deck name
        name: String,
    },

    /// Import a CSV word list (columns: word, IPA, japanese) as a new deck
    Import {
        /// Path to the CSV file
        csv: PathBuf,
        /// Deck name
        name: String,
    },

    /// Study a deck, resuming a saved session if there is one
    Study {
        /// Deck name
        name: String,
        /// Number of cards for a new session (0 or unset: the whole deck)
        #[arg(long, env = "RECALL_CARDS")]
        cards: Option<usize>,
    },

    /// Show cumulative stats for a deck
    Stats {
        /// Deck name
        name: String,
    },

    /// Reset a deck's stats
    Reset {
        /// Deck name
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let use_color = !cli.no_color;

    // Keep storage setup in the binary glue so services stay backend-agnostic.
    let storage = Storage::json(&cli.deck_dir)?;
    log::debug!("using deck directory {}", cli.deck_dir.display());

    match cli.command {
        Command::List => commands::list(&storage)?,
        Command::Create { name } => commands::create(&storage, &name)?,
        Command::Import { csv, name } => commands::import(&storage, &csv, &name)?,
        Command::Study { name, cards } => commands::study(&storage, &name, cards, use_color).await?,
        Command::Stats { name } => commands::stats(&storage, &name)?,
        Command::Reset { name, yes } => commands::reset(&storage, &name, yes)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
