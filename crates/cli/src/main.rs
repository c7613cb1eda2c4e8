use clap::{Parser, Subcommand};
use erflow_core::config::data_dir_from_env_value;
use erflow_core::constants::DATA_DIR_ENV;
use erflow_core::{BoardError, BoardResult, BoardStore, CardId, CoreConfig};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "erflow")]
#[command(about = "ErFlow emergency department whiteboard CLI")]
struct Cli {
    /// Directory holding the board file
    #[arg(long, env = DATA_DIR_ENV)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a DSEO clipboard export and append it to the board
    ImportDseo {
        /// Text file to read (stdin if omitted)
        file: Option<PathBuf>,
    },
    /// Replace the board with the cards of a JSON export
    ImportJson {
        /// JSON export file
        file: PathBuf,
    },
    /// Write the board as a dated JSON export
    Export {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// List cards
    List {
        /// Only cards whose patient name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Show the number of cards per triage colour
    Counts,
    /// Add a blank card
    Add,
    /// Remove a card
    Remove {
        /// Card id
        id: String,
    },
    /// Move a card one place up
    MoveUp {
        /// Card id
        id: String,
    },
    /// Move a card one place down
    MoveDown {
        /// Card id
        id: String,
    },
    /// Collapse every card
    CollapseAll,
    /// Expand every card
    ExpandAll,
    /// Delete the whole board
    Clear,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'erflow --help' for commands");
        return Ok(());
    };

    let cfg = CoreConfig::new(data_dir_from_env_value(cli.data_dir))?;
    let store = BoardStore::new(Arc::new(cfg));

    if let Err(e) = run(command, &store) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Commands, store: &BoardStore) -> BoardResult<()> {
    match command {
        Commands::ImportDseo { file } => {
            let text = read_source(file.as_deref())?;
            let cards = store.import_dseo(&text)?;
            println!("Imported {} card(s)", cards.len());
            for card in &cards {
                println!("{}  {}", card.id, card.summary_line());
            }
        }
        Commands::ImportJson { file } => {
            let text = read_source(Some(&file))?;
            let cards = store.import_json(&text)?;
            println!("Restored {} card(s) from {}", cards.len(), file.display());
        }
        Commands::Export { out } => {
            let export = store.export()?;
            let path = out.join(&export.file_name);
            std::fs::write(&path, export.json).map_err(BoardError::FileWrite)?;
            println!("Exported board to {}", path.display());
        }
        Commands::List { search } => {
            let board = store.load()?;
            let cards = board.search(search.as_deref().unwrap_or(""));
            if cards.is_empty() {
                println!("No cards found.");
            } else {
                for card in cards {
                    println!("{}  {}", card.id, card.summary_line());
                }
            }
        }
        Commands::Counts => {
            let counts = store.load()?.color_counts();
            println!("Rosso:  {}", counts.rosso);
            println!("Giallo: {}", counts.giallo);
            println!("Blu:    {}", counts.blu);
            println!("Verde:  {}", counts.verde);
            println!("Bianco: {}", counts.bianco);
            println!("Totale: {}", counts.total);
        }
        Commands::Add => {
            let id = store.modify(|board| Ok(board.add()))?;
            println!("Added card {}", id);
        }
        Commands::Remove { id } => {
            let id = CardId::parse(&id)?;
            let removed = store.modify(|board| board.remove(&id))?;
            println!("Removed card {}", removed.id);
        }
        Commands::MoveUp { id } => {
            let id = CardId::parse(&id)?;
            store.modify(|board| board.move_up(&id))?;
            println!("Moved card {} up", id);
        }
        Commands::MoveDown { id } => {
            let id = CardId::parse(&id)?;
            store.modify(|board| board.move_down(&id))?;
            println!("Moved card {} down", id);
        }
        Commands::CollapseAll => {
            store.modify(|board| {
                board.collapse_all();
                Ok(())
            })?;
            println!("Collapsed all cards");
        }
        Commands::ExpandAll => {
            store.modify(|board| {
                board.expand_all();
                Ok(())
            })?;
            println!("Expanded all cards");
        }
        Commands::Clear => {
            store.clear()?;
            println!("Board cleared");
        }
    }

    Ok(())
}

/// Reads import text from a file, or from stdin when no file is given.
fn read_source(file: Option<&Path>) -> BoardResult<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(BoardError::SourceUnavailable),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(BoardError::SourceUnavailable)?;
            Ok(text)
        }
    }
}
