//! File-backed board persistence.
//!
//! The whole board lives in a single JSON file, `<data_dir>/draggable-cards.json`, in exactly
//! the format produced by [`export_json`]. Reading goes through the lenient JSON importer, so a
//! hand-edited or legacy file is coerced field by field rather than rejected.
//!
//! ## First run
//!
//! A missing file yields a board with one blank card, which is what the whiteboard shows the
//! first time it is opened. A file that cannot be parsed is moved aside to
//! `draggable-cards.json.corrupt` and replaced the same way. Clearing the board saves an empty
//! list, so a cleared board stays empty.
//!
//! ## Stable ids
//!
//! Cards loaded without a usable id, or with an id already taken, get a fresh one. Whenever that
//! happens the repaired board is saved before it is returned, so every id a caller sees can be
//! used in a later call.
//!
//! ## Writes
//!
//! Saves write a sibling temporary file and rename it over the board file, so a crash mid-write
//! never leaves a truncated board behind. Importers load, merge and save in one call; a parse
//! failure returns before anything is written.

use crate::board::Board;
use crate::card::CardRecord;
use crate::config::CoreConfig;
use crate::dseo::parse_dseo;
use crate::json::{export_file_name, export_json, import_json, import_json_counting_ids};
use crate::{BoardError, BoardResult};
use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

/// An export ready to be written or downloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardExport {
    /// Suggested file name, `erflow-cards-<YYYY-MM-DD>.json`.
    pub file_name: String,
    /// Pretty-printed JSON array of cards.
    pub json: String,
}

/// Service for loading and saving the board.
#[derive(Clone, Debug)]
pub struct BoardStore {
    cfg: Arc<CoreConfig>,
}

impl BoardStore {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn path(&self) -> PathBuf {
        self.cfg.board_file()
    }

    /// Loads the stored board, saving it first if it had to be created or repaired.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::FileRead`] if the file exists but cannot be read, or any storage
    /// error from [`save`](Self::save) when a created or repaired board is written back. A
    /// missing or corrupt file is not an error.
    pub fn load(&self) -> BoardResult<Board> {
        let path = self.path();
        let (board, repaired) = match fs::read_to_string(&path) {
            Ok(text) => match import_json_counting_ids(&text) {
                Ok((cards, generated)) => {
                    let mut board = Board::new();
                    let regenerated = board.append(cards);
                    let repaired = generated + regenerated > 0;
                    if repaired {
                        tracing::info!(generated, regenerated, "store: card ids repaired");
                    }
                    (board, repaired)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "store: failed to parse saved board");
                    self.set_aside_corrupt()?;
                    (first_run_board(), true)
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "store: no saved board, starting fresh");
                (first_run_board(), true)
            }
            Err(e) => return Err(BoardError::FileRead(e)),
        };

        if repaired {
            self.save(&board)?;
        }
        Ok(board)
    }

    /// Writes the board to disk, creating the data directory when needed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StorageDirCreation`], [`BoardError::Serialization`] or
    /// [`BoardError::FileWrite`].
    pub fn save(&self, board: &Board) -> BoardResult<()> {
        fs::create_dir_all(self.cfg.data_dir()).map_err(BoardError::StorageDirCreation)?;

        let json = export_json(board.cards())?;
        let path = self.path();
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, json).map_err(BoardError::FileWrite)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(BoardError::FileWrite(e));
        }

        tracing::debug!(path = %path.display(), cards = board.len(), "store: board saved");
        Ok(())
    }

    /// Empties the board. Later loads return an empty board, not the first-run card.
    ///
    /// # Errors
    ///
    /// Any storage error from [`save`](Self::save).
    pub fn clear(&self) -> BoardResult<()> {
        self.save(&Board::new())?;
        tracing::info!("store: board cleared");
        Ok(())
    }

    fn corrupt_path(&self) -> PathBuf {
        self.path().with_extension("json.corrupt")
    }

    fn set_aside_corrupt(&self) -> BoardResult<()> {
        let backup = self.corrupt_path();
        fs::rename(self.path(), &backup).map_err(BoardError::FileWrite)?;
        tracing::warn!(backup = %backup.display(), "store: unreadable board moved aside");
        Ok(())
    }

    /// Loads the board, applies `op`, and saves the result if `op` succeeded.
    pub fn modify<T>(&self, op: impl FnOnce(&mut Board) -> BoardResult<T>) -> BoardResult<T> {
        let mut board = self.load()?;
        let out = op(&mut board)?;
        self.save(&board)?;
        Ok(out)
    }

    /// Parses a DSEO clipboard export and appends the cards to the board.
    ///
    /// Returns the appended cards as stored (ids may differ from the parser's if they collided).
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StructureNotRecognized`] without touching the stored board if the
    /// text has no patient block, or any storage error from [`save`](Self::save).
    pub fn import_dseo(&self, text: &str) -> BoardResult<Vec<CardRecord>> {
        let cards = parse_dseo(text)?;
        let count = cards.len();

        let imported = self.modify(|board| {
            board.append(cards);
            Ok(board.cards()[board.len() - count..].to_vec())
        })?;

        tracing::info!(cards = count, "store: dseo import appended");
        Ok(imported)
    }

    /// Replaces the board with the cards of a JSON export.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidJson`] or [`BoardError::NotAnArray`] without touching the
    /// stored board, or any storage error from [`save`](Self::save).
    pub fn import_json(&self, text: &str) -> BoardResult<Vec<CardRecord>> {
        let cards = import_json(text)?;

        let mut board = Board::new();
        board.replace(cards);
        self.save(&board)?;

        tracing::info!(cards = board.len(), "store: json import replaced board");
        Ok(board.into_cards())
    }

    /// Renders the stored board as an export file.
    pub fn export(&self) -> BoardResult<BoardExport> {
        let board = self.load()?;
        let export = BoardExport {
            file_name: export_file_name(Utc::now().date_naive()),
            json: export_json(board.cards())?,
        };
        tracing::info!(file = %export.file_name, cards = board.len(), "store: board exported");
        Ok(export)
    }
}

fn first_run_board() -> Board {
    Board::from_cards(vec![CardRecord::new()])
}
