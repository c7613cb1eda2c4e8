//! # ErFlow Core
//!
//! Core logic for the ErFlow emergency department whiteboard.
//!
//! This crate contains pure data operations and file management:
//! - The card model and its JSON wire format
//! - The DSEO clipboard importer ([`dseo`])
//! - Board operations: add, remove, reorder, collapse, search and colour counts
//! - Single-file board persistence under the configured data directory
//!
//! **No API concerns**: HTTP servers and command-line parsing belong in `api-rest` and `cli`.

pub mod board;
pub mod card;
pub mod config;
pub mod constants;
pub mod dseo;
pub mod error;
pub mod json;
pub mod store;

pub use board::Board;
pub use card::{CardPatch, CardRecord, ColorCounts, Location, Moved, TriageColor};
pub use config::CoreConfig;
pub use dseo::parse_dseo;
pub use error::{BoardError, BoardResult};
pub use erflow_uuid::CardId;
pub use json::{export_file_name, export_json, import_json};
pub use store::{BoardExport, BoardStore};
