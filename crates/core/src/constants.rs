//! Constants used throughout the erflow core crate.
//!
//! File names and defaults live here so the CLI, the REST server and the store agree on them.

/// Default directory for board storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "erflow_data";

/// Filename of the persisted board (the whiteboard's `draggable-cards` storage slot).
pub const BOARD_FILENAME: &str = "draggable-cards.json";

/// Prefix of exported board files; the full name is `<prefix>-<YYYY-MM-DD>.json`.
pub const EXPORT_FILE_PREFIX: &str = "erflow-cards";

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "ERFLOW_DATA_DIR";
