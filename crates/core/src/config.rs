//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services as an
//! `Arc<CoreConfig>`. Services never read process-wide environment variables while handling a
//! request, which keeps behaviour consistent across threads and test harnesses.

use crate::constants::{BOARD_FILENAME, DEFAULT_DATA_DIR};
use crate::{BoardError, BoardResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The data directory does not need to exist yet; it is created on first save.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidInput`] if `data_dir` is empty or points at something that
    /// exists but is not a directory.
    pub fn new(data_dir: PathBuf) -> BoardResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(BoardError::InvalidInput(
                "data directory cannot be empty".into(),
            ));
        }

        if data_dir.exists() && !data_dir.is_dir() {
            return Err(BoardError::InvalidInput(format!(
                "data directory path is not a directory: {}",
                data_dir.display()
            )));
        }

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn board_file(&self) -> PathBuf {
        self.data_dir.join(BOARD_FILENAME)
    }
}

/// Resolve the data directory from an optional string value (typically `ERFLOW_DATA_DIR`).
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATA_DIR`].
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}
