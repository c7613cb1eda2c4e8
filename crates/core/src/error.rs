use erflow_uuid::UuidError;

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("empty or unrecognized structure: no triage header line found")]
    StructureNotRecognized,
    #[error("invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
    #[error("invalid JSON format: expected a list of patients")]
    NotAnArray,
    #[error("source unavailable: {0}")]
    SourceUnavailable(std::io::Error),
    #[error("failed to serialize cards: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to read board file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write board file: {0}")]
    FileWrite(std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("card not found: {0}")]
    CardNotFound(String),
    #[error("index {index} out of range for board of {len} cards")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid card id: {0}")]
    Id(#[from] UuidError),
}

impl BoardError {
    /// True for failures caused by the text handed to an importer, as opposed to storage or
    /// internal errors.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            BoardError::StructureNotRecognized
                | BoardError::InvalidJson(_)
                | BoardError::NotAnArray
                | BoardError::InvalidInput(_)
                | BoardError::Id(_)
        )
    }
}

pub type BoardResult<T> = std::result::Result<T, BoardError>;
