use crate::models::PhraseId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the backing file itself.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to commit store file: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error("no phrase ids left to allocate")]
    IdsExhausted,
}

#[derive(Debug, Error)]
pub enum MafateehError {
    #[error("A phrase with content {0:?} already exists")]
    Duplicate(String),
    #[error("Phrase {0} not found")]
    NotFound(PhraseId),
    #[error("Phrase content must not be empty")]
    EmptyContent,
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Could not open phrase store at {}: {source}", .path.display())]
    Initialization {
        path: PathBuf,
        #[source]
        source: StorageError,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
    #[error("Background task failed: {0}")]
    Background(String),
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl MafateehError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, MafateehError::Duplicate(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MafateehError::NotFound(_))
    }
}

impl From<io::Error> for MafateehError {
    fn from(err: io::Error) -> Self {
        MafateehError::Storage(StorageError::Io(err))
    }
}

impl From<serde_json::Error> for MafateehError {
    fn from(err: serde_json::Error) -> Self {
        MafateehError::Storage(StorageError::Json(err))
    }
}

pub type Result<T> = std::result::Result<T, MafateehError>;
