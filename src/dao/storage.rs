use std::io;

use thiserror::Error;

use crate::dao::tape::WriteError;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by player stores regardless of the backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be opened, measured or seeded.
    #[error("problem initialising player store `{source_name}`")]
    InitializationFailure {
        /// Identity of the backing document.
        source_name: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The backing document is not a valid league.
    #[error("problem loading player store from `{source_name}`")]
    MalformedStore {
        /// Identity of the backing document.
        source_name: String,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// No player carries the requested identifier.
    #[error("player `{id}` not found")]
    PlayerNotFound {
        /// Requested identifier.
        id: i64,
    },
    /// The player payload was rejected before touching the league.
    #[error("invalid player: {reason}")]
    InvalidPlayer {
        /// Why the player was refused.
        reason: String,
    },
    /// A player with the same identifier already exists.
    #[error("player `{id}` already exists")]
    DuplicatePlayer {
        /// Identifier already in use.
        id: i64,
    },
    /// Rewriting the backing document failed.
    #[error("failed to persist league")]
    PersistenceFailure(#[from] WriteError),
}

impl StorageError {
    /// Classify a decode failure: I/O problems are initialization failures,
    /// anything else means the document itself is corrupt.
    pub fn from_decode(source_name: impl Into<String>, err: serde_json::Error) -> Self {
        let source_name = source_name.into();
        if err.is_io() {
            StorageError::InitializationFailure {
                source_name,
                source: err.into(),
            }
        } else {
            StorageError::MalformedStore {
                source_name,
                source: err,
            }
        }
    }

    /// Wrap an I/O failure hit while preparing the backing file.
    pub fn initialization(source_name: impl Into<String>, source: io::Error) -> Self {
        StorageError::InitializationFailure {
            source_name: source_name.into(),
            source,
        }
    }
}
