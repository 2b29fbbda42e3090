//! Error types for the tally engines.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or running a tally.
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),

    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn worker {worker_id}: {source}")]
    Spawn {
        worker_id: usize,
        #[source]
        source: io::Error,
    },

    #[error("worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },

    #[error("processing interrupted before the corpus was fully counted")]
    Terminated,
}

impl TallyError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TallyError::Io {
            path: path.into(),
            source,
        }
    }

    /// Configuration errors are rejected before any file is touched.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TallyError::InvalidWorkerCount(_) | TallyError::InvalidVocabulary(_)
        )
    }
}

pub type Result<T, E = TallyError> = std::result::Result<T, E>;
