use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("history store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Message some platforms report as an error even though the read succeeded.
pub const SPURIOUS_CLIPBOARD_MESSAGE: &str = "The operation completed successfully.";

#[derive(Debug, Error)]
pub enum ClipboardError {
    /// Benign platform artifact; callers skip the read.
    #[error("{SPURIOUS_CLIPBOARD_MESSAGE}")]
    Spurious,

    #[error("clipboard access failed: {0}")]
    Access(String),
}

impl ClipboardError {
    /// Classify a raw platform error message.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim() == SPURIOUS_CLIPBOARD_MESSAGE {
            Self::Spurious
        } else {
            Self::Access(message)
        }
    }

    pub fn is_spurious(&self) -> bool {
        matches!(self, Self::Spurious)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}

#[derive(Debug, Error)]
pub enum OpenerError {
    #[error("failed to launch opener for {path}: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("opener exited with {status} for {path}")]
    Failed { path: PathBuf, status: String },
}
