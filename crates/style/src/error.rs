//! Error types for style loading and watching.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("failed to read style file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid style file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown color name {0:?}")]
    UnknownColor(String),

    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),
}

pub type Result<T> = std::result::Result<T, StyleError>;
