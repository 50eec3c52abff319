//! Error types for the terminal engine.

use thiserror::Error;

/// Errors raised by backends and the frame driver.
#[derive(Debug, Error)]
pub enum TuiError {
    /// I/O error while talking to the terminal.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The terminal could not be taken over during init.
    #[error("failed to acquire terminal: {source}")]
    Acquire {
        #[source]
        source: std::io::Error,
    },

    /// `init` called on an engine that is already running.
    #[error("terminal already initialized")]
    AlreadyInitialized,

    /// Frame call made before `init`.
    #[error("terminal not initialized")]
    NotInitialized,
}

impl TuiError {
    /// Whether the process should give up on the terminal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Acquire { .. } | Self::AlreadyInitialized)
    }
}

/// Result type for terminal engine operations.
pub type Result<T> = std::result::Result<T, TuiError>;
