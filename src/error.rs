//! Error types for spell-drop.

use thiserror::Error;

/// Main error type for practice sessions.
#[derive(Debug, Error)]
pub enum Error {
    /// The word list had no usable words, so no session can start.
    #[error("word list is empty")]
    EmptyWordList,

    /// `take_next` was called on an empty pool.
    #[error("word queue exhausted")]
    QueueExhausted,

    /// The speech collaborator cannot speak at all.
    #[error("speech unavailable: {message}")]
    SpeechUnavailable { message: String },

    /// The word list file has an unsupported shape.
    #[error("invalid word list: {message}")]
    WordList { message: String },

    /// JSON parse error while reading a word list.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error from the terminal or filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if the session cannot continue after this error.
    ///
    /// Speech failures only silence narration; everything else ends the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::SpeechUnavailable { .. })
    }
}

/// Convenience result type for spell-drop operations.
pub type Result<T> = std::result::Result<T, Error>;
