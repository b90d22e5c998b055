//! Error types for game module
//!
//! Provides custom error types for the game controller: blocked input,
//! history traversal and restoring saved games.

use chess_rules::RulesError;

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Rule-level failure (ambiguous click, bad promotion choice, ...)
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// Input arrived while the controller cannot accept it
    #[error("Input is blocked: {reason}")]
    InputBlocked { reason: &'static str },

    /// History is empty
    #[error("No move to undo")]
    NothingToUndo,

    /// Redo stack is empty
    #[error("No move to redo")]
    NothingToRedo,

    /// A saved move does not fit the position it is replayed on
    #[error("Saved move #{index} cannot be replayed: {message}")]
    CorruptHistory { index: usize, message: String },

    /// Saved game written by an unknown format version
    #[error("Unsupported saved game version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Saved game file I/O error
    #[error("Saved game I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Saved game serialization/deserialization error
    #[error("Saved game serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
