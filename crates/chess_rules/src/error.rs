//! Error types for the rules engine
//!
//! Provides custom error types for rule-level operations including move
//! selection, promotion resolution and restoring persisted records.

use crate::types::Position;
use thiserror::Error;

/// Errors that can occur in the rules engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// More than one candidate move claims the same clickable position.
    /// Always a move-generation bug; never resolved by picking one.
    #[error("{count} candidate moves claim clickable position {position}")]
    AmbiguousClickablePosition { position: Position, count: usize },

    /// Promotion resolution requested for a move that is not waiting for one
    #[error("Move is not a pending promotion")]
    NoPendingPromotion,

    /// Chosen piece kind is not among the move's transform options
    #[error("Promotion to {kind} is not one of the offered options")]
    InvalidPromotionChoice { kind: String },

    /// Revive mode: the promoting side has no lost piece of the chosen kind
    #[error("No captured {kind} available to revive")]
    NothingToRevive { kind: String },

    /// The promotion choice cannot be cancelled once the pawn has moved
    #[error("Promotion choice cannot be cancelled once the pawn has moved")]
    PromotionCancellationForbidden,

    /// Persisted piece kind is not recognised
    #[error("Unknown piece kind '{kind}'")]
    UnknownPieceKind { kind: String },

    /// Persisted record failed shape validation
    #[error("Malformed {record} record: {message}")]
    MalformedRecord { record: &'static str, message: String },
}

/// Result type alias for rules engine operations
pub type RulesResult<T> = Result<T, RulesError>;
