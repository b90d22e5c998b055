//! Chess variant game logic
//!
//! A [`GameSession`] owns one board and drives it from user input: it
//! answers clicks and drags with selections, commits the selected move when a
//! clickable square is hit, suspends on pawn promotion until a choice is
//! supplied, and records everything in an undoable history.
//!
//! # Module Organization
//!
//! - `session` - the controller and its input handlers
//! - `resources` - state the session owns (history, captures, selection, turn phase)
//! - `status` - check / checkmate / stalemate evaluation results
//! - `persistence` - saved games replayed through the move generator
//! - `error` - [`GameError`]
//!
//! Rules themselves (generation, moves, attacks) live in the `chess_rules` crate.

pub mod error;
pub mod persistence;
pub mod resources;
pub mod session;
pub mod status;

pub use error::{GameError, GameResult};
pub use persistence::{SavedGame, SAVE_VERSION};
pub use resources::{CapturedPieces, MoveHistory, PendingPromotion, Selection, TurnPhase};
pub use session::{GameSession, MoveOutcome};
pub use status::GameStatus;
