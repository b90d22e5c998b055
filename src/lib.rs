//! Game controller for the chess variant rules in `chess_rules`
//!
//! - [`core`]: settings and their persistence
//! - [`game`]: sessions, history, selection and saved games

pub mod core;
pub mod game;

pub use core::GameSettings;
pub use game::{GameError, GameResult, GameSession, GameStatus, MoveOutcome, SavedGame};
