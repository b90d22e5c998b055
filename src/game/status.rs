//! Game status after each move
//!
//! ```text
//! Playing -> Checkmate / Stalemate / GuardedPieceCaptured
//! ```
//!
//! Terminal statuses block input until a move is undone.
//! `GuardedPieceCaptured` only happens with check filtering disabled.

use chess_rules::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    Playing { in_check: bool },
    Checkmate { winner: Color },
    Stalemate,
    GuardedPieceCaptured { winner: Color },
}

impl Default for GameStatus {
    fn default() -> Self {
        GameStatus::Playing { in_check: false }
    }
}

impl GameStatus {
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::Playing { .. })
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } | GameStatus::GuardedPieceCaptured { winner } => {
                Some(*winner)
            }
            GameStatus::Playing { .. } | GameStatus::Stalemate => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            GameStatus::Playing { in_check: true } => "Check".to_string(),
            GameStatus::Playing { in_check: false } => "In progress".to_string(),
            GameStatus::Checkmate { winner } => format!("Checkmate, {} wins", winner.name()),
            GameStatus::Stalemate => "Stalemate".to_string(),
            GameStatus::GuardedPieceCaptured { winner } => {
                format!("King captured, {} wins", winner.name())
            }
        }
    }
}
