//! Saved games
//!
//! A [`SavedGame`] stores the initial board, the side that moved first and
//! the ordered move records.
//! Restoring rebuilds the initial board and replays every move through the
//! same generation and legality code live play uses; a record that matches
//! no generated move aborts the restore with [`GameError::CorruptHistory`].
//! Promotions saved without a choice are resolved by configured importance.

use crate::core::GameSettings;
use crate::game::error::{GameError, GameResult};
use crate::game::session::GameSession;
use chess_rules::{BoardRecord, Color, IdGenerator, MoveRecord, RestoreReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current saved game format
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub initial_board: BoardRecord,
    #[serde(default = "white")]
    pub starting_turn: Color,
    pub moves: Vec<MoveRecord>,
}

fn white() -> Color {
    Color::White
}

impl SavedGame {
    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_to_file(&self, path: &Path) -> GameResult<()> {
        fs::write(path, self.to_json()?)?;
        tracing::info!("[GAME] Saved {} move(s) to {:?}", self.moves.len(), path);
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> GameResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

impl GameSession {
    /// Snapshot of the initial board and every performed move
    pub fn save(&self) -> SavedGame {
        SavedGame {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            initial_board: self.initial_board().clone(),
            starting_turn: self.initial_turn(),
            moves: self.history().records(),
        }
    }

    /// Rebuild a session by replaying `saved` from its initial board
    pub fn restore(
        saved: &SavedGame,
        settings: GameSettings,
        mut ids: Box<dyn IdGenerator>,
    ) -> GameResult<(GameSession, RestoreReport)> {
        if saved.version != SAVE_VERSION {
            return Err(GameError::UnsupportedVersion {
                found: saved.version,
                expected: SAVE_VERSION,
            });
        }
        let (board, report) = saved.initial_board.restore(ids.as_mut())?;
        if !report.is_clean() {
            tracing::warn!(
                "[RESTORE] {} cell(s) skipped in the initial board",
                report.skipped.len()
            );
        }
        let mut session = GameSession::from_board(board, saved.starting_turn, settings, ids);
        for (index, record) in saved.moves.iter().enumerate() {
            session
                .replay_record(record)
                .map_err(|err| at_index(index, err))?;
        }
        tracing::info!(
            "[RESTORE] Replayed {} move(s), {} to move",
            saved.moves.len(),
            session.turn()
        );
        Ok((session, report))
    }

    fn replay_record(&mut self, record: &MoveRecord) -> GameResult<()> {
        record.validate()?;
        if self.status().is_game_over() {
            return Err(corrupt_message("the game was already over"));
        }
        if record.color() != self.turn() {
            return Err(corrupt_message(format!("{} moved out of turn", record.color())));
        }
        let mut mv = self
            .legal_moves_at(record.origin())
            .into_iter()
            .find(|candidate| record.matches(candidate))
            .ok_or_else(|| corrupt_message("no legal move matches the record"))?;
        if let Some(choice) = record.promotion_choice(self.ids_mut())? {
            mv.preset_promotion(choice)?;
        }
        let outcome = self.apply(mv)?;
        if outcome.promotion_pending {
            self.resolve_promotion_by_importance()?;
        }
        Ok(())
    }
}

fn at_index(index: usize, err: GameError) -> GameError {
    let message = match err {
        GameError::CorruptHistory { message, .. } => message,
        other => other.to_string(),
    };
    GameError::CorruptHistory { index, message }
}

/// Index is filled in by [`GameSession::restore`]
fn corrupt_message(message: impl Into<String>) -> GameError {
    GameError::CorruptHistory {
        index: 0,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::{Board, Piece, PieceId, PieceKind, Position, SequentialIds};

    fn at(text: &str) -> Position {
        Position::from_algebraic(text).unwrap()
    }

    fn play(game: &mut GameSession, from: &str, to: &str) {
        game.on_piece_click(at(from)).unwrap();
        game.on_cell_click(at(to)).unwrap().unwrap();
    }

    fn new_game() -> GameSession {
        GameSession::with_ids(GameSettings::default(), Box::new(SequentialIds::default()))
    }

    fn restore(saved: &SavedGame) -> GameResult<(GameSession, RestoreReport)> {
        GameSession::restore(saved, GameSettings::default(), Box::new(SequentialIds::new("r")))
    }

    /// e4, d5, exd5: the third record captures the d5 pawn
    fn capture_game() -> SavedGame {
        let mut game = new_game();
        play(&mut game, "e2", "e4");
        play(&mut game, "d7", "d5");
        play(&mut game, "e4", "d5");
        game.save()
    }

    #[test]
    fn test_save_restore_round_trip() {
        let mut game = new_game();
        play(&mut game, "e2", "e4");
        play(&mut game, "d7", "d5");
        play(&mut game, "e4", "d5");
        let saved = game.save();
        let json = saved.to_json().unwrap();

        let loaded = SavedGame::from_json(&json).unwrap();
        let (restored, report) = restore(&loaded).unwrap();
        assert!(report.is_clean());
        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.turn(), Color::Black);
        assert_eq!(restored.history().notations(), game.history().notations());
        assert_eq!(restored.captured().material_advantage(), 1);
    }

    #[test]
    fn test_black_to_move_survives_save_and_restore() {
        let mut board = Board::empty();
        let pieces = [
            ("e1", "K", PieceKind::King, Color::White),
            ("e8", "k", PieceKind::King, Color::Black),
            ("a7", "p", PieceKind::Pawn, Color::Black),
        ];
        for (square, id, kind, color) in pieces {
            board.set(at(square), Some(Piece::new(PieceId::new(id), kind, color)));
        }
        let settings = GameSettings::default();
        let ids = Box::new(SequentialIds::default());
        let mut game = GameSession::from_board(board, Color::Black, settings, ids);
        play(&mut game, "a7", "a6");
        let saved = game.save();
        assert_eq!(saved.starting_turn, Color::Black);

        let loaded = SavedGame::from_json(&saved.to_json().unwrap()).unwrap();
        let (restored, _) = restore(&loaded).unwrap();
        assert_eq!(restored.initial_turn(), Color::Black);
        assert_eq!(restored.turn(), Color::White);
        assert_eq!(restored.board(), game.board());
    }

    #[test]
    fn test_missing_starting_turn_defaults_to_white() {
        let mut json: serde_json::Value = serde_json::to_value(capture_game()).unwrap();
        json.as_object_mut().unwrap().remove("starting_turn");
        let saved: SavedGame = serde_json::from_value(json).unwrap();
        assert_eq!(saved.starting_turn, Color::White);
        assert!(restore(&saved).is_ok());
    }

    #[test]
    fn test_tampered_capture_kind_is_corrupt() {
        let mut json: serde_json::Value = serde_json::to_value(capture_game()).unwrap();
        assert_eq!(json["moves"][2]["capture"]["piece"]["kind"], "pawn");
        json["moves"][2]["capture"]["piece"]["kind"] = serde_json::json!("queen");
        let saved: SavedGame = serde_json::from_value(json).unwrap();

        assert!(matches!(
            restore(&saved),
            Err(GameError::CorruptHistory { index: 2, .. })
        ));
    }

    #[test]
    fn test_dropped_capture_is_corrupt() {
        let mut json: serde_json::Value = serde_json::to_value(capture_game()).unwrap();
        let record = json["moves"][2].as_object_mut().unwrap();
        assert!(record.remove("capture").is_some());
        let saved: SavedGame = serde_json::from_value(json).unwrap();

        assert!(matches!(
            restore(&saved),
            Err(GameError::CorruptHistory { index: 2, .. })
        ));
    }

    #[test]
    fn test_out_of_turn_record_is_corrupt() {
        let mut game = new_game();
        play(&mut game, "e2", "e4");
        let mut saved = game.save();
        saved.moves.push(saved.moves[0].clone());

        let result = restore(&saved);
        assert!(matches!(result, Err(GameError::CorruptHistory { index: 1, .. })));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let game = new_game();
        let mut saved = game.save();
        saved.version = 99;
        let result = restore(&saved);
        assert!(matches!(
            result,
            Err(GameError::UnsupportedVersion { found: 99, expected: 1 })
        ));
    }
}
