//! Board, piece and move model for the chess variant
//!
//! Pure rules with no UI: per-kind move generation, reversible moves
//! (Shift, Castling, two-phase Promotion), attack and check analysis, and
//! serializable records for saved games.
//!
//! ```
//! use chess_rules::{attack, Board, Color, MoveContext, SequentialIds};
//!
//! let mut board = Board::standard(&mut SequentialIds::default());
//! let moves = attack::all_legal_moves(&mut board, Color::White, &MoveContext::default(), true);
//! assert_eq!(moves.len(), 20);
//! ```

pub mod attack;
pub mod board;
mod cache;
pub mod error;
pub mod ids;
pub mod move_gen;
pub mod moves;
pub mod piece;
pub mod record;
pub mod types;

pub use board::{Board, Cell, BOARD_SIZE};
pub use error::{RulesError, RulesResult};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use move_gen::{MoveContext, DEFAULT_TRANSFORM_OPTIONS};
pub use moves::{
    Capture, CaptureLedger, Castling, CastlingInitiator, CellMark, MarkBoard, Move, MoveEffects,
    MoveKind, PerformContext, Performed, Promotion, Shift,
};
pub use piece::{Piece, PieceFlags};
pub use record::{BoardRecord, CaptureRecord, MoveRecord, PieceRecord, RestoreReport};
pub use types::{Color, PieceId, PieceKind, Position};
