//! Moves as reversible commands
//!
//! Every variant owns the geometry it needs, a snapshot of any captured piece
//! and a pre-image of every historical flag it touches, so that `reverse`
//! restores the board exactly and a reversed move can be re-applied any
//! number of times.
//!
//! ## Lifecycle
//!
//! ```text
//! constructed --forward/perform--> performed --reverse/undo--> reversed
//!                                      ^                          |
//!                                      +------forward/redo--------+
//! ```
//!
//! `forward`/`reverse` are the pure board transforms used by legality probes.
//! `perform`/`undo`/`redo` are the live paths: they also keep the captured
//! pieces ledger in step and `perform` assigns the notation.

pub mod castling;
pub mod marks;
pub mod notation;
pub mod promotion;
pub mod shift;

pub use castling::{Castling, CastlingInitiator};
pub use marks::{CellMark, MarkBoard};
pub use promotion::Promotion;
pub use shift::Shift;

use crate::attack;
use crate::board::Board;
use crate::error::{RulesError, RulesResult};
use crate::ids::IdGenerator;
use crate::piece::Piece;
use crate::types::{Color, PieceId, PieceKind, Position};
use serde::{Deserialize, Serialize};

/// A captured piece and where it stood
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub position: Position,
    pub piece: Piece,
}

impl Capture {
    pub fn new(position: Position, piece: Piece) -> Self {
        Self { position, piece }
    }
}

/// Pool of pieces each side has lost
///
/// Implemented by the game layer; moves only report what left or re-entered
/// the board.
pub trait CaptureLedger {
    /// A piece left the board
    fn record_loss(&mut self, piece: Piece);
    /// Remove a previously lost piece, by id
    fn retract_loss(&mut self, color: Color, id: &PieceId) -> Option<Piece>;
    /// Remove the most recently lost piece of `kind`
    fn take_lost(&mut self, color: Color, kind: PieceKind) -> Option<Piece>;
    /// Distinct kinds `color` has lost, in order of first loss
    fn lost_kinds(&self, color: Color) -> Vec<PieceKind>;
}

/// Live-play collaborators of `perform`
pub struct PerformContext<'a> {
    pub ledger: &'a mut dyn CaptureLedger,
    pub ids: &'a mut dyn IdGenerator,
}

/// Result of `perform`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performed {
    Done,
    /// Pawn relocated, waiting for the piece choice
    PromotionPending,
}

/// What happened, for audio / haptics / toast collaborators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEffects {
    pub moved: bool,
    pub captured: bool,
    pub castled: bool,
    pub promoted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Shift,
    Castling,
    Promotion,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Move {
    Shift(Shift),
    Castling(Castling),
    Promotion(Promotion),
}

impl Move {
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Shift(_) => MoveKind::Shift,
            Move::Castling(_) => MoveKind::Castling,
            Move::Promotion(_) => MoveKind::Promotion,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Move::Shift(m) => m.color,
            Move::Castling(m) => m.color,
            Move::Promotion(m) => m.color,
        }
    }

    /// Origin of the piece the player picked up
    pub fn origin(&self) -> Position {
        match self {
            Move::Shift(m) => m.from,
            Move::Castling(m) => m.origin(),
            Move::Promotion(m) => m.from,
        }
    }

    /// Destination of the piece the player picked up
    pub fn target(&self) -> Position {
        match self {
            Move::Shift(m) => m.to,
            Move::Castling(m) => match m.initiator {
                CastlingInitiator::King => m.king_to,
                CastlingInitiator::Rook => m.rook_to,
            },
            Move::Promotion(m) => m.to,
        }
    }

    pub fn captures(&self) -> Option<&Capture> {
        match self {
            Move::Shift(m) => m.captures.as_ref(),
            Move::Castling(_) => None,
            Move::Promotion(m) => m.captures.as_ref(),
        }
    }

    pub fn is_performed(&self) -> bool {
        match self {
            Move::Shift(m) => m.performed,
            Move::Castling(m) => m.performed,
            Move::Promotion(m) => m.performed,
        }
    }

    pub fn notation(&self) -> Option<&str> {
        match self {
            Move::Shift(m) => m.notation.as_deref(),
            Move::Castling(m) => m.notation.as_deref(),
            Move::Promotion(m) => m.notation.as_deref(),
        }
    }

    fn notation_slot(&mut self) -> &mut Option<String> {
        match self {
            Move::Shift(m) => &mut m.notation,
            Move::Castling(m) => &mut m.notation,
            Move::Promotion(m) => &mut m.notation,
        }
    }

    pub fn as_promotion(&self) -> Option<&Promotion> {
        match self {
            Move::Promotion(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_pending_promotion(&self) -> bool {
        self.as_promotion().is_some_and(Promotion::is_pending)
    }

    pub fn effects(&self) -> MoveEffects {
        MoveEffects {
            moved: true,
            captured: self.captures().is_some(),
            castled: matches!(self, Move::Castling(_)),
            promoted: matches!(self, Move::Promotion(_)),
        }
    }

    /// Apply the board effects only
    pub fn forward(&mut self, board: &mut Board) {
        match self {
            Move::Shift(m) => m.forward(board),
            Move::Castling(m) => m.forward(board),
            Move::Promotion(m) => m.forward(board),
        }
    }

    /// Undo exactly what `forward` did
    pub fn reverse(&mut self, board: &mut Board) {
        match self {
            Move::Shift(m) => m.reverse(board),
            Move::Castling(m) => m.reverse(board),
            Move::Promotion(m) => m.reverse(board),
        }
    }

    /// Live path: board effects, captured-pool bookkeeping and notation
    pub fn perform(&mut self, board: &mut Board, ctx: &mut PerformContext<'_>) -> Performed {
        if self.is_performed() {
            tracing::warn!("[MOVE] {} is already performed", self.describe());
            return Performed::Done;
        }
        self.forward(board);
        if let Some(capture) = self.captures() {
            ctx.ledger.record_loss(capture.piece.clone());
        }
        if let Move::Promotion(promotion) = self {
            if promotion.chosen.is_some() {
                promotion.replay_revive(&mut *ctx.ledger);
            } else if promotion.transform_options.len() == 1 {
                let only = promotion.transform_options[0];
                if let Err(err) = promotion.resolve(board, only, ctx) {
                    tracing::error!("[PROMOTION] Auto-selecting {} failed: {}", only, err);
                    return Performed::PromotionPending;
                }
            } else {
                return Performed::PromotionPending;
            }
        }
        self.assign_notation(board);
        Performed::Done
    }

    /// Second phase of a pending promotion
    pub fn resolve_promotion(
        &mut self,
        board: &mut Board,
        kind: PieceKind,
        ctx: &mut PerformContext<'_>,
    ) -> RulesResult<()> {
        let Move::Promotion(promotion) = self else {
            return Err(RulesError::NoPendingPromotion);
        };
        promotion.resolve(board, kind, ctx)?;
        self.assign_notation(board);
        Ok(())
    }

    /// History traversal backwards: `reverse` plus ledger bookkeeping
    pub fn undo(&mut self, board: &mut Board, ledger: &mut dyn CaptureLedger) {
        if let Move::Promotion(promotion) = self {
            promotion.revert_revive(ledger);
        }
        if let Some(capture) = self.captures() {
            ledger.retract_loss(capture.piece.color(), capture.piece.id());
        }
        self.reverse(board);
    }

    /// History traversal forwards: `forward` plus ledger bookkeeping
    pub fn redo(&mut self, board: &mut Board, ledger: &mut dyn CaptureLedger) {
        self.forward(board);
        if let Some(capture) = self.captures() {
            ledger.record_loss(capture.piece.clone());
        }
        if let Move::Promotion(promotion) = self {
            promotion.replay_revive(ledger);
        }
    }

    fn assign_notation(&mut self, board: &Board) {
        let mut text = match self {
            Move::Shift(m) => m.base_notation(),
            Move::Castling(m) => m.base_notation(),
            Move::Promotion(m) => m.base_notation(),
        };
        if attack::is_guarded_piece_attacked(board, self.color().opponent()) {
            text.push(notation::CHECK_SUFFIX);
        }
        *self.notation_slot() = Some(text);
    }

    /// Upgrade the stored notation once the game layer detects mate
    pub fn mark_mate(&mut self) {
        if let Some(text) = self.notation_slot() {
            notation::mark_mate(text);
        }
    }

    /// Squares whose selection commits this move
    pub fn clickable_positions(&self) -> Vec<Position> {
        match self {
            Move::Shift(m) => m.clickable_positions(),
            Move::Castling(m) => m.clickable_positions(),
            Move::Promotion(m) => m.clickable_positions(),
        }
    }

    pub fn is_clickable_at(&self, position: Position) -> bool {
        self.clickable_positions().contains(&position)
    }

    pub fn show_cell_marks(&self, marks: &mut MarkBoard) {
        match self {
            Move::Shift(m) => m.show_cell_marks(marks),
            Move::Castling(m) => m.show_cell_marks(marks),
            Move::Promotion(m) => m.show_cell_marks(marks),
        }
    }

    /// Notation if assigned, otherwise a geometric description for logs
    pub fn describe(&self) -> String {
        if let Some(text) = self.notation() {
            return text.to_string();
        }
        match self {
            Move::Shift(m) => m.base_notation(),
            Move::Castling(m) => m.base_notation(),
            Move::Promotion(m) => m.base_notation(),
        }
    }
}
