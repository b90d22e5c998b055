//! Pending pawn promotion
//!
//! When a pawn reaches the last row with more than one option, the relocation
//! is already on the board and the move waits here until a piece is chosen.
//! There is no cancel: the controller refuses to drop a pending promotion.

use chess_rules::{Move, PieceKind, Position};

#[derive(Debug, Default)]
pub struct PendingPromotion {
    pending: Option<Move>,
}

impl PendingPromotion {
    pub fn start(&mut self, mv: Move) {
        self.pending = Some(mv);
    }

    pub fn take(&mut self) -> Option<Move> {
        self.pending.take()
    }

    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Offered kinds, in configured order
    pub fn options(&self) -> Vec<PieceKind> {
        self.pending
            .as_ref()
            .and_then(Move::as_promotion)
            .map(|promotion| promotion.transform_options().to_vec())
            .unwrap_or_default()
    }

    /// Square the pawn landed on
    pub fn position(&self) -> Option<Position> {
        self.pending.as_ref().map(Move::target)
    }
}
