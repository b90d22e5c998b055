//! Captured pieces tracking
//!
//! Keeps a snapshot of every piece each side has lost and calculates material
//! advantage. It is also the [`CaptureLedger`] moves report to, which is what
//! the revive-from-captured promotion rule draws on.
//!
//! # Material Values
//!
//! Standard piece values in pawns:
//! - Pawn: 1
//! - Knight/Bishop: 3
//! - Rook: 5
//! - Queen: 9
//! - King: 0
//!
//! Positive advantage means White is ahead. Example: if Black lost a rook and
//! a pawn and White lost a knight, White's advantage is (5+1) - 3 = +3.

use chess_rules::{CaptureLedger, Color, Piece, PieceId, PieceKind};

#[derive(Debug, Default, Clone)]
pub struct CapturedPieces {
    /// White pieces taken by Black, oldest first
    white_lost: Vec<Piece>,
    /// Black pieces taken by White, oldest first
    black_lost: Vec<Piece>,
}

impl CapturedPieces {
    /// Pieces `color` has lost, oldest first
    pub fn lost(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.white_lost,
            Color::Black => &self.black_lost,
        }
    }

    fn lost_mut(&mut self, color: Color) -> &mut Vec<Piece> {
        match color {
            Color::White => &mut self.white_lost,
            Color::Black => &mut self.black_lost,
        }
    }

    /// Material difference in pawn units
    pub fn material_advantage(&self) -> i32 {
        let taken_by_white: i32 = self.black_lost.iter().map(|p| piece_value(p.kind())).sum();
        let taken_by_black: i32 = self.white_lost.iter().map(|p| piece_value(p.kind())).sum();
        taken_by_white - taken_by_black
    }

    /// Clear all captured pieces (for new game)
    pub fn clear(&mut self) {
        self.white_lost.clear();
        self.black_lost.clear();
    }
}

impl CaptureLedger for CapturedPieces {
    fn record_loss(&mut self, piece: Piece) {
        tracing::debug!(
            "[GAME] {} {} ({}) leaves the board",
            piece.color(),
            piece.kind(),
            piece.id()
        );
        self.lost_mut(piece.color()).push(piece);
    }

    fn retract_loss(&mut self, color: Color, id: &PieceId) -> Option<Piece> {
        let pool = self.lost_mut(color);
        let index = pool.iter().rposition(|p| p.id() == id)?;
        Some(pool.remove(index))
    }

    fn take_lost(&mut self, color: Color, kind: PieceKind) -> Option<Piece> {
        let pool = self.lost_mut(color);
        let index = pool.iter().rposition(|p| p.kind() == kind)?;
        Some(pool.remove(index))
    }

    fn lost_kinds(&self, color: Color) -> Vec<PieceKind> {
        let mut kinds = Vec::new();
        for piece in self.lost(color) {
            if !kinds.contains(&piece.kind()) {
                kinds.push(piece.kind());
            }
        }
        kinds
    }
}

/// Pawn-unit value of a piece; the king has none
fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}
