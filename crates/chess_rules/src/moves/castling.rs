//! King and rook moving together

use super::marks::{CellMark, MarkBoard};
use super::notation;
use crate::board::Board;
use crate::piece::PieceFlags;
use crate::types::{Color, Position};
use serde::{Deserialize, Serialize};

/// Which piece the player selected to start the castling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastlingInitiator {
    King,
    Rook,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Castling {
    pub(crate) color: Color,
    pub(crate) king_from: Position,
    pub(crate) king_to: Position,
    pub(crate) rook_from: Position,
    pub(crate) rook_to: Position,
    pub(crate) initiator: CastlingInitiator,
    pub(crate) king_prior: Option<PieceFlags>,
    pub(crate) rook_prior: Option<PieceFlags>,
    pub(crate) performed: bool,
    pub(crate) notation: Option<String>,
}

impl Castling {
    pub fn new(
        color: Color,
        king_from: Position,
        king_to: Position,
        rook_from: Position,
        rook_to: Position,
        initiator: CastlingInitiator,
    ) -> Self {
        Self {
            color,
            king_from,
            king_to,
            rook_from,
            rook_to,
            initiator,
            king_prior: None,
            rook_prior: None,
            performed: false,
            notation: None,
        }
    }

    pub fn king_from(&self) -> Position {
        self.king_from
    }

    pub fn king_to(&self) -> Position {
        self.king_to
    }

    pub fn rook_from(&self) -> Position {
        self.rook_from
    }

    pub fn rook_to(&self) -> Position {
        self.rook_to
    }

    pub fn initiator(&self) -> CastlingInitiator {
        self.initiator
    }

    /// Origin of the piece the player picked up
    pub fn origin(&self) -> Position {
        match self.initiator {
            CastlingInitiator::King => self.king_from,
            CastlingInitiator::Rook => self.rook_from,
        }
    }

    pub fn forward(&mut self, board: &mut Board) {
        if self.performed {
            tracing::warn!("[MOVE] Castling {} is already applied", self.king_from);
            return;
        }
        if board.is_empty(self.king_from) || board.is_empty(self.rook_from) {
            tracing::warn!(
                "[MOVE] Castling pieces missing at {} / {}",
                self.king_from,
                self.rook_from
            );
            return;
        }
        // Lift both first: a target may be the other piece's origin.
        let lifted = (board.take(self.king_from), board.take(self.rook_from));
        let (Some(mut king), Some(mut rook)) = lifted else {
            return;
        };
        self.king_prior = Some(king.flags());
        self.rook_prior = Some(rook.flags());
        let castled = PieceFlags {
            moved: true,
            castled: true,
        };
        king.set_flags(castled);
        rook.set_flags(castled);
        board.set(self.king_to, Some(king));
        board.set(self.rook_to, Some(rook));
        self.performed = true;
    }

    pub fn reverse(&mut self, board: &mut Board) {
        if !self.performed {
            tracing::warn!("[MOVE] Castling {} is not applied", self.king_from);
            return;
        }
        let king = board.take(self.king_to);
        let rook = board.take(self.rook_to);
        if let Some(mut king) = king {
            if let Some(prior) = self.king_prior {
                king.set_flags(prior);
            }
            board.set(self.king_from, Some(king));
        }
        if let Some(mut rook) = rook {
            if let Some(prior) = self.rook_prior {
                rook.set_flags(prior);
            }
            board.set(self.rook_from, Some(rook));
        }
        self.performed = false;
    }

    pub fn clickable_positions(&self) -> Vec<Position> {
        match self.initiator {
            CastlingInitiator::King => vec![self.king_to, self.rook_from],
            CastlingInitiator::Rook => vec![self.king_from],
        }
    }

    pub fn show_cell_marks(&self, marks: &mut MarkBoard) {
        for position in self.clickable_positions() {
            marks.set(position, CellMark::Available);
        }
    }

    pub(crate) fn base_notation(&self) -> String {
        notation::castling(self.king_from, self.rook_from)
    }
}
