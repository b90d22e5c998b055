//! Plain relocation of one piece, optionally capturing

use super::marks::{CellMark, MarkBoard};
use super::{notation, Capture};
use crate::board::Board;
use crate::piece::{Piece, PieceFlags};
use crate::types::{Color, PieceKind, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Shift {
    pub(crate) color: Color,
    pub(crate) kind: PieceKind,
    pub(crate) from: Position,
    pub(crate) to: Position,
    pub(crate) captures: Option<Capture>,
    /// Mover's flags before the last `forward`
    pub(crate) prior: Option<PieceFlags>,
    pub(crate) performed: bool,
    pub(crate) notation: Option<String>,
}

impl Shift {
    pub fn new(piece: &Piece, from: Position, to: Position, captures: Option<Capture>) -> Self {
        Self {
            color: piece.color(),
            kind: piece.kind(),
            from,
            to,
            captures,
            prior: None,
            performed: false,
            notation: None,
        }
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn forward(&mut self, board: &mut Board) {
        if self.performed {
            tracing::warn!("[MOVE] Shift {}-{} is already applied", self.from, self.to);
            return;
        }
        if let Some(capture) = &self.captures {
            board.take(capture.position);
        }
        let Some(mut piece) = board.take(self.from) else {
            tracing::warn!("[MOVE] Shift origin {} is empty", self.from);
            return;
        };
        self.prior = Some(piece.flags());
        if piece.kind().tracks_movement() {
            piece.set_flags(PieceFlags {
                moved: true,
                ..piece.flags()
            });
        }
        board.set(self.to, Some(piece));
        self.performed = true;
    }

    pub fn reverse(&mut self, board: &mut Board) {
        if !self.performed {
            tracing::warn!("[MOVE] Shift {}-{} is not applied", self.from, self.to);
            return;
        }
        if let Some(mut piece) = board.take(self.to) {
            if let Some(prior) = self.prior {
                piece.set_flags(prior);
            }
            board.set(self.from, Some(piece));
        }
        if let Some(capture) = &self.captures {
            board.set(capture.position, Some(capture.piece.clone()));
        }
        self.performed = false;
    }

    pub fn clickable_positions(&self) -> Vec<Position> {
        let mut positions = vec![self.to];
        if let Some(capture) = &self.captures {
            if capture.position != self.to {
                positions.push(capture.position);
            }
        }
        positions
    }

    pub fn show_cell_marks(&self, marks: &mut MarkBoard) {
        show_relocation_marks(self.to, self.captures.as_ref(), marks);
    }

    pub(crate) fn base_notation(&self) -> String {
        notation::shift(self.kind, self.from, self.to, self.captures.is_some())
    }
}

/// Marks shared by every single-piece relocation
pub(crate) fn show_relocation_marks(
    to: Position,
    captures: Option<&Capture>,
    marks: &mut MarkBoard,
) {
    match captures {
        Some(capture) if capture.position == to => marks.set(to, CellMark::Capture),
        Some(capture) => {
            marks.set(to, CellMark::Available);
            marks.set(capture.position, CellMark::Capturing);
        }
        None => marks.set(to, CellMark::Available),
    }
}
