//! Selection state: picked piece, explored cell, drag hover and the moves
//! the picked piece can make

use chess_rules::{MarkBoard, Move, Position};

#[derive(Debug, Default)]
pub struct Selection {
    pub piece: Option<Position>,
    pub cell: Option<Position>,
    pub dragged_over: Option<Position>,
    pub moves: Vec<Move>,
    pub marks: MarkBoard,
    /// False when inspecting an opponent piece
    pub committable: bool,
}

impl Selection {
    pub fn clear(&mut self) {
        self.piece = None;
        self.cell = None;
        self.dragged_over = None;
        self.moves.clear();
        self.marks.clear();
        self.committable = false;
    }

    pub fn is_selected(&self) -> bool {
        self.piece.is_some()
    }

    /// Select the piece at `position` with its candidate moves
    pub fn select_piece(&mut self, position: Position, moves: Vec<Move>, committable: bool) {
        self.clear();
        for mv in &moves {
            mv.show_cell_marks(&mut self.marks);
        }
        self.piece = Some(position);
        self.moves = moves;
        self.committable = committable;
    }

    pub fn select_cell(&mut self, position: Position) {
        self.clear();
        self.cell = Some(position);
    }
}
