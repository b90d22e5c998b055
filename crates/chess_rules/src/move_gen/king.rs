//! King threats and moves
//!
//! The eight neighbours that are on board, plus castling candidates while the
//! king has neither moved nor castled. Whether a destination is attacked is
//! decided later by the check filter, not here.

use super::castling::castling_moves;
use super::tables::KING_OFFSETS;
use super::{shifts_from_threats, MoveContext};
use crate::board::Board;
use crate::moves::Move;
use crate::piece::Piece;
use crate::types::{Color, Position};

pub fn capturing_positions(_color: Color, from: Position, _board: &Board) -> Vec<Position> {
    KING_OFFSETS
        .iter()
        .map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|to| to.is_on_board())
        .collect()
}

pub fn possible_moves(
    piece: &Piece,
    from: Position,
    board: &Board,
    context: &MoveContext,
) -> Vec<Move> {
    let mut moves = shifts_from_threats(piece, from, board, context);
    moves.extend(castling_moves(piece, from, board));
    moves
}
