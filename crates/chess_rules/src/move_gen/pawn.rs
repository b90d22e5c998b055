//! Pawn threats and moves
//!
//! A pawn threatens only its two forward diagonals. Quiet moves are one step
//! forward onto an empty square, plus a second step while the pawn has not
//! moved and both squares are empty. Diagonal moves need an enemy occupant;
//! there is no en passant.
//!
//! A destination on the promotion row becomes a [`Promotion`] carrying the
//! context's options. With no options left (revive mode and nothing lost) the
//! pawn simply shifts onto the last row.

use super::MoveContext;
use crate::board::Board;
use crate::moves::{Capture, Move, Promotion, Shift};
use crate::piece::Piece;
use crate::types::{Color, Position};

pub fn capturing_positions(color: Color, from: Position, _board: &Board) -> Vec<Position> {
    let step = color.forward();
    [from.offset(step, -1), from.offset(step, 1)]
        .into_iter()
        .filter(|to| to.is_on_board())
        .collect()
}

pub fn possible_moves(
    piece: &Piece,
    from: Position,
    board: &Board,
    context: &MoveContext,
) -> Vec<Move> {
    let step = piece.color().forward();
    let mut moves = Vec::new();

    let one = from.offset(step, 0);
    if one.is_on_board() && board.is_empty(one) {
        moves.push(advance(piece, from, one, None, context));
        let two = from.offset(step * 2, 0);
        if !piece.has_moved() && two.is_on_board() && board.is_empty(two) {
            moves.push(advance(piece, from, two, None, context));
        }
    }

    for to in piece.capturing_positions(from, board) {
        if let Some(occupant) = board.get(to) {
            if occupant.color() != piece.color() {
                let capture = Capture::new(to, occupant.clone());
                moves.push(advance(piece, from, to, Some(capture), context));
            }
        }
    }
    moves
}

fn advance(
    piece: &Piece,
    from: Position,
    to: Position,
    captures: Option<Capture>,
    context: &MoveContext,
) -> Move {
    if to.row == piece.color().promotion_row() && !context.promotion_options.is_empty() {
        Move::Promotion(Promotion::new(
            piece.color(),
            from,
            to,
            captures,
            context.promotion_options.clone(),
            context.revive,
        ))
    } else {
        Move::Shift(Shift::new(piece, from, to, captures))
    }
}
