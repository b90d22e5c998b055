//! Attack and check analysis
//!
//! Works on threat sets only: a square is attacked by a colour when any of its
//! pieces lists it among its capturing positions. Legality is decided by
//! probing: apply the candidate to the real board, ask whether the mover's
//! guarded piece is attacked, then reverse. Probes leave cells and flags
//! structurally identical; only the generation stamp moves on.

use crate::board::Board;
use crate::move_gen::MoveContext;
use crate::moves::Move;
use crate::types::{Color, Position};
use std::collections::BTreeSet;

/// Every square threatened by `by`
pub fn attacked_positions(board: &Board, by: Color) -> BTreeSet<Position> {
    board
        .pieces_of(by)
        .flat_map(|(position, piece)| piece.capturing_positions(position, board))
        .collect()
}

/// Is any guarded piece of `color` on a square the opponent threatens?
pub fn is_guarded_piece_attacked(board: &Board, color: Color) -> bool {
    let guarded = board.guarded_positions(color);
    if guarded.is_empty() {
        return false;
    }
    let attacked = attacked_positions(board, color.opponent());
    guarded.iter().any(|position| attacked.contains(position))
}

/// Would playing `candidate` leave the mover's guarded piece attacked?
pub fn leaves_guarded_piece_attacked(board: &mut Board, candidate: &Move) -> bool {
    let mut probe = candidate.clone();
    probe.forward(board);
    let exposed = is_guarded_piece_attacked(board, candidate.color());
    probe.reverse(board);
    exposed
}

pub fn filter_legal(board: &mut Board, candidates: Vec<Move>) -> Vec<Move> {
    candidates
        .into_iter()
        .filter(|candidate| !leaves_guarded_piece_attacked(board, candidate))
        .collect()
}

/// Moves for the piece at `position`; empty for an empty cell
pub fn legal_moves(
    board: &mut Board,
    position: Position,
    context: &MoveContext,
    check_filtering: bool,
) -> Vec<Move> {
    let Some(piece) = board.get(position) else {
        return Vec::new();
    };
    let candidates = piece.possible_moves(position, board, context);
    if check_filtering {
        filter_legal(board, candidates)
    } else {
        candidates
    }
}

/// Moves for every piece of `color`, in board order
pub fn all_legal_moves(
    board: &mut Board,
    color: Color,
    context: &MoveContext,
    check_filtering: bool,
) -> Vec<Move> {
    let origins: Vec<Position> = board.pieces_of(color).map(|(position, _)| position).collect();
    origins
        .into_iter()
        .flat_map(|origin| legal_moves(board, origin, context, check_filtering))
        .collect()
}

pub fn has_any_legal_move(
    board: &mut Board,
    color: Color,
    context: &MoveContext,
    check_filtering: bool,
) -> bool {
    let origins: Vec<Position> = board.pieces_of(color).map(|(position, _)| position).collect();
    origins
        .into_iter()
        .any(|origin| !legal_moves(board, origin, context, check_filtering).is_empty())
}
