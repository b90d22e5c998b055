//! Castling candidates for kings and rooks
//!
//! From an unmoved, never-castled King or Rook, walk outward along the row in
//! both directions. The first occupied square decides: it must hold a
//! same-colour partner (a Rook for a King, a King for a Rook) that can still
//! castle, otherwise that direction yields nothing. Every square strictly
//! between the pair is therefore empty.
//!
//! The king lands two squares toward the rook and the rook lands on the square
//! the king crossed. Both landing squares must be empty or be one of the two
//! origins.

use super::{shifts_from_threats, MoveContext};
use crate::board::Board;
use crate::moves::{Castling, CastlingInitiator, Move};
use crate::piece::Piece;
use crate::types::{PieceKind, Position};

const DIRECTIONS: [i8; 2] = [-1, 1];

/// Rook move function: plain shifts plus castling
pub fn rook_possible_moves(
    piece: &Piece,
    from: Position,
    board: &Board,
    context: &MoveContext,
) -> Vec<Move> {
    let mut moves = shifts_from_threats(piece, from, board, context);
    moves.extend(castling_moves(piece, from, board));
    moves
}

pub fn castling_moves(piece: &Piece, from: Position, board: &Board) -> Vec<Move> {
    if !piece.can_castle() {
        return Vec::new();
    }
    let (initiator, partner_kind) = match piece.kind() {
        PieceKind::King => (CastlingInitiator::King, PieceKind::Rook),
        PieceKind::Rook => (CastlingInitiator::Rook, PieceKind::King),
        _ => return Vec::new(),
    };

    DIRECTIONS
        .iter()
        .filter_map(|&toward| {
            let partner_at = find_partner(piece, from, toward, partner_kind, board)?;
            let (king_from, rook_from) = match initiator {
                CastlingInitiator::King => (from, partner_at),
                CastlingInitiator::Rook => (partner_at, from),
            };
            plan(piece, king_from, rook_from, initiator, board)
        })
        .collect()
}

fn find_partner(
    piece: &Piece,
    from: Position,
    toward: i8,
    partner_kind: PieceKind,
    board: &Board,
) -> Option<Position> {
    let mut cursor = from.offset(0, toward);
    while cursor.is_on_board() {
        if let Some(occupant) = board.get(cursor) {
            let cooperates = occupant.color() == piece.color()
                && occupant.kind() == partner_kind
                && occupant.can_castle();
            return cooperates.then_some(cursor);
        }
        cursor = cursor.offset(0, toward);
    }
    None
}

fn plan(
    piece: &Piece,
    king_from: Position,
    rook_from: Position,
    initiator: CastlingInitiator,
    board: &Board,
) -> Option<Move> {
    let toward = (rook_from.col - king_from.col).signum();
    let king_to = king_from.offset(0, 2 * toward);
    let rook_to = king_to.offset(0, -toward);
    if !king_to.is_on_board() {
        return None;
    }
    let landable =
        |square: Position| square == king_from || square == rook_from || board.is_empty(square);
    if !landable(king_to) || !landable(rook_to) {
        return None;
    }
    Some(Move::Castling(Castling::new(
        piece.color(),
        king_from,
        king_to,
        rook_from,
        rook_to,
        initiator,
    )))
}
