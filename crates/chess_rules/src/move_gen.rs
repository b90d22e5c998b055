//! Move generation through a per-kind capability table
//!
//! Each [`PieceKind`] maps to a static [`Capability`]: a threat function
//! (squares the piece attacks, ignoring legality) and a move function
//! (candidate moves before check filtering). Kinds that need nothing special
//! use [`shifts_from_threats`] as their move function.
//!
//! ## Algorithm
//!
//! - Sliding pieces ray-cast each direction and include the first occupied
//!   square, friend or foe, then stop.
//! - Leapers (knight, king) filter fixed offsets to on-board squares.
//! - Pawns threaten only their two forward diagonals; their quiet steps and
//!   promotions are added by the pawn move function.
//! - Kings and rooks append castling candidates.
//!
//! Results are memoized per piece; see [`crate::piece::Piece::possible_moves`].

pub mod castling;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod sliding;
pub mod tables;

use crate::board::Board;
use crate::moves::{Capture, Move, Shift};
use crate::piece::Piece;
use crate::types::{Color, PieceKind, Position};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Default promotion choices, in offer order
pub const DEFAULT_TRANSFORM_OPTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Per-turn inputs to move generation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveContext {
    /// Kinds a promoting pawn may become, in offer order. Empty means pawns
    /// reaching the last rank stay pawns.
    pub promotion_options: Vec<PieceKind>,
    /// Options were narrowed to the side's lost pieces
    pub revive: bool,
}

impl MoveContext {
    pub fn new(promotion_options: Vec<PieceKind>) -> Self {
        Self {
            promotion_options,
            revive: false,
        }
    }

    /// Options limited to kinds the mover has lost
    pub fn reviving(configured: &[PieceKind], lost: &[PieceKind]) -> Self {
        Self {
            promotion_options: configured
                .iter()
                .copied()
                .filter(|kind| lost.contains(kind))
                .collect(),
            revive: true,
        }
    }

    /// Cache key component
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for MoveContext {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSFORM_OPTIONS.to_vec())
    }
}

type ThreatFn = fn(Color, Position, &Board) -> Vec<Position>;
type MovesFn = fn(&Piece, Position, &Board, &MoveContext) -> Vec<Move>;

/// Behaviour of one piece kind
pub struct Capability {
    pub threats: ThreatFn,
    pub moves: MovesFn,
}

static PAWN: Capability = Capability {
    threats: pawn::capturing_positions,
    moves: pawn::possible_moves,
};

static KNIGHT: Capability = Capability {
    threats: knight::capturing_positions,
    moves: shifts_from_threats,
};

static BISHOP: Capability = Capability {
    threats: sliding::bishop_capturing_positions,
    moves: shifts_from_threats,
};

static ROOK: Capability = Capability {
    threats: sliding::rook_capturing_positions,
    moves: castling::rook_possible_moves,
};

static QUEEN: Capability = Capability {
    threats: sliding::queen_capturing_positions,
    moves: shifts_from_threats,
};

static KING: Capability = Capability {
    threats: king::capturing_positions,
    moves: king::possible_moves,
};

pub fn capability(kind: PieceKind) -> &'static Capability {
    match kind {
        PieceKind::Pawn => &PAWN,
        PieceKind::Knight => &KNIGHT,
        PieceKind::Bishop => &BISHOP,
        PieceKind::Rook => &ROOK,
        PieceKind::Queen => &QUEEN,
        PieceKind::King => &KING,
    }
}

/// Uncached threat set; prefer [`Piece::capturing_positions`]
pub fn capturing_positions(
    kind: PieceKind,
    color: Color,
    from: Position,
    board: &Board,
) -> Vec<Position> {
    (capability(kind).threats)(color, from, board)
}

/// Uncached candidate moves; prefer [`Piece::possible_moves`]
pub fn possible_moves(
    piece: &Piece,
    from: Position,
    board: &Board,
    context: &MoveContext,
) -> Vec<Move> {
    (capability(piece.kind()).moves)(piece, from, board, context)
}

/// Threatened squares minus friendly-occupied ones, each as a Shift
pub fn shifts_from_threats(
    piece: &Piece,
    from: Position,
    board: &Board,
    _context: &MoveContext,
) -> Vec<Move> {
    piece
        .capturing_positions(from, board)
        .into_iter()
        .filter_map(|to| match board.get(to) {
            Some(occupant) if occupant.color() == piece.color() => None,
            Some(occupant) => Some(Move::Shift(Shift::new(
                piece,
                from,
                to,
                Some(Capture::new(to, occupant.clone())),
            ))),
            None => Some(Move::Shift(Shift::new(piece, from, to, None))),
        })
        .collect()
}

#[cfg(test)]
mod tests;
