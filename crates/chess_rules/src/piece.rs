//! Piece entity: identity, colour, kind and historical flags
//!
//! Movement geometry lives in [`crate::move_gen`]; a piece only memoizes what
//! the dispatch table computes for it.

use crate::board::Board;
use crate::cache::MoveCache;
use crate::move_gen::{self, MoveContext};
use crate::moves::Move;
use crate::types::{Color, PieceId, PieceKind, Position};
use serde::{Deserialize, Serialize};

/// Historical flags a move may toggle
///
/// `moved` is the King/Rook `moved` flag and the Pawn `hasMoved` flag.
/// `castled` is only meaningful for King and Rook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceFlags {
    pub moved: bool,
    pub castled: bool,
}

#[derive(Debug, Clone)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    color: Color,
    flags: PieceFlags,
    cache: MoveCache,
}

// Structural equality: caches never take part.
impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.color == other.color
            && self.flags == other.flags
    }
}

impl Eq for Piece {}

impl Piece {
    pub fn new(id: PieceId, kind: PieceKind, color: Color) -> Self {
        Self {
            id,
            kind,
            color,
            flags: PieceFlags::default(),
            cache: MoveCache::default(),
        }
    }

    pub fn with_flags(mut self, flags: PieceFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn id(&self) -> &PieceId {
        &self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn flags(&self) -> PieceFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: PieceFlags) {
        self.flags = flags;
        self.cache.clear();
    }

    /// Pawn double-step gate
    pub fn has_moved(&self) -> bool {
        self.flags.moved
    }

    pub fn is_guarded(&self) -> bool {
        self.kind.is_guarded()
    }

    /// True for an unmoved, never-castled King or Rook
    pub fn can_castle(&self) -> bool {
        self.kind.tracks_castling() && !self.flags.moved && !self.flags.castled
    }

    /// Squares this piece threatens from `position`, ignoring legality
    pub fn capturing_positions(&self, position: Position, board: &Board) -> Vec<Position> {
        self.cache
            .capturing_or_insert_with(board.generation(), position, || {
                move_gen::capturing_positions(self.kind, self.color, position, board)
            })
    }

    /// Candidate moves from `position` before check filtering
    pub fn possible_moves(
        &self,
        position: Position,
        board: &Board,
        context: &MoveContext,
    ) -> Vec<Move> {
        self.cache.possible_or_insert_with(
            board.generation(),
            position,
            context.fingerprint(),
            || move_gen::possible_moves(self, position, board, context),
        )
    }

    pub fn invalidate_cache(&self) {
        self.cache.clear();
    }

    pub(crate) fn cache_is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
