//! Algebraic-style move notation
//!
//! Long form with the origin square: `e2-e4`, `Ng1-f3`, `Qd1xh5`, `e7-e8=Q`,
//! castling as `O-O` / `O-O-O`. Check and mate suffixes are appended by the
//! caller once the resulting position is known.

use crate::types::{PieceKind, Position};

pub const CHECK_SUFFIX: char = '+';
pub const MATE_SUFFIX: char = '#';

pub fn shift(kind: PieceKind, from: Position, to: Position, captures: bool) -> String {
    format!(
        "{}{}{}{}",
        kind.letter(),
        from,
        if captures { 'x' } else { '-' },
        to
    )
}

pub fn castling(king_from: Position, rook_from: Position) -> String {
    if rook_from.col > king_from.col {
        "O-O".to_string()
    } else {
        "O-O-O".to_string()
    }
}

pub fn promotion(
    from: Position,
    to: Position,
    captures: bool,
    promoted_to: Option<PieceKind>,
) -> String {
    let mut text = shift(PieceKind::Pawn, from, to, captures);
    if let Some(kind) = promoted_to {
        text.push('=');
        text.push_str(kind.letter());
    }
    text
}

/// Replace a trailing check suffix with the mate suffix
pub fn mark_mate(notation: &mut String) {
    if notation.ends_with(CHECK_SUFFIX) {
        notation.pop();
    }
    if !notation.ends_with(MATE_SUFFIX) {
        notation.push(MATE_SUFFIX);
    }
}
