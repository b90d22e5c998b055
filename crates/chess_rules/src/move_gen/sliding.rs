//! Sliding piece threats (bishops, rooks, queens)
//!
//! Classic ray-cast: walk one step at a time, stop at the board edge or at the
//! first occupied square, whichever comes first. The occupied square is
//! included whatever its colour, which is what check detection needs.
//! Friendly squares are dropped later, during move generation.

use super::tables::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use crate::board::Board;
use crate::types::{Color, Position};

/// Squares reached along `directions`, in direction order
pub fn ray_cast(from: Position, directions: &[(i8, i8)], board: &Board) -> Vec<Position> {
    let mut squares = Vec::new();
    for &(d_row, d_col) in directions {
        let mut cursor = from.offset(d_row, d_col);
        while cursor.is_on_board() {
            squares.push(cursor);
            if !board.is_empty(cursor) {
                break;
            }
            cursor = cursor.offset(d_row, d_col);
        }
    }
    squares
}

pub fn rook_capturing_positions(_color: Color, from: Position, board: &Board) -> Vec<Position> {
    ray_cast(from, &ROOK_DIRECTIONS, board)
}

pub fn bishop_capturing_positions(_color: Color, from: Position, board: &Board) -> Vec<Position> {
    ray_cast(from, &BISHOP_DIRECTIONS, board)
}

/// Union of rook and bishop rays
pub fn queen_capturing_positions(_color: Color, from: Position, board: &Board) -> Vec<Position> {
    let mut squares = ray_cast(from, &ROOK_DIRECTIONS, board);
    squares.extend(ray_cast(from, &BISHOP_DIRECTIONS, board));
    squares
}
