//! Knight threats
//!
//! Knights jump, so occupancy never blocks; only the board edge filters the
//! eight (±1, ±2) / (±2, ±1) offsets.

use super::tables::KNIGHT_OFFSETS;
use crate::board::Board;
use crate::types::{Color, Position};

pub fn capturing_positions(_color: Color, from: Position, _board: &Board) -> Vec<Position> {
    KNIGHT_OFFSETS
        .iter()
        .map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|to| to.is_on_board())
        .collect()
}
