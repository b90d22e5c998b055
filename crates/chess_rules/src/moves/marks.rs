//! Parallel board of visual intent markers
//!
//! The presentation layer paints cells from this board; the rules engine only
//! writes which kind of intent a cell carries for the current selection.

use crate::types::Position;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellMark {
    /// Destination the selection can move to
    Available,
    /// Destination that captures its occupant
    Capture,
    /// Victim square distinct from the destination
    Capturing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkBoard {
    cells: [[Option<CellMark>; 8]; 8],
}

impl MarkBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: Position) -> Option<CellMark> {
        if !position.is_on_board() {
            return None;
        }
        self.cells[position.row as usize][position.col as usize]
    }

    pub fn set(&mut self, position: Position, mark: CellMark) {
        if position.is_on_board() {
            self.cells[position.row as usize][position.col as usize] = Some(mark);
        }
    }

    pub fn clear(&mut self) {
        self.cells = Default::default();
    }

    /// Marked cells in row-major order
    pub fn marked(&self) -> Vec<(Position, CellMark)> {
        let mut out = Vec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, mark) in cells.iter().enumerate() {
                if let Some(mark) = mark {
                    out.push((Position::new(row as i8, col as i8), *mark));
                }
            }
        }
        out
    }
}
