//! Move history with undo/redo
//!
//! Keeps the performed moves in chronological order plus a redo stack of
//! moves taken back. The moves themselves carry everything needed to replay
//! or reverse them, so traversal is just `undo`/`redo` on the move objects.
//!
//! ```text
//! performed: [m1, m2, m3]   redo: []
//!            undo -> [m1, m2]      redo: [m3]
//!            redo -> [m1, m2, m3]  redo: []
//!            push m4 after an undo drops the redo stack
//! ```

use chess_rules::{Board, CaptureLedger, Move, MoveRecord};

#[derive(Debug, Default)]
pub struct MoveHistory {
    /// Index 0 = White's first move, index 1 = Black's reply, etc.
    performed: Vec<Move>,
    /// Most recently undone move last
    redo: Vec<Move>,
}

impl MoveHistory {
    /// Append a performed move; invalidates the redo stack
    pub fn push(&mut self, mv: Move) {
        if !self.redo.is_empty() {
            tracing::debug!("[HISTORY] Dropping {} redo move(s)", self.redo.len());
            self.redo.clear();
        }
        self.performed.push(mv);
    }

    /// Take back the last move
    pub fn undo(&mut self, board: &mut Board, ledger: &mut dyn CaptureLedger) -> Option<&Move> {
        let mut mv = self.performed.pop()?;
        mv.undo(board, ledger);
        tracing::info!("[HISTORY] Undo {}", mv.describe());
        self.redo.push(mv);
        self.redo.last()
    }

    /// Re-apply the most recently undone move
    pub fn redo(&mut self, board: &mut Board, ledger: &mut dyn CaptureLedger) -> Option<&Move> {
        let mut mv = self.redo.pop()?;
        mv.redo(board, ledger);
        tracing::info!("[HISTORY] Redo {}", mv.describe());
        self.performed.push(mv);
        self.performed.last()
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.performed.last()
    }

    pub fn moves(&self) -> &[Move] {
        &self.performed
    }

    /// Number of half-moves played
    pub fn len(&self) -> usize {
        self.performed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.performed.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.performed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn notations(&self) -> Vec<String> {
        self.performed.iter().map(Move::describe).collect()
    }

    pub fn records(&self) -> Vec<MoveRecord> {
        self.performed.iter().map(Move::to_record).collect()
    }

    pub fn clear(&mut self) {
        self.performed.clear();
        self.redo.clear();
    }
}
