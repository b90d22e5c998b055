//! Pawn relocation followed by replacement with a chosen piece
//!
//! Two phases: `forward` commits the relocation (and capture) eagerly; the
//! replacement is applied by [`Promotion::resolve`] once a piece kind is
//! chosen. Until then the pawn stands on the target square.

use super::marks::MarkBoard;
use super::shift::show_relocation_marks;
use super::{notation, Capture, CaptureLedger, PerformContext};
use crate::board::Board;
use crate::error::{RulesError, RulesResult};
use crate::piece::{Piece, PieceFlags};
use crate::types::{Color, PieceKind, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    pub(crate) color: Color,
    pub(crate) from: Position,
    pub(crate) to: Position,
    pub(crate) captures: Option<Capture>,
    pub(crate) transform_options: Vec<PieceKind>,
    /// Options come from the promoting side's lost pieces
    pub(crate) revive: bool,
    /// Pawn as it stood before the last `forward`
    pub(crate) pawn: Option<Piece>,
    /// Piece placed on the target once resolved
    pub(crate) chosen: Option<Piece>,
    /// Lost-pool snapshot of a revived piece
    pub(crate) revived: Option<Piece>,
    pub(crate) performed: bool,
    pub(crate) notation: Option<String>,
}

impl Promotion {
    /// `transform_options` must be non-empty; move generation never builds a
    /// promotion without options.
    pub fn new(
        color: Color,
        from: Position,
        to: Position,
        captures: Option<Capture>,
        transform_options: Vec<PieceKind>,
        revive: bool,
    ) -> Self {
        debug_assert!(!transform_options.is_empty());
        Self {
            color,
            from,
            to,
            captures,
            transform_options,
            revive,
            pawn: None,
            chosen: None,
            revived: None,
            performed: false,
            notation: None,
        }
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    pub fn transform_options(&self) -> &[PieceKind] {
        &self.transform_options
    }

    pub fn is_revive(&self) -> bool {
        self.revive
    }

    pub fn chosen(&self) -> Option<&Piece> {
        self.chosen.as_ref()
    }

    pub fn chosen_kind(&self) -> Option<PieceKind> {
        self.chosen.as_ref().map(Piece::kind)
    }

    /// Relocated but not yet replaced
    pub fn is_pending(&self) -> bool {
        self.performed && self.chosen.is_none()
    }

    pub fn forward(&mut self, board: &mut Board) {
        if self.performed {
            tracing::warn!("[MOVE] Promotion {}-{} is already applied", self.from, self.to);
            return;
        }
        if let Some(capture) = &self.captures {
            board.take(capture.position);
        }
        let Some(mut pawn) = board.take(self.from) else {
            tracing::warn!("[MOVE] Promotion origin {} is empty", self.from);
            return;
        };
        self.pawn = Some(pawn.clone());
        match &self.chosen {
            Some(chosen) => {
                board.set(self.to, Some(chosen.clone()));
            }
            None => {
                pawn.set_flags(PieceFlags {
                    moved: true,
                    ..pawn.flags()
                });
                board.set(self.to, Some(pawn));
            }
        }
        self.performed = true;
    }

    pub fn reverse(&mut self, board: &mut Board) {
        if !self.performed {
            tracing::warn!("[MOVE] Promotion {}-{} is not applied", self.from, self.to);
            return;
        }
        board.take(self.to);
        // The pawn snapshot itself comes back, id and flags included, not a
        // new pawn of the same kind and colour.
        if let Some(pawn) = &self.pawn {
            board.set(self.from, Some(pawn.clone()));
        }
        if let Some(capture) = &self.captures {
            board.set(capture.position, Some(capture.piece.clone()));
        }
        self.performed = false;
    }

    /// Second phase: replace the relocated pawn with a piece of `kind`
    pub fn resolve(
        &mut self,
        board: &mut Board,
        kind: PieceKind,
        ctx: &mut PerformContext<'_>,
    ) -> RulesResult<()> {
        if !self.is_pending() {
            return Err(RulesError::NoPendingPromotion);
        }
        if !self.transform_options.contains(&kind) {
            return Err(RulesError::InvalidPromotionChoice {
                kind: kind.tag().to_string(),
            });
        }
        let piece = if self.revive {
            let revived = ctx
                .ledger
                .take_lost(self.color, kind)
                .ok_or_else(|| RulesError::NothingToRevive {
                    kind: kind.tag().to_string(),
                })?;
            if let Some(pawn) = &self.pawn {
                ctx.ledger.record_loss(pawn.clone());
            }
            self.revived = Some(revived.clone());
            revived.with_flags(PieceFlags::default())
        } else {
            Piece::new(ctx.ids.next_id(), kind, self.color)
        };
        tracing::debug!("[PROMOTION] {} becomes {} ({})", self.to, kind, piece.id());
        board.set(self.to, Some(piece.clone()));
        self.chosen = Some(piece);
        Ok(())
    }

    /// Fix the choice before the move is performed, as when replaying a
    /// stored game
    pub fn preset_choice(&mut self, piece: Piece) -> RulesResult<()> {
        if self.performed {
            return Err(RulesError::NoPendingPromotion);
        }
        if piece.color() != self.color || !self.transform_options.contains(&piece.kind()) {
            return Err(RulesError::InvalidPromotionChoice {
                kind: piece.kind().tag().to_string(),
            });
        }
        self.chosen = Some(piece);
        Ok(())
    }

    /// Ledger effects of a resolved revive, replayed on redo and when a
    /// preset choice is performed; keeps the lost snapshot for undo
    pub(crate) fn replay_revive(&mut self, ledger: &mut dyn CaptureLedger) {
        if let (true, Some(chosen), Some(pawn)) = (self.revive, &self.chosen, &self.pawn) {
            if let Some(lost) = ledger.retract_loss(self.color, chosen.id()) {
                self.revived = Some(lost);
            }
            ledger.record_loss(pawn.clone());
        }
    }

    /// Inverse of [`Promotion::replay_revive`]
    pub(crate) fn revert_revive(&self, ledger: &mut dyn CaptureLedger) {
        let returned = self.revived.as_ref().or(self.chosen.as_ref());
        if let (true, Some(returned), Some(pawn)) = (self.revive, returned, &self.pawn) {
            ledger.retract_loss(self.color, pawn.id());
            ledger.record_loss(returned.clone());
        }
    }

    pub fn clickable_positions(&self) -> Vec<Position> {
        let mut positions = vec![self.to];
        if let Some(capture) = &self.captures {
            if capture.position != self.to {
                positions.push(capture.position);
            }
        }
        positions
    }

    pub fn show_cell_marks(&self, marks: &mut MarkBoard) {
        show_relocation_marks(self.to, self.captures.as_ref(), marks);
    }

    pub(crate) fn base_notation(&self) -> String {
        notation::promotion(self.from, self.to, self.captures.is_some(), self.chosen_kind())
    }
}
