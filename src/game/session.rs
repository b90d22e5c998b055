//! Game session: turn order, selection, legality and history
//!
//! A [`GameSession`] is the single mutator of its board. Input handlers
//! (`on_piece_click`, `on_cell_click`, `on_drag_*`) translate clicks into
//! selection changes and, when a click lands on a clickable position of a
//! selected move, commit that move.
//!
//! # Turn flow
//!
//! ```text
//! AwaitingInput --click own/enemy piece--> PieceSelected
//! PieceSelected --click same piece-------> AwaitingInput
//! PieceSelected --click clickable square--> perform
//!     perform: Done             -> status check -> AwaitingInput | GameOver
//!     perform: PromotionPending -> PromotionPending --resolve_promotion--> status check
//! ```
//!
//! While a promotion is pending every input, undo and redo is refused with
//! [`GameError::InputBlocked`]; the relocation has already been committed and
//! cannot be cancelled.

use crate::core::GameSettings;
use crate::game::error::{GameError, GameResult};
use crate::game::resources::{CapturedPieces, MoveHistory, PendingPromotion, Selection, TurnPhase};
use crate::game::status::GameStatus;
use chess_rules::{
    attack, Board, BoardRecord, CaptureLedger, Color, IdGenerator, MarkBoard, Move, MoveContext,
    MoveEffects, PerformContext, Performed, PieceKind, Position, RulesError, UuidIds,
};

/// What a committed move produced, for audio / toast collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Empty while a promotion is pending
    pub notation: String,
    pub effects: MoveEffects,
    pub status: GameStatus,
    pub promotion_pending: bool,
}

pub struct GameSession {
    board: Board,
    initial_board: BoardRecord,
    initial_turn: Color,
    turn: Color,
    settings: GameSettings,
    ids: Box<dyn IdGenerator>,
    captured: CapturedPieces,
    history: MoveHistory,
    selection: Selection,
    pending: PendingPromotion,
    phase: TurnPhase,
    status: GameStatus,
}

impl GameSession {
    /// Standard setup with random piece ids
    pub fn new(settings: GameSettings) -> Self {
        Self::with_ids(settings, Box::new(UuidIds))
    }

    /// Standard setup drawing ids from `ids`
    pub fn with_ids(settings: GameSettings, mut ids: Box<dyn IdGenerator>) -> Self {
        let board = Board::standard(ids.as_mut());
        Self::from_board(board, Color::White, settings, ids)
    }

    /// Start from an arbitrary position
    pub fn from_board(
        board: Board,
        turn: Color,
        settings: GameSettings,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let initial_board = BoardRecord::from_board(&board);
        let mut session = Self {
            board,
            initial_board,
            initial_turn: turn,
            turn,
            settings,
            ids,
            captured: CapturedPieces::default(),
            history: MoveHistory::default(),
            selection: Selection::default(),
            pending: PendingPromotion::default(),
            phase: TurnPhase::AwaitingInput,
            status: GameStatus::default(),
        };
        session.refresh_status();
        tracing::info!("[GAME] New session, {} to move", turn);
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn initial_board(&self) -> &BoardRecord {
        &self.initial_board
    }

    /// Side to move in the initial position
    pub fn initial_turn(&self) -> Color {
        self.initial_turn
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn selected_piece(&self) -> Option<Position> {
        self.selection.piece
    }

    pub fn selected_cell(&self) -> Option<Position> {
        self.selection.cell
    }

    pub fn dragged_over_cell(&self) -> Option<Position> {
        self.selection.dragged_over
    }

    pub fn available_moves(&self) -> &[Move] {
        &self.selection.moves
    }

    pub fn marks(&self) -> &MarkBoard {
        &self.selection.marks
    }

    pub fn pending_promotion(&self) -> &PendingPromotion {
        &self.pending
    }

    /// Generation inputs for `color`'s moves under the current settings
    pub fn move_context(&self, color: Color) -> MoveContext {
        if self.settings.revive_from_captured_pieces {
            let lost = self.captured.lost_kinds(color);
            MoveContext::reviving(&self.settings.transform_options, &lost)
        } else {
            MoveContext::new(self.settings.transform_options.clone())
        }
    }

    /// Moves of the piece at `position`, filtered per settings
    pub fn legal_moves_at(&mut self, position: Position) -> Vec<Move> {
        let Some(color) = self.board.color_at(position) else {
            return Vec::new();
        };
        let context = self.move_context(color);
        attack::legal_moves(&mut self.board, position, &context, self.settings.check_filtering)
    }

    /// Every move of the side to move
    pub fn all_legal_moves(&mut self) -> Vec<Move> {
        let context = self.move_context(self.turn);
        attack::all_legal_moves(&mut self.board, self.turn, &context, self.settings.check_filtering)
    }

    fn ensure_input(&self) -> GameResult<()> {
        match self.phase.block_reason() {
            Some(reason) => Err(GameError::InputBlocked { reason }),
            None => Ok(()),
        }
    }

    /// Click on an occupied cell
    pub fn on_piece_click(&mut self, position: Position) -> GameResult<Option<MoveOutcome>> {
        self.ensure_input()?;
        if let Some(index) = self.committable_move_at(position)? {
            return self.commit(index).map(Some);
        }
        if self.selection.piece == Some(position) {
            self.deselect();
            return Ok(None);
        }
        if self.board.is_empty(position) {
            self.select_cell(position);
        } else {
            self.select_piece(position);
        }
        Ok(None)
    }

    /// Click on a cell, occupied or not
    pub fn on_cell_click(&mut self, position: Position) -> GameResult<Option<MoveOutcome>> {
        self.ensure_input()?;
        if let Some(index) = self.committable_move_at(position)? {
            return self.commit(index).map(Some);
        }
        if !self.board.is_empty(position) {
            return self.on_piece_click(position);
        }
        self.select_cell(position);
        Ok(None)
    }

    /// Pick up the piece at `position`
    pub fn on_drag_start(&mut self, position: Position) -> GameResult<Option<MoveOutcome>> {
        self.ensure_input()?;
        if self.board.is_empty(position) {
            return Ok(None);
        }
        if self.selection.piece != Some(position) {
            self.select_piece(position);
        }
        Ok(None)
    }

    pub fn on_drag_over(&mut self, position: Position) -> GameResult<Option<MoveOutcome>> {
        self.ensure_input()?;
        if self.selection.is_selected() {
            self.selection.dragged_over = Some(position);
        }
        Ok(None)
    }

    /// Drop the dragged piece on `position`; commits when a move claims it
    pub fn on_drag_end(&mut self, position: Position) -> GameResult<Option<MoveOutcome>> {
        self.ensure_input()?;
        self.selection.dragged_over = None;
        match self.committable_move_at(position)? {
            Some(index) => self.commit(index).map(Some),
            None => Ok(None),
        }
    }

    /// The selected move claiming `position`, if any
    pub fn get_position_matching_move(&self, position: Position) -> GameResult<Option<&Move>> {
        Ok(self.matching_index(position)?.map(|index| &self.selection.moves[index]))
    }

    fn matching_index(&self, position: Position) -> GameResult<Option<usize>> {
        let mut matches = self
            .selection
            .moves
            .iter()
            .enumerate()
            .filter(|(_, mv)| mv.is_clickable_at(position))
            .map(|(index, _)| index);
        let first = matches.next();
        let extra = matches.count();
        if extra > 0 {
            tracing::error!("[GAME] {} moves claim {}", extra + 1, position);
            return Err(RulesError::AmbiguousClickablePosition {
                position,
                count: extra + 1,
            }
            .into());
        }
        Ok(first)
    }

    fn committable_move_at(&self, position: Position) -> GameResult<Option<usize>> {
        if !self.selection.committable {
            return Ok(None);
        }
        self.matching_index(position)
    }

    fn select_piece(&mut self, position: Position) {
        let Some(color) = self.board.color_at(position) else {
            return;
        };
        let moves = self.legal_moves_at(position);
        let committable = color == self.turn;
        tracing::debug!(
            "[GAME] Selected {} at {} ({} moves{})",
            color,
            position,
            moves.len(),
            if committable { "" } else { ", inspection only" }
        );
        self.selection.select_piece(position, moves, committable);
        self.phase = TurnPhase::PieceSelected;
    }

    fn select_cell(&mut self, position: Position) {
        self.selection.select_cell(position);
        self.phase = TurnPhase::AwaitingInput;
    }

    fn deselect(&mut self) {
        self.selection.clear();
        self.phase = TurnPhase::AwaitingInput;
    }

    fn commit(&mut self, index: usize) -> GameResult<MoveOutcome> {
        let mv = self.selection.moves.swap_remove(index);
        self.selection.clear();
        self.apply(mv)
    }

    /// Perform `mv` for the side to move
    pub(crate) fn apply(&mut self, mut mv: Move) -> GameResult<MoveOutcome> {
        let performed = mv.perform(
            &mut self.board,
            &mut PerformContext {
                ledger: &mut self.captured,
                ids: self.ids.as_mut(),
            },
        );
        match performed {
            Performed::Done => Ok(self.finish(mv)),
            Performed::PromotionPending => {
                tracing::info!(
                    "[PROMOTION] Pawn reached {}, waiting for a choice among {:?}",
                    mv.target(),
                    mv.as_promotion().map(|p| p.transform_options()).unwrap_or_default()
                );
                let outcome = MoveOutcome {
                    notation: String::new(),
                    effects: mv.effects(),
                    status: self.status,
                    promotion_pending: true,
                };
                self.pending.start(mv);
                self.phase = TurnPhase::PromotionPending;
                Ok(outcome)
            }
        }
    }

    /// Second phase of a pending promotion
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> GameResult<MoveOutcome> {
        let Some(mut mv) = self.pending.take() else {
            return Err(RulesError::NoPendingPromotion.into());
        };
        let resolved = mv.resolve_promotion(
            &mut self.board,
            kind,
            &mut PerformContext {
                ledger: &mut self.captured,
                ids: self.ids.as_mut(),
            },
        );
        if let Err(err) = resolved {
            tracing::warn!("[PROMOTION] Rejected choice {}: {}", kind, err);
            self.pending.start(mv);
            return Err(err.into());
        }
        Ok(self.finish(mv))
    }

    /// Promotion choices cannot be abandoned; always an error
    pub fn cancel_promotion(&mut self) -> GameResult<()> {
        if self.pending.is_active() {
            Err(RulesError::PromotionCancellationForbidden.into())
        } else {
            Err(RulesError::NoPendingPromotion.into())
        }
    }

    /// Resolve a pending promotion without asking, by configured importance
    pub fn resolve_promotion_by_importance(&mut self) -> GameResult<MoveOutcome> {
        let options = self.pending.options();
        let kind = self
            .settings
            .most_important(&options)
            .ok_or(RulesError::NoPendingPromotion)?;
        tracing::debug!("[PROMOTION] Auto-selecting {} from {:?}", kind, options);
        self.resolve_promotion(kind)
    }

    fn finish(&mut self, mut mv: Move) -> MoveOutcome {
        self.turn = self.turn.opponent();
        let king_taken = mv
            .captures()
            .filter(|capture| capture.piece.is_guarded())
            .map(|_| mv.color());
        self.status = match king_taken {
            Some(winner) => GameStatus::GuardedPieceCaptured { winner },
            None => self.position_status(),
        };
        if matches!(self.status, GameStatus::Checkmate { .. }) {
            mv.mark_mate();
        }
        let outcome = MoveOutcome {
            notation: mv.describe(),
            effects: mv.effects(),
            status: self.status,
            promotion_pending: false,
        };
        tracing::info!(
            "[GAME] {} played {} ({})",
            mv.color(),
            outcome.notation,
            self.status.message()
        );
        self.history.push(mv);
        self.phase = if self.status.is_game_over() {
            TurnPhase::GameOver
        } else {
            TurnPhase::AwaitingInput
        };
        outcome
    }

    /// Status of the side to move judged from the board alone
    fn position_status(&mut self) -> GameStatus {
        let context = self.move_context(self.turn);
        let in_check = attack::is_guarded_piece_attacked(&self.board, self.turn);
        let filtering = self.settings.check_filtering;
        let can_move = attack::has_any_legal_move(&mut self.board, self.turn, &context, filtering);
        match (can_move, in_check) {
            (true, _) => GameStatus::Playing { in_check },
            (false, true) => GameStatus::Checkmate {
                winner: self.turn.opponent(),
            },
            (false, false) => GameStatus::Stalemate,
        }
    }

    fn refresh_status(&mut self) {
        let king_taken = self
            .history
            .last_move()
            .and_then(|mv| mv.captures().filter(|c| c.piece.is_guarded()).map(|_| mv.color()));
        self.status = match king_taken {
            Some(winner) => GameStatus::GuardedPieceCaptured { winner },
            None => self.position_status(),
        };
        self.phase = if self.status.is_game_over() {
            TurnPhase::GameOver
        } else {
            TurnPhase::AwaitingInput
        };
    }

    fn ensure_not_pending(&self) -> GameResult<()> {
        if self.pending.is_active() {
            return Err(GameError::InputBlocked {
                reason: "a promotion choice is pending",
            });
        }
        Ok(())
    }

    /// Take back the last move
    pub fn undo(&mut self) -> GameResult<()> {
        self.ensure_not_pending()?;
        let mover = self
            .history
            .undo(&mut self.board, &mut self.captured)
            .map(Move::color)
            .ok_or(GameError::NothingToUndo)?;
        self.turn = mover;
        self.selection.clear();
        self.refresh_status();
        Ok(())
    }

    /// Replay the most recently undone move
    pub fn redo(&mut self) -> GameResult<()> {
        self.ensure_not_pending()?;
        let mover = self
            .history
            .redo(&mut self.board, &mut self.captured)
            .map(Move::color)
            .ok_or(GameError::NothingToRedo)?;
        self.turn = mover.opponent();
        self.selection.clear();
        self.refresh_status();
        Ok(())
    }

    pub(crate) fn ids_mut(&mut self) -> &mut dyn IdGenerator {
        self.ids.as_mut()
    }
}
