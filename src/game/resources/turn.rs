//! Turn phase tracking
//!
//! Fine-grained state within the current turn. Input handlers consult it to
//! reject clicks while a promotion choice is outstanding or the game is over.

/// Where we are within the current turn
///
/// ```text
/// AwaitingInput <-> PieceSelected -> (move) -> AwaitingInput
///                                  \-> PromotionPending -> (choice) -> AwaitingInput
/// any -> GameOver (terminal until undo)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TurnPhase {
    /// Waiting for the player to pick a piece or cell
    #[default]
    AwaitingInput,

    /// A piece is selected and its moves are marked
    PieceSelected,

    /// Pawn already relocated; waiting for the promotion choice
    PromotionPending,

    /// Checkmate, stalemate or a captured king
    GameOver,
}

impl TurnPhase {
    /// Check if this phase allows board input
    pub fn accepts_input(&self) -> bool {
        matches!(self, TurnPhase::AwaitingInput | TurnPhase::PieceSelected)
    }

    /// Why input is refused, for [`crate::game::GameError::InputBlocked`]
    pub fn block_reason(&self) -> Option<&'static str> {
        match self {
            TurnPhase::PromotionPending => Some("a promotion choice is pending"),
            TurnPhase::GameOver => Some("the game is over"),
            TurnPhase::AwaitingInput | TurnPhase::PieceSelected => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_idle_phases_accept_input() {
        assert!(TurnPhase::AwaitingInput.accepts_input());
        assert!(TurnPhase::PieceSelected.accepts_input());
        assert!(!TurnPhase::PromotionPending.accepts_input());
        assert!(!TurnPhase::GameOver.accepts_input());
        assert_eq!(TurnPhase::AwaitingInput.block_reason(), None);
    }
}
