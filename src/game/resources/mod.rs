//! State owned by a game session
//!
//! - [`MoveHistory`]: performed moves plus redo stack
//! - [`CapturedPieces`]: lost pieces per side, the move ledger
//! - [`Selection`]: picked piece / cell and their marks
//! - [`PendingPromotion`]: a relocated pawn waiting for its choice
//! - [`TurnPhase`]: input gating within a turn

pub mod captured;
pub mod history;
pub mod promotion;
pub mod selection;
pub mod turn;

pub use captured::CapturedPieces;
pub use history::MoveHistory;
pub use promotion::PendingPromotion;
pub use selection::Selection;
pub use turn::TurnPhase;
