//! Game-wide configuration
//!
//! [`GameSettings`] is shared by every session and persisted between runs by
//! [`crate::core::settings_persistence`].

use chess_rules::{PieceKind, DEFAULT_TRANSFORM_OPTIONS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::{CoreError, CoreResult};

/// Rule switches and promotion preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Filter out moves that leave the mover's king attacked. Turning this
    /// off allows kings to be captured.
    pub check_filtering: bool,

    /// Promote only to kinds the side has already lost, reviving the lost
    /// piece itself
    pub revive_from_captured_pieces: bool,

    /// Promotion choices in offer order
    pub transform_options: Vec<PieceKind>,

    /// Weight per kind used to pick a promotion when nobody is asked
    pub piece_importance: BTreeMap<PieceKind, u32>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            check_filtering: true,
            revive_from_captured_pieces: false,
            transform_options: DEFAULT_TRANSFORM_OPTIONS.to_vec(),
            piece_importance: default_importance(),
        }
    }
}

fn default_importance() -> BTreeMap<PieceKind, u32> {
    BTreeMap::from([
        (PieceKind::Pawn, 1),
        (PieceKind::Knight, 3),
        (PieceKind::Bishop, 3),
        (PieceKind::Rook, 5),
        (PieceKind::Queen, 9),
        (PieceKind::King, 100),
    ])
}

impl GameSettings {
    pub fn importance(&self, kind: PieceKind) -> u32 {
        self.piece_importance.get(&kind).copied().unwrap_or(0)
    }

    /// Most important of `options`; the first listed wins ties
    pub fn most_important(&self, options: &[PieceKind]) -> Option<PieceKind> {
        options.iter().copied().fold(None, |best, kind| match best {
            Some(current) if self.importance(current) >= self.importance(kind) => Some(current),
            _ => Some(kind),
        })
    }

    /// Reject configurations move generation cannot honour
    pub fn validate(&self) -> CoreResult<()> {
        if self.transform_options.is_empty() {
            return Err(CoreError::InvalidSettings {
                message: "transform_options must not be empty".to_string(),
            });
        }
        if let Some(kind) = self
            .transform_options
            .iter()
            .find(|kind| matches!(kind, PieceKind::Pawn | PieceKind::King))
        {
            return Err(CoreError::InvalidSettings {
                message: format!("a pawn cannot promote to {kind}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        //! Check filtering on, revive off, four classical options
        let settings = GameSettings::default();
        assert!(settings.check_filtering);
        assert!(!settings.revive_from_captured_pieces);
        assert_eq!(
            settings.transform_options,
            vec![PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight]
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_most_important_prefers_first_on_tie() {
        let settings = GameSettings::default();
        assert_eq!(
            settings.most_important(&[PieceKind::Knight, PieceKind::Bishop]),
            Some(PieceKind::Knight)
        );
        assert_eq!(
            settings.most_important(&[PieceKind::Bishop, PieceKind::Queen, PieceKind::Rook]),
            Some(PieceKind::Queen)
        );
        assert_eq!(settings.most_important(&[]), None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: GameSettings = serde_json::from_str(r#"{"check_filtering": false}"#).unwrap();
        assert!(!settings.check_filtering);
        assert_eq!(settings.transform_options.len(), 4);
        assert_eq!(settings.importance(PieceKind::Queen), 9);
    }

    #[test]
    fn test_validate_rejects_king_option() {
        let settings = GameSettings {
            transform_options: vec![PieceKind::King],
            ..GameSettings::default()
        };
        assert!(matches!(settings.validate(), Err(CoreError::InvalidSettings { .. })));
    }
}
