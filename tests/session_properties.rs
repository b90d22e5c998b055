//! Property tests for game sessions
//!
//! Random games are played through the click API; proptest picks which
//! legal move is clicked at every turn.

use chess_rules::SequentialIds;
use chess_variant::core::GameSettings;
use chess_variant::game::{GameSession, TurnPhase};
use proptest::prelude::*;

/// Click through up to `choices.len()` moves, resolving promotions by importance
fn play(settings: GameSettings, choices: &[usize]) -> GameSession {
    let mut game = GameSession::with_ids(settings, Box::new(SequentialIds::default()));
    for &choice in choices {
        if game.status().is_game_over() {
            break;
        }
        let moves = game.all_legal_moves();
        let mv = &moves[choice % moves.len()];
        let click = mv.clickable_positions()[0];

        game.on_piece_click(mv.origin()).unwrap();
        let outcome = game.on_cell_click(click).unwrap().expect("clicked move commits");
        if outcome.promotion_pending {
            game.resolve_promotion_by_importance().unwrap();
        }
    }
    game
}

fn settings_strategy() -> impl Strategy<Value = GameSettings> {
    (any::<bool>(), any::<bool>()).prop_map(|(check_filtering, revive)| GameSettings {
        check_filtering,
        revive_from_captured_pieces: revive,
        ..GameSettings::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn saved_games_replay_to_the_same_board(
        settings in settings_strategy(),
        choices in prop::collection::vec(any::<usize>(), 0..60),
    ) {
        let game = play(settings.clone(), &choices);
        let ids = Box::new(SequentialIds::new("r"));
        let (restored, report) = GameSession::restore(&game.save(), settings, ids).unwrap();

        prop_assert!(report.is_clean());
        prop_assert_eq!(restored.board(), game.board());
        prop_assert_eq!(restored.turn(), game.turn());
        prop_assert_eq!(restored.status(), game.status());
        prop_assert_eq!(restored.history().notations(), game.history().notations());
    }

    #[test]
    fn undoing_everything_returns_to_the_opening(
        choices in prop::collection::vec(any::<usize>(), 0..60),
    ) {
        let mut game = play(GameSettings::default(), &choices);
        let initial = game.initial_board().clone();
        while game.undo().is_ok() {}

        prop_assert_eq!(&chess_rules::BoardRecord::from_board(game.board()), &initial);
        prop_assert_eq!(game.phase(), TurnPhase::AwaitingInput);
        prop_assert!(game.captured().lost(chess_rules::Color::White).is_empty());
        prop_assert!(game.captured().lost(chess_rules::Color::Black).is_empty());
    }
}
