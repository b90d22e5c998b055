//! Integration tests for settings persistence
//!
//! Exercises the JSON round trip through real files in a scratch directory
//! and the fall-back-to-defaults behaviour of `load_settings`.

use chess_rules::PieceKind;
use chess_variant::core::{load_settings, save_settings, CoreError, GameSettings};
use std::fs;
use std::path::PathBuf;

/// Fresh path under the system temp dir, unique per call
fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("chess_variant_test_{}", uuid::Uuid::new_v4()))
        .join(name)
}

fn cleanup(path: &PathBuf) {
    if let Some(dir) = path.parent() {
        let _ = fs::remove_dir_all(dir);
    }
}

#[test]
fn test_settings_round_trip() {
    //! Saved settings load back unchanged, creating the directory on the way

    let path = scratch_path("settings.json");
    let settings = GameSettings {
        check_filtering: false,
        revive_from_captured_pieces: true,
        transform_options: vec![PieceKind::Knight, PieceKind::Queen],
        ..GameSettings::default()
    };

    save_settings(&settings, &path).unwrap();
    assert!(path.exists());
    assert_eq!(load_settings(&path), settings);

    cleanup(&path);
}

#[test]
fn test_missing_file_gives_defaults() {
    let path = scratch_path("absent.json");
    assert_eq!(load_settings(&path), GameSettings::default());
}

#[test]
fn test_corrupt_file_gives_defaults() {
    //! A file that is not JSON is ignored rather than failing startup

    let path = scratch_path("settings.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not json").unwrap();

    assert_eq!(load_settings(&path), GameSettings::default());

    cleanup(&path);
}

#[test]
fn test_invalid_options_on_disk_give_defaults() {
    let path = scratch_path("settings.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"transform_options": []}"#).unwrap();

    assert_eq!(load_settings(&path), GameSettings::default());

    cleanup(&path);
}

#[test]
fn test_save_rejects_invalid_settings() {
    let path = scratch_path("settings.json");
    let settings = GameSettings {
        transform_options: vec![PieceKind::Pawn],
        ..GameSettings::default()
    };

    let result = save_settings(&settings, &path);
    assert!(matches!(result, Err(CoreError::InvalidSettings { .. })));
    assert!(!path.exists());
}

#[test]
fn test_importance_is_stored_by_kind_name() {
    let json = serde_json::to_value(GameSettings::default()).unwrap();
    assert_eq!(json["piece_importance"]["queen"], 9);
    assert_eq!(json["transform_options"][0], "queen");
}
