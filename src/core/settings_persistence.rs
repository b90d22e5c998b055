//! Settings persistence
//!
//! Saves and loads [`GameSettings`] to/from a JSON file so rule preferences
//! survive between runs.
//!
//! # File Location
//!
//! `settings.json` in the platform configuration directory, e.g.
//! `~/.config/chess_variant/settings.json` on Linux. Falls back to a local
//! `settings.json` when no configuration directory can be resolved.
//!
//! # Error Handling
//!
//! - [`load_settings`] never fails: unreadable, unparsable or invalid files
//!   fall back to defaults with a warning
//! - [`save_settings`] reports failures to the caller

use crate::core::error::CoreResult;
use crate::core::GameSettings;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Resolve the default settings file path
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "chess-variant", "chess_variant") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from `path`, or defaults if that is not possible
pub fn load_settings(path: &Path) -> GameSettings {
    if !path.exists() {
        tracing::info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return GameSettings::default();
    }

    match read_settings(path) {
        Ok(settings) => match settings.validate() {
            Ok(()) => {
                tracing::info!("[SETTINGS] Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!(
                    "[SETTINGS] Rejected settings at {:?}: {}. Using defaults.",
                    path,
                    e
                );
                GameSettings::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                path,
                e
            );
            GameSettings::default()
        }
    }
}

fn read_settings(path: &Path) -> CoreResult<GameSettings> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write `settings` to `path`, creating the parent directory if needed
pub fn save_settings(settings: &GameSettings, path: &Path) -> CoreResult<()> {
    settings.validate()?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    tracing::info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
