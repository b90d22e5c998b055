//! Core configuration shared by every game session
//!
//! - [`GameSettings`]: rule switches and promotion preferences
//! - [`settings_persistence`]: JSON load/save in the platform config directory
//! - [`CoreError`]: settings I/O and validation failures

pub mod error;
pub mod resources;
pub mod settings_persistence;

pub use error::{CoreError, CoreResult};
pub use resources::GameSettings;
pub use settings_persistence::{load_settings, save_settings, settings_path};
