//! Local database layer for Setpoint
//!
//! Device-local SQLite storage for the drill clipboard and small
//! preferences. Independent of the remote store.

mod clipboard_repository;
mod connection;
mod migrations;
mod prefs_repository;

pub use clipboard_repository::{ClipboardRepository, SqliteClipboardRepository};
pub use connection::Database;
pub use prefs_repository::{PrefsRepository, SqlitePrefsRepository, ONBOARDING_COMPLETE_KEY};
