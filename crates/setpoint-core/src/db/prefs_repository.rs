//! Preferences repository implementation

use rusqlite::{params, Connection};

use crate::error::Result;

/// Key under which the one-bit onboarding flag is stored
pub const ONBOARDING_COMPLETE_KEY: &str = "onboarding_complete";

/// Trait for small local key/value preferences
pub trait PrefsRepository {
    /// Fetch a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value under a key, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key (missing keys are fine)
    fn delete(&self, key: &str) -> Result<()>;
}

/// `SQLite` implementation of `PrefsRepository`
pub struct SqlitePrefsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqlitePrefsRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Whether onboarding has been completed on this device
    pub fn onboarding_complete(&self) -> Result<bool> {
        Ok(self
            .get(ONBOARDING_COMPLETE_KEY)?
            .is_some_and(|value| value == "true"))
    }

    /// Mark onboarding as completed
    pub fn set_onboarding_complete(&self) -> Result<()> {
        self.set(ONBOARDING_COMPLETE_KEY, "true")
    }
}

impl PrefsRepository for SqlitePrefsRepository<'_> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM prefs WHERE key = ?",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO prefs (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM prefs WHERE key = ?", params![key])?;
        Ok(())
    }
}
