//! Clipboard repository implementation
//!
//! The clipboard is an ordered list the coach rearranges by hand, so the
//! order is data: every mutation rewrites positions inside a transaction and
//! only reports success after the write commits. That completion signal is
//! the durability contract callers rely on across app restarts.

use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::models::{ClipboardEntry, DrillId};

/// Trait for clipboard storage operations
pub trait ClipboardRepository {
    /// Load the clipboard in stored order
    fn load(&self) -> Result<Vec<ClipboardEntry>>;

    /// Append an entry at the end of the list
    fn append(&self, entry: &ClipboardEntry) -> Result<()>;

    /// Remove every entry for the given drill
    fn remove(&self, drill_id: DrillId) -> Result<()>;

    /// Persist a user-chosen order. `order` must be a permutation of the
    /// currently stored drill ids.
    fn reorder(&self, order: &[DrillId]) -> Result<()>;

    /// Remove all entries
    fn clear(&self) -> Result<()>;
}

/// `SQLite` implementation of `ClipboardRepository`
pub struct SqliteClipboardRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteClipboardRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn next_position(&self) -> Result<i64> {
        let position = self.conn.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM clipboard",
            [],
            |row| row.get(0),
        )?;
        Ok(position)
    }

    /// Rewrite positions so they are contiguous from zero again
    fn compact_positions(&self) -> Result<()> {
        let entries = self.load()?;
        self.write_all(&entries)
    }

    fn write_all(&self, entries: &[ClipboardEntry]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM clipboard", [])?;
        for (position, entry) in entries.iter().enumerate() {
            tx.execute(
                "INSERT INTO clipboard (position, drill_id, payload) VALUES (?, ?, ?)",
                params![
                    position as i64,
                    entry.drill_id.as_str(),
                    serde_json::to_string(entry)?
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl ClipboardRepository for SqliteClipboardRepository<'_> {
    fn load(&self) -> Result<Vec<ClipboardEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM clipboard ORDER BY position ASC")?;

        let entries = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .map(|payload| serde_json::from_str(&payload).map_err(Error::from))
            .collect::<Result<Vec<_>>>()?;

        Ok(entries)
    }

    fn append(&self, entry: &ClipboardEntry) -> Result<()> {
        let position = self.next_position()?;
        self.conn.execute(
            "INSERT INTO clipboard (position, drill_id, payload) VALUES (?, ?, ?)",
            params![
                position,
                entry.drill_id.as_str(),
                serde_json::to_string(entry)?
            ],
        )?;
        Ok(())
    }

    fn remove(&self, drill_id: DrillId) -> Result<()> {
        let removed = self.conn.execute(
            "DELETE FROM clipboard WHERE drill_id = ?",
            params![drill_id.as_str()],
        )?;
        if removed == 0 {
            return Err(Error::NotFound(drill_id.to_string()));
        }
        self.compact_positions()
    }

    fn reorder(&self, order: &[DrillId]) -> Result<()> {
        let current = self.load()?;
        if current.len() != order.len() {
            return Err(Error::InvalidInput(format!(
                "Reorder lists {} entries but the clipboard holds {}",
                order.len(),
                current.len()
            )));
        }

        let mut reordered = Vec::with_capacity(order.len());
        let mut remaining: Vec<ClipboardEntry> = current;
        for drill_id in order {
            let index = remaining
                .iter()
                .position(|entry| entry.drill_id == *drill_id)
                .ok_or_else(|| {
                    Error::InvalidInput(format!("Drill {drill_id} is not on the clipboard"))
                })?;
            reordered.push(remaining.remove(index));
        }

        self.write_all(&reordered)
    }

    fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM clipboard", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{Drill, UserId};

    fn owner() -> UserId {
        "018f72f1-0000-7000-8000-000000000001".parse().unwrap()
    }

    fn entry(name: &str) -> ClipboardEntry {
        ClipboardEntry::from(&Drill::new(name, owner()))
    }

    #[test]
    fn append_and_load_keep_insertion_order() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteClipboardRepository::new(db.connection());

        repo.append(&entry("A")).unwrap();
        repo.append(&entry("B")).unwrap();
        repo.append(&entry("C")).unwrap();

        let names: Vec<_> = repo.load().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn reorder_persists_across_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("setpoint.db");

        let (a, b, c) = (entry("A"), entry("B"), entry("C"));
        {
            let db = Database::open(&path).unwrap();
            let repo = SqliteClipboardRepository::new(db.connection());
            repo.append(&a).unwrap();
            repo.append(&b).unwrap();
            repo.append(&c).unwrap();
            repo.reorder(&[c.drill_id, a.drill_id, b.drill_id]).unwrap();
        }

        let db = Database::open(&path).unwrap();
        let repo = SqliteClipboardRepository::new(db.connection());
        let names: Vec<_> = repo.load().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn reorder_rejects_wrong_length() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteClipboardRepository::new(db.connection());

        let a = entry("A");
        repo.append(&a).unwrap();
        let err = repo.reorder(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn reorder_rejects_unknown_drill() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteClipboardRepository::new(db.connection());

        repo.append(&entry("A")).unwrap();
        let err = repo.reorder(&[DrillId::new()]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn remove_compacts_positions() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteClipboardRepository::new(db.connection());

        let (a, b, c) = (entry("A"), entry("B"), entry("C"));
        repo.append(&a).unwrap();
        repo.append(&b).unwrap();
        repo.append(&c).unwrap();

        repo.remove(b.drill_id).unwrap();
        let names: Vec<_> = repo.load().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["A", "C"]);

        // Appending after a removal lands at the end, not in the gap.
        repo.append(&entry("D")).unwrap();
        let names: Vec<_> = repo.load().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["A", "C", "D"]);
    }

    #[test]
    fn remove_missing_drill_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteClipboardRepository::new(db.connection());
        let err = repo.remove(DrillId::new()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn clear_empties_the_list() {
        let db = Database::open_in_memory().unwrap();
        let repo = SqliteClipboardRepository::new(db.connection());

        repo.append(&entry("A")).unwrap();
        repo.clear().unwrap();
        assert!(repo.load().unwrap().is_empty());
    }
}
