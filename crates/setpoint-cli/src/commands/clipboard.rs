//! `clipboard` subcommands: the device-local drill collection.

use std::path::Path;

use setpoint_core::db::{ClipboardRepository, Database, SqliteClipboardRepository};
use setpoint_core::models::{ClipboardEntry, Drill, DrillId, UserId};
use setpoint_core::remote::DrillStore;

use crate::commands::common;
use crate::commands::drills::parse_drill_id;
use crate::error::CliError;

/// Copy a drill onto the clipboard, looking it up across the user's own,
/// favorited, and public collections.
pub async fn run_add(db_path: &Path, id: &str, minutes: Option<i64>) -> Result<(), CliError> {
    let drill_id = parse_drill_id(id)?;
    let session = common::require_session(db_path).await?;
    let store = common::drill_store(Some(&session))?;

    let drill = find_drill(&store, session.user.id, drill_id).await?;
    let mut entry = ClipboardEntry::from(&drill);
    entry.duration_minutes = minutes;

    let db = Database::open(db_path)?;
    let repo = SqliteClipboardRepository::new(db.connection());
    repo.append(&entry)?;

    println!("Added '{}' to the clipboard", entry.name);
    Ok(())
}

pub fn run_list(db_path: &Path, json: bool) -> Result<(), CliError> {
    let db = Database::open(db_path)?;
    let repo = SqliteClipboardRepository::new(db.connection());
    let entries = repo.load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Clipboard is empty.");
        return Ok(());
    }

    for (index, entry) in entries.iter().enumerate() {
        let duration = entry
            .duration_minutes
            .map(|minutes| format!("  {minutes} min"))
            .unwrap_or_default();
        let id = entry.drill_id.as_str();
        let short_id = id.chars().take(13).collect::<String>();
        println!("{:>2}. {short_id:<13}  {:<32}{duration}", index + 1, entry.name);
    }
    Ok(())
}

pub fn run_remove(db_path: &Path, id: &str) -> Result<(), CliError> {
    let drill_id = parse_drill_id(id)?;
    let db = Database::open(db_path)?;
    let repo = SqliteClipboardRepository::new(db.connection());
    repo.remove(drill_id)?;
    println!("Removed drill {drill_id} from the clipboard");
    Ok(())
}

/// Move a clipboard entry to a new 1-based position. Reported success means
/// the new order has been committed.
pub fn run_move(db_path: &Path, id: &str, position: usize) -> Result<(), CliError> {
    let drill_id = parse_drill_id(id)?;
    let db = Database::open(db_path)?;
    let repo = SqliteClipboardRepository::new(db.connection());

    let entries = repo.load()?;
    let mut order: Vec<DrillId> = entries.iter().map(|entry| entry.drill_id).collect();
    let index = order
        .iter()
        .position(|candidate| *candidate == drill_id)
        .ok_or_else(|| CliError::DrillNotFound(id.to_string()))?;

    let moved = order.remove(index);
    let target = position.saturating_sub(1).min(order.len());
    order.insert(target, moved);
    repo.reorder(&order)?;

    println!("Moved '{}' to position {}", entries[index].name, target + 1);
    Ok(())
}

pub fn run_clear(db_path: &Path) -> Result<(), CliError> {
    let db = Database::open(db_path)?;
    let repo = SqliteClipboardRepository::new(db.connection());
    repo.clear()?;
    println!("Clipboard cleared.");
    Ok(())
}

async fn find_drill<S: DrillStore>(
    store: &S,
    user: UserId,
    id: DrillId,
) -> Result<Drill, CliError> {
    let own = store.list_own_drills(user).await?;
    if let Some(drill) = own.into_iter().find(|drill| drill.id == id) {
        return Ok(drill);
    }

    let favorites = store.list_favorite_drills(user).await?;
    if let Some(drill) = favorites.into_iter().find(|drill| drill.id == id) {
        return Ok(drill);
    }

    let public = store.list_public_drills().await?;
    public
        .into_iter()
        .find(|drill| drill.id == id)
        .ok_or_else(|| CliError::DrillNotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn owner() -> UserId {
        "018f72f1-0000-7000-8000-000000000001".parse().unwrap()
    }

    fn seed(db_path: &Path, names: &[&str]) -> Vec<DrillId> {
        let db = Database::open(db_path).unwrap();
        let repo = SqliteClipboardRepository::new(db.connection());
        names
            .iter()
            .map(|name| {
                let entry = ClipboardEntry::from(&Drill::new(*name, owner()));
                repo.append(&entry).unwrap();
                entry.drill_id
            })
            .collect()
    }

    fn stored_names(db_path: &Path) -> Vec<String> {
        let db = Database::open(db_path).unwrap();
        let repo = SqliteClipboardRepository::new(db.connection());
        repo.load().unwrap().into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn move_shifts_entry_to_requested_position() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("setpoint.db");
        let ids = seed(&path, &["A", "B", "C"]);

        run_move(&path, &ids[2].as_str(), 1).unwrap();
        assert_eq!(stored_names(&path), vec!["C", "A", "B"]);
    }

    #[test]
    fn move_clamps_position_past_the_end() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("setpoint.db");
        let ids = seed(&path, &["A", "B", "C"]);

        run_move(&path, &ids[0].as_str(), 99).unwrap();
        assert_eq!(stored_names(&path), vec!["B", "C", "A"]);
    }

    #[test]
    fn move_unknown_drill_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("setpoint.db");
        seed(&path, &["A"]);

        let err = run_move(&path, &DrillId::new().as_str(), 1).unwrap_err();
        assert!(matches!(err, CliError::DrillNotFound(_)));
    }

    #[test]
    fn remove_and_clear_update_the_stored_list() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("setpoint.db");
        let ids = seed(&path, &["A", "B"]);

        run_remove(&path, &ids[0].as_str()).unwrap();
        assert_eq!(stored_names(&path), vec!["B"]);

        run_clear(&path).unwrap();
        assert!(stored_names(&path).is_empty());
    }
}
