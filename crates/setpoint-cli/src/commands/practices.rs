//! `practices` subcommands: schedule, list, and delete sessions.

use std::path::Path;

use chrono::{DateTime, Utc};
use clap::Args;
use setpoint_core::models::{Practice, PracticeId};
use setpoint_core::remote::PracticeStore;

use crate::commands::common;
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Session start, RFC 3339 (e.g. 2026-03-14T18:00:00Z)
    #[arg(long, value_name = "TIME")]
    pub start: String,

    /// Session end, RFC 3339
    #[arg(long, value_name = "TIME")]
    pub end: String,

    /// Drill slot as NAME:MINUTES, repeatable, in running order
    #[arg(long = "drill", value_name = "NAME:MINUTES")]
    pub drills: Vec<String>,

    /// Session notes
    #[arg(long)]
    pub notes: Option<String>,
}

pub async fn run_list(db_path: &Path, json: bool) -> Result<(), CliError> {
    let session = common::require_session(db_path).await?;
    let store = common::practice_store(Some(&session))?;
    let practices = store.list_practices(session.user.id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&practices)?);
        return Ok(());
    }

    if practices.is_empty() {
        println!("No practices scheduled.");
        return Ok(());
    }

    for practice in &practices {
        let id = practice.id.as_str();
        let short_id = id.chars().take(13).collect::<String>();
        println!(
            "{short_id:<13}  {}  {:>3} min  {}",
            format_time(practice.start_time),
            practice.total_minutes(),
            practice.drills.join(", ")
        );
    }
    Ok(())
}

pub async fn run_add(db_path: &Path, args: AddArgs) -> Result<(), CliError> {
    let start = parse_time(&args.start)?;
    let end = parse_time(&args.end)?;

    let session = common::require_session(db_path).await?;
    let store = common::practice_store(Some(&session))?;

    let mut practice = Practice::new(session.user.id, start, end);
    for slot in &args.drills {
        let (name, minutes) = parse_slot(slot)?;
        practice.drills.push(name);
        practice.drill_durations.push(minutes);
    }
    practice.notes = args.notes.filter(|notes| !notes.trim().is_empty());

    let created = store.create_practice(&practice).await?;
    println!(
        "Created practice {} ({} min, {} drills)",
        created.id,
        created.total_minutes(),
        created.drills.len()
    );
    Ok(())
}

pub async fn run_delete(db_path: &Path, id: &str) -> Result<(), CliError> {
    let practice_id: PracticeId = id
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidId(id.to_string()))?;

    let session = common::require_session(db_path).await?;
    let store = common::practice_store(Some(&session))?;
    store.delete_practice(practice_id).await?;
    println!("Deleted practice {practice_id}");
    Ok(())
}

fn parse_time(raw: &str) -> Result<i64, CliError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|time| time.timestamp_millis())
        .map_err(|_| CliError::InvalidTime(raw.to_string()))
}

fn format_time(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |time| time.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Split a NAME:MINUTES slot. The split is from the right so drill names may
/// contain colons.
fn parse_slot(raw: &str) -> Result<(String, i64), CliError> {
    let (name, minutes) = raw
        .rsplit_once(':')
        .ok_or_else(|| CliError::InvalidDrillSlot(raw.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidDrillSlot(raw.to_string()));
    }
    let minutes: i64 = minutes
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidDrillSlot(raw.to_string()))?;

    Ok((name.to_string(), minutes))
}
