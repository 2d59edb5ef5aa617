//! `drills` subcommands: browse, create, delete, favorite.

use std::path::Path;

use clap::Args;
use setpoint_core::catalog::{DrillPager, FilterSelection, MatchPolicy};
use setpoint_core::models::{Drill, DrillId};
use setpoint_core::remote::DrillStore;
use setpoint_core::services::DrillLibraryService;

use crate::commands::common;
use crate::error::CliError;

/// Category filters shared by the list views.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Skill focus label to filter by (repeatable)
    #[arg(long = "skill", value_name = "LABEL")]
    pub skill: Vec<String>,

    /// Difficulty label to filter by (repeatable)
    #[arg(long = "difficulty", value_name = "LABEL")]
    pub difficulty: Vec<String>,

    /// Drill type label to filter by (repeatable)
    #[arg(long = "type", value_name = "LABEL")]
    pub drill_type: Vec<String>,

    /// Within a category, require every selected label instead of any
    #[arg(long)]
    pub match_all: bool,
}

impl FilterArgs {
    fn selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::new();
        for label in &self.skill {
            selection.toggle_skill_focus(label);
        }
        for label in &self.difficulty {
            selection.toggle_difficulty(label);
        }
        for label in &self.drill_type {
            selection.toggle_drill_type(label);
        }
        selection
    }

    const fn policy(&self) -> MatchPolicy {
        if self.match_all {
            MatchPolicy::All
        } else {
            MatchPolicy::Any
        }
    }
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Drill name
    pub name: String,

    /// Skill focus label (repeatable)
    #[arg(long = "skill", value_name = "LABEL")]
    pub skill: Vec<String>,

    /// Difficulty label (repeatable)
    #[arg(long = "difficulty", value_name = "LABEL")]
    pub difficulty: Vec<String>,

    /// Drill type label (repeatable)
    #[arg(long = "type", value_name = "LABEL")]
    pub drill_type: Vec<String>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Make the drill visible to everyone
    #[arg(long)]
    pub public: bool,
}

/// List drills: the signed-in user's combined library by default, the
/// public catalog with `--public`.
pub async fn run_list(
    db_path: &Path,
    filters: &FilterArgs,
    public: bool,
    pages: usize,
    page_size: usize,
    json: bool,
) -> Result<(), CliError> {
    if public {
        return list_public(filters, pages, page_size, json).await;
    }

    let session = common::require_session(db_path).await?;
    let store = common::drill_store(Some(&session))?;
    let mut service = DrillLibraryService::new(store, session.user.id)
        .with_pager(DrillPager::with_page_size(page_size));
    service.refresh().await?;

    if filters.match_all {
        service.set_policy(MatchPolicy::All);
    }
    for label in &filters.skill {
        service.toggle_skill_focus(label);
    }
    for label in &filters.difficulty {
        service.toggle_difficulty(label);
    }
    for label in &filters.drill_type {
        service.toggle_drill_type(label);
    }

    for _ in 1..pages {
        if !service.load_next_page() {
            break;
        }
    }

    print_drills(service.visible(), service.has_more(), json)
}

async fn list_public(
    filters: &FilterArgs,
    pages: usize,
    page_size: usize,
    json: bool,
) -> Result<(), CliError> {
    let store = common::drill_store(None)?;
    let drills = store.list_public_drills().await?;

    let selection = filters.selection();
    let policy = filters.policy();
    let filtered: Vec<Drill> = drills
        .into_iter()
        .filter(|drill| selection.matches(drill, policy))
        .collect();

    let mut pager = DrillPager::with_page_size(page_size);
    pager.sync_items(filtered);
    for _ in 1..pages {
        if !pager.load_next_page() {
            break;
        }
    }

    print_drills(pager.visible(), pager.has_more(), json)
}

pub async fn run_add(db_path: &Path, args: AddArgs) -> Result<(), CliError> {
    let session = common::require_session(db_path).await?;
    let store = common::drill_store(Some(&session))?;

    let mut drill = Drill::new(args.name, session.user.id);
    drill.skill_focus = encode_labels(&args.skill)?;
    drill.difficulty = encode_labels(&args.difficulty)?;
    drill.drill_type = encode_labels(&args.drill_type)?;
    drill.notes = args.notes.filter(|notes| !notes.trim().is_empty());
    drill.is_public = args.public;

    let created = store.create_drill(&drill).await?;
    println!("Created drill {} ('{}')", created.id, created.name);
    Ok(())
}

pub async fn run_delete(db_path: &Path, id: &str) -> Result<(), CliError> {
    let drill_id = parse_drill_id(id)?;
    let session = common::require_session(db_path).await?;
    let store = common::drill_store(Some(&session))?;
    store.delete_drill(drill_id).await?;
    println!("Deleted drill {drill_id}");
    Ok(())
}

pub async fn run_favorite(db_path: &Path, id: &str, add: bool) -> Result<(), CliError> {
    let drill_id = parse_drill_id(id)?;
    let session = common::require_session(db_path).await?;
    let store = common::drill_store(Some(&session))?;

    if add {
        store.add_favorite(session.user.id, drill_id).await?;
        println!("Favorited drill {drill_id}");
    } else {
        store.remove_favorite(session.user.id, drill_id).await?;
        println!("Removed drill {drill_id} from favorites");
    }
    Ok(())
}

pub fn parse_drill_id(raw: &str) -> Result<DrillId, CliError> {
    raw.trim()
        .parse()
        .map_err(|_| CliError::InvalidId(raw.to_string()))
}

/// Encode CLI labels into the store's canonical form: a JSON array of
/// lowercase labels, or nothing at all.
fn encode_labels(labels: &[String]) -> Result<Option<String>, CliError> {
    let cleaned: Vec<String> = labels
        .iter()
        .map(|label| label.trim().to_lowercase())
        .filter(|label| !label.is_empty())
        .collect();

    if cleaned.is_empty() {
        Ok(None)
    } else {
        Ok(Some(serde_json::to_string(&cleaned)?))
    }
}

fn print_drills(drills: &[Drill], has_more: bool, json: bool) -> Result<(), CliError> {
    if json {
        let items: Vec<_> = drills.iter().map(common::drill_to_item).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if drills.is_empty() {
        println!("No drills matched.");
        return Ok(());
    }

    for line in common::format_drill_lines(drills) {
        println!("{line}");
    }
    if has_more {
        println!("(more available; raise --pages to load further)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encode_labels_produces_canonical_json_array() {
        let encoded = encode_labels(&["Serving".to_string(), " Passing ".to_string()])
            .unwrap()
            .unwrap();
        assert_eq!(encoded, r#"["serving","passing"]"#);
    }

    #[test]
    fn encode_labels_drops_blank_input() {
        assert!(encode_labels(&[]).unwrap().is_none());
        assert!(encode_labels(&["   ".to_string()]).unwrap().is_none());
    }

    #[test]
    fn filter_args_build_a_selection() {
        let args = FilterArgs {
            skill: vec!["Serving".to_string()],
            difficulty: vec!["advanced".to_string()],
            drill_type: Vec::new(),
            match_all: true,
        };

        let selection = args.selection();
        assert!(!selection.is_empty());
        assert_eq!(args.policy(), MatchPolicy::All);
    }

    #[test]
    fn parse_drill_id_rejects_garbage() {
        assert!(matches!(
            parse_drill_id("not-a-uuid"),
            Err(CliError::InvalidId(_))
        ));
        assert!(parse_drill_id("018f72f1-0000-7000-8000-00000000000a").is_ok());
    }
}
