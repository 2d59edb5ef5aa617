//! Shared command helpers: session handling, store clients, formatting.

use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::Path;

use serde::Serialize;
use setpoint_core::auth::{AuthClient, AuthSession, PrefsSessionStore};
use setpoint_core::models::Drill;
use setpoint_core::remote::{RestClient, RestDrillStore, RestPracticeStore};

use crate::config;
use crate::error::CliError;

/// Session persistence rooted at the CLI's local database
pub fn session_store(db_path: &Path) -> PrefsSessionStore {
    PrefsSessionStore::new(db_path)
}

/// Build the auth client from the environment configuration
pub fn auth_client(db_path: &Path) -> Result<AuthClient<PrefsSessionStore>, CliError> {
    let (url, anon_key) = auth_env()?;
    AuthClient::new(url, anon_key, session_store(db_path))
        .map_err(|error| CliError::Auth(error.to_string()))
}

/// Restore the persisted session, refreshing it if needed
pub async fn require_session(db_path: &Path) -> Result<AuthSession, CliError> {
    auth_client(db_path)?
        .restore_session()
        .await
        .map_err(|error| CliError::Auth(error.to_string()))?
        .ok_or(CliError::NotSignedIn)
}

/// REST client carrying the session's bearer token (anon-only when absent)
pub fn rest_client(session: Option<&AuthSession>) -> Result<RestClient, CliError> {
    let config = config::store_config()?;
    let token = session.map(|s| s.access_token.clone());
    Ok(RestClient::new(config, token)?)
}

/// Drill store over the given session
pub fn drill_store(session: Option<&AuthSession>) -> Result<RestDrillStore, CliError> {
    Ok(RestDrillStore::new(rest_client(session)?))
}

/// Practice store over the given session
pub fn practice_store(session: Option<&AuthSession>) -> Result<RestPracticeStore, CliError> {
    Ok(RestPracticeStore::new(rest_client(session)?))
}

fn auth_env() -> Result<(String, String), CliError> {
    let config = config::store_config()?;
    // Auth and data share the provider's base URL and public key.
    Ok(config.credentials())
}

/// Serialized drill row for `--json` output
#[derive(Debug, Serialize)]
pub struct DrillListItem {
    pub id: String,
    pub name: String,
    pub skill_focus: Vec<String>,
    pub difficulty: Vec<String>,
    #[serde(rename = "type")]
    pub drill_type: Vec<String>,
    pub owned: bool,
    pub favorited: bool,
    pub public: bool,
    pub has_image: bool,
}

pub fn drill_to_item(drill: &Drill) -> DrillListItem {
    DrillListItem {
        id: drill.id.to_string(),
        name: drill.name.clone(),
        skill_focus: drill.skill_focus_labels(),
        difficulty: drill.difficulty_labels(),
        drill_type: drill.type_labels(),
        owned: drill.is_user_owned,
        favorited: drill.is_favorited,
        public: drill.is_public,
        has_image: drill.has_image(),
    }
}

pub fn format_drill_lines(drills: &[Drill]) -> Vec<String> {
    drills
        .iter()
        .map(|drill| {
            let id = drill.id.to_string();
            let short_id = id.chars().take(13).collect::<String>();
            let mut markers = String::new();
            if drill.is_user_owned {
                markers.push('m');
            }
            if drill.is_favorited {
                markers.push('*');
            }
            let labels = [
                drill.skill_focus_labels().join(","),
                drill.difficulty_labels().join(","),
                drill.type_labels().join(","),
            ]
            .into_iter()
            .filter(|group| !group.is_empty())
            .collect::<Vec<_>>()
            .join(" | ");

            format!("{short_id:<13}  {:<2}  {:<32}  {labels}", markers, drill.name)
        })
        .collect()
}

/// Read a password: piped stdin when present, interactive prompt otherwise.
pub fn read_password() -> Result<String, CliError> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut buffer = String::new();
        stdin.lock().read_to_string(&mut buffer)?;
        return Ok(buffer.trim_end_matches(['\r', '\n']).to_string());
    }

    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
