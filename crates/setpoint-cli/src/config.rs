//! CLI configuration resolution
//!
//! The hosted-store endpoints come from the environment; the local database
//! path comes from the platform data dir unless overridden.

use std::env;
use std::path::PathBuf;

use setpoint_core::remote::StoreConfig;
use setpoint_core::util::normalize_text_option;

use crate::error::CliError;

pub const API_URL_VAR: &str = "SETPOINT_API_URL";
pub const ANON_KEY_VAR: &str = "SETPOINT_ANON_KEY";
pub const BILLING_URL_VAR: &str = "SETPOINT_BILLING_URL";
pub const BILLING_KEY_VAR: &str = "SETPOINT_BILLING_KEY";
pub const DB_PATH_VAR: &str = "SETPOINT_DB_PATH";

/// Resolve the hosted-store configuration from the environment
pub fn store_config() -> Result<StoreConfig, CliError> {
    let url = non_empty_env(API_URL_VAR).ok_or(CliError::StoreNotConfigured)?;
    let anon_key = non_empty_env(ANON_KEY_VAR).ok_or(CliError::StoreNotConfigured)?;
    Ok(StoreConfig::new(url, anon_key)?)
}

/// Resolve the billing provider endpoint and key from the environment
pub fn billing_config() -> Result<(String, String), CliError> {
    let url = non_empty_env(BILLING_URL_VAR).ok_or(CliError::BillingNotConfigured)?;
    let key = non_empty_env(BILLING_KEY_VAR).ok_or(CliError::BillingNotConfigured)?;
    Ok((url, key))
}

/// Resolve the local database path: flag, then env var, then data dir
pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os(DB_PATH_VAR).map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("setpoint")
        .join("setpoint.db")
}

fn non_empty_env(key: &str) -> Option<String> {
    normalize_text_option(env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_db_path_wins() {
        let path = resolve_db_path(Some(PathBuf::from("/tmp/custom.db")));
        assert_eq!(path, PathBuf::from("/tmp/custom.db"));
    }

    #[test]
    fn default_db_path_ends_with_app_dir() {
        let path = resolve_db_path(None);
        assert!(path.ends_with("setpoint/setpoint.db") || path.to_string_lossy().contains("setpoint"));
    }
}
