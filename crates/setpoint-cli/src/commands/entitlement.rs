//! `entitlement` subcommand: query the billing provider.

use std::path::Path;

use setpoint_core::billing::{EntitlementProvider, RestEntitlementProvider};

use crate::commands::common;
use crate::config;
use crate::error::CliError;

pub async fn run_status(db_path: &Path, json: bool) -> Result<(), CliError> {
    let session = common::require_session(db_path).await?;
    let (url, key) = config::billing_config()?;
    let provider = RestEntitlementProvider::new(url, key)?;
    let status = provider.entitlement_status(session.user.id).await?;

    if json {
        let payload = serde_json::json!({
            "is_active": status.is_active,
            "tier": status.tier,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if status.is_active {
        match status.tier.as_deref() {
            Some(tier) => println!("Premium active ({tier})"),
            None => println!("Premium active"),
        }
    } else {
        println!("No active subscription.");
    }
    Ok(())
}
