//! CLI error type

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] setpoint_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Auth error: {0}")]
    Auth(String),
    #[error("Not signed in. Run `setpoint auth login` first.")]
    NotSignedIn,
    #[error("Store is not configured. Set SETPOINT_API_URL and SETPOINT_ANON_KEY.")]
    StoreNotConfigured,
    #[error("Billing is not configured. Set SETPOINT_BILLING_URL and SETPOINT_BILLING_KEY.")]
    BillingNotConfigured,
    #[error("Drill not found: {0}")]
    DrillNotFound(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Invalid time '{0}': expected RFC 3339, e.g. 2026-03-14T18:00:00Z")]
    InvalidTime(String),
    #[error("Invalid drill slot '{0}': expected NAME:MINUTES, e.g. \"Pepper:15\"")]
    InvalidDrillSlot(String),
}
