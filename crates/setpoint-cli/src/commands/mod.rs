//! CLI command implementations

pub mod auth_cmd;
pub mod clipboard;
pub mod common;
pub mod drills;
pub mod entitlement;
pub mod practices;
