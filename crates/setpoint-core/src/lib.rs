//! setpoint-core - Core library for Setpoint
//!
//! This crate contains the shared models, catalog pipeline (normalization,
//! filtering, merge and pagination), local persistence, and remote store
//! clients used by all Setpoint interfaces.

pub mod auth;
pub mod billing;
pub mod catalog;
pub mod db;
pub mod error;
pub mod models;
pub mod remote;
pub mod services;
pub mod util;

pub use error::{Error, Result};
pub use models::{Drill, DrillId, Practice, PracticeId, UserId};
