//! Data models for Setpoint

mod clipboard;
mod drill;
mod practice;

pub use clipboard::ClipboardEntry;
pub use drill::{Drill, DrillId, UserId};
pub use practice::{Practice, PracticeId};
