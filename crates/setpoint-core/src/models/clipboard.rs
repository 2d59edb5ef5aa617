//! Clipboard entry model
//!
//! A lightweight drill summary kept on the device so a coach can collect
//! drills while browsing and later drop them into a practice plan. The three
//! category fields are flattened to display strings at capture time; the
//! clipboard never stores raw encodings.

use serde::{Deserialize, Serialize};

use crate::models::{Drill, DrillId};

/// A drill summary held on the local clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    /// Source drill id
    pub drill_id: DrillId,
    /// Drill display name
    pub name: String,
    /// Skill focus labels flattened for display
    #[serde(default)]
    pub skill_focus: String,
    /// Difficulty labels flattened for display
    #[serde(default)]
    pub difficulty: String,
    /// Drill type labels flattened for display
    #[serde(default, rename = "type")]
    pub drill_type: String,
    /// Suggested duration in minutes, if the coach set one
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    /// Optional notes carried over from the drill
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<&Drill> for ClipboardEntry {
    fn from(drill: &Drill) -> Self {
        Self {
            drill_id: drill.id,
            name: drill.name.clone(),
            skill_focus: drill.skill_focus_labels().join(", "),
            difficulty: drill.difficulty_labels().join(", "),
            drill_type: drill.type_labels().join(", "),
            duration_minutes: None,
            notes: drill.notes.clone(),
        }
    }
}
