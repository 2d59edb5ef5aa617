//! Drill model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for a drill, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DrillId(Uuid);

impl DrillId {
    /// Create a new unique drill ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for DrillId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DrillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DrillId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A unique identifier for a user account, assigned by the auth provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A reusable practice exercise in the shared drill library.
///
/// The three category fields (`skill_focus`, `difficulty`, `drill_type`) are
/// stored as the remote store hands them over: a JSON-encoded array of
/// labels, a single bare label, or absent. Use the label accessors instead of
/// reading the raw fields; they go through [`crate::catalog::normalize_labels`],
/// the one place that absorbs the encoding drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drill {
    /// Unique identifier, stable across the public and own collections
    pub id: DrillId,
    /// Display name
    pub name: String,
    /// Skill focus labels, heterogeneously encoded
    #[serde(default)]
    pub skill_focus: Option<String>,
    /// Difficulty labels, heterogeneously encoded
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Drill type labels, heterogeneously encoded
    #[serde(default, rename = "type")]
    pub drill_type: Option<String>,
    /// Optional free-text description
    #[serde(default)]
    pub notes: Option<String>,
    /// Optional stored image reference; absence drives placeholder rendering
    #[serde(default)]
    pub image_url: Option<String>,
    /// Creating user
    pub owner_id: UserId,
    /// Visibility flag
    #[serde(default)]
    pub is_public: bool,
    /// Set during merge: drill belongs to the current user
    #[serde(skip)]
    pub is_user_owned: bool,
    /// Set during merge: drill id is in the current user's favorite set
    #[serde(skip)]
    pub is_favorited: bool,
}

impl Drill {
    /// Create a new private drill owned by the given user
    #[must_use]
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Self {
        Self {
            id: DrillId::new(),
            name: name.into(),
            skill_focus: None,
            difficulty: None,
            drill_type: None,
            notes: None,
            image_url: None,
            owner_id,
            is_public: false,
            is_user_owned: false,
            is_favorited: false,
        }
    }

    /// Canonical skill focus labels
    #[must_use]
    pub fn skill_focus_labels(&self) -> Vec<String> {
        crate::catalog::normalize_labels(self.skill_focus.as_deref())
    }

    /// Canonical difficulty labels
    #[must_use]
    pub fn difficulty_labels(&self) -> Vec<String> {
        crate::catalog::normalize_labels(self.difficulty.as_deref())
    }

    /// Canonical drill type labels
    #[must_use]
    pub fn type_labels(&self) -> Vec<String> {
        crate::catalog::normalize_labels(self.drill_type.as_deref())
    }

    /// Check whether the drill carries an uploaded image
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_ref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        "018f72f1-0000-7000-8000-000000000001".parse().unwrap()
    }

    #[test]
    fn test_drill_id_unique() {
        let id1 = DrillId::new();
        let id2 = DrillId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_drill_id_parse() {
        let id = DrillId::new();
        let parsed: DrillId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_drill_new_defaults() {
        let drill = Drill::new("Pepper", owner());
        assert_eq!(drill.name, "Pepper");
        assert!(!drill.is_public);
        assert!(!drill.is_user_owned);
        assert!(!drill.is_favorited);
        assert!(drill.skill_focus.is_none());
    }

    #[test]
    fn test_label_accessors_decode_json_arrays() {
        let mut drill = Drill::new("Serve receive ladder", owner());
        drill.skill_focus = Some(r#"["Serving","Passing"]"#.to_string());
        drill.difficulty = Some("Intermediate".to_string());

        assert_eq!(drill.skill_focus_labels(), vec!["serving", "passing"]);
        assert_eq!(drill.difficulty_labels(), vec!["intermediate"]);
        assert!(drill.type_labels().is_empty());
    }

    #[test]
    fn test_has_image() {
        let mut drill = Drill::new("Blocking footwork", owner());
        assert!(!drill.has_image());
        drill.image_url = Some("   ".to_string());
        assert!(!drill.has_image());
        drill.image_url = Some("https://cdn.example.com/drills/a.png".to_string());
        assert!(drill.has_image());
    }

    #[test]
    fn test_merge_flags_not_serialized() {
        let mut drill = Drill::new("Pepper", owner());
        drill.is_user_owned = true;
        drill.is_favorited = true;

        let json = serde_json::to_string(&drill).unwrap();
        assert!(!json.contains("is_user_owned"));
        assert!(!json.contains("is_favorited"));

        let back: Drill = serde_json::from_str(&json).unwrap();
        assert!(!back.is_user_owned);
        assert!(!back.is_favorited);
    }
}
