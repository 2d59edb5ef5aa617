//! Drill filter evaluation
//!
//! One evaluator serves every browsing screen. Earlier builds of the app had
//! two slightly divergent copies (any-label vs all-label matching); the
//! divergence is now a [`MatchPolicy`] parameter and the category
//! vocabularies are defined once here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::normalize_labels;
use crate::models::Drill;

/// Skill focus vocabulary offered by the filter UI.
pub const SKILL_FOCUS_OPTIONS: &[&str] = &[
    "serving",
    "passing",
    "setting",
    "hitting",
    "blocking",
    "digging",
    "conditioning",
];

/// Difficulty vocabulary offered by the filter UI.
pub const DIFFICULTY_OPTIONS: &[&str] = &["beginner", "intermediate", "advanced"];

/// Drill type vocabulary offered by the filter UI.
pub const DRILL_TYPE_OPTIONS: &[&str] = &["warmup", "offense", "defense", "scrimmage", "cooldown"];

/// How selected labels within one category combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Drill passes a constrained category if it carries any selected label
    #[default]
    Any,
    /// Drill passes a constrained category only if it carries every selected label
    All,
}

/// The active filter selections for the three drill categories.
///
/// Pure client-side transient state: created empty when a browsing screen
/// mounts, mutated one label at a time, discarded on unmount. An empty set in
/// a category means that category is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub skill_focus: BTreeSet<String>,
    pub difficulty: BTreeSet<String>,
    pub drill_type: BTreeSet<String>,
}

impl FilterSelection {
    /// Create an empty selection (matches everything)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no category is constrained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skill_focus.is_empty() && self.difficulty.is_empty() && self.drill_type.is_empty()
    }

    /// Remove every selected label ("clear all")
    pub fn clear(&mut self) {
        self.skill_focus.clear();
        self.difficulty.clear();
        self.drill_type.clear();
    }

    /// Toggle one skill focus label
    pub fn toggle_skill_focus(&mut self, label: &str) {
        toggle(&mut self.skill_focus, label);
    }

    /// Toggle one difficulty label
    pub fn toggle_difficulty(&mut self, label: &str) {
        toggle(&mut self.difficulty, label);
    }

    /// Toggle one drill type label
    pub fn toggle_drill_type(&mut self, label: &str) {
        toggle(&mut self.drill_type, label);
    }

    /// Decide whether a drill passes the current selection.
    ///
    /// Categories combine with AND: a drill passes only if every constrained
    /// category matches. Within a category the policy decides between
    /// any-label and all-label matching. Comparison is exact label equality
    /// after normalization, which already lowercases both sides.
    #[must_use]
    pub fn matches(&self, drill: &Drill, policy: MatchPolicy) -> bool {
        category_matches(&self.skill_focus, drill.skill_focus.as_deref(), policy)
            && category_matches(&self.difficulty, drill.difficulty.as_deref(), policy)
            && category_matches(&self.drill_type, drill.drill_type.as_deref(), policy)
    }
}

fn toggle(set: &mut BTreeSet<String>, label: &str) {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return;
    }
    if !set.remove(&label) {
        set.insert(label);
    }
}

fn category_matches(selected: &BTreeSet<String>, raw: Option<&str>, policy: MatchPolicy) -> bool {
    if selected.is_empty() {
        return true;
    }

    // A drill with no value at all for a constrained category fails it: an
    // empty label set never intersects a non-empty selection.
    let labels = normalize_labels(raw);
    match policy {
        MatchPolicy::Any => selected.iter().any(|label| labels.contains(label)),
        MatchPolicy::All => selected.iter().all(|label| labels.contains(label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    fn owner() -> UserId {
        "018f72f1-0000-7000-8000-000000000001".parse().unwrap()
    }

    fn sample_drill() -> Drill {
        let mut drill = Drill::new("Serve receive ladder", owner());
        drill.skill_focus = Some(r#"["Serving","Passing"]"#.to_string());
        drill.difficulty = Some("Intermediate".to_string());
        drill.drill_type = Some(r#"["Warmup","Defense"]"#.to_string());
        drill
    }

    #[test]
    fn empty_selection_passes_every_drill() {
        let selection = FilterSelection::new();
        assert!(selection.matches(&sample_drill(), MatchPolicy::Any));
        assert!(selection.matches(&sample_drill(), MatchPolicy::All));

        let bare = Drill::new("No attributes at all", owner());
        assert!(selection.matches(&bare, MatchPolicy::Any));
    }

    #[test]
    fn any_policy_passes_on_one_matching_label() {
        let mut selection = FilterSelection::new();
        selection.toggle_skill_focus("serving");
        selection.toggle_skill_focus("blocking");

        assert!(selection.matches(&sample_drill(), MatchPolicy::Any));
    }

    #[test]
    fn all_policy_requires_every_selected_label() {
        let mut selection = FilterSelection::new();
        selection.toggle_skill_focus("serving");
        selection.toggle_skill_focus("passing");
        assert!(selection.matches(&sample_drill(), MatchPolicy::All));

        selection.toggle_skill_focus("blocking");
        assert!(!selection.matches(&sample_drill(), MatchPolicy::All));
    }

    #[test]
    fn categories_combine_with_and() {
        let mut selection = FilterSelection::new();
        selection.toggle_skill_focus("serving");
        selection.toggle_difficulty("advanced");

        // Skill focus matches but difficulty does not.
        assert!(!selection.matches(&sample_drill(), MatchPolicy::Any));

        selection.toggle_difficulty("advanced");
        selection.toggle_difficulty("intermediate");
        assert!(selection.matches(&sample_drill(), MatchPolicy::Any));
    }

    #[test]
    fn constrained_category_fails_drill_without_value() {
        let mut selection = FilterSelection::new();
        selection.toggle_drill_type("warmup");

        let mut drill = sample_drill();
        drill.drill_type = None;
        assert!(!selection.matches(&drill, MatchPolicy::Any));
        assert!(!selection.matches(&drill, MatchPolicy::All));
    }

    #[test]
    fn matching_is_case_insensitive_via_normalization() {
        let mut selection = FilterSelection::new();
        selection.toggle_difficulty("Intermediate");
        assert!(selection.matches(&sample_drill(), MatchPolicy::Any));
    }

    #[test]
    fn adding_an_already_matched_label_is_monotone_under_any() {
        let mut selection = FilterSelection::new();
        selection.toggle_skill_focus("serving");
        assert!(selection.matches(&sample_drill(), MatchPolicy::Any));

        // Widening an already-matching category never excludes the drill.
        selection.toggle_skill_focus("passing");
        assert!(selection.matches(&sample_drill(), MatchPolicy::Any));
    }

    #[test]
    fn toggle_removes_on_second_call() {
        let mut selection = FilterSelection::new();
        selection.toggle_skill_focus("serving");
        assert!(!selection.is_empty());
        selection.toggle_skill_focus("serving");
        assert!(selection.is_empty());
    }

    #[test]
    fn clear_resets_every_category() {
        let mut selection = FilterSelection::new();
        selection.toggle_skill_focus("serving");
        selection.toggle_difficulty("beginner");
        selection.toggle_drill_type("warmup");

        selection.clear();
        assert!(selection.is_empty());
        assert!(selection.matches(&sample_drill(), MatchPolicy::Any));
    }

    #[test]
    fn vocabularies_are_lowercase() {
        for option in SKILL_FOCUS_OPTIONS
            .iter()
            .chain(DIFFICULTY_OPTIONS)
            .chain(DRILL_TYPE_OPTIONS)
        {
            assert_eq!(*option, option.to_lowercase());
        }
    }
}
