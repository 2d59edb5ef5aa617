//! Merging the owned and favorited drill collections
//!
//! The combined view shows the coach's own drills first, then favorited
//! drills from other users, with each id appearing exactly once. Provenance
//! flags are attached here and nowhere else.

use std::collections::HashSet;

use crate::models::{Drill, UserId};

/// Combine the user's own drills with their favorited drills into one
/// ordered, deduplicated list.
///
/// Own drills come first, tagged `is_user_owned`; favorited drills from
/// other users follow in their incoming order, tagged `is_favorited`. When
/// the same id appears in both collections the user-owned copy wins (it is
/// authoritative for edit/delete permission) and carries both flags.
/// Runs in O(n + m) via a seen-id set.
#[must_use]
pub fn merge_drills(
    own_drills: &[Drill],
    favorite_drills: &[Drill],
    current_user: UserId,
) -> Vec<Drill> {
    let favorite_ids: HashSet<_> = favorite_drills.iter().map(|drill| drill.id).collect();

    let mut seen = HashSet::with_capacity(own_drills.len() + favorite_drills.len());
    let mut merged = Vec::with_capacity(own_drills.len() + favorite_drills.len());

    for drill in own_drills {
        if drill.owner_id != current_user || !seen.insert(drill.id) {
            continue;
        }
        let mut drill = drill.clone();
        drill.is_user_owned = true;
        drill.is_favorited = favorite_ids.contains(&drill.id);
        merged.push(drill);
    }

    for drill in favorite_drills {
        if drill.owner_id == current_user || !seen.insert(drill.id) {
            continue;
        }
        let mut drill = drill.clone();
        drill.is_user_owned = false;
        drill.is_favorited = true;
        merged.push(drill);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(suffix: u32) -> UserId {
        format!("018f72f1-0000-7000-8000-0000000000{suffix:02}")
            .parse()
            .unwrap()
    }

    fn drill(name: &str, owner: UserId) -> Drill {
        Drill::new(name, owner)
    }

    #[test]
    fn own_drill_also_favorited_appears_once_with_both_flags() {
        let me = user(1);
        let other = user(2);

        let mine = drill("Pepper", me);
        let theirs = drill("Block party", other);
        let own = vec![mine.clone()];
        let favorites = vec![mine.clone(), theirs.clone()];

        let merged = merge_drills(&own, &favorites, me);
        assert_eq!(merged.len(), 2);

        assert_eq!(merged[0].id, mine.id);
        assert!(merged[0].is_user_owned);
        assert!(merged[0].is_favorited);

        assert_eq!(merged[1].id, theirs.id);
        assert!(!merged[1].is_user_owned);
        assert!(merged[1].is_favorited);
    }

    #[test]
    fn own_drills_keep_their_order_and_come_first() {
        let me = user(1);
        let other = user(2);

        let own = vec![drill("A", me), drill("B", me)];
        let favorites = vec![drill("C", other)];

        let merged = merge_drills(&own, &favorites, me);
        let names: Vec<_> = merged.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn own_list_entries_not_owned_by_current_user_are_skipped() {
        let me = user(1);
        let other = user(2);

        let own = vec![drill("Stray", other)];
        let merged = merge_drills(&own, &[], me);
        assert!(merged.is_empty());
    }

    #[test]
    fn unfavorited_own_drill_has_only_ownership_flag() {
        let me = user(1);
        let own = vec![drill("Pepper", me)];

        let merged = merge_drills(&own, &[], me);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].is_user_owned);
        assert!(!merged[0].is_favorited);
    }

    #[test]
    fn duplicate_favorites_are_deduplicated() {
        let me = user(1);
        let other = user(2);

        let theirs = drill("Block party", other);
        let favorites = vec![theirs.clone(), theirs.clone()];

        let merged = merge_drills(&[], &favorites, me);
        assert_eq!(merged.len(), 1);
    }
}
