//! Drill library browsing service
//!
//! Owns the full catalog pipeline for the combined "my drills + favorites"
//! view: fetch, merge, filter, paginate. Clients hand it a `DrillStore` and
//! drive it with selection toggles and page loads.

use crate::catalog::{merge_drills, DrillPager, FilterSelection, MatchPolicy};
use crate::error::Result;
use crate::models::{Drill, DrillId, UserId};
use crate::remote::DrillStore;

/// Stateful browsing session over a drill store.
///
/// The last successfully fetched lists are kept across failed refreshes so a
/// flaky connection never blanks the screen.
pub struct DrillLibraryService<S: DrillStore> {
    store: S,
    user: UserId,
    own: Vec<Drill>,
    favorites: Vec<Drill>,
    selection: FilterSelection,
    policy: MatchPolicy,
    pager: DrillPager,
}

impl<S: DrillStore> DrillLibraryService<S> {
    /// Create a browsing session for the given user
    pub fn new(store: S, user: UserId) -> Self {
        Self {
            store,
            user,
            own: Vec::new(),
            favorites: Vec::new(),
            selection: FilterSelection::new(),
            policy: MatchPolicy::default(),
            pager: DrillPager::new(),
        }
    }

    /// Use a custom page size
    #[must_use]
    pub fn with_pager(mut self, pager: DrillPager) -> Self {
        self.pager = pager;
        self.apply();
        self
    }

    /// Re-fetch the own and favorite lists from the store.
    ///
    /// On failure the previous lists are left untouched and the error is
    /// returned; no partial overwrite with empty data.
    pub async fn refresh(&mut self) -> Result<()> {
        let own = self.store.list_own_drills(self.user).await?;
        let favorites = self.store.list_favorite_drills(self.user).await?;

        self.own = own;
        self.favorites = favorites;
        self.apply();
        Ok(())
    }

    /// Current filter selection
    #[must_use]
    pub const fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Active match policy
    #[must_use]
    pub const fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Switch between any-label and all-label matching
    pub fn set_policy(&mut self, policy: MatchPolicy) {
        self.policy = policy;
        self.apply();
        self.pager.reset();
    }

    /// Toggle one skill focus label and re-filter
    pub fn toggle_skill_focus(&mut self, label: &str) {
        self.selection.toggle_skill_focus(label);
        self.apply();
        self.pager.reset();
    }

    /// Toggle one difficulty label and re-filter
    pub fn toggle_difficulty(&mut self, label: &str) {
        self.selection.toggle_difficulty(label);
        self.apply();
        self.pager.reset();
    }

    /// Toggle one drill type label and re-filter
    pub fn toggle_drill_type(&mut self, label: &str) {
        self.selection.toggle_drill_type(label);
        self.apply();
        self.pager.reset();
    }

    /// Clear every filter ("clear all")
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.apply();
        self.pager.reset();
    }

    /// Advance the pager by one page
    pub fn load_next_page(&mut self) -> bool {
        self.pager.load_next_page()
    }

    /// Items visible up to the current page
    #[must_use]
    pub fn visible(&self) -> &[Drill] {
        self.pager.visible()
    }

    /// Whether more pages are available
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.pager.has_more()
    }

    /// Record an enriched drill (e.g. after a detail fetch) so later pages
    /// reuse it
    pub fn note_drill_details(&mut self, drill: Drill) {
        self.pager.cache_put(drill);
    }

    /// Create a drill, then re-fetch from the source of truth
    pub async fn create_drill(&mut self, drill: &Drill) -> Result<Drill> {
        let created = self.store.create_drill(drill).await?;
        self.refresh().await?;
        // The returned representation supersedes any cached copy.
        self.pager.cache_put(created.clone());
        Ok(created)
    }

    /// Update a drill, then re-fetch from the source of truth
    pub async fn update_drill(&mut self, drill: &Drill) -> Result<Drill> {
        let updated = self.store.update_drill(drill).await?;
        self.refresh().await?;
        // The returned representation supersedes any cached copy.
        self.pager.cache_put(updated.clone());
        Ok(updated)
    }

    /// Delete a drill, then re-fetch from the source of truth
    pub async fn delete_drill(&mut self, id: DrillId) -> Result<()> {
        self.store.delete_drill(id).await?;
        self.refresh().await
    }

    /// Favorite a drill, then re-fetch
    pub async fn add_favorite(&mut self, drill: DrillId) -> Result<()> {
        self.store.add_favorite(self.user, drill).await?;
        self.refresh().await
    }

    /// Unfavorite a drill, then re-fetch
    pub async fn remove_favorite(&mut self, drill: DrillId) -> Result<()> {
        self.store.remove_favorite(self.user, drill).await?;
        self.refresh().await
    }

    /// Re-run merge and filter over the held lists and hand the result to
    /// the pager (which resets only on identity change).
    fn apply(&mut self) {
        let merged = merge_drills(&self.own, &self.favorites, self.user);
        let filtered: Vec<Drill> = merged
            .into_iter()
            .filter(|drill| self.selection.matches(drill, self.policy))
            .collect();
        tracing::debug!(
            total = self.own.len() + self.favorites.len(),
            filtered = filtered.len(),
            "re-applied drill filters"
        );
        self.pager.sync_items(filtered);
    }
}
