//! Incremental pagination over the filtered drill list
//!
//! The browsing screens render one page at a time and append the next page
//! when the scroll position nears the bottom. The pager owns the cursor and
//! an id-keyed cache of materialized drill objects so a drill enriched once
//! (a detail fetch, say) is not reverted to its thinner list entry when it
//! reappears on a later page.

use std::collections::HashMap;

use crate::models::{Drill, DrillId};

/// Default page size: one page keeps the first paint fast, later loads cheap.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Stateful paginator over the filtered, merged drill list.
///
/// The cursor resets to page one only when the *identity set* of the
/// upstream list changes (compared via sorted ids), so benign re-renders and
/// pure reorders keep the user's scroll position.
#[derive(Debug)]
pub struct DrillPager {
    page_size: usize,
    current_page: usize,
    loading: bool,
    items: Vec<Drill>,
    identity: Vec<DrillId>,
    cache: HashMap<DrillId, Drill>,
    visible: Vec<Drill>,
}

impl Default for DrillPager {
    fn default() -> Self {
        Self::new()
    }
}

impl DrillPager {
    /// Create a pager with the default page size
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a pager with a custom page size (clamped to at least 1)
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            loading: false,
            items: Vec::new(),
            identity: Vec::new(),
            cache: HashMap::new(),
            visible: Vec::new(),
        }
    }

    /// Replace the upstream filtered list.
    ///
    /// Resets the cursor to page one only if the set of ids changed; a
    /// reordered list with the same membership keeps the current page.
    pub fn sync_items(&mut self, items: Vec<Drill>) {
        let mut identity: Vec<DrillId> = items.iter().map(|drill| drill.id).collect();
        identity.sort_unstable();

        let identity_changed = identity != self.identity;
        self.items = items;
        self.identity = identity;

        if identity_changed {
            tracing::debug!(
                items = self.items.len(),
                "drill list identity changed, resetting to page 1"
            );
            self.current_page = 1;
            self.loading = false;
        }
        self.rebuild_visible();
    }

    /// Jump back to page one of the current list
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.loading = false;
        self.rebuild_visible();
    }

    /// Advance the cursor by one page.
    ///
    /// Returns `true` when a new page became visible. Safe to call
    /// redundantly: a load already in flight and a cursor at the end of the
    /// list both leave the state untouched.
    pub fn load_next_page(&mut self) -> bool {
        if self.loading || !self.has_more() {
            return false;
        }
        self.loading = true;
        self.current_page += 1;
        self.rebuild_visible();
        self.loading = false;
        true
    }

    /// Whether another page is available past the cursor
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.current_page * self.page_size < self.items.len()
    }

    /// Current page number (starts at 1)
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// The materialized items up to and including the current page
    #[must_use]
    pub fn visible(&self) -> &[Drill] {
        &self.visible
    }

    /// Store an enriched drill object. Last writer wins per id; the visible
    /// slice picks the update up immediately.
    pub fn cache_put(&mut self, drill: Drill) {
        self.cache.insert(drill.id, drill);
        self.rebuild_visible();
    }

    /// Look up a previously materialized drill by id
    #[must_use]
    pub fn cached(&self, id: DrillId) -> Option<&Drill> {
        self.cache.get(&id)
    }

    fn rebuild_visible(&mut self) {
        let end = (self.current_page * self.page_size).min(self.items.len());
        self.visible = self.items[..end]
            .iter()
            .map(|drill| {
                let mut materialized = self
                    .cache
                    .entry(drill.id)
                    .or_insert_with(|| drill.clone())
                    .clone();
                // Provenance flags belong to the merge step, not the cache:
                // cached copies come from detail fetches or store responses,
                // which never carry them.
                materialized.is_user_owned = drill.is_user_owned;
                materialized.is_favorited = drill.is_favorited;
                materialized
            })
            .collect();
    }
}
