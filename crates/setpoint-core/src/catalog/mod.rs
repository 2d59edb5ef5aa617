//! Drill catalog pipeline
//!
//! The browsing screens funnel every drill through the same four stages:
//! attribute normalization, filter evaluation, merge/dedup of the owned and
//! favorited collections, and incremental pagination backed by an id-keyed
//! drill cache.

mod filter;
mod merge;
mod normalize;
mod pager;

pub use filter::{
    FilterSelection, MatchPolicy, DIFFICULTY_OPTIONS, DRILL_TYPE_OPTIONS, SKILL_FOCUS_OPTIONS,
};
pub use merge::merge_drills;
pub use normalize::normalize_labels;
pub use pager::{DrillPager, DEFAULT_PAGE_SIZE};
