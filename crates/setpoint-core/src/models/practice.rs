//! Practice model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::UserId;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// A unique identifier for a practice session, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PracticeId(Uuid);

impl PracticeId {
    /// Create a new unique practice ID using UUID v7
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

impl Default for PracticeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PracticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PracticeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A scheduled practice session: an ordered list of drills with per-drill
/// durations that must add up to the session length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practice {
    /// Unique identifier
    pub id: PracticeId,
    /// Owning user
    pub owner_id: UserId,
    /// Session start (Unix ms)
    pub start_time: i64,
    /// Session end (Unix ms)
    pub end_time: i64,
    /// Planned drills, by name, in running order
    #[serde(default)]
    pub drills: Vec<String>,
    /// Minutes allotted to each drill, parallel to `drills`
    #[serde(default)]
    pub drill_durations: Vec<i64>,
    /// Optional session notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl Practice {
    /// Create a new empty practice session
    #[must_use]
    pub fn new(owner_id: UserId, start_time: i64, end_time: i64) -> Self {
        Self {
            id: PracticeId::new(),
            owner_id,
            start_time,
            end_time,
            drills: Vec::new(),
            drill_durations: Vec::new(),
            notes: None,
        }
    }

    /// Total session length in minutes
    #[must_use]
    pub const fn total_minutes(&self) -> i64 {
        (self.end_time - self.start_time) / MILLIS_PER_MINUTE
    }

    /// Validate the practice before it is sent to the store.
    ///
    /// Runs entirely client-side; a failing practice never reaches the
    /// network. Checks: positive session length, at least one drill, drill
    /// and duration lists of equal length, positive per-drill durations, and
    /// drill durations summing to the session length.
    pub fn validate(&self) -> Result<()> {
        if self.end_time <= self.start_time {
            return Err(Error::InvalidInput(
                "Practice must end after it starts".to_string(),
            ));
        }
        if self.drills.is_empty() {
            return Err(Error::InvalidInput(
                "Practice must contain at least one drill".to_string(),
            ));
        }
        if self.drills.iter().any(|name| name.trim().is_empty()) {
            return Err(Error::InvalidInput(
                "Drill names cannot be empty".to_string(),
            ));
        }
        if self.drills.len() != self.drill_durations.len() {
            return Err(Error::InvalidInput(format!(
                "Each drill needs a duration ({} drills, {} durations)",
                self.drills.len(),
                self.drill_durations.len()
            )));
        }
        if self.drill_durations.iter().any(|minutes| *minutes <= 0) {
            return Err(Error::InvalidInput(
                "Drill durations must be positive".to_string(),
            ));
        }

        let allotted: i64 = self.drill_durations.iter().sum();
        let total = self.total_minutes();
        if allotted != total {
            return Err(Error::InvalidInput(format!(
                "Drill durations add up to {allotted} minutes but the practice is {total} minutes"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        "018f72f1-0000-7000-8000-000000000001".parse().unwrap()
    }

    fn ninety_minute_practice() -> Practice {
        // 90 minutes
        Practice::new(owner(), 1_700_000_000_000, 1_700_000_000_000 + 90 * 60_000)
    }

    #[test]
    fn validate_accepts_matching_durations() {
        let mut practice = ninety_minute_practice();
        practice.drills = vec!["Warmup".to_string(), "Pepper".to_string()];
        practice.drill_durations = vec![30, 60];
        practice.validate().unwrap();
    }

    #[test]
    fn validate_rejects_duration_sum_mismatch() {
        let mut practice = ninety_minute_practice();
        practice.drills = vec!["Warmup".to_string(), "Pepper".to_string()];
        practice.drill_durations = vec![30, 30];

        let err = practice.validate().unwrap_err();
        match err {
            Error::InvalidInput(msg) => {
                assert!(msg.contains("60 minutes"));
                assert!(msg.contains("90 minutes"));
            }
            other => panic!("expected invalid input error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_empty_drill_list() {
        let practice = ninety_minute_practice();
        assert!(practice.validate().is_err());
    }

    #[test]
    fn validate_rejects_length_mismatch() {
        let mut practice = ninety_minute_practice();
        practice.drills = vec!["Warmup".to_string(), "Pepper".to_string()];
        practice.drill_durations = vec![90];
        assert!(practice.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_times() {
        let mut practice = Practice::new(owner(), 2_000, 1_000);
        practice.drills = vec!["Warmup".to_string()];
        practice.drill_durations = vec![1];
        assert!(practice.validate().is_err());
    }

    #[test]
    fn total_minutes_rounds_down() {
        let practice = Practice::new(owner(), 0, 90 * 60_000 + 30_000);
        assert_eq!(practice.total_minutes(), 90);
    }
}
