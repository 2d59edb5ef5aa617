//! Drill attribute normalization
//!
//! The store's schema grew up around three encodings for the same logical
//! set-valued field: a JSON array of labels, a single bare label, or nothing.
//! This module is the only place allowed to look at the raw encoding; every
//! consumer works with the canonical lowercase label list it produces.

use serde_json::Value;

/// Decode a raw category field into canonical lowercase labels.
///
/// Accepts all historical encodings and never fails:
/// - `None` or blank → empty list
/// - JSON array → lowercase string elements in order, non-strings skipped
/// - JSON scalar string → that single label
/// - anything that is not valid JSON → the raw text itself as a single label
///
/// Idempotent: feeding a plain lowercase label back in returns the same
/// single-element list.
#[must_use]
pub fn normalize_labels(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(label) => Some(label.to_lowercase()),
                _ => None,
            })
            .collect(),
        Ok(Value::String(label)) => vec![label.to_lowercase()],
        // Bare numbers/booleans parse as JSON scalars; treat their source
        // text as a single label, same as the not-JSON fallback.
        Ok(_) | Err(_) => vec![trimmed.to_lowercase()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn none_and_blank_yield_empty() {
        assert_eq!(normalize_labels(None), Vec::<String>::new());
        assert_eq!(normalize_labels(Some("")), Vec::<String>::new());
        assert_eq!(normalize_labels(Some("   ")), Vec::<String>::new());
    }

    #[test]
    fn json_array_preserves_order_and_lowercases() {
        assert_eq!(
            normalize_labels(Some(r#"["Offense","Defense"]"#)),
            vec!["offense", "defense"]
        );
    }

    #[test]
    fn json_array_skips_non_string_elements() {
        assert_eq!(
            normalize_labels(Some(r#"["Serving", 3, null, "Passing"]"#)),
            vec!["serving", "passing"]
        );
    }

    #[test]
    fn quoted_scalar_becomes_single_label() {
        assert_eq!(normalize_labels(Some(r#""Blocking""#)), vec!["blocking"]);
    }

    #[test]
    fn bare_string_becomes_single_label() {
        assert_eq!(normalize_labels(Some("Beginner")), vec!["beginner"]);
    }

    #[test]
    fn malformed_json_falls_back_to_raw_label() {
        assert_eq!(normalize_labels(Some("not json")), vec!["not json"]);
        assert_eq!(
            normalize_labels(Some(r#"["unterminated"#)),
            vec![r#"["unterminated"#]
        );
    }

    #[test]
    fn round_trips_plain_label_lists() {
        let labels = vec!["serving".to_string(), "passing".to_string()];
        let encoded = serde_json::to_string(&labels).unwrap();
        assert_eq!(normalize_labels(Some(&encoded)), labels);
    }

    #[test]
    fn idempotent_on_normalized_single_labels() {
        let first = normalize_labels(Some("setter dump"));
        assert_eq!(first, vec!["setter dump"]);
        let second = normalize_labels(Some(&first[0]));
        assert_eq!(second, first);
    }

    #[test]
    fn empty_json_array_yields_empty() {
        assert_eq!(normalize_labels(Some("[]")), Vec::<String>::new());
    }
}
