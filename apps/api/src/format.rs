#![allow(dead_code)]

//! Display and serialization helpers for the JSON-in-TEXT array columns.
//!
//! Tags, photos, line items, and recipient tags are stored as serialized JSON
//! text and always read or written wholesale. These two functions are the only
//! boundary through which those columns pass.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Replaces underscores with spaces for display, e.g. "IN_PROGRESS" → "IN PROGRESS".
/// No casing changes; empty input passes through.
pub fn humanize_status(status: &str) -> String {
    status.replace('_', " ")
}

/// Parses a TEXT column expected to hold a JSON array.
/// Returns an empty vec for invalid JSON or any non-array value — a corrupt
/// stored field must never break a read path.
pub fn parse_json_array<T: DeserializeOwned>(raw: &str) -> Vec<T> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Serializes a slice to the JSON text stored in array columns.
pub fn to_json_array<T: Serialize>(items: &[T]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_replaces_underscores() {
        assert_eq!(humanize_status("IN_PROGRESS"), "IN PROGRESS");
        assert_eq!(humanize_status("A_B_C"), "A B C");
    }

    #[test]
    fn test_humanize_passthrough() {
        assert_eq!(humanize_status("COMPLETE"), "COMPLETE");
        assert_eq!(humanize_status(""), "");
    }

    #[test]
    fn test_parse_json_array_valid() {
        let parsed: Vec<String> = parse_json_array(r#"["a","b"]"#);
        assert_eq!(parsed, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_parse_json_array_invalid_json_is_empty() {
        let parsed: Vec<String> = parse_json_array("not json");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_parse_json_array_non_array_values_are_empty() {
        assert!(parse_json_array::<String>("42").is_empty());
        assert!(parse_json_array::<String>("null").is_empty());
        assert!(parse_json_array::<String>(r#"{"a":1}"#).is_empty());
        assert!(parse_json_array::<String>("").is_empty());
    }

    #[test]
    fn test_to_json_array() {
        assert_eq!(to_json_array(&["a", "b"]), r#"["a","b"]"#);
        assert_eq!(to_json_array::<String>(&[]), "[]");
    }
}
