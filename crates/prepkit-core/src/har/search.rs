//! Literal substring search over a JSON tree.
//!
//! Only object keys and string values are searched, after JSON unescaping.
//! Numbers, booleans and null never match.

use serde_json::Value;

/// Literal needle, optionally case-insensitive.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    needle: String,
    ignore_case: bool,
}

impl TextMatcher {
    /// Case-sensitive matcher.
    pub fn exact(needle: &str) -> Self {
        Self {
            needle: needle.to_string(),
            ignore_case: false,
        }
    }

    /// Lowercases both the needle and every haystack.
    pub fn ignore_case(needle: &str) -> Self {
        Self {
            needle: needle.to_lowercase(),
            ignore_case: true,
        }
    }

    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Non-overlapping occurrences in `text`. An empty needle matches nothing.
    pub fn count_in_str(&self, text: &str) -> usize {
        if self.needle.is_empty() {
            return 0;
        }
        if self.ignore_case {
            text.to_lowercase().matches(self.needle.as_str()).count()
        } else {
            text.matches(self.needle.as_str()).count()
        }
    }

    pub fn is_match_str(&self, text: &str) -> bool {
        if self.needle.is_empty() {
            return false;
        }
        if self.ignore_case {
            text.to_lowercase().contains(self.needle.as_str())
        } else {
            text.contains(self.needle.as_str())
        }
    }

    /// Occurrences across all keys and string values under `value`.
    pub fn count(&self, value: &Value) -> usize {
        match value {
            Value::String(s) => self.count_in_str(s),
            Value::Array(items) => items.iter().map(|v| self.count(v)).sum(),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| self.count_in_str(k) + self.count(v))
                .sum(),
            Value::Null | Value::Bool(_) | Value::Number(_) => 0,
        }
    }

    /// True if any key or string value under `value` contains the needle.
    pub fn is_match(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => self.is_match_str(s),
            Value::Array(items) => items.iter().any(|v| self.is_match(v)),
            Value::Object(map) => map
                .iter()
                .any(|(k, v)| self.is_match_str(k) || self.is_match(v)),
            Value::Null | Value::Bool(_) | Value::Number(_) => false,
        }
    }
}
