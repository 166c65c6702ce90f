//! In-place rewrites of a JSON tree for the redaction modes.

use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::har::TextMatcher;

/// Replaces every occurrence of the needle in keys and string values.
/// Returns the number of occurrences replaced.
pub(crate) fn replace_all(value: &mut Value, m: &TextMatcher, with: &str) -> usize {
    match value {
        Value::String(s) => {
            let n = m.count_in_str(s);
            if n > 0 {
                *s = s.replace(m.needle(), with);
            }
            n
        }
        Value::Array(items) => items.iter_mut().map(|v| replace_all(v, m, with)).sum(),
        Value::Object(map) => {
            let mut replaced = 0;
            if map.keys().any(|k| m.is_match_str(k)) {
                let old = std::mem::take(map);
                let original: HashSet<String> = old.keys().cloned().collect();
                let mut renamed = Map::with_capacity(old.len());
                for (k, v) in old {
                    let n = m.count_in_str(&k);
                    replaced += n;
                    let key = if n > 0 {
                        let base = k.replace(m.needle(), with);
                        if base == k {
                            k
                        } else {
                            free_key(base, |c| renamed.contains_key(c) || original.contains(c))
                        }
                    } else {
                        k
                    };
                    renamed.insert(key, v);
                }
                *map = renamed;
            }
            replaced + map.values_mut().map(|v| replace_all(v, m, with)).sum::<usize>()
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => 0,
    }
}

/// `base`, or `base#2`, `base#3`, ... when a sibling member already uses that name.
fn free_key(base: String, taken: impl Fn(&str) -> bool) -> String {
    if !taken(&base) {
        return base;
    }
    let mut i = 2;
    loop {
        let candidate = format!("{base}#{i}");
        if !taken(&candidate) {
            tracing::warn!("redacted key collides with {:?}; renamed to {:?}", base, candidate);
            return candidate;
        }
        i += 1;
    }
}

/// Removes every innermost member that holds the needle: object members whose
/// key matches or whose value is a matching string, and matching string items
/// of arrays. Containers left empty stay in place. Returns the number removed.
pub(crate) fn delete_pairs(value: &mut Value, m: &TextMatcher) -> usize {
    match value {
        Value::Object(map) => {
            let before = map.len();
            map.retain(|k, v| !(m.is_match_str(k) || is_matching_string(v, m)));
            let removed = before - map.len();
            removed + map.values_mut().map(|v| delete_pairs(v, m)).sum::<usize>()
        }
        Value::Array(items) => {
            let before = items.len();
            items.retain(|v| !is_matching_string(v, m));
            let removed = before - items.len();
            removed + items.iter_mut().map(|v| delete_pairs(v, m)).sum::<usize>()
        }
        Value::String(_) | Value::Null | Value::Bool(_) | Value::Number(_) => 0,
    }
}

fn is_matching_string(v: &Value, m: &TextMatcher) -> bool {
    matches!(v, Value::String(s) if m.is_match_str(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replace_in_values_and_keys() {
        let mut v = json!({
            "headers": [{ "name": "Authorization", "value": "Bearer token123" }],
            "token123": { "note": "token123 and token123" },
            "status": 200
        });
        let n = replace_all(&mut v, &TextMatcher::exact("token123"), "[REDACTED]");
        assert_eq!(n, 4);
        assert_eq!(v["headers"][0]["value"], "Bearer [REDACTED]");
        assert_eq!(v["[REDACTED]"]["note"], "[REDACTED] and [REDACTED]");
        assert!(v.get("token123").is_none());
        assert_eq!(v["status"], 200);
    }

    #[test]
    fn replace_keeps_key_order() {
        let mut v = json!({ "a": 1, "secret_b": 2, "c": 3 });
        replace_all(&mut v, &TextMatcher::exact("secret"), "x");
        let keys: Vec<&String> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["a", "x_b", "c"]);
    }

    #[test]
    fn replaced_key_never_overwrites_sibling() {
        let mut v = json!({ "token123": "a", "[REDACTED]": "b", "[REDACTED]#2": "c" });
        let n = replace_all(&mut v, &TextMatcher::exact("token123"), "[REDACTED]");
        assert_eq!(n, 1);
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        let keys: Vec<&String> = obj.keys().collect();
        assert_eq!(keys, ["[REDACTED]#3", "[REDACTED]", "[REDACTED]#2"]);
        assert_eq!(v["[REDACTED]#3"], "a");
        assert_eq!(v["[REDACTED]"], "b");
        assert_eq!(v["[REDACTED]#2"], "c");
    }

    #[test]
    fn two_keys_renaming_to_the_same_name_both_survive() {
        let mut v = json!({ "x_secret": 1, "x_SECRET": 2, "secret_x": 3 });
        replace_all(&mut v, &TextMatcher::exact("secret"), "SECRET");
        let keys: Vec<&String> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["x_SECRET#2", "x_SECRET", "SECRET_x"]);
        assert_eq!(v["x_SECRET#2"], 1);
        assert_eq!(v["x_SECRET"], 2);
    }

    #[test]
    fn delete_innermost_pairs() {
        let mut v = json!({
            "request": {
                "url": "https://x.test/?key=abc",
                "headers": [
                    { "name": "Authorization", "value": "Bearer abc" },
                    { "name": "Accept", "value": "*/*" }
                ],
                "cookies": ["abc=1", "other=2"]
            },
            "abc_key": 5
        });
        let n = delete_pairs(&mut v, &TextMatcher::exact("abc"));
        assert_eq!(n, 4);
        assert!(v["request"].get("url").is_none());
        assert_eq!(v["request"]["headers"][0], json!({ "name": "Authorization" }));
        assert_eq!(v["request"]["headers"][1]["value"], "*/*");
        assert_eq!(v["request"]["cookies"], json!(["other=2"]));
        assert!(v.get("abc_key").is_none());
    }

    #[test]
    fn delete_keeps_emptied_containers() {
        let mut v = json!({ "outer": { "only": "abc" }, "list": ["abc"] });
        delete_pairs(&mut v, &TextMatcher::exact("abc"));
        assert_eq!(v, json!({ "outer": {}, "list": [] }));
    }
}
