//! Content classification table for the cleaner.
//!
//! Each rule pairs a matcher (MIME substring, URL extension, or base64
//! encoding) with a bloat category and what to put in place of the body.
//! Rules are checked in order; the first one whose category is not retained wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::har;

/// Placeholder for stripped base64 bodies.
pub const BINARY_PLACEHOLDER: &str = "[BINARY_DATA_REMOVED]";

const STATIC_MIMES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "font/",
    "application/font",
    "application/woff",
    "application/x-font",
];
const STATIC_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".woff", ".woff2", ".ttf", ".eot", ".mp4",
    ".mp3",
];
const CSS_MIMES: &[&str] = &["text/css"];
const CSS_EXTENSIONS: &[&str] = &[".css", ".map"];
const BINARY_MIMES: &[&str] = &["application/octet-stream"];

/// Bloat category; each has a `--keep-*` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Static,
    Css,
    Binary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Lowercased substring of the response content type.
    MimeContains(String),
    /// Lowercased suffix of the request URL path (query and fragment ignored).
    UrlExtension(String),
    /// `response.content.encoding == "base64"`.
    Base64Encoded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripAction {
    Empty,
    Placeholder(String),
}

impl StripAction {
    pub fn replacement(&self) -> &str {
        match self {
            StripAction::Empty => "",
            StripAction::Placeholder(p) => p,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRule {
    pub matcher: Matcher,
    pub category: Category,
    pub action: StripAction,
}

/// The parts of an entry the matchers look at, normalized once per entry.
#[derive(Debug, Clone)]
pub struct EntryFacts {
    mime: String,
    url_path: String,
    base64: bool,
}

impl EntryFacts {
    pub fn of(entry: &Value) -> Self {
        Self {
            mime: har::mime_type(entry).to_lowercase(),
            url_path: url_path(har::request_url(entry)).to_lowercase(),
            base64: har::content_encoding(entry).eq_ignore_ascii_case("base64"),
        }
    }
}

/// Path component of a request URL; falls back to cutting at `?`/`#` for unparseable URLs.
fn url_path(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(u) => u.path().to_string(),
        Err(_) => raw
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or("")
            .to_string(),
    }
}

impl ContentRule {
    pub fn matches(&self, facts: &EntryFacts) -> bool {
        match &self.matcher {
            Matcher::MimeContains(m) => facts.mime.contains(m.as_str()),
            Matcher::UrlExtension(ext) => facts.url_path.ends_with(ext.as_str()),
            Matcher::Base64Encoded => facts.base64,
        }
    }
}

/// User-supplied rule from `[[cleaner.rules]]`. One entry may set several matchers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub mime: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub base64: bool,
    pub category: Category,
    /// Body replacement; absent means empty string.
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl RuleConfig {
    pub fn to_rules(&self) -> Vec<ContentRule> {
        let action = match &self.placeholder {
            Some(p) => StripAction::Placeholder(p.clone()),
            None => StripAction::Empty,
        };
        let mut matchers = Vec::new();
        if let Some(m) = self.mime.as_deref().filter(|m| !m.is_empty()) {
            matchers.push(Matcher::MimeContains(m.to_lowercase()));
        }
        if let Some(e) = self.extension.as_deref().filter(|e| !e.is_empty()) {
            matchers.push(Matcher::UrlExtension(normalize_extension(e)));
        }
        if self.base64 {
            matchers.push(Matcher::Base64Encoded);
        }
        matchers
            .into_iter()
            .map(|matcher| ContentRule {
                matcher,
                category: self.category,
                action: action.clone(),
            })
            .collect()
    }
}

/// `"WEBP"` → `".webp"`.
pub fn normalize_extension(ext: &str) -> String {
    let lower = ext.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// Ordered rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<ContentRule>,
}

impl RuleTable {
    /// Built-in table: static, then CSS, then binary.
    pub fn builtin() -> Self {
        let mut rules = Vec::new();
        push_all(&mut rules, STATIC_MIMES, Category::Static, StripAction::Empty, mime);
        push_all(&mut rules, STATIC_EXTENSIONS, Category::Static, StripAction::Empty, ext);
        push_all(&mut rules, CSS_MIMES, Category::Css, StripAction::Empty, mime);
        push_all(&mut rules, CSS_EXTENSIONS, Category::Css, StripAction::Empty, ext);
        let binary = StripAction::Placeholder(BINARY_PLACEHOLDER.to_string());
        push_all(&mut rules, BINARY_MIMES, Category::Binary, binary.clone(), mime);
        rules.push(ContentRule {
            matcher: Matcher::Base64Encoded,
            category: Category::Binary,
            action: binary,
        });
        Self { rules }
    }

    /// User rules first, then the built-in table.
    pub fn with_overrides(overrides: &[RuleConfig]) -> Self {
        let mut rules: Vec<ContentRule> = overrides.iter().flat_map(RuleConfig::to_rules).collect();
        rules.extend(Self::builtin().rules);
        Self { rules }
    }

    pub fn rules(&self) -> &[ContentRule] {
        &self.rules
    }

    /// First rule that matches and whose category `retained` does not keep.
    pub fn classify(
        &self,
        facts: &EntryFacts,
        retained: impl Fn(Category) -> bool,
    ) -> Option<&ContentRule> {
        self.rules
            .iter()
            .filter(|r| !retained(r.category))
            .find(|r| r.matches(facts))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn mime(s: &str) -> Matcher {
    Matcher::MimeContains(s.to_string())
}

fn ext(s: &str) -> Matcher {
    Matcher::UrlExtension(s.to_string())
}

fn push_all(
    rules: &mut Vec<ContentRule>,
    patterns: &[&str],
    category: Category,
    action: StripAction,
    make: fn(&str) -> Matcher,
) {
    rules.extend(patterns.iter().map(|p| ContentRule {
        matcher: make(p),
        category,
        action: action.clone(),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(url: &str, mime: &str, encoding: Option<&str>) -> Value {
        let mut content = json!({ "mimeType": mime, "text": "body" });
        if let Some(enc) = encoding {
            content["encoding"] = json!(enc);
        }
        json!({ "request": { "url": url }, "response": { "content": content } })
    }

    fn keep_nothing(_: Category) -> bool {
        false
    }

    #[test]
    fn classifies_static_by_mime() {
        let table = RuleTable::builtin();
        let facts = EntryFacts::of(&entry("https://x.test/logo", "IMAGE/PNG", None));
        let rule = table.classify(&facts, keep_nothing).unwrap();
        assert_eq!(rule.category, Category::Static);
        assert_eq!(rule.action, StripAction::Empty);
    }

    #[test]
    fn classifies_by_extension_ignoring_query() {
        let table = RuleTable::builtin();
        let facts = EntryFacts::of(&entry("https://x.test/app.css?v=3#top", "text/plain", None));
        assert_eq!(table.classify(&facts, keep_nothing).unwrap().category, Category::Css);

        let facts = EntryFacts::of(&entry("https://x.test/font.WOFF2", "", None));
        assert_eq!(table.classify(&facts, keep_nothing).unwrap().category, Category::Static);
    }

    #[test]
    fn base64_is_binary_with_placeholder() {
        let table = RuleTable::builtin();
        let facts = EntryFacts::of(&entry("https://x.test/api", "application/json", Some("base64")));
        let rule = table.classify(&facts, keep_nothing).unwrap();
        assert_eq!(rule.category, Category::Binary);
        assert_eq!(rule.action.replacement(), BINARY_PLACEHOLDER);
    }

    #[test]
    fn retained_category_falls_through() {
        let table = RuleTable::builtin();
        let facts = EntryFacts::of(&entry("https://x.test/p.png", "image/png", Some("base64")));
        let rule = table.classify(&facts, |c| c == Category::Static).unwrap();
        assert_eq!(rule.category, Category::Binary);
        assert!(table
            .classify(&facts, |c| c == Category::Static || c == Category::Binary)
            .is_none());
    }

    #[test]
    fn plain_json_is_not_bloat() {
        let table = RuleTable::builtin();
        let facts = EntryFacts::of(&entry("https://x.test/api/users", "application/json", None));
        assert!(table.classify(&facts, keep_nothing).is_none());
    }

    #[test]
    fn overrides_come_first() {
        let overrides = vec![RuleConfig {
            mime: Some("Application/Wasm".to_string()),
            extension: Some("wasm".to_string()),
            base64: false,
            category: Category::Binary,
            placeholder: Some("[WASM]".to_string()),
        }];
        let table = RuleTable::with_overrides(&overrides);
        assert_eq!(
            table.rules()[0].matcher,
            Matcher::MimeContains("application/wasm".to_string())
        );
        assert_eq!(table.rules()[1].matcher, Matcher::UrlExtension(".wasm".to_string()));
        assert_eq!(table.rules().len(), RuleTable::builtin().rules().len() + 2);

        let facts = EntryFacts::of(&entry("https://x.test/mod.wasm", "", None));
        assert_eq!(table.classify(&facts, keep_nothing).unwrap().action.replacement(), "[WASM]");
    }
}
