//! HAR cleaner: strip bloat bodies and timing metadata, keep every entry.

pub mod rules;

use anyhow::Result;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use crate::config::CleanerConfig;
use crate::error::HarError;
use crate::har::HarDocument;

use rules::{Category, EntryFacts, RuleTable};

/// Retention flags. All false (the default) strips as much as possible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanOptions {
    pub keep_static: bool,
    pub keep_css: bool,
    pub keep_binary: bool,
}

impl CleanOptions {
    pub fn retains(&self, category: Category) -> bool {
        match category {
            Category::Static => self.keep_static,
            Category::Css => self.keep_css,
            Category::Binary => self.keep_binary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub entries: usize,
    pub static_stripped: usize,
    pub css_stripped: usize,
    pub binary_stripped: usize,
    /// Metadata members deleted across all entries.
    pub metadata_removed: usize,
    pub pages_removed: bool,
}

impl CleanReport {
    pub fn bodies_stripped(&self) -> usize {
        self.static_stripped + self.css_stripped + self.binary_stripped
    }

    fn count_strip(&mut self, category: Category) {
        match category {
            Category::Static => self.static_stripped += 1,
            Category::Css => self.css_stripped += 1,
            Category::Binary => self.binary_stripped += 1,
        }
    }
}

/// Rule table plus the metadata keys to drop.
#[derive(Debug, Clone)]
pub struct Cleaner {
    rules: RuleTable,
    metadata_keys: Vec<String>,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::from_config(&CleanerConfig::default())
    }
}

impl Cleaner {
    pub fn new(rules: RuleTable, metadata_keys: Vec<String>) -> Self {
        Self {
            rules,
            metadata_keys,
        }
    }

    pub fn from_config(cfg: &CleanerConfig) -> Self {
        Self::new(
            RuleTable::with_overrides(&cfg.rules),
            cfg.metadata_keys.clone(),
        )
    }

    /// Cleans `doc` in place. Fails only if the document has no `log.entries`.
    pub fn clean(&self, doc: &mut HarDocument, opts: &CleanOptions) -> Result<CleanReport, HarError> {
        doc.require_entries()?;
        let mut report = CleanReport::default();

        if let Some(entries) = doc.entries_mut() {
            report.entries = entries.len();
            for entry in entries.iter_mut() {
                self.clean_entry(entry, opts, &mut report);
            }
        }

        if let Some(log) = doc.log_mut() {
            report.pages_removed = log.shift_remove("pages").is_some();
            log.insert(
                "browser".to_string(),
                json!({ "name": "prepkit", "version": env!("CARGO_PKG_VERSION") }),
            );
        }

        tracing::debug!(?report, "cleaned HAR document");
        Ok(report)
    }

    fn clean_entry(&self, entry: &mut Value, opts: &CleanOptions, report: &mut CleanReport) {
        let facts = EntryFacts::of(entry);
        if let Some(rule) = self.rules.classify(&facts, |c| opts.retains(c)) {
            let text = entry
                .pointer_mut("/response/content/text")
                .filter(|t| !t.is_null());
            if let Some(text) = text {
                *text = Value::String(rule.action.replacement().to_string());
                report.count_strip(rule.category);
            }
        }

        if let Some(obj) = entry.as_object_mut() {
            for key in &self.metadata_keys {
                if obj.shift_remove(key).is_some() {
                    report.metadata_removed += 1;
                }
            }
        }
    }
}

/// Loads `input`, cleans it, and writes the result to `output`.
/// Nothing is written if the input is not valid JSON or not a HAR.
pub fn clean_file(
    input: &Path,
    output: &Path,
    cleaner: &Cleaner,
    opts: &CleanOptions,
) -> Result<CleanReport> {
    let mut doc = HarDocument::load(input)?;
    let report = cleaner.clean(&mut doc, opts)?;
    doc.write_to(output)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        entries = report.entries,
        stripped = report.bodies_stripped(),
        "clean finished"
    );
    Ok(report)
}

/// Default output: `<stem>_clean.json` next to the input.
pub fn default_output(input: &Path) -> PathBuf {
    crate::naming::sibling_output(input, "_clean", Some(".json"))
}
