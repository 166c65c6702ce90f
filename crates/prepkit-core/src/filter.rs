//! HAR inclusion filter: keep only entries that mention at least one keyword.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::error::HarError;
use crate::har::{HarDocument, TextMatcher};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub original: usize,
    pub kept: usize,
}

impl FilterReport {
    pub fn removed(&self) -> usize {
        self.original - self.kept
    }
}

/// Keyword set; an entry is kept if any keyword occurs in its keys or string values.
#[derive(Debug, Clone)]
pub struct EntryFilter {
    matchers: Vec<TextMatcher>,
}

impl EntryFilter {
    pub fn new<S: AsRef<str>>(keywords: &[S], ignore_case: bool) -> Self {
        let matchers = keywords
            .iter()
            .map(|k| {
                if ignore_case {
                    TextMatcher::ignore_case(k.as_ref())
                } else {
                    TextMatcher::exact(k.as_ref())
                }
            })
            .collect();
        Self { matchers }
    }

    pub fn keeps(&self, entry: &serde_json::Value) -> bool {
        self.matchers.iter().any(|m| m.is_match(entry))
    }

    /// Drops non-matching entries from `doc`, preserving the order of the rest.
    pub fn apply(&self, doc: &mut HarDocument) -> Result<FilterReport, HarError> {
        doc.require_entries()?;
        let mut report = FilterReport::default();
        if let Some(entries) = doc.entries_mut() {
            report.original = entries.len();
            entries.retain(|e| self.keeps(e));
            report.kept = entries.len();
        }
        Ok(report)
    }
}

pub fn filter_file(input: &Path, output: &Path, filter: &EntryFilter) -> Result<FilterReport> {
    let mut doc = HarDocument::load(input)?;
    let report = filter.apply(&mut doc)?;
    if report.kept == 0 {
        tracing::warn!(input = %input.display(), "no entries matched; output has no entries");
    }
    doc.write_to(output)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        original = report.original,
        kept = report.kept,
        "filter finished"
    );
    Ok(report)
}

/// Default output: `<stem>_filtered.json` next to the input.
pub fn default_output(input: &Path) -> PathBuf {
    crate::naming::sibling_output(input, "_filtered", Some(".json"))
}
