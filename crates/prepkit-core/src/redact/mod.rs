//! HAR redactor: scrub one literal secret by replacing it, deleting the
//! members that hold it, or deleting whole entries.
//!
//! Matching is case-sensitive and runs on decoded keys and string values
//! (see [`TextMatcher`]). When the secret does not occur at all the output
//! is a byte-for-byte copy of the input.

mod tree;

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::har::{self, HarDocument, TextMatcher};
use crate::storage;

/// Default token written in place of the secret.
pub const DEFAULT_REPLACEMENT: &str = "[REDACTED]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedactMode {
    /// Substitute every occurrence with `with`.
    Replace { with: String },
    /// Drop the innermost key/value pairs (and array strings) containing the secret.
    DeleteLine,
    /// Drop every `log.entries` item containing the secret.
    DeleteRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactReport {
    /// Occurrences found before any change.
    pub matches: usize,
    pub replaced: usize,
    pub pairs_removed: usize,
    pub entries_removed: usize,
    /// Occurrences still present afterwards (delete-request only scrubs entries).
    pub residual: usize,
    /// Delete-request was asked for but the document has no `log.entries`.
    pub not_har: bool,
}

impl RedactReport {
    pub fn is_noop(&self) -> bool {
        self.matches == 0
    }

    fn changed(&self) -> bool {
        self.replaced + self.pairs_removed + self.entries_removed > 0
    }
}

/// Applies `mode` to `doc` in place.
pub fn redact_document(doc: &mut HarDocument, secret: &str, mode: &RedactMode) -> RedactReport {
    let matcher = TextMatcher::exact(secret);
    let mut report = RedactReport {
        matches: matcher.count(doc.root()),
        ..RedactReport::default()
    };
    if report.is_noop() {
        return report;
    }

    match mode {
        RedactMode::Replace { with } => {
            report.replaced = tree::replace_all(doc.root_mut(), &matcher, with);
        }
        RedactMode::DeleteLine => {
            report.pairs_removed = tree::delete_pairs(doc.root_mut(), &matcher);
        }
        RedactMode::DeleteRequest => match doc.entries_mut() {
            Some(entries) => {
                let before = entries.len();
                entries.retain(|e| !matcher.is_match(e));
                report.entries_removed = before - entries.len();
                report.residual = matcher.count(doc.root());
            }
            None => {
                report.not_har = true;
                report.residual = report.matches;
            }
        },
    }
    report
}

/// Loads `input`, redacts `secret`, and writes the result to `output`.
///
/// Invalid JSON is fatal and nothing is written. If nothing changed (no
/// match, or delete-request on a non-HAR), the input bytes are copied verbatim.
pub fn redact_file(
    input: &Path,
    output: &Path,
    secret: &str,
    mode: &RedactMode,
) -> Result<RedactReport> {
    if secret.is_empty() {
        bail!("secret must not be empty");
    }
    let har::LoadedHar { bytes, mut doc } = har::load_with_bytes(input)?;
    let report = redact_document(&mut doc, secret, mode);

    if report.is_noop() {
        tracing::warn!(input = %input.display(), "secret not found; output is unchanged");
    }
    if report.not_har {
        tracing::warn!(input = %input.display(), "no log.entries; no requests removed");
    }
    if report.residual > 0 && !report.not_har {
        tracing::warn!(
            residual = report.residual,
            "secret still occurs outside log.entries"
        );
    }

    if report.changed() {
        doc.write_to(output)?;
    } else {
        storage::write_atomic(output, &bytes)?;
    }
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        ?report,
        "redact finished"
    );
    Ok(report)
}

/// Default output: `<stem>_redacted.json` next to the input.
pub fn default_output(input: &Path) -> PathBuf {
    crate::naming::sibling_output(input, "_redacted", Some(".json"))
}
