//! Output file naming.
//!
//! HAR tools write a sibling of their input (`capture.har` → `capture_clean.json`);
//! the scraper names its blob after the scraped repository or directory.

mod sanitize;

use std::path::{Path, PathBuf};

pub use sanitize::sanitize_stem;

/// Stem used when a source yields nothing usable.
const DEFAULT_STEM: &str = "output";

/// Sibling of `input` named `<stem><suffix><ext>`, in the same directory.
///
/// `ext` is used verbatim; pass `None` to keep the input's own extension.
///
/// # Examples
///
/// - `sibling_output("dir/capture.har", "_clean", Some(".json"))` → `"dir/capture_clean.json"`
/// - `sibling_output("notes.txt", "_stripped", None)` → `"notes_stripped.txt"`
pub fn sibling_output(input: &Path, suffix: &str, ext: Option<&str>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_STEM.to_string());
    let ext = match ext {
        Some(e) => e.to_string(),
        None => input
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default(),
    };
    input.with_file_name(format!("{stem}{suffix}{ext}"))
}

/// File name for a scrape blob: `<sanitized name>_content.txt`.
pub fn content_file_name(source_name: &str) -> String {
    let stem = sanitize_stem(source_name);
    if stem.is_empty() {
        format!("{DEFAULT_STEM}_content.txt")
    } else {
        format!("{stem}_content.txt")
    }
}
