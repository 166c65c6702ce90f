//! Text blob layout: header, table of contents, one stanza per file.

use anyhow::Result;
use chrono::{DateTime, Local};
use std::io::{self, Write};

use super::walk::FileEntry;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub written: usize,
    /// Files listed but not readable as UTF-8 at render time.
    pub unreadable: usize,
}

/// Writes the blob for `files` (already in output order) to `out`.
pub fn write_blob<W: Write>(
    out: &mut W,
    label: &str,
    generated_at: &DateTime<Local>,
    files: &[FileEntry],
) -> Result<RenderStats> {
    let mut stats = RenderStats::default();

    writeln!(out, "# Source: {label}")?;
    writeln!(out, "# Generated on: {}\n", generated_at.format(TIMESTAMP_FORMAT))?;

    writeln!(out, "## Table of Contents\n")?;
    for (i, f) in files.iter().enumerate() {
        writeln!(out, "{}. {} ({:.2} KB)", i + 1, f.rel_path, f.size_kb())?;
    }

    for f in files {
        match std::fs::read(&f.abs_path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(content) => {
                    write_stanza(out, f, &content)?;
                    stats.written += 1;
                }
                Err(_) => {
                    tracing::warn!("not valid UTF-8, skipped: {}", f.rel_path);
                    write_note(out, &f.rel_path, "Binary or invalid text encoding - skipped.")?;
                    stats.unreadable += 1;
                }
            },
            Err(err) => {
                tracing::warn!("error reading file {}: {}", f.rel_path, err);
                write_note(out, &f.rel_path, &format!("Error reading file: {err}"))?;
                stats.unreadable += 1;
            }
        }
    }

    Ok(stats)
}

fn rule() -> String {
    "=".repeat(80)
}

fn write_stanza<W: Write>(out: &mut W, f: &FileEntry, content: &str) -> io::Result<()> {
    let modified = f
        .modified
        .map(|t| DateTime::<Local>::from(t).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "unknown".to_string());
    write!(out, "\n\n{}\n", rule())?;
    writeln!(out, "File: {}", f.rel_path)?;
    writeln!(
        out,
        "Size: {:.2} KB | Lines: {} | Last Modified: {}",
        f.size_kb(),
        content.lines().count(),
        modified
    )?;
    write!(out, "{}\n\n", rule())?;
    out.write_all(content.as_bytes())
}

fn write_note<W: Write>(out: &mut W, rel_path: &str, note: &str) -> io::Result<()> {
    write!(out, "\n\n{}\n", rule())?;
    writeln!(out, "File: {rel_path}")?;
    write!(out, "{}\n\n", rule())?;
    writeln!(out, "{note}")
}
