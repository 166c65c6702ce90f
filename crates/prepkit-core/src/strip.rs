//! Line stripper: copy a text file, dropping lines longer than a limit.
//!
//! Works on raw text, so a stripped HAR is not guaranteed to stay valid JSON.

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::storage::OutputWriter;

/// Lines longer than this many characters (terminator included) are dropped by default.
pub const DEFAULT_MAX_LINE_LEN: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripReport {
    pub kept: usize,
    pub dropped: usize,
}

/// Streams `reader` to `writer`, keeping lines of at most `max_len` characters.
/// A `\r\n` terminator counts as one character. Invalid UTF-8 bytes are dropped.
pub fn strip_long_lines<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    max_len: usize,
) -> Result<StripReport> {
    let mut report = StripReport::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf).context("read line")?;
        if n == 0 {
            break;
        }
        let line = decode_dropping_invalid(&buf);
        if line_len(&line) <= max_len {
            writer.write_all(line.as_bytes()).context("write line")?;
            report.kept += 1;
        } else {
            report.dropped += 1;
        }
    }
    Ok(report)
}

/// Character count with `\r\n` treated as a single terminator.
fn line_len(line: &str) -> usize {
    let chars = line.chars().count();
    if line.ends_with("\r\n") {
        chars - 1
    } else {
        chars
    }
}

fn decode_dropping_invalid(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(s) => {
                out.push_str(s);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                if let Ok(s) = std::str::from_utf8(valid) {
                    out.push_str(s);
                }
                let skip = e.error_len().unwrap_or(rest.len());
                bytes = &rest[skip..];
            }
        }
    }
}

pub fn strip_file(input: &Path, output: &Path, max_len: usize) -> Result<StripReport> {
    let file = std::fs::File::open(input).with_context(|| format!("open {}", input.display()))?;
    let mut out = OutputWriter::create(output)?;
    let report = strip_long_lines(BufReader::new(file), &mut out, max_len)?;
    out.finalize()?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        kept = report.kept,
        dropped = report.dropped,
        "strip finished"
    );
    Ok(report)
}

/// Default output: `<stem>_stripped<ext>` next to the input.
pub fn default_output(input: &Path) -> PathBuf {
    crate::naming::sibling_output(input, "_stripped", None)
}
