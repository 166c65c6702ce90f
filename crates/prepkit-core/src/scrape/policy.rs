//! Exclusion decisions for the scraper.
//!
//! The scraper never talks to the terminal itself; it asks an
//! [`ExclusionPolicy`]. The CLI passes a [`TerminalPolicy`] over stdin/stdout,
//! headless runs use [`AutoPolicy`], and tests use either with in-memory I/O.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use super::walk::FileEntry;

pub trait ExclusionPolicy {
    /// Called for each text file above the large-file threshold. `true` excludes it.
    fn confirm_exclude(&mut self, file: &FileEntry, threshold: u64) -> Result<bool>;

    /// Offered the remaining files, largest first. Returns indices into `files` to exclude.
    fn review(&mut self, _files: &[FileEntry]) -> Result<Vec<usize>> {
        Ok(Vec::new())
    }
}

/// Non-interactive policy: one fixed answer for large files, no review.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoPolicy {
    pub exclude_large: bool,
}

impl ExclusionPolicy for AutoPolicy {
    fn confirm_exclude(&mut self, file: &FileEntry, _threshold: u64) -> Result<bool> {
        if self.exclude_large {
            tracing::info!("excluding large file: {} ({:.2} MB)", file.rel_path, file.size_mb());
        }
        Ok(self.exclude_large)
    }
}

/// Adapts a closure into a policy for large-file decisions.
pub struct FnPolicy<F>(pub F);

impl<F> ExclusionPolicy for FnPolicy<F>
where
    F: FnMut(&FileEntry) -> bool,
{
    fn confirm_exclude(&mut self, file: &FileEntry, _threshold: u64) -> Result<bool> {
        Ok((self.0)(file))
    }
}

/// Line-oriented prompts over any reader/writer pair.
pub struct TerminalPolicy<R, W> {
    input: R,
    output: W,
    review: bool,
}

impl<R: BufRead, W: Write> TerminalPolicy<R, W> {
    /// `review` enables the "exclude any files?" step after the walk.
    pub fn new(input: R, output: W, review: bool) -> Self {
        Self {
            input,
            output,
            review,
        }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        prompt(&mut self.input, &mut self.output, question)
    }
}

impl<R: BufRead, W: Write> ExclusionPolicy for TerminalPolicy<R, W> {
    fn confirm_exclude(&mut self, file: &FileEntry, threshold: u64) -> Result<bool> {
        let answer = self.ask(&format!(
            "Large file: {} ({:.2} MB, threshold {:.2} MB). Exclude it? (y/n): ",
            file.rel_path,
            file.size_mb(),
            threshold as f64 / 1024.0 / 1024.0
        ))?;
        Ok(is_yes(&answer))
    }

    fn review(&mut self, files: &[FileEntry]) -> Result<Vec<usize>> {
        if !self.review || files.is_empty() {
            return Ok(Vec::new());
        }
        let answer = self.ask("\nDo you want to exclude any files? (y/n): ")?;
        if !is_yes(&answer) {
            return Ok(Vec::new());
        }

        writeln!(self.output, "\nList of files (largest -> smallest):\n")?;
        for (idx, f) in files.iter().enumerate() {
            writeln!(self.output, "[{}] {} {:.2} KB", idx, f.rel_path, f.size_kb())?;
        }

        let answer = self.ask(
            "\nEnter numbers of files to exclude (space-separated), or press Enter for none:\n> ",
        )?;
        if answer.is_empty() {
            return Ok(Vec::new());
        }
        let parsed: Result<Vec<usize>, _> = answer.split_whitespace().map(str::parse).collect();
        let mut indices = match parsed {
            Ok(v) => v,
            Err(_) => {
                writeln!(self.output, "Invalid input. No exclusions applied.")?;
                return Ok(Vec::new());
            }
        };
        indices.retain(|&i| i < files.len());
        indices.sort_unstable();
        indices.dedup();
        writeln!(self.output, "\nExcluding {} file(s).", indices.len())?;
        Ok(indices)
    }
}

/// Writes `question`, flushes, and reads one trimmed line. EOF reads as an empty answer.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{question}").context("write prompt")?;
    output.flush().context("flush prompt")?;
    let mut line = String::new();
    input.read_line(&mut line).context("read answer")?;
    Ok(line.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(path: &str, size: u64) -> FileEntry {
        FileEntry {
            rel_path: path.to_string(),
            abs_path: PathBuf::from(path),
            size,
            modified: None,
        }
    }

    #[test]
    fn terminal_confirm_yes_and_no() {
        let big = file("data/huge.json", 50 * 1024 * 1024);
        let mut out = Vec::new();
        let mut policy = TerminalPolicy::new("y\n".as_bytes(), &mut out, false);
        assert!(policy.confirm_exclude(&big, 1024 * 1024).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("data/huge.json (50.00 MB, threshold 1.00 MB)"));

        let mut policy = TerminalPolicy::new("n\n".as_bytes(), Vec::new(), false);
        assert!(!policy.confirm_exclude(&big, 1024 * 1024).unwrap());

        let mut policy = TerminalPolicy::new("".as_bytes(), Vec::new(), false);
        assert!(!policy.confirm_exclude(&big, 1024 * 1024).unwrap());
    }

    #[test]
    fn terminal_review_picks_indices() {
        let files = vec![file("big.txt", 4096), file("mid.txt", 2048), file("small.txt", 10)];
        let mut out = Vec::new();
        let mut policy = TerminalPolicy::new("y\n2 0 0 9\n".as_bytes(), &mut out, true);
        assert_eq!(policy.review(&files).unwrap(), vec![0, 2]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[0] big.txt 4.00 KB"));
        assert!(text.contains("Excluding 2 file(s)."));
    }

    #[test]
    fn terminal_review_invalid_input_excludes_nothing() {
        let files = vec![file("a.txt", 1)];
        let mut out = Vec::new();
        let mut policy = TerminalPolicy::new("y\none\n".as_bytes(), &mut out, true);
        assert!(policy.review(&files).unwrap().is_empty());
        assert!(String::from_utf8(out).unwrap().contains("Invalid input"));
    }

    #[test]
    fn terminal_review_disabled_or_declined() {
        let files = vec![file("a.txt", 1)];
        let mut policy = TerminalPolicy::new("y\n0\n".as_bytes(), Vec::new(), false);
        assert!(policy.review(&files).unwrap().is_empty());
        let mut policy = TerminalPolicy::new("n\n".as_bytes(), Vec::new(), true);
        assert!(policy.review(&files).unwrap().is_empty());
    }

    #[test]
    fn auto_and_fn_policies() {
        let f = file("x.log", 100);
        assert!(AutoPolicy { exclude_large: true }.confirm_exclude(&f, 1).unwrap());
        assert!(!AutoPolicy::default().confirm_exclude(&f, 1).unwrap());
        let mut seen = Vec::new();
        let mut policy = FnPolicy(|f: &FileEntry| {
            seen.push(f.rel_path.clone());
            true
        });
        assert!(policy.confirm_exclude(&f, 1).unwrap());
        drop(policy);
        assert_eq!(seen, vec!["x.log".to_string()]);
    }
}
