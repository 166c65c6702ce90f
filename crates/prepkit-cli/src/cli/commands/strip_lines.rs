//! `prepkit strip-lines <INPUT>` – drop long lines from a text file.

use anyhow::Result;
use prepkit_core::strip;
use std::path::Path;

pub fn run_strip_lines(input: &Path, output: Option<&Path>, max_len: usize) -> Result<()> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| strip::default_output(input));
    let report = strip::strip_file(input, &output, max_len)?;
    println!(
        "Kept {} line(s), dropped {} longer than {} characters -> {}",
        report.kept,
        report.dropped,
        max_len,
        output.display()
    );
    Ok(())
}
