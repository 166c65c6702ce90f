//! `prepkit filter <INPUT> <KEYWORD>...` – keep matching HAR entries.

use anyhow::Result;
use prepkit_core::filter::{self, EntryFilter};
use std::path::Path;

pub fn run_filter(
    input: &Path,
    output: Option<&Path>,
    keywords: &[String],
    ignore_case: bool,
) -> Result<()> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| filter::default_output(input));
    let report = filter::filter_file(input, &output, &EntryFilter::new(keywords, ignore_case))?;
    println!(
        "Original entries: {}, filtered entries: {}",
        report.original, report.kept
    );
    if report.kept == 0 {
        eprintln!("warning: no entries matched the given keywords");
    }
    println!("Filtered HAR saved to {}", output.display());
    Ok(())
}
