//! `prepkit clean <INPUT>` – strip bloat from a HAR file.

use anyhow::Result;
use prepkit_core::clean::{self, CleanOptions, Cleaner};
use prepkit_core::config::PrepConfig;
use std::path::Path;

pub fn run_clean(
    cfg: &PrepConfig,
    input: &Path,
    output: Option<&Path>,
    opts: &CleanOptions,
) -> Result<()> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| clean::default_output(input));
    let cleaner = Cleaner::from_config(&cfg.cleaner);
    let report = clean::clean_file(input, &output, &cleaner, opts)?;
    println!(
        "Cleaned {} entries -> {}",
        report.entries,
        output.display()
    );
    println!(
        "  bodies stripped: {} static, {} css, {} binary; {} metadata fields removed",
        report.static_stripped, report.css_stripped, report.binary_stripped, report.metadata_removed
    );
    Ok(())
}
