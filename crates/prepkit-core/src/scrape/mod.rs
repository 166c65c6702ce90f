//! Scraper: walk a directory or cloned repository and concatenate its text
//! files into one blob with a table of contents.

pub mod classify;
pub mod policy;
pub mod render;
pub mod source;
pub mod walk;

use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};

use crate::config::ScraperConfig;
use crate::naming::content_file_name;
use crate::storage::{temp_path, OutputWriter};

pub use classify::BinaryClassifier;
pub use policy::{AutoPolicy, ExclusionPolicy, FnPolicy, TerminalPolicy};
pub use source::{Checkout, RepoRef, Source};
pub use walk::FileEntry;

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Text files above this size go through `ExclusionPolicy::confirm_exclude`.
    pub large_file_threshold: u64,
    pub max_file_size: Option<u64>,
    pub skip_dirs: Vec<String>,
    pub extra_binary_extensions: Vec<String>,
    /// Paths never included, on top of the output file.
    pub exclude_paths: Vec<PathBuf>,
}

impl ScrapeOptions {
    pub fn from_config(cfg: &ScraperConfig) -> Self {
        Self {
            large_file_threshold: cfg.large_file_threshold,
            max_file_size: cfg.max_file_size,
            skip_dirs: cfg.skip_dirs.clone(),
            extra_binary_extensions: cfg.extra_binary_extensions.clone(),
            exclude_paths: Vec::new(),
        }
    }
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self::from_config(&ScraperConfig::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Text files found by the walk, before any exclusion.
    pub discovered: usize,
    pub binary_skipped: usize,
    pub oversized_skipped: usize,
    pub large_excluded: usize,
    pub reviewed_excluded: usize,
    pub unreadable: usize,
    pub written: usize,
    pub output: PathBuf,
}

/// Run the whole scrape. Remote sources are cloned into a temporary
/// directory that is gone by the time this returns.
pub fn scrape(
    source: &Source,
    output: Option<&Path>,
    opts: &ScrapeOptions,
    policy: &mut dyn ExclusionPolicy,
) -> Result<ScrapeReport> {
    let checkout = source::prepare(source)?;
    let output = match output {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(content_file_name(&checkout.name)),
    };

    let mut exclude_paths = opts.exclude_paths.clone();
    exclude_paths.push(output.clone());
    exclude_paths.push(temp_path(&output));
    let walk_opts = walk::WalkOptions {
        skip_dirs: opts.skip_dirs.clone(),
        max_file_size: opts.max_file_size,
        exclude_paths,
    };
    let classifier = BinaryClassifier::new(&opts.extra_binary_extensions);

    tracing::info!("collecting files under {}", checkout.root.display());
    let (files, walk_stats) = walk::collect_files(&checkout.root, &walk_opts, &classifier);
    let mut report = ScrapeReport {
        discovered: files.len(),
        binary_skipped: walk_stats.binary_skipped,
        oversized_skipped: walk_stats.oversized_skipped,
        unreadable: walk_stats.unreadable,
        output: output.clone(),
        ..ScrapeReport::default()
    };

    let mut kept = Vec::with_capacity(files.len());
    for f in files {
        if f.size > opts.large_file_threshold
            && policy.confirm_exclude(&f, opts.large_file_threshold)?
        {
            tracing::info!("excluded large file: {}", f.rel_path);
            report.large_excluded += 1;
            continue;
        }
        kept.push(f);
    }

    let mut by_size = kept.clone();
    by_size.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.rel_path.cmp(&b.rel_path)));
    let picked = policy.review(&by_size)?;
    if !picked.is_empty() {
        let dropped: Vec<&str> = picked
            .iter()
            .filter_map(|&i| by_size.get(i))
            .map(|f| f.rel_path.as_str())
            .collect();
        let before = kept.len();
        kept.retain(|f| !dropped.contains(&f.rel_path.as_str()));
        report.reviewed_excluded = before - kept.len();
    }

    kept.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

    tracing::info!("writing {} file(s) to {}", kept.len(), output.display());
    let mut writer = OutputWriter::create(&output)?;
    let stats = render::write_blob(&mut writer, &checkout.label, &Local::now(), &kept)?;
    report.output = writer.finalize()?;
    report.written = stats.written;
    report.unreadable += stats.unreadable;
    Ok(report)
}
