//! `prepkit scrape [SOURCE]` – concatenate a tree into one text file.

use anyhow::{bail, Result};
use prepkit_core::config::PrepConfig;
use prepkit_core::scrape::{self, policy, AutoPolicy, ScrapeOptions, Source, TerminalPolicy};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct ScrapeArgs {
    pub source: Option<String>,
    pub output: Option<PathBuf>,
    pub threshold: Option<u64>,
    pub max_file_size: Option<u64>,
    pub non_interactive: bool,
    pub exclude_large: bool,
}

/// Flags override the `[scraper]` config section.
fn scrape_options(cfg: &PrepConfig, args: &ScrapeArgs) -> ScrapeOptions {
    let mut opts = ScrapeOptions::from_config(&cfg.scraper);
    if let Some(t) = args.threshold {
        opts.large_file_threshold = t;
    }
    if args.max_file_size.is_some() {
        opts.max_file_size = args.max_file_size;
    }
    opts
}

pub fn run_scrape(cfg: &PrepConfig, args: ScrapeArgs) -> Result<()> {
    let raw = match args.source.clone() {
        Some(s) => s,
        None if args.non_interactive => bail!("a source is required with --non-interactive"),
        None => {
            let stdin = io::stdin();
            policy::prompt(
                &mut stdin.lock(),
                &mut io::stdout(),
                "Enter a local path or GitHub repository URL: ",
            )?
        }
    };
    let source = Source::parse(&raw)?;
    let opts = scrape_options(cfg, &args);

    let report = if args.non_interactive {
        let mut auto = AutoPolicy {
            exclude_large: args.exclude_large,
        };
        scrape::scrape(&source, args.output.as_deref(), &opts, &mut auto)?
    } else {
        let stdin = io::stdin();
        let mut terminal = TerminalPolicy::new(stdin.lock(), io::stdout(), true);
        scrape::scrape(&source, args.output.as_deref(), &opts, &mut terminal)?
    };

    println!(
        "Wrote {} file(s) from {} to {}",
        report.written,
        source,
        report.output.display()
    );
    println!(
        "  skipped: {} binary, {} over size cap, {} large, {} by choice, {} unreadable",
        report.binary_skipped,
        report.oversized_skipped,
        report.large_excluded,
        report.reviewed_excluded,
        report.unreadable
    );
    if report.unreadable > 0 {
        eprintln!(
            "warning: {} file(s) could not be read; see the log for details",
            report.unreadable
        );
    }
    Ok(())
}
