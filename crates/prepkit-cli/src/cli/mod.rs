//! CLI for prepkit.

mod commands;

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use prepkit_core::config;
use std::path::PathBuf;

use commands::{run_clean, run_filter, run_redact, run_scrape, run_strip_lines, ScrapeArgs};

/// Top-level CLI for prepkit.
#[derive(Debug, Parser)]
#[command(name = "prepkit", version)]
#[command(about = "prepkit: scrape repositories and clean, redact or filter HAR captures", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/prepkit/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Concatenate the text files of a directory or GitHub repository into one file.
    Scrape {
        /// Local directory or GitHub URL. Prompted for when omitted.
        source: Option<String>,

        /// Output file (default: <name>_content.txt in the current directory).
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Ask before including text files larger than this many bytes.
        #[arg(long, value_name = "BYTES")]
        threshold: Option<u64>,

        /// Skip files larger than this many bytes without asking.
        #[arg(long, value_name = "BYTES")]
        max_file_size: Option<u64>,

        /// Never prompt; large files are kept unless --exclude-large is given.
        #[arg(long)]
        non_interactive: bool,

        /// With --non-interactive, exclude every file above the threshold.
        #[arg(long, requires = "non_interactive")]
        exclude_large: bool,
    },

    /// Strip static, CSS and binary bodies and timing metadata from a HAR file.
    Clean {
        /// HAR file to clean.
        input: PathBuf,

        /// Output file (default: <stem>_clean.json next to the input).
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Keep CSS bodies.
        #[arg(long)]
        keep_css: bool,

        /// Keep image, font and media bodies.
        #[arg(long)]
        keep_static: bool,

        /// Keep binary and base64 bodies.
        #[arg(long)]
        keep_binary: bool,
    },

    /// Remove a secret from a HAR file.
    #[command(group(
        ArgGroup::new("mode")
            .required(true)
            .args(["replace", "delete_line", "delete_req"])
    ))]
    Redact {
        /// HAR file to redact.
        input: PathBuf,

        /// Literal text to remove (case-sensitive).
        secret: String,

        /// Replace each occurrence with --text.
        #[arg(long)]
        replace: bool,

        /// Delete every key/value pair that contains the secret.
        #[arg(long)]
        delete_line: bool,

        /// Delete every request entry that contains the secret.
        #[arg(long)]
        delete_req: bool,

        /// Replacement text for --replace (default from config, "[REDACTED]").
        #[arg(long, value_name = "TEXT", requires = "replace")]
        text: Option<String>,

        /// Output file (default: <stem>_redacted.json next to the input).
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Keep only the HAR entries that contain at least one keyword.
    Filter {
        /// HAR file to filter.
        input: PathBuf,

        /// Keywords; an entry is kept if any of them occurs in it.
        #[arg(required = true, value_name = "KEYWORD")]
        keywords: Vec<String>,

        /// Match keywords case-insensitively.
        #[arg(short = 'i', long)]
        ignore_case: bool,

        /// Output file (default: <stem>_filtered.json next to the input).
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Copy a text file without its overly long lines.
    StripLines {
        /// File to strip.
        input: PathBuf,

        /// Longest line kept, in characters including the line break.
        #[arg(long, value_name = "N", default_value_t = prepkit_core::strip::DEFAULT_MAX_LINE_LEN)]
        max_len: usize,

        /// Output file (default: <stem>_stripped<ext> next to the input).
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Scrape {
                source,
                output,
                threshold,
                max_file_size,
                non_interactive,
                exclude_large,
            } => run_scrape(
                &cfg,
                ScrapeArgs {
                    source,
                    output,
                    threshold,
                    max_file_size,
                    non_interactive,
                    exclude_large,
                },
            )?,
            CliCommand::Clean {
                input,
                output,
                keep_css,
                keep_static,
                keep_binary,
            } => {
                let opts = prepkit_core::clean::CleanOptions {
                    keep_static,
                    keep_css,
                    keep_binary,
                };
                run_clean(&cfg, &input, output.as_deref(), &opts)?;
            }
            CliCommand::Redact {
                input,
                secret,
                replace,
                delete_line,
                delete_req,
                text,
                output,
            } => {
                let mode = commands::redact_mode(&cfg, replace, delete_line, delete_req, text);
                run_redact(&input, output.as_deref(), &secret, &mode)?;
            }
            CliCommand::Filter {
                input,
                keywords,
                ignore_case,
                output,
            } => run_filter(&input, output.as_deref(), &keywords, ignore_case)?,
            CliCommand::StripLines {
                input,
                max_len,
                output,
            } => run_strip_lines(&input, output.as_deref(), max_len)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
