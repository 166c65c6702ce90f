//! `prepkit redact <INPUT> <SECRET>` – remove a secret from a HAR file.

use anyhow::Result;
use prepkit_core::config::PrepConfig;
use prepkit_core::redact::{self, RedactMode};
use std::path::Path;

/// Maps the mutually exclusive mode flags to a mode. clap guarantees exactly one is set.
pub fn redact_mode(
    cfg: &PrepConfig,
    replace: bool,
    delete_line: bool,
    delete_req: bool,
    text: Option<String>,
) -> RedactMode {
    if delete_line {
        RedactMode::DeleteLine
    } else if delete_req {
        RedactMode::DeleteRequest
    } else {
        debug_assert!(replace);
        RedactMode::Replace {
            with: text.unwrap_or_else(|| cfg.redactor.replacement.clone()),
        }
    }
}

pub fn run_redact(
    input: &Path,
    output: Option<&Path>,
    secret: &str,
    mode: &RedactMode,
) -> Result<()> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| redact::default_output(input));
    let report = redact::redact_file(input, &output, secret, mode)?;

    if report.is_noop() {
        eprintln!("warning: secret not found; input copied unchanged");
        println!("Output written to {}", output.display());
        return Ok(());
    }
    if report.not_har {
        eprintln!("warning: input has no log.entries; no requests removed");
    }
    match mode {
        RedactMode::Replace { .. } => println!("Replaced {} occurrence(s)", report.replaced),
        RedactMode::DeleteLine => println!("Deleted {} field(s)", report.pairs_removed),
        RedactMode::DeleteRequest => {
            println!("Deleted {} request(s)", report.entries_removed);
            if report.residual > 0 && !report.not_har {
                eprintln!(
                    "warning: {} occurrence(s) remain outside log.entries",
                    report.residual
                );
            }
        }
    }
    println!("Redacted output written to {}", output.display());
    Ok(())
}
