//! CLI command handlers, one file per subcommand.

mod clean;
mod filter;
mod redact;
mod scrape;
mod strip_lines;

pub use clean::run_clean;
pub use filter::run_filter;
pub use redact::{redact_mode, run_redact};
pub use scrape::{run_scrape, ScrapeArgs};
pub use strip_lines::run_strip_lines;
