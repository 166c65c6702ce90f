pub mod config;
pub mod error;
pub mod logging;

pub mod clean;
pub mod filter;
pub mod har;
pub mod naming;
pub mod redact;
pub mod scrape;
pub mod storage;
pub mod strip;
