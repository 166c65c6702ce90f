//! Error types for loading and writing HAR documents.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal input errors. Any of these aborts a HAR pipeline before output is written.
#[derive(Debug, Error)]
pub enum HarError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but without a `log.entries` array.
    #[error("{} does not look like a HAR file (missing log.entries)", path.display())]
    NotHar { path: PathBuf },

    #[error("serialize HAR document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl HarError {
    /// True for problems with the input's content rather than with the filesystem.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, HarError::InvalidJson { .. } | HarError::NotHar { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_path() {
        let err = HarError::NotHar {
            path: PathBuf::from("capture.har"),
        };
        assert_eq!(
            err.to_string(),
            "capture.har does not look like a HAR file (missing log.entries)"
        );
        assert!(err.is_malformed_input());
    }

    #[test]
    fn invalid_json_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = HarError::InvalidJson {
            path: PathBuf::from("x.har"),
            source,
        };
        assert!(err.to_string().starts_with("x.har is not valid JSON"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.is_malformed_input());
    }

    #[test]
    fn read_error_is_not_malformed_input() {
        let err = HarError::Read {
            path: PathBuf::from("missing.har"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(!err.is_malformed_input());
    }
}
