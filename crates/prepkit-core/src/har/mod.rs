//! HAR (HTTP Archive) documents: load, inspect and write back.
//!
//! Documents are kept as a `serde_json::Value` tree with key order preserved,
//! so tools can strip or delete members without a schema for every field
//! a browser might emit.

mod entry;
mod search;

use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::HarError;
use crate::storage;

pub use entry::{content_encoding, get_header, mime_type, request_url};
pub use search::TextMatcher;

/// A parsed HAR file.
#[derive(Debug, Clone, PartialEq)]
pub struct HarDocument {
    root: Value,
    source: PathBuf,
}

/// Raw input bytes plus the document parsed from them.
#[derive(Debug)]
pub struct LoadedHar {
    pub bytes: Vec<u8>,
    pub doc: HarDocument,
}

impl HarDocument {
    /// Reads and parses `path`. Does not require HAR structure; see [`HarDocument::require_entries`].
    pub fn load(path: &Path) -> Result<Self, HarError> {
        Ok(load_with_bytes(path)?.doc)
    }

    /// Parses `bytes`; `source` is only used in error messages.
    pub fn from_slice(bytes: &[u8], source: &Path) -> Result<Self, HarError> {
        let root = serde_json::from_slice(bytes).map_err(|e| HarError::InvalidJson {
            path: source.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            root,
            source: source.to_path_buf(),
        })
    }

    pub fn from_value(root: Value) -> Self {
        Self {
            root,
            source: PathBuf::from("<memory>"),
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    /// `log.entries`, if the document has that shape.
    pub fn entries(&self) -> Option<&Vec<Value>> {
        self.root.get("log")?.get("entries")?.as_array()
    }

    pub fn entries_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.root.get_mut("log")?.get_mut("entries")?.as_array_mut()
    }

    /// `log` object, if present.
    pub fn log_mut(&mut self) -> Option<&mut serde_json::Map<String, Value>> {
        self.root.get_mut("log")?.as_object_mut()
    }

    /// Errors with [`HarError::NotHar`] unless `log.entries` is an array.
    pub fn require_entries(&self) -> Result<(), HarError> {
        if self.entries().is_some() {
            Ok(())
        } else {
            Err(HarError::NotHar {
                path: self.source.clone(),
            })
        }
    }

    /// Pretty-printed JSON with 2-space indentation.
    pub fn to_pretty_bytes(&self) -> Result<Vec<u8>, HarError> {
        serde_json::to_vec_pretty(&self.root).map_err(HarError::Serialize)
    }

    /// Serializes first, then writes through a `.part` file.
    pub fn write_to(&self, path: &Path) -> Result<PathBuf> {
        let bytes = self.to_pretty_bytes()?;
        storage::write_atomic(path, &bytes)
    }
}

/// Reads `path` and parses it, keeping the original bytes.
pub fn load_with_bytes(path: &Path) -> Result<LoadedHar, HarError> {
    let bytes = std::fs::read(path).map_err(|e| HarError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let doc = HarDocument::from_slice(&bytes, path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded HAR input");
    Ok(LoadedHar { bytes, doc })
}
