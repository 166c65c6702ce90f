//! Binary vs text classification: extension list first, then content sniffing.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Bytes inspected when the extension is not conclusive.
const SNIFF_LEN: usize = 1024;

/// Extensions that are never worth concatenating.
const BINARY_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp", "ico",
    // executables and libraries
    "dll", "exe", "bin", "so", "dylib", "o", "a", "class", "wasm",
    // ML models
    "onnx", "tensorrt", "pt", "pth", "h5", "pb",
    // archives
    "zip", "tar", "gz", "xz", "7z", "rar",
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
    // media
    "mp3", "mp4", "avi", "mov", "wav", "flac",
    // data and firmware
    "db", "sqlite", "dat", "hex",
];

/// Extension-based classifier with optional user additions.
#[derive(Debug, Clone, Default)]
pub struct BinaryClassifier {
    extra_extensions: Vec<String>,
}

impl BinaryClassifier {
    /// `extra` entries may carry a leading dot and any case.
    pub fn new(extra: &[String]) -> Self {
        Self {
            extra_extensions: extra
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn is_binary_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_lowercase();
        BINARY_EXTENSIONS.contains(&ext.as_str()) || self.extra_extensions.contains(&ext)
    }

    /// Hybrid check: extension first, then the first kilobyte of content.
    /// Errors only when the file cannot be opened or read.
    pub fn is_binary(&self, path: &Path) -> io::Result<bool> {
        if self.is_binary_extension(path) {
            return Ok(true);
        }
        is_binary_content(path)
    }
}

/// Content inspection of the first `SNIFF_LEN` bytes.
pub fn is_binary_content(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::with_capacity(SNIFF_LEN);
    file.by_ref().take(SNIFF_LEN as u64).read_to_end(&mut buffer)?;
    Ok(content_inspector::inspect(&buffer).is_binary())
}
