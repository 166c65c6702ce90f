//! Tree walk: collect text files with their size and mtime.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use super::classify::BinaryClassifier;

/// One candidate file discovered during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the scrape root, `/`-separated.
    pub rel_path: String,
    pub abs_path: PathBuf,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl FileEntry {
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }

    pub fn size_mb(&self) -> f64 {
        self.size as f64 / 1024.0 / 1024.0
    }
}

/// What the walk skipped, by reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub binary_skipped: usize,
    pub oversized_skipped: usize,
    pub excluded_paths: usize,
    pub unreadable: usize,
}

#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    pub skip_dirs: Vec<String>,
    /// Files above this size are dropped without asking.
    pub max_file_size: Option<u64>,
    /// Exact paths to leave out (e.g. the output file itself).
    pub exclude_paths: Vec<PathBuf>,
}

/// Walks `root` in file-name order, following symlinks, and returns the text files found.
/// Symlink loops surface as walk errors and are counted as unreadable.
/// Unreadable entries are logged and counted, never fatal.
pub fn collect_files(
    root: &Path,
    opts: &WalkOptions,
    classifier: &BinaryClassifier,
) -> (Vec<FileEntry>, WalkStats) {
    let mut stats = WalkStats::default();
    let mut files = Vec::new();
    let excluded: Vec<PathBuf> = opts.exclude_paths.iter().map(|p| comparable(p)).collect();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !(e.depth() > 0
                && e.file_type().is_dir()
                && e.file_name()
                    .to_str()
                    .map(|n| opts.skip_dirs.iter().any(|s| s == n))
                    .unwrap_or(false))
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("walk error: {}", err);
                stats.unreadable += 1;
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() {
            if !entry.file_type().is_dir() {
                tracing::debug!("skipping non-regular file: {}", path.display());
            }
            continue;
        }
        let rel_path = relative_display(root, path);

        if !excluded.is_empty() && excluded.contains(&comparable(path)) {
            tracing::debug!("skipping excluded path: {}", rel_path);
            stats.excluded_paths += 1;
            continue;
        }

        match classifier.is_binary(path) {
            Ok(true) => {
                tracing::debug!("skipping binary file: {}", rel_path);
                stats.binary_skipped += 1;
                continue;
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!("skipping unreadable file {}: {}", rel_path, err);
                stats.unreadable += 1;
                continue;
            }
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(err) => {
                tracing::warn!("error accessing file {}: {}", rel_path, err);
                stats.unreadable += 1;
                continue;
            }
        };
        let size = metadata.len();
        if let Some(max) = opts.max_file_size {
            if size > max {
                tracing::info!(
                    "skipping large file: {} ({:.2} MB)",
                    rel_path,
                    size as f64 / 1024.0 / 1024.0
                );
                stats.oversized_skipped += 1;
                continue;
            }
        }

        files.push(FileEntry {
            rel_path,
            abs_path: path.to_path_buf(),
            size,
            modified: metadata.modified().ok(),
        });
    }

    (files, stats)
}

fn relative_display(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Best-effort absolute form for path equality; works for files that do not exist yet.
pub(crate) fn comparable(path: &Path) -> PathBuf {
    if let Ok(p) = path.canonicalize() {
        return p;
    }
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    let parent = match parent {
        Some(p) => p.canonicalize().unwrap_or_else(|_| p.to_path_buf()),
        None => std::env::current_dir().unwrap_or_default(),
    };
    match path.file_name() {
        Some(name) => parent.join(name),
        None => parent,
    }
}
