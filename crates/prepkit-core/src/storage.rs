//! Output file lifecycle.
//!
//! Every pipeline writes into `<output>.part` and renames it over the final
//! path only once the whole output has been produced, so a failed run never
//! leaves a truncated file under the final name.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `out.json` → `out.json.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Buffered writer over the temp file. Dropping it without `finalize` removes the temp file.
pub struct OutputWriter {
    inner: Option<BufWriter<File>>,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl OutputWriter {
    pub fn create(final_path: &Path) -> Result<Self> {
        if let Some(parent) = final_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let temp_path = temp_path(final_path);
        let file = File::create(&temp_path)
            .with_context(|| format!("create {}", temp_path.display()))?;
        Ok(Self {
            inner: Some(BufWriter::new(file)),
            temp_path,
            final_path: final_path.to_path_buf(),
        })
    }

    /// Flush and atomically rename the temp file to the final path.
    pub fn finalize(mut self) -> Result<PathBuf> {
        let writer = self
            .inner
            .take()
            .context("output writer already finalized")?;
        let file = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .with_context(|| format!("flush {}", self.temp_path.display()))?;
        file.sync_all()
            .with_context(|| format!("sync {}", self.temp_path.display()))?;
        drop(file);
        std::fs::rename(&self.temp_path, &self.final_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                self.temp_path.display(),
                self.final_path.display()
            )
        })?;
        Ok(self.final_path.clone())
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.inner.as_mut() {
            Some(w) => w.write(buf),
            None => Err(io::Error::new(io::ErrorKind::Other, "writer finalized")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.inner.as_mut() {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        if self.inner.take().is_some() {
            let _ = std::fs::remove_file(&self.temp_path);
        }
    }
}

/// Write `bytes` to `path` through a `.part` file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    let mut out = OutputWriter::create(path)?;
    out.write_all(bytes)
        .with_context(|| format!("write {}", out.temp_path.display()))?;
    out.finalize()
}
