//! Scrape sources: a local directory or a GitHub repository.

use anyhow::{anyhow, bail, Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use url::Url;

/// A validated GitHub repository reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Clone URL, always `https://github.com/<owner>/<repo>.git`.
    pub url: String,
    /// Repository name without `.git`; names the output file.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Local(PathBuf),
    Remote(RepoRef),
}

impl Source {
    /// Anything that parses as an http(s) URL must be a GitHub repository;
    /// everything else is taken as a local directory.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            bail!("no source given");
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return parse_github(raw).map(Source::Remote);
        }
        let path = PathBuf::from(raw);
        if !path.is_dir() {
            bail!("{} is not a directory", path.display());
        }
        Ok(Source::Local(path))
    }

    /// Name used for the default output file.
    pub fn name(&self) -> String {
        match self {
            Source::Remote(repo) => repo.name.clone(),
            Source::Local(path) => local_name(path),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Local(path) => write!(f, "{}", path.display()),
            Source::Remote(repo) => f.write_str(&repo.url),
        }
    }
}

fn parse_github(raw: &str) -> Result<RepoRef> {
    let url = Url::parse(raw).with_context(|| format!("invalid URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str() != Some("github.com") {
        bail!("not a GitHub repository URL: {raw}");
    }
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();
    let (owner, repo) = match segments.as_slice() {
        [owner, repo, ..] => (*owner, *repo),
        _ => bail!("GitHub URL must name an owner and a repository: {raw}"),
    };
    let name = repo.strip_suffix(".git").unwrap_or(repo);
    if name.is_empty() {
        bail!("GitHub URL must name an owner and a repository: {raw}");
    }
    Ok(RepoRef {
        url: format!("https://github.com/{owner}/{name}.git"),
        name: name.to_string(),
    })
}

fn local_name(path: &Path) -> String {
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "output".to_string())
}

/// A directory ready to walk. For remote sources it owns the temporary clone,
/// which is removed when the checkout is dropped.
#[derive(Debug)]
pub struct Checkout {
    pub root: PathBuf,
    /// Shown in the `# Source:` header.
    pub label: String,
    pub name: String,
    _guard: Option<TempDir>,
}

/// Resolve `source` to a directory on disk, cloning remote repositories.
pub fn prepare(source: &Source) -> Result<Checkout> {
    match source {
        Source::Local(path) => Ok(Checkout {
            root: path.clone(),
            label: path.display().to_string(),
            name: source.name(),
            _guard: None,
        }),
        Source::Remote(repo) => {
            let tmp = tempfile::Builder::new()
                .prefix("prepkit-clone-")
                .tempdir()
                .context("create temporary directory for clone")?;
            let dest = tmp.path().join(&repo.name);
            clone_repository(&repo.url, &dest)?;
            Ok(Checkout {
                root: dest,
                label: repo.url.clone(),
                name: repo.name.clone(),
                _guard: Some(tmp),
            })
        }
    }
}

/// Shallow clone with the system git binary.
fn clone_repository(url: &str, dest: &Path) -> Result<()> {
    tracing::info!("cloning {} into {}", url, dest.display());
    let output = Command::new("git")
        .args(["clone", "--depth", "1", "--quiet", url])
        .arg(dest)
        .output()
        .context("failed to run git (is it installed?)")?;
    if !output.status.success() {
        let error_msg = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "Failed to clone repository '{}': {}",
            url,
            error_msg.trim()
        ));
    }
    Ok(())
}
