//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::{Path, PathBuf};

use tracing::info;

/// Resolve the on-disk file behind a SQLite URL.
///
/// Returns `None` for in-memory databases and non-SQLite URLs.
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url.strip_prefix("sqlite:")?;
    let rest = rest.trim_start_matches("//");
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" || path.starts_with("file::memory:") {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Make sure the parent directory of a SQLite database file exists.
pub async fn ensure_sqlite_dir(url: &str) -> anyhow::Result<()> {
    let Some(file) = sqlite_file_path(url) else { return Ok(()) };
    let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) else { return Ok(()) };
    if tokio::fs::metadata(dir).await.is_err() {
        create_dir(dir).await?;
        info!(dir = %dir.display(), "created sqlite data directory");
    }
    Ok(())
}

async fn create_dir(dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))
}
