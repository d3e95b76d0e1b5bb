//! Entry point resolution for a CLI target.

use std::path::{Path, PathBuf};

use libroll_config::{find_package_root, load_package};
use path_clean::PathClean;
use tracing::debug;

use crate::error::BuildError;

/// Default index file looked up inside a directory target.
pub const INDEX_FILE: &str = "index.js";

/// Resolve the source file to bundle for `location`.
///
/// A file is its own entry. A directory uses its `index.js`, then the entry
/// declared by the nearest `package.json` (default `index.js` next to it).
pub async fn resolve_entry(location: &Path) -> Result<PathBuf, BuildError> {
    let metadata = tokio::fs::metadata(location)
        .await
        .map_err(|_| BuildError::EntryNotResolved(location.to_path_buf()))?;

    if !metadata.is_dir() {
        return Ok(location.to_path_buf());
    }

    let index = location.join(INDEX_FILE);
    if is_file(&index).await {
        debug!("entry for {} is its index file", location.display());
        return Ok(index);
    }

    if let Some(entry) = package_entry(location).await? {
        debug!("entry for {} declared by package.json", location.display());
        return Ok(entry);
    }

    Err(BuildError::EntryNotResolved(location.to_path_buf()))
}

async fn package_entry(location: &Path) -> Result<Option<PathBuf>, BuildError> {
    let Some(root) = find_package_root(location).await else {
        return Ok(None);
    };
    let Some(pkg) = load_package(Some(&root)).await? else {
        return Ok(None);
    };

    let entry = root.join(pkg.entry_or_default()).clean();
    Ok(is_file(&entry).await.then_some(entry))
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
