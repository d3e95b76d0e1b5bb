//! package.json loading.
//!
//! The descriptor is parsed verbatim: nothing beyond a successful parse is
//! validated, and a malformed file is reported to the caller instead of being
//! treated as absent.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// File name of the package descriptor.
pub const PACKAGE_JSON: &str = "package.json";

/// Parsed `package.json` fields used by the build.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    /// Package name; `"Widget Box"` is accepted and normalized later.
    #[serde(default)]
    pub name: Option<String>,

    /// Custom entry file, relative to the package root.
    #[serde(default)]
    pub entry: Option<String>,

    #[serde(default)]
    pub dependencies: IndexMap<String, String>,

    #[serde(default)]
    pub dev_dependencies: IndexMap<String, String>,

    #[serde(default)]
    pub peer_dependencies: IndexMap<String, String>,

    /// Embedded transform configuration.
    #[serde(default)]
    pub babel: Option<Value>,
}

impl PackageMetadata {
    /// Parse a descriptor from JSON text. `path` is only used for error reporting.
    pub fn from_json(content: &str, path: impl Into<PathBuf>) -> Result<Self> {
        serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.into(),
            source,
        })
    }

    /// Entry declared by the package, defaulting to `index.js`.
    pub fn entry_or_default(&self) -> &str {
        self.entry.as_deref().unwrap_or("index.js")
    }
}

/// Load `package.json` from `dir`.
///
/// Returns `Ok(None)` when `dir` is `None` or holds no descriptor.
pub async fn load_package(dir: Option<&Path>) -> Result<Option<PackageMetadata>> {
    let Some(dir) = dir else {
        return Ok(None);
    };

    let path = dir.join(PACKAGE_JSON);
    if !tokio::fs::try_exists(&path).await? {
        debug!("no package.json in {}", dir.display());
        return Ok(None);
    }

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

    let pkg = PackageMetadata::from_json(&content, &path)?;
    debug!(
        "loaded {} (name: {})",
        path.display(),
        pkg.name.as_deref().unwrap_or("<unnamed>")
    );
    Ok(Some(pkg))
}

/// Walks up the directory tree to find the nearest directory holding a package.json.
///
/// When `start` is a file the search begins at its parent directory.
pub async fn find_package_root(start: &Path) -> Option<PathBuf> {
    let is_dir = tokio::fs::metadata(start)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    let mut current = if is_dir { Some(start) } else { start.parent() };

    while let Some(dir) = current {
        let candidate = dir.join(PACKAGE_JSON);
        if tokio::fs::metadata(&candidate)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
        {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }

    None
}
