//! File-based transform config discovery.
//!
//! Candidates are tried in a fixed order and the first one present wins:
//!
//! 1. `<root>/.babelrc`
//! 2. `<root>/.babelrc.json`
//! 3. the `babel` field of the package descriptor
//!
//! An empty config is returned when none of them exist. A candidate file that
//! exists but fails to parse is an error; discovery never falls through past it.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::package::{PACKAGE_JSON, PackageMetadata};
use crate::transform::{ConfigSource, TransformConfig};

/// Candidate sources in priority order.
pub const CANDIDATES: [ConfigSource; 3] = [
    ConfigSource::Babelrc,
    ConfigSource::BabelrcJson,
    ConfigSource::PackageJson,
];

/// Load the transform config for a package root.
pub async fn load_config(root: &Path, pkg: Option<&PackageMetadata>) -> Result<TransformConfig> {
    for source in CANDIDATES {
        if let Some(config) = try_candidate(source, root, pkg).await? {
            debug!("transform config loaded from {}", source);
            return Ok(config);
        }
    }

    debug!("no transform config under {}, using defaults", root.display());
    Ok(TransformConfig::default())
}

/// Try a single candidate. `Ok(None)` means "not present, keep looking".
pub async fn try_candidate(
    source: ConfigSource,
    root: &Path,
    pkg: Option<&PackageMetadata>,
) -> Result<Option<TransformConfig>> {
    match source {
        ConfigSource::Babelrc => load_file(root, ".babelrc", source).await,
        ConfigSource::BabelrcJson => load_file(root, ".babelrc.json", source).await,
        ConfigSource::PackageJson => from_package(root, pkg),
        ConfigSource::Default => Ok(Some(TransformConfig::default())),
    }
}

async fn load_file(
    root: &Path,
    file_name: &str,
    source: ConfigSource,
) -> Result<Option<TransformConfig>> {
    let path = root.join(file_name);
    if !tokio::fs::try_exists(&path).await? {
        return Ok(None);
    }

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

    let raw = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;

    Ok(Some(TransformConfig::new(raw, source)))
}

fn from_package(root: &Path, pkg: Option<&PackageMetadata>) -> Result<Option<TransformConfig>> {
    match pkg.and_then(|p| p.babel.as_ref()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(TransformConfig::new(
            map.clone(),
            ConfigSource::PackageJson,
        ))),
        Some(_) => Err(ConfigError::InvalidBabelField {
            path: root.join(PACKAGE_JSON),
        }),
    }
}
