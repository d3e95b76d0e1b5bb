//! Error types for package descriptor and transform config loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An existing descriptor or config file is not valid JSON (or has the wrong shape).
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The embedded `babel` field of package.json is not an object.
    #[error("invalid `babel` field in {}: expected an object", path.display())]
    InvalidBabelField { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Path of the file that caused the error, when known.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConfigError::Parse { path, .. }
            | ConfigError::InvalidBabelField { path }
            | ConfigError::Read { path, .. } => Some(path),
            ConfigError::Io(_) => None,
        }
    }
}
