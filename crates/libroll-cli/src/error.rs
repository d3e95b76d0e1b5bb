//! Error handling for the libroll CLI.
//!
//! `CliError` is what commands return; `BuildError` covers a single target's
//! build. Errors from the config and bundler crates convert automatically.

use std::path::PathBuf;

use libroll_bundler::{BundlerError, ModuleFormat};
use libroll_config::ConfigError;
use thiserror::Error;

mod diagnostic;

pub use diagnostic::{build_error_to_miette, cli_error_to_miette};

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A single target failed to build
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// One or more targets failed; each failure was already reported
    #[error("{failed} of {total} target(s) failed to build")]
    RunFailed { failed: usize, total: usize },

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
}

/// Errors for one target's build, from entry resolution to the last write.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Nothing to bundle at the given location
    #[error("Can't resolve entry point for {}\n\nHint: Add an index.js or set \"entry\" in package.json", .0.display())]
    EntryNotResolved(PathBuf),

    /// package.json or transform config could not be read
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The bundler rejected the sources
    #[error(transparent)]
    Bundler(#[from] BundlerError),

    /// Failed to create the output directory or write a bundle
    #[error("Failed to write {}: {source}\n\nHint: Check output directory permissions", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Some formats failed; the rest were still written
    #[error("{} format(s) failed: {}", .0.len(), format_failures(.0))]
    Formats(Vec<(ModuleFormat, BuildError)>),

    /// A build task panicked or was aborted
    #[error("Build task failed: {0}")]
    TaskFailed(String),
}

impl BuildError {
    /// The first failure, unwrapping `Formats`.
    pub fn primary(&self) -> &BuildError {
        match self {
            BuildError::Formats(failures) => failures
                .first()
                .map(|(_, err)| err.primary())
                .unwrap_or(self),
            other => other,
        }
    }
}

fn format_failures(failures: &[(ModuleFormat, BuildError)]) -> String {
    failures
        .iter()
        .map(|(format, err)| format!("[{}] {}", format, err))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
