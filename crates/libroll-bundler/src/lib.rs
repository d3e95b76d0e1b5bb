//! libroll-bundler: one entry file in, one module-format artifact out.
//!
//! The CLI only sees the [`BundleService`] seam. [`RolldownBundler`] is the
//! production implementation; tests substitute their own.
//!
//! ```no_run
//! use libroll_bundler::{BundleRequest, BundleService, ModuleFormat, RolldownBundler};
//!
//! # async fn demo() -> libroll_bundler::Result<()> {
//! let request = BundleRequest::new("/project/index.js", "/project");
//! let artifact = RolldownBundler::new().generate(&request, ModuleFormat::Es).await?;
//! println!("{}", artifact.contents());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use libroll_config::TransformConfig;

pub mod artifact;
pub mod format;
pub mod global_name;
pub mod plugins;
pub mod rolldown_bundler;

pub use artifact::{BuildArtifact, SourceMapJson};
pub use format::ModuleFormat;
pub use global_name::global_name;
pub use plugins::BabelConfigPlugin;
pub use rolldown_bundler::RolldownBundler;

/// Everything needed to bundle one entry point.
#[derive(Debug, Clone)]
pub struct BundleRequest {
    /// Absolute path of the entry module.
    pub entry: PathBuf,

    /// Directory module resolution starts from.
    pub cwd: PathBuf,

    /// Module ids left as imports instead of being bundled.
    pub external: Vec<String>,

    /// Package name; UMD and IIFE globals are derived from it.
    pub module_name: Option<String>,

    pub transform: TransformConfig,
}

impl BundleRequest {
    pub fn new(entry: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            cwd: cwd.into(),
            external: Vec::new(),
            module_name: None,
            transform: TransformConfig::default(),
        }
    }

    pub fn with_external(mut self, external: Vec<String>) -> Self {
        self.external = external;
        self
    }

    pub fn with_module_name(mut self, name: Option<String>) -> Self {
        self.module_name = name;
        self
    }

    pub fn with_transform(mut self, transform: TransformConfig) -> Self {
        self.transform = transform;
        self
    }

    /// Global variable name for UMD and IIFE output.
    pub fn global_name(&self) -> String {
        let name = match &self.module_name {
            Some(name) => global_name(name),
            None => self
                .entry
                .file_stem()
                .map(|stem| global_name(&stem.to_string_lossy()))
                .unwrap_or_else(|| "bundle".to_string()),
        };
        debug_assert!(
            global_name::is_valid_identifier(&name),
            "invalid global name {name:?}"
        );
        name
    }
}

/// Produces a bundled artifact for one format.
///
/// Implementations must be safe to call concurrently for different formats of
/// the same request.
#[async_trait]
pub trait BundleService: Send + Sync {
    async fn generate(&self, request: &BundleRequest, format: ModuleFormat)
    -> Result<BuildArtifact>;
}

/// Error types for bundling.
#[derive(Debug, thiserror::Error)]
pub enum BundlerError {
    /// Error reported by rolldown while building or generating.
    #[error("Rolldown bundler error: {0}")]
    Rolldown(String),

    /// The generated output held no entry chunk.
    #[error("no entry chunk generated for {0} output")]
    NoEntryChunk(ModuleFormat),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BundlerError {
    /// Wrap a rolldown diagnostic batch.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        BundlerError::Rolldown(format!("{error:?}"))
    }
}

pub type Result<T> = std::result::Result<T, BundlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_name_prefers_package_name() {
        let request = BundleRequest::new("/p/src/index.js", "/p")
            .with_module_name(Some("@acme/widget-box".to_string()));
        assert_eq!(request.global_name(), "widgetBox");
    }

    #[test]
    fn global_name_falls_back_to_entry_stem() {
        let request = BundleRequest::new("/p/src/my-lib.js", "/p");
        assert_eq!(request.global_name(), "myLib");
    }

    #[test]
    fn global_name_is_identifier_for_case_mapped_names() {
        let request = BundleRequest::new("/p/index.js", "/p")
            .with_module_name(Some("İstanbul Kit".to_string()));
        assert_eq!(request.global_name(), "istanbulKit");
    }

    #[test]
    fn no_entry_chunk_names_format() {
        let err = BundlerError::NoEntryChunk(ModuleFormat::Umd);
        assert_eq!(err.to_string(), "no entry chunk generated for umd output");
    }
}
