//! Per-run options and per-target build contexts.

use std::path::{Path, PathBuf};

use libroll_bundler::ModuleFormat;
use libroll_config::{PackageMetadata, collect_external, find_package_root, load_package};
use path_clean::PathClean;
use tracing::debug;

use crate::cli::Cli;
use crate::destination::{Destination, compute_destination};
use crate::entry::resolve_entry;
use crate::error::{BuildError, CliError, Result};

/// Settings for one run, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Targets as given; relative paths are resolved against `cwd`.
    pub targets: Vec<PathBuf>,

    /// Working directory for target resolution and fallback output.
    pub cwd: PathBuf,

    pub dest_name: Option<String>,

    /// Formats to write, deduplicated, in request order.
    pub formats: Vec<ModuleFormat>,
}

impl RunOptions {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            targets: vec![PathBuf::from(".")],
            cwd: cwd.into(),
            dest_name: None,
            formats: ModuleFormat::DEFAULTS.to_vec(),
        }
    }

    pub fn with_targets(mut self, targets: Vec<PathBuf>) -> Self {
        self.targets = if targets.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            targets
        };
        self
    }

    pub fn with_dest_name(mut self, dest_name: Option<String>) -> Self {
        self.dest_name = dest_name;
        self
    }

    pub fn with_formats(mut self, formats: Vec<ModuleFormat>) -> Self {
        let mut unique = Vec::with_capacity(formats.len());
        for format in formats {
            if !unique.contains(&format) {
                unique.push(format);
            }
        }
        self.formats = if unique.is_empty() {
            ModuleFormat::DEFAULTS.to_vec()
        } else {
            unique
        };
        self
    }

    /// Build options from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = match &cli.cwd {
            Some(dir) if dir.is_absolute() => dir.clean(),
            Some(dir) => std::env::current_dir()?.join(dir).clean(),
            None => std::env::current_dir()?,
        };

        if !cwd.is_dir() {
            return Err(CliError::FileNotFound(cwd));
        }

        Ok(Self::new(cwd)
            .with_targets(cli.targets.clone())
            .with_dest_name(cli.dest_name.clone())
            .with_formats(cli.formats.iter().map(|f| (*f).into()).collect()))
    }

    /// Absolute location of `target`.
    pub fn locate(&self, target: &Path) -> PathBuf {
        if target.is_absolute() {
            target.to_path_buf().clean()
        } else {
            self.cwd.join(target).clean()
        }
    }
}

/// Everything known about one target before bundling starts.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Target location, absolute.
    pub location: PathBuf,

    /// Resolved entry file.
    pub entry: PathBuf,

    /// Directory of the nearest package.json above the entry.
    pub root: Option<PathBuf>,

    pub package: Option<PackageMetadata>,

    /// Module ids kept out of the bundle.
    pub external: Vec<String>,
}

impl BuildContext {
    /// Resolve entry, package root, package metadata and externals for `target`.
    pub async fn prepare(target: &Path, options: &RunOptions) -> Result<Self, BuildError> {
        let location = options.locate(target);
        let entry = resolve_entry(&location).await?;
        let root = find_package_root(&entry).await;
        let package = load_package(root.as_deref()).await?;
        let external = collect_external(package.as_ref());

        debug!(
            "prepared {}: entry {}, root {}, {} external",
            target.display(),
            entry.display(),
            root.as_deref()
                .map_or_else(|| "<none>".to_string(), |r| r.display().to_string()),
            external.len()
        );

        Ok(Self {
            location,
            entry,
            root,
            package,
            external,
        })
    }

    /// Directory holding the transform config and resolving bare imports.
    pub fn config_root(&self) -> PathBuf {
        match &self.root {
            Some(root) => root.clone(),
            None => self
                .entry
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.location.clone()),
        }
    }

    pub fn destination(&self, options: &RunOptions) -> Destination {
        compute_destination(
            self.root.as_deref(),
            &options.cwd,
            &self.entry,
            self.package.as_ref(),
            options.dest_name.as_deref(),
        )
    }
}
