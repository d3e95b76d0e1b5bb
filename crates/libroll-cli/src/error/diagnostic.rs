//! Miette report conversion for CLI errors.

use miette::Report;

use crate::error::{BuildError, CliError};

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::RunFailed { failed, total } => miette::miette!(
            help = "Errors for each failed target are listed above",
            "{} of {} target(s) failed to build",
            failed,
            total
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert BuildError to miette Report
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::EntryNotResolved(path) => miette::miette!(
            help = "Add an index.js or set \"entry\" in package.json",
            "Can't resolve entry point for {}",
            path.display()
        ),
        BuildError::Config(e) => miette::miette!("Configuration error: {}", e),
        BuildError::Bundler(e) => miette::miette!("Bundler error: {}", e),
        _ => miette::miette!("{}", err),
    }
}
