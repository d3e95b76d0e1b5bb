//! Command-line interface definition for libroll.
//!
//! libroll has a single command: every positional target is bundled into one
//! file per module format. `--watch` keeps rebuilding on file changes.

pub mod enums;
mod validation;

use std::path::PathBuf;

use clap::Parser;

pub use enums::Format;
pub use validation::{parse_debounce, parse_dest_name, parse_watch_glob};

/// libroll - bundle a JavaScript library for every module format
#[derive(Parser, Debug)]
#[command(
    name = "libroll",
    version,
    about = "Bundle a JavaScript library into UMD, ES and IIFE builds",
    long_about = "libroll resolves each target's entry point, reads .babelrc and package.json,\n\
                  and writes dist/<name>.<format>.js for every module format with an inline\n\
                  source map. Dependencies declared in package.json stay external."
)]
pub struct Cli {
    /// Files or directories to bundle (defaults to the current directory)
    ///
    /// A directory is bundled from its index.js, or from the entry declared
    /// in the nearest package.json.
    #[arg(value_name = "TARGETS")]
    pub targets: Vec<PathBuf>,

    /// Override the output base name
    ///
    /// The name is normalized to lowercase hyphen-case, so `--dest-name
    /// "My Lib"` writes dist/my-lib.<format>.js.
    #[arg(long, value_name = "NAME", value_parser = parse_dest_name)]
    pub dest_name: Option<String>,

    /// Rebuild whenever a file matching GLOB changes
    #[arg(short, long, value_name = "GLOB", value_parser = parse_watch_glob)]
    pub watch: Option<String>,

    /// Quiet period in milliseconds before a watch rebuild
    #[arg(long, value_name = "MS", default_value = "300", value_parser = parse_debounce)]
    pub debounce: u64,

    /// Output formats (repeatable; defaults to umd, es and iife)
    #[arg(short, long = "format", value_name = "FMT", value_enum)]
    pub formats: Vec<Format>,

    /// Working directory used for fallback output locations
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}
