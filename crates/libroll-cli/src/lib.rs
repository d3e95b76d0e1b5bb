//! libroll CLI - bundle a JavaScript library for every module format.
//!
//! Each positional target is resolved to an entry file, its package.json and
//! `.babelrc` are read, and one bundle per format is written to `dist/`.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`context`] - [`RunOptions`] built once per process, [`BuildContext`] per target
//! - [`entry`] and [`destination`] - where sources come from and where bundles go
//! - [`commands`] - build, run and watch
//! - [`error`], [`logger`], [`ui`] - ambient plumbing
//!
//! The bundler is injected as an `Arc<dyn BundleService>`, so everything above
//! the rolldown call can be exercised with a fake.

pub mod cli;
pub mod commands;
pub mod context;
pub mod destination;
pub mod entry;
pub mod error;
pub mod logger;
pub mod ui;

pub use context::{BuildContext, RunOptions};
pub use error::{BuildError, CliError, Result};
