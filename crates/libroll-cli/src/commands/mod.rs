//! Command implementations.

pub mod build;
pub mod run;
pub mod watch;

pub use build::{WrittenFile, build, write_artifact};
pub use run::{TargetReport, run, run_targets};
pub use watch::{Debouncer, FileChange, FileWatcher, WatchOptions, watch, watch_root};
