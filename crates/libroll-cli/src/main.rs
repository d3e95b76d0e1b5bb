//! libroll CLI entry point.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use libroll_bundler::{BundleService, RolldownBundler};
use libroll_cli::commands::{self, WatchOptions};
use libroll_cli::{RunOptions, cli, error, logger, ui};
use miette::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = execute(args).await;

    result.map_err(error::cli_error_to_miette)
}

async fn execute(args: cli::Cli) -> libroll_cli::Result<()> {
    let options = RunOptions::from_cli(&args)?;
    let bundler: Arc<dyn BundleService> = Arc::new(RolldownBundler::new());

    match args.watch {
        Some(pattern) => {
            let watch = WatchOptions::new(pattern).with_debounce(Duration::from_millis(args.debounce));
            commands::watch(&options, &watch, bundler).await
        }
        None => commands::run(&options, bundler).await,
    }
}
