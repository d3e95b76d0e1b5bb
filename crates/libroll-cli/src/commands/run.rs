//! Run every target of the command line.
//!
//! Targets are independent: each one is prepared and built in its own task,
//! and one failure never stops the rest.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use libroll_bundler::BundleService;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::commands::build::{WrittenFile, build};
use crate::context::{BuildContext, RunOptions};
use crate::error::{BuildError, CliError, Result};
use crate::ui;

/// Outcome of one target.
#[derive(Debug)]
pub struct TargetReport {
    pub target: PathBuf,
    pub result: Result<Vec<WrittenFile>, BuildError>,
}

/// Build every target in `options`.
///
/// Fails with [`CliError::RunFailed`] when any target failed; every failure
/// is reported before returning.
pub async fn run(options: &RunOptions, bundler: Arc<dyn BundleService>) -> Result<()> {
    let started = Instant::now();
    let total = options.targets.len();

    let reports = run_targets(options, bundler).await;

    let mut failed = 0;
    for report in &reports {
        match &report.result {
            Ok(files) => {
                for file in files {
                    ui::success(&format!(
                        "{} ({})",
                        display_path(&file.path, &options.cwd),
                        ui::format_size(file.size)
                    ));
                }
            }
            Err(err) => {
                failed += 1;
                error!("{}: {}", report.target.display(), err);
                ui::error(&format!("{}: {}", report.target.display(), err.primary()));
            }
        }
    }

    ui::print_run_summary(total - failed, total, started.elapsed());

    if failed > 0 {
        return Err(CliError::RunFailed { failed, total });
    }
    Ok(())
}

/// Prepare and build all targets concurrently, one task each.
///
/// Reports come back in target order.
pub async fn run_targets(
    options: &RunOptions,
    bundler: Arc<dyn BundleService>,
) -> Vec<TargetReport> {
    let options = Arc::new(options.clone());

    let contexts = prepare_all(&options).await;
    warn_on_collisions(&contexts, &options);

    let mut join_set = JoinSet::new();
    let mut reports: Vec<Option<TargetReport>> = Vec::with_capacity(contexts.len());

    for (index, (target, prepared)) in contexts.into_iter().enumerate() {
        match prepared {
            Err(err) => reports.push(Some(TargetReport {
                target,
                result: Err(err),
            })),
            Ok(ctx) => {
                reports.push(None);
                let options = Arc::clone(&options);
                let bundler = Arc::clone(&bundler);
                join_set.spawn(async move {
                    let result = build(&ctx, &options, bundler).await;
                    (index, TargetReport { target, result })
                });
            }
        }
    }

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, report)) => {
                if let Some(slot) = reports.get_mut(index) {
                    *slot = Some(report);
                }
            }
            Err(join_err) => error!("build task failed: {}", join_err),
        }
    }

    reports
        .into_iter()
        .zip(options.targets.iter())
        .map(|(report, target)| {
            report.unwrap_or_else(|| TargetReport {
                target: target.clone(),
                result: Err(BuildError::TaskFailed("build task did not complete".to_string())),
            })
        })
        .collect()
}

type Prepared = (PathBuf, Result<BuildContext, BuildError>);

async fn prepare_all(options: &Arc<RunOptions>) -> Vec<Prepared> {
    let mut join_set = JoinSet::new();
    for (index, target) in options.targets.iter().cloned().enumerate() {
        let options = Arc::clone(options);
        join_set.spawn(async move {
            let prepared = BuildContext::prepare(&target, &options).await;
            (index, target, prepared)
        });
    }

    let mut slots: Vec<Option<Prepared>> = options.targets.iter().map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, target, prepared)) => {
                if let Some(slot) = slots.get_mut(index) {
                    *slot = Some((target, prepared));
                }
            }
            Err(join_err) => error!("prepare task failed: {}", join_err),
        }
    }

    slots
        .into_iter()
        .zip(options.targets.iter())
        .map(|(slot, target)| {
            slot.unwrap_or_else(|| {
                (
                    target.clone(),
                    Err(BuildError::TaskFailed("prepare task did not complete".to_string())),
                )
            })
        })
        .collect()
}

/// Warn when two targets would write the same files.
///
/// The builds still run; whichever finishes last owns the output.
fn warn_on_collisions(contexts: &[Prepared], options: &RunOptions) -> usize {
    let mut seen: HashMap<PathBuf, &PathBuf> = HashMap::new();
    let mut collisions = 0;

    for (target, prepared) in contexts {
        let Ok(ctx) = prepared else { continue };

        let destination = ctx.destination(options);
        let base = destination.dir.join(&destination.name);
        match seen.get(&base) {
            Some(first) => {
                collisions += 1;
                warn!(
                    "{} and {} both write {}.<format>.js; the last build to finish wins",
                    first.display(),
                    target.display(),
                    base.display()
                );
                ui::warning(&format!(
                    "{} and {} write to the same output",
                    first.display(),
                    target.display()
                ));
            }
            None => {
                seen.insert(base, target);
            }
        }
    }

    debug!("{} target(s) prepared, {} collision(s)", contexts.len(), collisions);
    collisions
}

fn display_path(path: &std::path::Path, cwd: &std::path::Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_collision_detected_for_same_package() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.js"), "").unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "same"}"#).unwrap();

        let options = Arc::new(
            RunOptions::new(dir.path()).with_targets(vec![PathBuf::from("."), PathBuf::from("index.js")]),
        );
        let contexts = prepare_all(&options).await;

        assert_eq!(warn_on_collisions(&contexts, &options), 1);
    }

    #[tokio::test]
    async fn test_prepare_all_keeps_target_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();

        let options = Arc::new(
            RunOptions::new(dir.path()).with_targets(vec![PathBuf::from("missing"), PathBuf::from("a.js")]),
        );
        let contexts = prepare_all(&options).await;

        assert_eq!(contexts[0].0, Path::new("missing"));
        assert!(contexts[0].1.is_err());
        assert_eq!(contexts[1].0, Path::new("a.js"));
        assert!(contexts[1].1.is_ok());
    }

    #[test]
    fn test_display_path_relative_to_cwd() {
        assert_eq!(
            display_path(Path::new("/w/dist/a.es.js"), Path::new("/w")),
            "dist/a.es.js"
        );
        assert_eq!(display_path(Path::new("/x/a.js"), Path::new("/w")), "/x/a.js");
    }
}
