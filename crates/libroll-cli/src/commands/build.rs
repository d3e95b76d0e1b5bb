//! Build one prepared target into every requested format.
//!
//! Formats are generated and written concurrently. A failing format does not
//! stop the others; the build fails afterwards if any of them did.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libroll_bundler::{BuildArtifact, BundleRequest, BundleService, ModuleFormat};
use libroll_config::load_config;
use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::context::{BuildContext, RunOptions};
use crate::error::BuildError;

/// A bundle written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub format: ModuleFormat,
    pub path: PathBuf,
    pub size: u64,
}

/// Build `ctx` with `bundler`, writing one file per format.
///
/// Files come back in the order of `options.formats`.
pub async fn build(
    ctx: &BuildContext,
    options: &RunOptions,
    bundler: Arc<dyn BundleService>,
) -> Result<Vec<WrittenFile>, BuildError> {
    let config_root = ctx.config_root();
    let transform = load_config(&config_root, ctx.package.as_ref()).await?;
    debug!("transform config for {}: {}", ctx.entry.display(), transform.source());

    let request = Arc::new(
        BundleRequest::new(&ctx.entry, &config_root)
            .with_external(ctx.external.clone())
            .with_module_name(ctx.package.as_ref().and_then(|p| p.name.clone()))
            .with_transform(transform),
    );
    let destination = Arc::new(ctx.destination(options));

    let mut join_set = JoinSet::new();
    let mut formats_by_task = HashMap::new();

    for &format in &options.formats {
        let bundler = Arc::clone(&bundler);
        let request = Arc::clone(&request);
        let destination = Arc::clone(&destination);

        let handle = join_set.spawn(async move {
            let result = async {
                let artifact = bundler.generate(&request, format).await?;
                let path = destination.path_for(format);
                let size = write_artifact(&path, &artifact).await?;
                Ok::<_, BuildError>(WrittenFile { format, path, size })
            }
            .await;
            (format, result)
        });
        formats_by_task.insert(handle.id(), format);
    }

    let mut written = Vec::with_capacity(options.formats.len());
    let mut failures = Vec::new();

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((_, Ok(file))) => written.push(file),
            Ok((format, Err(err))) => {
                error!("{} build of {} failed: {}", format, ctx.entry.display(), err);
                failures.push((format, err));
            }
            Err(join_err) => match formats_by_task.get(&join_err.id()) {
                Some(&format) => {
                    failures.push((format, BuildError::TaskFailed(join_err.to_string())));
                }
                None => error!("untracked build task failed: {}", join_err),
            },
        }
    }

    if !failures.is_empty() {
        failures.sort_by_key(|(format, _)| position(&options.formats, *format));
        return Err(BuildError::Formats(failures));
    }

    written.sort_by_key(|file| position(&options.formats, file.format));
    Ok(written)
}

/// Write an artifact to `path`, creating parent directories.
///
/// Returns the number of bytes written.
pub async fn write_artifact(path: &Path, artifact: &BuildArtifact) -> Result<u64, BuildError> {
    let write_failed = |source| BuildError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(write_failed)?;
    }

    let contents = artifact.contents();
    tokio::fs::write(path, contents.as_bytes())
        .await
        .map_err(write_failed)?;

    Ok(contents.len() as u64)
}

fn position(formats: &[ModuleFormat], format: ModuleFormat) -> usize {
    formats
        .iter()
        .position(|f| *f == format)
        .unwrap_or(formats.len())
}
