//! [`BundleService`] backed by rolldown.
//!
//! Each call runs an independent rolldown build for a single format. Source
//! maps are generated hidden so the caller decides how they are referenced.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use path_clean::PathClean;
use rolldown::{
    BundlerBuilder, BundlerOptions, InputItem, IsExternal, Platform, ResolveOptions,
    SourceMapType,
};
use rolldown_common::Output;
use tracing::{debug, warn};

use crate::plugins::plugin_chain;
use crate::{BuildArtifact, BundleRequest, BundleService, BundlerError, ModuleFormat, Result};
use crate::artifact::SourceMapJson;

/// Export conditions used when resolving package `exports`.
const CONDITION_NAMES: [&str; 4] = ["import", "module", "browser", "default"];

/// Extensions tried for extension-less imports.
const EXTENSIONS: [&str; 6] = [".js", ".mjs", ".cjs", ".jsx", ".json", ".ts"];

#[derive(Debug, Clone, Copy, Default)]
pub struct RolldownBundler;

impl RolldownBundler {
    pub fn new() -> Self {
        Self
    }

    /// Rolldown options for one format of `request`.
    pub fn options_for(&self, request: &BundleRequest, format: ModuleFormat) -> BundlerOptions {
        let cwd = request.cwd.clean();
        let entry = absolute_entry(&request.entry, &cwd);

        let name = format
            .needs_global_name()
            .then(|| request.global_name());

        BundlerOptions {
            input: Some(vec![InputItem {
                name: None,
                import: entry.to_string_lossy().to_string(),
            }]),
            cwd: Some(cwd.clone()),
            format: Some(format.to_rolldown()),
            sourcemap: Some(SourceMapType::Hidden),
            external: Some(IsExternal::from(request.external.clone())),
            platform: Some(Platform::Browser),
            name,
            resolve: Some(configure_resolution(&cwd)),
            ..Default::default()
        }
    }
}

#[async_trait]
impl BundleService for RolldownBundler {
    async fn generate(
        &self,
        request: &BundleRequest,
        format: ModuleFormat,
    ) -> Result<BuildArtifact> {
        let options = self.options_for(request, format);
        debug!(
            "bundling {} as {} ({} external)",
            request.entry.display(),
            format,
            request.external.len()
        );

        let mut bundler = BundlerBuilder::default()
            .with_options(options)
            .with_plugins(plugin_chain(&request.transform))
            .build()
            .map_err(|e| BundlerError::from_rolldown_batch(&e))?;

        let output = bundler
            .generate()
            .await
            .map_err(|e| BundlerError::from_rolldown_batch(&e))?;

        let mut entry_chunk = None;
        for asset in output.assets {
            match asset {
                Output::Chunk(chunk) if chunk.is_entry && entry_chunk.is_none() => {
                    entry_chunk = Some(chunk);
                }
                Output::Chunk(chunk) => {
                    warn!(
                        "{} output produced extra chunk {}; only the entry chunk is written",
                        format, chunk.filename
                    );
                }
                Output::Asset(_) => {}
            }
        }

        let chunk = entry_chunk.ok_or(BundlerError::NoEntryChunk(format))?;
        Ok(BuildArtifact {
            format,
            code: chunk.code.clone(),
            source_map: chunk
                .map
                .as_ref()
                .map(|map| SourceMapJson::new(map.to_json_string())),
        })
    }
}

fn absolute_entry(entry: &Path, cwd: &Path) -> PathBuf {
    if entry.is_absolute() {
        entry.to_path_buf().clean()
    } else {
        cwd.join(entry).clean()
    }
}

/// Module resolution rooted at `cwd`, searching every ancestor `node_modules`.
fn configure_resolution(cwd: &Path) -> ResolveOptions {
    let mut modules = Vec::new();
    let mut current = Some(cwd);
    while let Some(dir) = current {
        modules.push(dir.join("node_modules").to_string_lossy().to_string());
        current = dir.parent();
    }
    modules.push("node_modules".to_string());

    ResolveOptions {
        main_fields: Some(vec![
            "browser".to_string(),
            "module".to_string(),
            "main".to_string(),
        ]),
        condition_names: Some(CONDITION_NAMES.iter().map(|c| c.to_string()).collect()),
        extensions: Some(EXTENSIONS.iter().map(|e| e.to_string()).collect()),
        modules: Some(modules),
        symlinks: Some(true),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_walks_up_to_root() {
        let resolve = configure_resolution(Path::new("/a/b"));
        let modules = resolve.modules.unwrap();
        assert_eq!(modules[0], "/a/b/node_modules");
        assert_eq!(modules[1], "/a/node_modules");
        assert_eq!(modules.last().unwrap(), "node_modules");
    }

    #[test]
    fn relative_entry_joins_cwd() {
        assert_eq!(
            absolute_entry(Path::new("./src/../index.js"), Path::new("/p")),
            PathBuf::from("/p/index.js")
        );
        assert_eq!(
            absolute_entry(Path::new("/q/main.js"), Path::new("/p")),
            PathBuf::from("/q/main.js")
        );
    }

    #[test]
    fn global_name_only_for_browser_formats() {
        let request = BundleRequest::new("/p/index.js", "/p")
            .with_module_name(Some("widget-box".to_string()));
        let bundler = RolldownBundler::new();

        let umd = bundler.options_for(&request, ModuleFormat::Umd);
        assert_eq!(umd.name.as_deref(), Some("widgetBox"));

        let es = bundler.options_for(&request, ModuleFormat::Es);
        assert!(es.name.is_none());
        assert!(matches!(es.sourcemap, Some(SourceMapType::Hidden)));
    }
}
