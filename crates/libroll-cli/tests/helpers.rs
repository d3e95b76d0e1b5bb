#![allow(dead_code)]

use async_trait::async_trait;
use libroll_bundler::{
    BuildArtifact, BundleRequest, BundleService, BundlerError, ModuleFormat, SourceMapJson,
};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Records every request and answers with canned code.
#[derive(Default)]
pub struct FakeBundler {
    pub requests: Mutex<Vec<(BundleRequest, ModuleFormat)>>,
    pub failing: Vec<ModuleFormat>,
}

impl FakeBundler {
    pub fn failing_on(formats: Vec<ModuleFormat>) -> Self {
        Self {
            failing: formats,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(BundleRequest, ModuleFormat)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BundleService for FakeBundler {
    async fn generate(
        &self,
        request: &BundleRequest,
        format: ModuleFormat,
    ) -> libroll_bundler::Result<BuildArtifact> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), format));

        if self.failing.contains(&format) {
            return Err(BundlerError::Rolldown(format!("cannot build {format}")));
        }

        Ok(BuildArtifact {
            format,
            code: format!("/* {} */\nvar answer = 42;\n", format),
            source_map: Some(SourceMapJson::new(
                r#"{"version":3,"sources":["index.js"],"names":[],"mappings":"AAAA"}"#,
            )),
        })
    }
}

pub fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A package named "Widget Box" with an index.js.
pub fn widget_box() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "package.json",
        r#"{
  "name": "Widget Box",
  "dependencies": { "lodash": "^4.0.0" },
  "devDependencies": { "jest": "^29.0.0" },
  "peerDependencies": { "react": "^18.0.0", "lodash": "^4.0.0" }
}"#,
    );
    write(dir.path(), "index.js", "export const answer = 42;\n");
    dir
}
