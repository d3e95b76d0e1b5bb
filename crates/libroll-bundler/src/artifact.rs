//! Generated output for one format.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::format::ModuleFormat;

/// A serialized v3 source map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMapJson(String);

impl SourceMapJson {
    pub fn new(json: impl Into<String>) -> Self {
        Self(json.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Embeddable `data:` URL for a `sourceMappingURL` comment.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:application/json;charset=utf-8;base64,{}",
            STANDARD.encode(self.0.as_bytes())
        )
    }
}

/// Code and source map produced for a single format.
#[derive(Debug, Clone)]
pub struct BuildArtifact {
    pub format: ModuleFormat,
    pub code: String,
    pub source_map: Option<SourceMapJson>,
}

impl BuildArtifact {
    /// File contents: the code followed by a trailing `sourceMappingURL` line.
    ///
    /// Without a map the comment still ends the file, pointing at an empty map.
    pub fn contents(&self) -> String {
        let url = match &self.source_map {
            Some(map) => map.to_data_url(),
            None => SourceMapJson::new(EMPTY_MAP).to_data_url(),
        };
        format!("{}\n//# sourceMappingURL={}", self.code.trim_end_matches('\n'), url)
    }
}

const EMPTY_MAP: &str = r#"{"version":3,"sources":[],"names":[],"mappings":""}"#;
