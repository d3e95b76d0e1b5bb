//! Transform (Babel-style) configuration and typed views over it.

use serde_json::{Map, Value};

/// Where a [`TransformConfig`] was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `<root>/.babelrc`
    Babelrc,
    /// `<root>/.babelrc.json`
    BabelrcJson,
    /// The `babel` field of `<root>/package.json`
    PackageJson,
    /// Nothing found; empty object.
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfigSource::Babelrc => ".babelrc",
            ConfigSource::BabelrcJson => ".babelrc.json",
            ConfigSource::PackageJson => "package.json#babel",
            ConfigSource::Default => "<default>",
        };
        f.write_str(s)
    }
}

/// Transform configuration as found on disk.
///
/// The raw JSON object is kept verbatim; accessors interpret the parts the
/// transform plugin understands and ignore the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformConfig {
    raw: Map<String, Value>,
    source: ConfigSource,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            raw: Map::new(),
            source: ConfigSource::Default,
        }
    }
}

impl TransformConfig {
    pub fn new(raw: Map<String, Value>, source: ConfigSource) -> Self {
        Self { raw, source }
    }

    pub fn source(&self) -> ConfigSource {
        self.source
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Preset names, accepting both `"name"` and `["name", { ... }]` items.
    pub fn presets(&self) -> Vec<&str> {
        item_names(self.raw.get("presets"))
    }

    /// Plugin names, accepting both `"name"` and `["name", { ... }]` items.
    pub fn plugins(&self) -> Vec<&str> {
        item_names(self.raw.get("plugins"))
    }

    /// Whether a preset is configured under any of its conventional spellings.
    ///
    /// `has_preset("react")` matches `react`, `babel-preset-react`,
    /// `@babel/preset-react` and `@babel/react`.
    pub fn has_preset(&self, short: &str) -> bool {
        self.presets()
            .into_iter()
            .any(|name| normalize_item_name(name, "preset") == short)
    }

    /// Whether a plugin is configured under any of its conventional spellings.
    pub fn has_plugin(&self, short: &str) -> bool {
        self.plugins()
            .into_iter()
            .any(|name| normalize_item_name(name, "plugin") == short)
    }

    /// Path fragments excluded from transformation.
    pub fn ignore(&self) -> Vec<&str> {
        string_list(self.raw.get("ignore"))
    }

    /// Path fragments that alone are transformed, when non-empty.
    pub fn only(&self) -> Vec<&str> {
        string_list(self.raw.get("only"))
    }

    /// Whether a module id is subject to transformation under `only`/`ignore`.
    pub fn applies_to(&self, id: &str) -> bool {
        if self.ignore().iter().any(|p| id.contains(p)) {
            return false;
        }
        let only = self.only();
        only.is_empty() || only.iter().any(|p| id.contains(p))
    }
}

fn item_names(value: Option<&Value>) -> Vec<&str> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(name.as_str()),
            Value::Array(pair) => pair.first().and_then(Value::as_str),
            _ => None,
        })
        .collect()
}

fn string_list(value: Option<&Value>) -> Vec<&str> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(s)) => vec![s.as_str()],
        _ => Vec::new(),
    }
}

/// Strip the conventional `@babel/`, `babel-<kind>-` and `<kind>-` prefixes.
fn normalize_item_name<'a>(name: &'a str, kind: &str) -> &'a str {
    let name = name.strip_prefix("@babel/").unwrap_or(name);
    let name = name.strip_prefix("babel-").unwrap_or(name);
    name.strip_prefix(kind)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(name)
}
