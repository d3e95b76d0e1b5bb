//! Output module formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Module format of one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// Universal module definition (AMD, CommonJS and a browser global).
    Umd,
    /// ECMAScript modules.
    Es,
    /// Self-executing function assigning a browser global.
    Iife,
    /// CommonJS.
    Cjs,
}

impl ModuleFormat {
    /// Formats written when none are requested explicitly.
    pub const DEFAULTS: [ModuleFormat; 3] = [ModuleFormat::Umd, ModuleFormat::Es, ModuleFormat::Iife];

    /// Every supported format.
    pub const ALL: [ModuleFormat; 4] = [
        ModuleFormat::Umd,
        ModuleFormat::Es,
        ModuleFormat::Iife,
        ModuleFormat::Cjs,
    ];

    /// File name suffix, as in `dist/<name>.<suffix>.js`.
    pub fn suffix(self) -> &'static str {
        match self {
            ModuleFormat::Umd => "umd",
            ModuleFormat::Es => "es",
            ModuleFormat::Iife => "iife",
            ModuleFormat::Cjs => "cjs",
        }
    }

    /// Whether the format exposes exports through a named global.
    pub fn needs_global_name(self) -> bool {
        matches!(self, ModuleFormat::Umd | ModuleFormat::Iife)
    }

    pub(crate) fn to_rolldown(self) -> rolldown::OutputFormat {
        match self {
            ModuleFormat::Umd => rolldown::OutputFormat::Umd,
            ModuleFormat::Es => rolldown::OutputFormat::Esm,
            ModuleFormat::Iife => rolldown::OutputFormat::Iife,
            ModuleFormat::Cjs => rolldown::OutputFormat::Cjs,
        }
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for ModuleFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "umd" => Ok(ModuleFormat::Umd),
            "es" | "esm" => Ok(ModuleFormat::Es),
            "iife" => Ok(ModuleFormat::Iife),
            "cjs" | "commonjs" => Ok(ModuleFormat::Cjs),
            other => Err(format!(
                "unknown format '{other}' (expected one of: umd, es, iife, cjs)"
            )),
        }
    }
}
