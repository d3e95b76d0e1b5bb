use clap::ValueEnum;
use libroll_bundler::ModuleFormat;

/// Output format for bundled code
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Format {
    /// Universal module definition
    ///
    /// Works as an AMD module, a CommonJS module, or a browser global named
    /// after the package.
    #[value(name = "umd")]
    Umd,

    /// ECMAScript modules (import/export syntax)
    #[value(name = "es", alias = "esm")]
    Es,

    /// Immediately Invoked Function Expression
    ///
    /// Assigns the exports to a browser global. Suitable for script tags.
    #[value(name = "iife")]
    Iife,

    /// CommonJS modules (require/module.exports)
    #[value(name = "cjs")]
    Cjs,
}

impl From<Format> for ModuleFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Umd => ModuleFormat::Umd,
            Format::Es => ModuleFormat::Es,
            Format::Iife => ModuleFormat::Iife,
            Format::Cjs => ModuleFormat::Cjs,
        }
    }
}
