//! Output file naming.
//!
//! Every format of one target lands in the same `dist/` directory under the
//! same base name; only the `<format>.js` suffix differs.

use std::path::{Path, PathBuf};

use libroll_bundler::ModuleFormat;
use libroll_config::PackageMetadata;
use path_clean::PathClean;

/// Name used when there is no package descriptor and no override.
pub const FALLBACK_NAME: &str = "index";

/// Output directory name under the chosen root.
pub const DIST_DIR: &str = "dist";

/// Convert `name` to lowercase hyphen-case.
///
/// Words are split on any non-alphanumeric character, on lower-to-upper
/// transitions (`myPkg`), and before the last capital of an acronym
/// (`XMLHttp` becomes `xml-http`). Normalizing twice gives the same result.
pub fn param_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let lower_to_upper = prev.is_lowercase() || prev.is_ascii_digit();
            let acronym_end = prev.is_uppercase() && next_is_lower;
            if lower_to_upper || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }

        // Lowercasing may add combining marks (`İ`), which would split words next time.
        current.extend(c.to_lowercase().filter(|l| l.is_alphanumeric()));
    }

    if !current.is_empty() {
        words.push(current);
    }

    words.join("-")
}

/// Directory and base name shared by every format of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub dir: PathBuf,
    pub name: String,
}

impl Destination {
    /// Output path for `format`: `<dir>/<name>.<suffix>.js`.
    pub fn path_for(&self, format: ModuleFormat) -> PathBuf {
        self.dir.join(format!("{}.{}.js", self.name, format.suffix()))
    }
}

/// Choose where a target's bundles are written.
///
/// 1. No package descriptor: `<cwd>/dist/<override or "index">`.
/// 2. A name override: `<root>/dist/<override>`.
/// 3. No declared entry, or it is the file being built: `<root>/dist/<package name>`.
/// 4. Otherwise a secondary entry: `<cwd>/dist/<entry file stem>`.
pub fn compute_destination(
    root: Option<&Path>,
    cwd: &Path,
    entry: &Path,
    pkg: Option<&PackageMetadata>,
    dest_name: Option<&str>,
) -> Destination {
    let cwd_dist = cwd.join(DIST_DIR);

    let (Some(pkg), Some(root)) = (pkg, root) else {
        return Destination {
            dir: cwd_dist,
            name: param_case(dest_name.unwrap_or(FALLBACK_NAME)),
        };
    };

    let root_dist = root.join(DIST_DIR);

    if let Some(name) = dest_name {
        return Destination {
            dir: root_dist,
            name: param_case(name),
        };
    }

    let entry_stem = entry
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| FALLBACK_NAME.to_string());

    let is_main_entry = match &pkg.entry {
        None => true,
        Some(declared) => root.join(declared).clean() == absolute(entry, cwd),
    };

    if is_main_entry {
        let name = pkg.name.as_deref().unwrap_or(&entry_stem);
        return Destination {
            dir: root_dist,
            name: param_case(name),
        };
    }

    Destination {
        dir: cwd_dist,
        name: param_case(&entry_stem),
    }
}

fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        cwd.join(path).clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, entry: Option<&str>) -> PackageMetadata {
        PackageMetadata {
            name: Some(name.to_string()),
            entry: entry.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_param_case() {
        assert_eq!(param_case("Widget Box"), "widget-box");
        assert_eq!(param_case("my-pkg"), "my-pkg");
        assert_eq!(param_case("myPkg"), "my-pkg");
        assert_eq!(param_case("XMLHttpRequest"), "xml-http-request");
        assert_eq!(param_case("@acme/ui_kit"), "acme-ui-kit");
        assert_eq!(param_case("  MY   LIB  "), "my-lib");
        assert_eq!(param_case("v2Beta"), "v2-beta");
        assert_eq!(param_case(""), "");
    }

    #[test]
    fn test_param_case_is_idempotent() {
        for name in [
            "Widget Box",
            "XMLHttpRequest",
            "@acme/ui_kit",
            "a.b.c",
            "v2Beta",
            "İstanbul Kit",
        ] {
            let once = param_case(name);
            assert_eq!(param_case(&once), once, "{name}");
        }
    }

    #[test]
    fn test_param_case_drops_combining_marks() {
        assert_eq!(param_case("İstanbul Kit"), "istanbul-kit");
    }

    #[test]
    fn test_no_package_uses_cwd_index() {
        let dest = compute_destination(None, Path::new("/work"), Path::new("/p/a.js"), None, None);
        assert_eq!(dest.path_for(ModuleFormat::Umd), PathBuf::from("/work/dist/index.umd.js"));
    }

    #[test]
    fn test_no_package_with_override() {
        let dest = compute_destination(
            None,
            Path::new("/work"),
            Path::new("/p/a.js"),
            None,
            Some("My Lib"),
        );
        assert_eq!(dest.path_for(ModuleFormat::Es), PathBuf::from("/work/dist/my-lib.es.js"));
    }

    #[test]
    fn test_override_goes_under_root() {
        let pkg = pkg("widget", None);
        let dest = compute_destination(
            Some(Path::new("/p")),
            Path::new("/work"),
            Path::new("/p/index.js"),
            Some(&pkg),
            Some("Custom Name"),
        );
        assert_eq!(dest.path_for(ModuleFormat::Iife), PathBuf::from("/p/dist/custom-name.iife.js"));
    }

    #[test]
    fn test_package_name_for_main_entry() {
        let pkg = pkg("Widget Box", None);
        let dest = compute_destination(
            Some(Path::new("/p")),
            Path::new("/work"),
            Path::new("/p/index.js"),
            Some(&pkg),
            None,
        );
        assert_eq!(dest.path_for(ModuleFormat::Umd), PathBuf::from("/p/dist/widget-box.umd.js"));
    }

    #[test]
    fn test_declared_entry_matching_uses_package_name() {
        let pkg = pkg("my-pkg", Some("./src/../src/main.js"));
        let dest = compute_destination(
            Some(Path::new("/p")),
            Path::new("/work"),
            Path::new("/p/src/main.js"),
            Some(&pkg),
            None,
        );
        assert_eq!(dest.path_for(ModuleFormat::Es), PathBuf::from("/p/dist/my-pkg.es.js"));
    }

    #[test]
    fn test_secondary_entry_named_from_file() {
        let pkg = pkg("my-pkg", Some("src/main.js"));
        let dest = compute_destination(
            Some(Path::new("/p")),
            Path::new("/work"),
            Path::new("/p/src/extraHelpers.js"),
            Some(&pkg),
            None,
        );
        assert_eq!(
            dest.path_for(ModuleFormat::Es),
            PathBuf::from("/work/dist/extra-helpers.es.js")
        );
    }

    #[test]
    fn test_missing_name_falls_back_to_entry_stem() {
        let pkg = PackageMetadata::default();
        let dest = compute_destination(
            Some(Path::new("/p")),
            Path::new("/work"),
            Path::new("/p/index.js"),
            Some(&pkg),
            None,
        );
        assert_eq!(dest.name, "index");
        assert_eq!(dest.dir, PathBuf::from("/p/dist"));
    }

    #[test]
    fn test_formats_differ_only_in_suffix() {
        let pkg = pkg("lib", None);
        let dest = compute_destination(
            Some(Path::new("/p")),
            Path::new("/work"),
            Path::new("/p/index.js"),
            Some(&pkg),
            None,
        );
        let paths: Vec<_> = ModuleFormat::ALL.iter().map(|f| dest.path_for(*f)).collect();
        for path in &paths {
            assert_eq!(path.parent(), Some(Path::new("/p/dist")));
            assert!(path.file_name().unwrap().to_string_lossy().starts_with("lib."));
        }
    }
}
