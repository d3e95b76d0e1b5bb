//! Modules left unbundled, derived from the package's dependency fields.

use crate::package::PackageMetadata;

/// Collect the names of every declared dependency.
///
/// Categories are concatenated as peer, dev, then runtime dependencies.
/// Names declared in several categories appear once per category; consumers
/// treat the result as a membership list.
pub fn collect_external(pkg: Option<&PackageMetadata>) -> Vec<String> {
    let Some(pkg) = pkg else {
        return Vec::new();
    };

    [
        &pkg.peer_dependencies,
        &pkg.dev_dependencies,
        &pkg.dependencies,
    ]
    .into_iter()
    .flat_map(|deps| deps.keys().cloned())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_package_has_no_externals() {
        assert!(collect_external(None).is_empty());
    }

    #[test]
    fn concatenates_categories_keeping_duplicates() {
        let pkg = PackageMetadata::from_json(
            r#"{
                "dependencies": { "react": "^18", "lodash": "^4" },
                "devDependencies": { "react": "^18", "jest": "^29" },
                "peerDependencies": { "react-dom": "^18" }
            }"#,
            "package.json",
        )
        .unwrap();

        let external = collect_external(Some(&pkg));
        assert_eq!(
            external,
            vec!["react-dom", "react", "jest", "react", "lodash"]
        );
        assert_eq!(external.iter().filter(|n| *n == "react").count(), 2);
    }
}
