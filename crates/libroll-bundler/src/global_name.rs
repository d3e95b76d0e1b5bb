//! Browser global names for UMD and IIFE bundles.

/// Derive a JavaScript identifier from a package name.
///
/// The npm scope is dropped and the remaining words are camel-cased:
/// `"@acme/widget-box"` and `"Widget Box"` both become `widgetBox`.
pub fn global_name(package_name: &str) -> String {
    let unscoped = match package_name.strip_prefix('@') {
        Some(rest) => rest.split_once('/').map_or(rest, |(_, name)| name),
        None => package_name,
    };

    let mut ident = String::with_capacity(unscoped.len());
    for (i, word) in unscoped
        .split(|c: char| !c.is_alphanumeric() && c != '_' && c != '$')
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            // Case mapping can yield combining marks (`İ`), which are not identifier chars.
            if i == 0 {
                ident.extend(first.to_lowercase().filter(|c| c.is_alphanumeric()));
            } else {
                ident.extend(first.to_uppercase().filter(|c| c.is_alphanumeric()));
            }
            ident.push_str(chars.as_str());
        }
    }

    if ident.is_empty() {
        return "bundle".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Whether `s` is usable as a global variable name.
///
/// Must start with a letter, underscore, or dollar sign and contain only
/// letters, digits, underscores, or dollar signs.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_cases_words() {
        assert_eq!(global_name("widget-box"), "widgetBox");
        assert_eq!(global_name("Widget Box"), "widgetBox");
        assert_eq!(global_name("my.lib.core"), "myLibCore");
    }

    #[test]
    fn drops_npm_scope() {
        assert_eq!(global_name("@acme/widget-box"), "widgetBox");
    }

    #[test]
    fn leading_digit_is_prefixed() {
        assert_eq!(global_name("3d-engine"), "_3dEngine");
    }

    #[test]
    fn case_mapping_keeps_letters_only() {
        assert_eq!(global_name("İstanbul Kit"), "istanbulKit");
    }

    #[test]
    fn empty_falls_back() {
        assert_eq!(global_name("---"), "bundle");
    }

    #[test]
    fn derived_names_are_valid() {
        for name in ["widget-box", "@a/b", "3d", "Widget Box", "x", "İstanbul Kit"] {
            assert!(is_valid_identifier(&global_name(name)), "{name}");
        }
    }

    #[test]
    fn identifier_validation() {
        assert!(is_valid_identifier("MyLibrary"));
        assert!(is_valid_identifier("$jquery"));
        assert!(!is_valid_identifier("my-lib"));
        assert!(!is_valid_identifier("1lib"));
        assert!(!is_valid_identifier(""));
    }
}
