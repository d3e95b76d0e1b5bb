use libroll_bundler::{BundleRequest, BundleService, ModuleFormat, RolldownBundler};
use std::fs;
use tempfile::TempDir;

fn create_library_project() -> TempDir {
    let dir = TempDir::new().expect("temp dir");

    fs::write(
        dir.path().join("math.js"),
        r#"
export function add(a, b) {
    return a + b;
}
"#,
    )
    .expect("write math");

    fs::write(
        dir.path().join("index.js"),
        r#"
import { add } from './math.js';
import { render } from 'preact';

export const answer = add(40, 2);
export function mount(node) {
    return render(answer, node);
}
"#,
    )
    .expect("write index");

    dir
}

fn request(project: &TempDir) -> BundleRequest {
    BundleRequest::new(project.path().join("index.js"), project.path())
        .with_external(vec!["preact".to_string()])
        .with_module_name(Some("widget-box".to_string()))
}

#[tokio::test]
async fn es_output_inlines_local_modules() {
    let project = create_library_project();

    let artifact = RolldownBundler::new()
        .generate(&request(&project), ModuleFormat::Es)
        .await
        .expect("es build");

    assert_eq!(artifact.format, ModuleFormat::Es);
    assert!(artifact.code.contains("function add"));
    assert!(artifact.code.contains("from \"preact\"") || artifact.code.contains("from 'preact'"));
    assert!(artifact.source_map.is_some());
}

#[tokio::test]
async fn umd_output_exposes_global_name() {
    let project = create_library_project();

    let artifact = RolldownBundler::new()
        .generate(&request(&project), ModuleFormat::Umd)
        .await
        .expect("umd build");

    assert!(artifact.code.contains("widgetBox"));
    let contents = artifact.contents();
    let last = contents.lines().last().expect("non-empty output");
    assert!(last.starts_with("//# sourceMappingURL=data:application/json;charset=utf-8;base64,"));
}

#[tokio::test]
async fn every_format_builds() {
    let project = create_library_project();
    let bundler = RolldownBundler::new();
    let request = request(&project);

    for format in ModuleFormat::ALL {
        let artifact = bundler
            .generate(&request, format)
            .await
            .unwrap_or_else(|e| panic!("{format} build failed: {e}"));
        assert_eq!(artifact.format, format);
        assert!(!artifact.code.is_empty());
    }
}

#[tokio::test]
async fn missing_import_is_a_rolldown_error() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("index.js"), "import './missing.js';\n").expect("write index");

    let err = RolldownBundler::new()
        .generate(&BundleRequest::new(dir.path().join("index.js"), dir.path()), ModuleFormat::Es)
        .await
        .expect_err("unresolved import");

    assert!(matches!(err, libroll_bundler::BundlerError::Rolldown(_)));
}
