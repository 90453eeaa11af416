use std::fs;
use viewinject_build::{BuildError, Error, GeneratorConfig, ManifestError, check, generate};

const MANIFEST: &str = r#"
[[class]]
name = "com.example.MainActivity"
source = "src/com/example/MainActivity.java"

[[class.member]]
kind = "field"
name = "title"
type = "android.widget.TextView"
line = 12
bind_view = 10

[[class.member]]
kind = "field"
name = "submit"
type = "android.widget.Button"
bind_view = 5

[[class.member]]
kind = "method"
name = "onSubmit"
type = "void"
params = ["android.view.View"]
on_click = [5]

[[class]]
name = "com.example.Broken"

[[class.member]]
kind = "field"
name = "a"
type = "android.view.View"
bind_view = 7

[[class.member]]
kind = "field"
name = "b"
type = "android.view.View"
bind_view = 7

[[class.member]]
kind = "local_variable"
name = "temp"
type = "android.view.View"
bind_view = 3
"#;

#[test]
fn generate_writes_one_file_per_clean_class() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let manifest = dir.path().join("viewinject.toml");
    fs::write(&manifest, MANIFEST).expect("manifest should be written");
    let out = dir.path().join("out");

    let report = generate(&manifest, &out, GeneratorConfig::default())
        .expect("generation should run to completion");

    let injector = out.join("com/example/MainActivity$$ViewInjector.java");
    assert_eq!(report.written, [injector.clone()]);
    assert_eq!(report.generated_count(), 1);
    assert_eq!(report.rounds.len(), 2, "data round plus closing round");
    assert_eq!(report.rounds[0].skipped, ["com.example.Broken"]);

    // one conflict plus one placement error
    assert_eq!(report.error_count(), 2);
    assert!(!report.is_success());

    let text = fs::read_to_string(&injector).expect("injector should exist");
    let submit = text
        .find("host.submit = ")
        .expect("field statement should be present");
    let listener = text
        .find("findViewById(source, 5).setOnClickListener")
        .expect("listener statement should be present");
    let title = text
        .find("host.title = ")
        .expect("field statement should be present");
    assert!(submit < listener && listener < title, "id 5 then id 10:\n{text}");

    let err = report
        .into_result()
        .expect_err("errors should fail the build");
    assert!(matches!(err, BuildError::Diagnostics(2)));
}

#[test]
fn check_reports_without_writing() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let manifest = dir.path().join("viewinject.toml");
    fs::write(&manifest, MANIFEST).expect("manifest should be written");

    let report = check(&manifest, GeneratorConfig::default()).expect("check should run");

    assert!(report.written.is_empty());
    assert_eq!(report.generated_count(), 1);
    assert_eq!(report.error_count(), 2);

    let entries = fs::read_dir(dir.path())
        .expect("tempdir should be readable")
        .count();
    assert_eq!(entries, 1, "only the manifest itself");
}

#[test]
fn json_manifest_and_custom_config() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let manifest = dir.path().join("viewinject.json");
    fs::write(
        &manifest,
        r#"{
            "source_version": 7,
            "class": [{
                "name": "Main",
                "member": [
                    { "kind": "method", "name": "onTap", "type": "void", "on_click": [1] }
                ]
            }]
        }"#,
    )
    .expect("manifest should be written");

    let config = GeneratorConfig {
        class_suffix: "_Injector".to_string(),
        header: false,
        ..GeneratorConfig::default()
    };
    let report = generate(&manifest, dir.path(), config).expect("generation should run");

    assert!(report.is_success());
    let text = fs::read_to_string(dir.path().join("Main_Injector.java"))
        .expect("root-package injector should exist");
    assert!(text.starts_with("public class Main_Injector"));
    assert!(text.contains("new android.view.View.OnClickListener()"));
    assert!(text.contains("host.onTap();"));
}

#[test]
fn invalid_manifest_fails_before_processing() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let manifest = dir.path().join("viewinject.toml");
    fs::write(&manifest, "[[class]]\nname = \"com.new.Foo\"\n").expect("manifest should be written");

    let err = check(&manifest, GeneratorConfig::default())
        .expect_err("reserved package segment should fail");

    assert!(
        matches!(err, Error::ManifestError(ManifestError::Invalid { .. })),
        "got: {err}"
    );
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let manifest = dir.path().join("viewinject.yaml");
    fs::write(&manifest, "").expect("manifest should be written");

    let err = check(&manifest, GeneratorConfig::default()).expect_err("yaml is unsupported");

    assert!(matches!(
        err,
        Error::ManifestError(ManifestError::UnsupportedFormat(_))
    ));
}
